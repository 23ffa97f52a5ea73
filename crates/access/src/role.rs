use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user role, as issued by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Closer,
    Setter,
    User,
}

impl Role {
    /// Every declared role, in table order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Closer, Role::Setter, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Closer => "closer",
            Role::Setter => "setter",
            Role::User => "user",
        }
    }

    /// Match an untrusted role string, ignoring ASCII case only.
    ///
    /// Padded or otherwise decorated strings do not match.
    pub fn normalize(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::normalize(s).ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

/// A protected functional area of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Leads,
    Sales,
    Documents,
    Finances,
    Reports,
    Settings,
    Operations,
}

impl Section {
    /// Every known section, including ones a deployment may not declare.
    pub const ALL: [Section; 8] = [
        Section::Dashboard,
        Section::Leads,
        Section::Sales,
        Section::Documents,
        Section::Finances,
        Section::Reports,
        Section::Settings,
        Section::Operations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Leads => "leads",
            Section::Sales => "sales",
            Section::Documents => "documents",
            Section::Finances => "finances",
            Section::Reports => "reports",
            Section::Settings => "settings",
            Section::Operations => "operations",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_ignores_case() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Closer".parse::<Role>().unwrap(), Role::Closer);
        assert_eq!("sEtTeR".parse::<Role>().unwrap(), Role::Setter);
    }

    #[test]
    fn test_role_parse_unknown() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, Error::UnknownRole("superuser".into()));
        assert!(Role::normalize("").is_none());
    }

    #[test]
    fn test_role_parse_rejects_padding() {
        assert!(" setter ".parse::<Role>().is_err());
        assert!(Role::normalize("\tadmin\n").is_none());
        assert!(Role::normalize("admin ").is_none());
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_section_parse() {
        assert_eq!("finances".parse::<Section>().unwrap(), Section::Finances);
        assert_eq!("Operations".parse::<Section>().unwrap(), Section::Operations);
        assert!(matches!(
            "billing".parse::<Section>(),
            Err(Error::UnknownSection(_))
        ));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Closer).unwrap(), "\"closer\"");
        let section: Section = serde_json::from_str("\"documents\"").unwrap();
        assert_eq!(section, Section::Documents);
    }
}
