//! The static role-to-permission table.

use crate::{Error, Result, Role, Section};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The capability set of a single role: one flag per section.
///
/// Each section is a named field, so a table entry that forgets a section
/// does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    pub dashboard: bool,
    pub leads: bool,
    pub sales: bool,
    pub documents: bool,
    pub finances: bool,
    pub reports: bool,
    pub settings: bool,
    pub operations: bool,
}

impl Permissions {
    /// No access to anything.
    pub const NONE: Permissions = Permissions {
        dashboard: false,
        leads: false,
        sales: false,
        documents: false,
        finances: false,
        reports: false,
        settings: false,
        operations: false,
    };

    /// Read the flag for a section.
    pub fn get(&self, section: Section) -> bool {
        match section {
            Section::Dashboard => self.dashboard,
            Section::Leads => self.leads,
            Section::Sales => self.sales,
            Section::Documents => self.documents,
            Section::Finances => self.finances,
            Section::Reports => self.reports,
            Section::Settings => self.settings,
            Section::Operations => self.operations,
        }
    }

    /// Sections this set grants, in declaration order.
    pub fn granted(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.get(*s))
    }

    /// Clear every section the given set does not declare.
    pub fn restrict_to(self, sections: SectionSet) -> Self {
        match sections {
            SectionSet::Extended => self,
            SectionSet::Core => Self {
                operations: false,
                ..self
            },
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::NONE
    }
}

static ADMIN: Permissions = Permissions {
    dashboard: true,
    leads: true,
    sales: true,
    documents: true,
    finances: true,
    reports: true,
    settings: true,
    operations: true,
};

static CLOSER: Permissions = Permissions {
    dashboard: true,
    leads: true,
    sales: true,
    documents: true,
    finances: false,
    reports: true,
    settings: false,
    operations: false,
};

static SETTER: Permissions = Permissions {
    dashboard: true,
    leads: true,
    sales: false,
    documents: false,
    finances: false,
    reports: true,
    settings: false,
    operations: false,
};

static USER: Permissions = Permissions {
    dashboard: true,
    leads: false,
    sales: false,
    documents: false,
    finances: false,
    reports: false,
    settings: false,
    operations: false,
};

impl Role {
    /// This role's entry in the permission table.
    pub fn permissions(self) -> &'static Permissions {
        match self {
            Role::Admin => &ADMIN,
            Role::Closer => &CLOSER,
            Role::Setter => &SETTER,
            Role::User => &USER,
        }
    }
}

static CORE_SECTIONS: [Section; 7] = [
    Section::Dashboard,
    Section::Leads,
    Section::Sales,
    Section::Documents,
    Section::Finances,
    Section::Reports,
    Section::Settings,
];

/// Which sections a deployment declares.
///
/// Two versions of the table exist in the field: one without the
/// `operations` section and one with it. Both are supported; `Extended`
/// is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionSet {
    /// Everything except `operations`.
    Core,
    /// Every section, including `operations`.
    #[default]
    Extended,
}

impl SectionSet {
    pub fn sections(self) -> &'static [Section] {
        match self {
            SectionSet::Core => &CORE_SECTIONS,
            SectionSet::Extended => &Section::ALL,
        }
    }

    pub fn contains(self, section: Section) -> bool {
        match self {
            SectionSet::Core => section != Section::Operations,
            SectionSet::Extended => true,
        }
    }
}

impl FromStr for SectionSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(SectionSet::Core),
            "extended" => Ok(SectionSet::Extended),
            _ => Err(Error::UnknownSectionSet(s.to_string())),
        }
    }
}
