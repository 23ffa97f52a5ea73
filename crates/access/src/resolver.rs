//! Role resolution and access checks.

use crate::{Permissions, Role, Section, SectionSet};
use tracing::warn;

/// Result of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Answers access questions against the static permission table.
///
/// Role values arrive untrusted from the session layer, so every entry
/// point takes `Option<&str>`. A missing role and a role that matches
/// nothing both resolve to [`Permissions::NONE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    sections: SectionSet,
}

impl Resolver {
    pub fn new(sections: SectionSet) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> SectionSet {
        self.sections
    }

    /// Look up the capability set for a raw role value.
    pub fn resolve_capabilities(&self, role: Option<&str>) -> Permissions {
        let Some(raw) = present(role) else {
            return Permissions::NONE;
        };

        match Role::normalize(raw) {
            Some(role) => role.permissions().restrict_to(self.sections),
            None => {
                warn!(role = raw, "unknown role, defaulting to no permissions");
                Permissions::NONE
            }
        }
    }

    /// Whether `role` may access `section`.
    pub fn has_access(&self, role: Option<&str>, section: Section) -> bool {
        if present(role).is_none() {
            return false;
        }
        self.resolve_capabilities(role).get(section)
    }

    /// Same as [`Resolver::has_access`]; reads better at route guards.
    pub fn can_access_section(&self, role: Option<&str>, section: Section) -> bool {
        self.has_access(role, section)
    }

    /// Check access for an untyped section key, explaining any denial.
    pub fn check(&self, role: Option<&str>, section_key: &str) -> Decision {
        let Ok(section) = section_key.parse::<Section>() else {
            return Decision::Deny {
                reason: format!("unknown section '{section_key}'"),
            };
        };
        if !self.sections.contains(section) {
            return Decision::Deny {
                reason: format!("section '{section}' is not enabled"),
            };
        }

        let Some(raw) = present(role) else {
            return Decision::Deny {
                reason: "no role".to_string(),
            };
        };
        let Some(parsed) = Role::normalize(raw) else {
            warn!(role = raw, "unknown role, defaulting to no permissions");
            return Decision::Deny {
                reason: format!("unknown role '{raw}'"),
            };
        };

        if parsed.permissions().get(section) {
            Decision::Allow
        } else {
            Decision::Deny {
                reason: format!("role '{parsed}' cannot access '{section}'"),
            }
        }
    }
}

// An empty role string is the same as no role.
fn present(role: Option<&str>) -> Option<&str> {
    role.filter(|raw| !raw.is_empty())
}

/// [`Resolver::resolve_capabilities`] with the default section set.
pub fn resolve_capabilities(role: Option<&str>) -> Permissions {
    Resolver::default().resolve_capabilities(role)
}

/// [`Resolver::has_access`] with the default section set.
pub fn has_access(role: Option<&str>, section: Section) -> bool {
    Resolver::default().has_access(role, section)
}

/// [`Resolver::can_access_section`] with the default section set.
pub fn can_access_section(role: Option<&str>, section: Section) -> bool {
    Resolver::default().can_access_section(role, section)
}
