//! Role-based access control for the CRM.
//!
//! Core principle: **a role that cannot be resolved gets nothing.**
//!
//! Every user carries one [`Role`] issued by the identity provider. Each role
//! maps to a fixed [`Permissions`] set covering every [`Section`] of the
//! application. The table is static data; lookups are pure and may run from
//! any thread without synchronization.
//!
//! # Example
//!
//! ```
//! use access::{Section, has_access, resolve_capabilities};
//!
//! assert!(has_access(Some("Admin"), Section::Finances));
//! assert!(!has_access(Some("setter"), Section::Finances));
//! assert!(!has_access(None, Section::Dashboard));
//!
//! let perms = resolve_capabilities(Some("closer"));
//! assert!(perms.documents);
//! ```

mod error;
mod permissions;
mod resolver;
mod role;

pub use error::{Error, Result};
pub use permissions::{Permissions, SectionSet};
pub use resolver::{Decision, Resolver, can_access_section, has_access, resolve_capabilities};
pub use role::{Role, Section};
