//! Access error types.

use thiserror::Error;

/// Errors raised when parsing untrusted role or section strings.
///
/// The resolver itself never returns these: an unknown role or section
/// collapses to a denial. They exist for callers that want a typed value
/// up front (configuration, CLI arguments).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The string does not name a declared role.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The string does not name a declared section.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// The string does not name a section set.
    #[error("unknown section set: {0} (expected \"core\" or \"extended\")")]
    UnknownSectionSet(String),
}

pub type Result<T> = std::result::Result<T, Error>;
