//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The webhook log database does not exist.
    ///
    /// This typically means no webhook has been sent yet.
    #[error("database not found at {path}. Run 'crm notify' first")]
    DatabaseNotFound { path: PathBuf },

    /// A status change was requested without both statuses.
    #[error("lead-status-changed needs --old-status and --new-status")]
    MissingStatus,

    /// Configuration is invalid or unreadable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A notifier could not be built.
    #[error(transparent)]
    Notify(#[from] notify::Error),

    /// An error occurred in the storage layer.
    #[error(transparent)]
    Storage(#[from] storage::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
