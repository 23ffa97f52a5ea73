use thiserror::Error;

/// Errors raised while configuring a notifier.
///
/// Sending never fails; see [`crate::Delivery`] for per-request outcomes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
