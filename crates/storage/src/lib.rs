//! SQLite-backed log of outgoing CRM webhooks.
//!
//! Every webhook the CRM dispatches is recorded here before the HTTP request
//! goes out, giving an audit trail of which events were announced, when, and
//! on whose behalf, independent of whether the receiver accepted them.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use storage::{LogStore, WebhookLog};
//!
//! let store = LogStore::open("webhooks.db")?;
//! store.append(&WebhookLog::new(
//!     "lead.created",
//!     json!({ "lead_id": "L-1" }),
//!     Some("user-1".to_string()),
//! ))?;
//!
//! for log in store.recent(20, Some("lead.created"))? {
//!     println!("{} {} {}", log.created_at, log.event, log.payload);
//! }
//! # Ok::<(), storage::Error>(())
//! ```

mod error;
mod log;
mod store;

pub use error::{Error, Result};
pub use log::WebhookLog;
pub use store::LogStore;
