//! Outgoing webhooks for CRM domain events.
//!
//! The CRM announces lead and report changes to external automation by
//! POSTing a small JSON [`Payload`] to a per-[`Channel`] URL. Each dispatched
//! payload is first recorded in the [`storage`] log.
//!
//! Delivery is best effort. A missing URL, a refusing receiver, or a network
//! error is logged through `tracing` and reported as a [`Delivery`]; it never
//! propagates as an error into the calling code.
//!
//! # Example
//!
//! ```no_run
//! use notify::{Channel, Notifier, Payload};
//!
//! # async fn example() -> notify::Result<()> {
//! let notifier = Notifier::builder(Channel::General)
//!     .url(Some("https://hooks.example.com/crm"))
//!     .build()?;
//!
//! let delivery = notifier.send(&Payload::lead_created("L-1", "user-1")).await;
//! println!("{delivery}");
//! # Ok(())
//! # }
//! ```

mod channel;
mod error;
mod notifier;
mod payload;

pub use channel::{Channel, ReportAction, ReportKind};
pub use error::{Error, Result};
pub use notifier::{DEFAULT_TIMEOUT, Delivery, Notifier, NotifierBuilder, Notifiers, SharedStore};
pub use payload::Payload;
