//! Webhook dispatch.

use crate::{Channel, Error, Payload, ReportAction, ReportKind, Result};
use reqwest::Url;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::{LogStore, WebhookLog};
use tracing::{debug, error, info};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A log store shared by every notifier of a process.
pub type SharedStore = Arc<Mutex<LogStore>>;

/// Outcome of a single webhook send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// No URL is configured for the channel; nothing was sent or logged.
    Skipped,
    /// The receiver answered with a success status.
    Delivered { status: u16 },
    /// The receiver answered with a non-success status.
    Rejected { status: u16, reason: String },
    /// The request never got a response.
    Failed { reason: String },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered { .. })
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped (no URL configured)"),
            Self::Delivered { status } => write!(f, "delivered ({status})"),
            Self::Rejected { status, reason } => write!(f, "rejected ({status} {reason})"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Builder for creating a notifier.
#[derive(Clone)]
pub struct NotifierBuilder {
    channel: Channel,
    url: Option<String>,
    timeout: Duration,
    store: Option<SharedStore>,
}

impl NotifierBuilder {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            url: None,
            timeout: DEFAULT_TIMEOUT,
            store: None,
        }
    }

    /// Set the destination URL. Blank values count as unset.
    pub fn url(mut self, url: Option<impl Into<String>>) -> Self {
        self.url = url.map(Into::into).filter(|u| !u.trim().is_empty());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Record every dispatched webhook in this store.
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Notifier> {
        let url = self
            .url
            .map(|raw| {
                Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl {
                    url: raw.clone(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(Notifier {
            channel: self.channel,
            url,
            client,
            store: self.store,
        })
    }
}

/// Sends event payloads to one channel's webhook URL.
pub struct Notifier {
    channel: Channel,
    url: Option<Url>,
    client: reqwest::Client,
    store: Option<SharedStore>,
}

impl Notifier {
    pub fn builder(channel: Channel) -> NotifierBuilder {
        NotifierBuilder::new(channel)
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Log the payload, then POST it as JSON.
    ///
    /// Never fails: every problem is logged and reported in the returned
    /// [`Delivery`].
    pub async fn send(&self, payload: &Payload) -> Delivery {
        let Some(url) = &self.url else {
            info!(
                channel = %self.channel,
                event = %payload.event,
                "{} URL not configured, skipping",
                self.channel
            );
            return Delivery::Skipped;
        };

        self.record(payload);

        let response = self.client.post(url.clone()).json(payload).send().await;

        match response {
            Ok(response) if response.status().is_success() => {
                let status = response.status();
                debug!(channel = %self.channel, event = %payload.event, %status, "webhook delivered");
                Delivery::Delivered {
                    status: status.as_u16(),
                }
            }
            Ok(response) => {
                let status = response.status();
                error!(channel = %self.channel, event = %payload.event, %status, "{} failed", self.channel);
                Delivery::Rejected {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                }
            }
            Err(e) => {
                error!(channel = %self.channel, event = %payload.event, error = %e, "error sending {}", self.channel);
                Delivery::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn record(&self, payload: &Payload) {
        let Some(store) = &self.store else {
            return;
        };

        let log = WebhookLog::new(
            payload.event.clone(),
            payload.data.clone(),
            payload.user_id.clone(),
        );
        let result = match store.lock() {
            Ok(store) => store.append(&log),
            Err(poisoned) => poisoned.into_inner().append(&log),
        };
        if let Err(e) = result {
            error!(channel = %self.channel, event = %payload.event, error = %e, "error logging {}", self.channel);
        }
    }
}

/// The three CRM notifiers, one per channel.
pub struct Notifiers {
    pub general: Notifier,
    pub setter_reports: Notifier,
    pub closer_reports: Notifier,
}

impl Notifiers {
    /// Notifier for a channel.
    pub fn get(&self, channel: Channel) -> &Notifier {
        match channel {
            Channel::General => &self.general,
            Channel::SetterReport => &self.setter_reports,
            Channel::CloserReport => &self.closer_reports,
        }
    }

    pub async fn lead_created(&self, lead_id: &str, user_id: &str) -> Delivery {
        self.general
            .send(&Payload::lead_created(lead_id, user_id))
            .await
    }

    pub async fn lead_status_changed(
        &self,
        lead_id: &str,
        old_status: &str,
        new_status: &str,
        user_id: &str,
    ) -> Delivery {
        self.general
            .send(&Payload::lead_status_changed(
                lead_id, old_status, new_status, user_id,
            ))
            .await
    }

    pub async fn lead_deleted(&self, lead_id: &str, user_id: &str) -> Delivery {
        self.general
            .send(&Payload::lead_deleted(lead_id, user_id))
            .await
    }

    /// Announce a setter or closer report change on that report's channel.
    pub async fn report(
        &self,
        kind: ReportKind,
        action: ReportAction,
        report_id: &str,
        user_id: &str,
    ) -> Delivery {
        self.get(kind.channel())
            .send(&Payload::report(kind, action, report_id, user_id))
            .await
    }
}
