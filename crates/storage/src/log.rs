//! Webhook log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One webhook as recorded before it is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookLog {
    pub id: Uuid,
    pub event: String,
    pub payload: serde_json::Value,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WebhookLog {
    pub fn new(
        event: impl Into<String>,
        payload: serde_json::Value,
        user_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event: event.into(),
            payload,
            user_id,
            created_at: Utc::now(),
        }
    }
}
