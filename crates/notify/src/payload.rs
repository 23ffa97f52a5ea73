//! Webhook request bodies.

use crate::{ReportAction, ReportKind};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The JSON body POSTed to a webhook receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub event: String,
    pub data: Value,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Payload {
    pub fn new(event: impl Into<String>, data: Value, user_id: Option<String>) -> Self {
        Self {
            event: event.into(),
            data,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_id,
        }
    }

    pub fn lead_created(lead_id: &str, user_id: &str) -> Self {
        Self::new(
            "lead.created",
            json!({ "lead_id": lead_id }),
            Some(user_id.to_string()),
        )
    }

    pub fn lead_status_changed(
        lead_id: &str,
        old_status: &str,
        new_status: &str,
        user_id: &str,
    ) -> Self {
        Self::new(
            "lead.status_changed",
            json!({
                "lead_id": lead_id,
                "old_status": old_status,
                "new_status": new_status,
            }),
            Some(user_id.to_string()),
        )
    }

    pub fn lead_deleted(lead_id: &str, user_id: &str) -> Self {
        Self::new(
            "lead.deleted",
            json!({ "lead_id": lead_id }),
            Some(user_id.to_string()),
        )
    }

    pub fn report(kind: ReportKind, action: ReportAction, report_id: &str, user_id: &str) -> Self {
        Self::new(
            kind.event(action),
            json!({ "report_id": report_id }),
            Some(user_id.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn lead_status_changed_body() {
        let payload = Payload::lead_status_changed("L-9", "new", "contacted", "u-1");
        let body = serde_json::to_value(&payload).unwrap();

        assert_eq!(body["event"], "lead.status_changed");
        assert_eq!(
            body["data"],
            json!({ "lead_id": "L-9", "old_status": "new", "new_status": "contacted" })
        );
        assert_eq!(body["user_id"], "u-1");
    }

    #[test]
    fn report_body() {
        let payload = Payload::report(ReportKind::Setter, ReportAction::Updated, "R-3", "u-2");
        assert_eq!(payload.event, "setter_report.updated");
        assert_eq!(payload.data, json!({ "report_id": "R-3" }));
    }

    #[test]
    fn timestamp_is_utc_millis() {
        let payload = Payload::lead_created("L-1", "u-1");
        assert!(payload.timestamp.ends_with('Z'));
        // e.g. 2024-05-01T12:00:00.123Z
        assert_eq!(payload.timestamp.len(), 24);
        assert!(DateTime::parse_from_rfc3339(&payload.timestamp).is_ok());
    }

    #[test]
    fn absent_user_is_omitted() {
        let payload = Payload::new("lead.created", json!({}), None);
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("user_id").is_none());
    }
}
