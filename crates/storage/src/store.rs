//! SQLite webhook log store.

use crate::{Error, Result, WebhookLog};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use std::path::Path;

/// SQLite-backed log of dispatched webhooks.
pub struct LogStore {
    conn: Connection,
}

impl LogStore {
    /// Open or create a log store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory log store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS webhook_logs (
                id TEXT PRIMARY KEY,
                event TEXT NOT NULL,
                payload TEXT NOT NULL,
                user_id TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_webhook_logs_event
                ON webhook_logs(event, created_at);
            "#,
        )?;
        Ok(())
    }

    /// Append a log record.
    pub fn append(&self, log: &WebhookLog) -> Result<()> {
        self.conn.execute(
            "INSERT INTO webhook_logs (id, event, payload, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                log.id.to_string(),
                log.event,
                serde_json::to_string(&log.payload)?,
                log.user_id,
                format_timestamp(&log.created_at),
            ],
        )?;
        Ok(())
    }

    /// Most recent records first, optionally restricted to one event name.
    pub fn recent(&self, limit: usize, event: Option<&str>) -> Result<Vec<WebhookLog>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT id, event, payload, user_id, created_at FROM webhook_logs
             WHERE (?1 IS NULL OR event = ?1)
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2",
        )?;

        let rows = stmt
            .query_map(params![event, limit], |row| {
                let id: String = row.get(0)?;
                let event: String = row.get(1)?;
                let payload: String = row.get(2)?;
                let user_id: Option<String> = row.get(3)?;
                let created_at: String = row.get(4)?;
                Ok((id, event, payload, user_id, created_at))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, event, payload, user_id, created_at)| -> Result<WebhookLog> {
                Ok(WebhookLog {
                    id: id.parse().map_err(|e: uuid::Error| Error::InvalidRow {
                        id: id.clone(),
                        reason: e.to_string(),
                    })?,
                    event,
                    payload: serde_json::from_str(&payload)?,
                    user_id,
                    created_at: created_at.parse().map_err(|e: chrono::ParseError| {
                        Error::InvalidRow {
                            id: id.clone(),
                            reason: e.to_string(),
                        }
                    })?,
                })
            })
            .collect()
    }

    /// Number of records in the log.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM webhook_logs", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

// Fixed-width so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
