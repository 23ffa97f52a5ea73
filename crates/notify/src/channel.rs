use serde::{Deserialize, Serialize};
use std::fmt;

/// A webhook destination. Each channel has its own URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Lead lifecycle events.
    General,
    SetterReport,
    CloserReport,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::General, Channel::SetterReport, Channel::CloserReport];

    /// Environment variable that overrides the configured URL.
    pub fn env_var(self) -> &'static str {
        match self {
            Channel::General => "WEBHOOK_URL",
            Channel::SetterReport => "SETTER_REPORT_WEBHOOK_URL",
            Channel::CloserReport => "CLOSER_REPORT_WEBHOOK_URL",
        }
    }

    /// Human-readable name used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Channel::General => "webhook",
            Channel::SetterReport => "setter report webhook",
            Channel::CloserReport => "closer report webhook",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two kinds of daily report, each with its own channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Setter,
    Closer,
}

impl ReportKind {
    pub fn channel(self) -> Channel {
        match self {
            ReportKind::Setter => Channel::SetterReport,
            ReportKind::Closer => Channel::CloserReport,
        }
    }

    fn event_prefix(self) -> &'static str {
        match self {
            ReportKind::Setter => "setter_report",
            ReportKind::Closer => "closer_report",
        }
    }

    /// Full event name, e.g. `setter_report.updated`.
    pub fn event(self, action: ReportAction) -> String {
        format!("{}.{}", self.event_prefix(), action.as_str())
    }
}

/// What happened to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportAction {
    Created,
    Updated,
    Deleted,
}

impl ReportAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportAction::Created => "created",
            ReportAction::Updated => "updated",
            ReportAction::Deleted => "deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_event_names() {
        assert_eq!(ReportKind::Setter.event(ReportAction::Created), "setter_report.created");
        assert_eq!(ReportKind::Closer.event(ReportAction::Deleted), "closer_report.deleted");
        assert_eq!(ReportKind::Closer.channel(), Channel::CloserReport);
    }

    #[test]
    fn env_vars_are_distinct() {
        assert_eq!(Channel::General.env_var(), "WEBHOOK_URL");
        assert_eq!(Channel::SetterReport.env_var(), "SETTER_REPORT_WEBHOOK_URL");
        assert_eq!(Channel::CloserReport.env_var(), "CLOSER_REPORT_WEBHOOK_URL");
    }
}
