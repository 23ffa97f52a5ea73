//! Configuration loading from crm.toml.

use access::SectionSet;
use notify::Channel;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Access control settings.
    #[serde(default)]
    pub access: AccessConfig,

    /// Webhook destinations.
    #[serde(default)]
    pub webhooks: WebhookConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccessConfig {
    /// Which permission table to enforce ("core" or "extended").
    #[serde(default)]
    pub sections: SectionSet,
}

#[derive(Debug, Deserialize)]
pub struct WebhookConfig {
    /// Lead events.
    pub url: Option<String>,

    pub setter_report_url: Option<String>,

    pub closer_report_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Webhook log database. Defaults to the data directory.
    pub database: Option<PathBuf>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            setter_report_url: None,
            closer_report_url: None,
            timeout_secs: default_timeout_secs(),
            database: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// Filter used when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    notify::DEFAULT_TIMEOUT.as_secs()
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Webhook URL for a channel, from the process environment or the file.
    pub fn webhook_url(&self, channel: Channel) -> Option<String> {
        self.webhook_url_with(channel, |key| std::env::var(key).ok())
    }

    /// Like [`Config::webhook_url`], reading the environment through `env`.
    pub fn webhook_url_with(
        &self,
        channel: Channel,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let configured = match channel {
            Channel::General => &self.webhooks.url,
            Channel::SetterReport => &self.webhooks.setter_report_url,
            Channel::CloserReport => &self.webhooks.closer_report_url,
        };
        env(channel.env_var())
            .filter(|url| !url.trim().is_empty())
            .or_else(|| configured.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.webhooks.timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.access.sections, SectionSet::Extended);
        assert_eq!(config.webhooks.timeout_secs, 10);
        assert_eq!(config.log.level, "info");
        assert!(config.webhooks.url.is_none());
    }

    #[test]
    fn parses_full_file() {
        let config = Config::parse(
            r#"
[access]
sections = "core"

[webhooks]
url = "https://hooks.example.com/leads"
setter_report_url = "https://hooks.example.com/setter"
timeout_secs = 3
database = "/var/lib/crm/webhooks.db"

[log]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.access.sections, SectionSet::Core);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.log.level, "debug");
        assert_eq!(
            config.webhooks.database.as_deref(),
            Some(Path::new("/var/lib/crm/webhooks.db"))
        );
        let no_env = |_: &str| None;
        assert_eq!(
            config.webhook_url_with(Channel::SetterReport, no_env).as_deref(),
            Some("https://hooks.example.com/setter")
        );
        assert_eq!(config.webhook_url_with(Channel::CloserReport, no_env), None);
    }

    #[test]
    fn environment_overrides_file() {
        let config = Config::parse(
            r#"
[webhooks]
url = "https://file.example.com"
"#,
        )
        .unwrap();

        let env = |key: &str| (key == "WEBHOOK_URL").then(|| "https://env.example.com".to_string());
        assert_eq!(
            config.webhook_url_with(Channel::General, env).as_deref(),
            Some("https://env.example.com")
        );

        let blank = |_: &str| Some(" ".to_string());
        assert_eq!(
            config.webhook_url_with(Channel::General, blank).as_deref(),
            Some("https://file.example.com")
        );
    }

    #[test]
    fn bad_section_set_is_a_parse_error() {
        let err = Config::parse("[access]\nsections = \"everything\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_or_default_handles_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("crm.toml");
        assert!(Config::load_or_default(&missing).unwrap().webhooks.url.is_none());

        std::fs::write(&missing, "[log]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(Config::load_or_default(&missing).unwrap().log.level, "warn");
    }
}
