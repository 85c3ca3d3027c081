use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::FirstRunPolicy;

/// Default footer label attached to every notification embed.
pub const DEFAULT_FOOTER_TEXT: &str = "FeedHerald";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// RSS/Atom feed to watch
    pub feed_url: String,

    /// Discord webhook that receives notifications
    pub discord_webhook_url: String,

    /// Seconds between feed checks (default: 60)
    pub check_interval_secs: u64,

    /// JSON file holding the last notified entry id (default: last_id.json)
    pub state_file: PathBuf,

    /// What to do when no state file exists yet (default: notify)
    pub first_run: FirstRunPolicy,

    /// Footer label on every embed
    pub footer_text: String,

    /// Request timeout for the shared HTTP client in seconds (default: 30)
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let check_interval_secs = parse_u64(get("CHECK_INTERVAL"), "CHECK_INTERVAL", 60)?;
        if check_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "CHECK_INTERVAL",
                reason: "must be greater than zero".to_string(),
            });
        }

        let http_timeout_secs = parse_u64(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 30)?;
        if http_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let first_run = match get("FIRST_RUN") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: "FIRST_RUN",
                reason,
            })?,
            None => FirstRunPolicy::default(),
        };

        Ok(Self {
            feed_url: get("FEED_URL").ok_or(ConfigError::Missing("FEED_URL"))?,
            discord_webhook_url: get("DISCORD_WEBHOOK_URL")
                .ok_or(ConfigError::Missing("DISCORD_WEBHOOK_URL"))?,
            check_interval_secs,
            state_file: get("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("last_id.json")),
            first_run,
            footer_text: get("FOOTER_TEXT").unwrap_or_else(|| DEFAULT_FOOTER_TEXT.to_string()),
            http_timeout_secs,
        })
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Build the HTTP client shared by the fetcher, resolver and notifier.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(self.http_timeout())
            .user_agent(concat!("FeedHerald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })
    }
}

fn parse_u64(raw: Option<String>, key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key,
            reason: format!("must be a valid u64, got {value:?}"),
        }),
        None => Ok(default),
    }
}
