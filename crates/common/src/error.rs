use thiserror::Error;

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Feed could not be fetched or yielded no usable entry. The cycle is skipped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed returned HTTP {0}")]
    HttpStatus(u16),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("feed contains no entries")]
    Empty,

    #[error("malformed entry: {0}")]
    Malformed(String),
}

/// Article page lookup failed. The description falls back to empty.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("page request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("page returned HTTP {0}")]
    HttpStatus(u16),
}

/// Webhook delivery failed. State is not advanced.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook rejected message: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Persisting the last-seen identifier failed.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
