use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated feed entry, produced fresh on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Unique per feed; the only field that is ever persisted.
    pub id: String,
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    /// Plain-text summary with markup stripped. `None` when the feed had none.
    pub summary: Option<String>,
    pub author: Option<String>,
    /// Image URLs in document order; the first one is the embed image.
    pub images: Vec<String>,
}

impl Entry {
    /// The summary, if present and not blank.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// On-disk shape of the state file: `{"last_id": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub last_id: Option<String>,
}

/// Behavior when no identifier has ever been stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstRunPolicy {
    /// Send the current latest entry.
    #[default]
    Notify,
    /// Record the current latest entry without sending anything.
    Baseline,
}

impl FromStr for FirstRunPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "notify" => Ok(Self::Notify),
            "baseline" => Ok(Self::Baseline),
            other => Err(format!("expected \"notify\" or \"baseline\", got {other:?}")),
        }
    }
}

impl std::fmt::Display for FirstRunPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FirstRunPolicy::Notify => write!(f, "notify"),
            FirstRunPolicy::Baseline => write!(f, "baseline"),
        }
    }
}
