//! Discord webhook delivery.
//!
//! Formats a feed [`Entry`] into an embed message and POSTs it to a fixed
//! webhook URL. Any non-2xx response is a failure; the caller decides what
//! happens to its state.

pub mod embed;

use herald_common::error::NotifyError;
use herald_common::types::Entry;

pub use embed::{WebhookMessage, build_message};

/// Longest slice of an error response body kept for logging.
const MAX_ERROR_BODY: usize = 512;

/// Sends entry notifications to one Discord webhook.
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
    footer_text: String,
}

impl DiscordNotifier {
    pub fn new(
        client: reqwest::Client,
        webhook_url: impl Into<String>,
        footer_text: impl Into<String>,
    ) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
            footer_text: footer_text.into(),
        }
    }

    /// Build the message for `entry` and deliver it.
    pub async fn send(&self, entry: &Entry, description: &str) -> Result<(), NotifyError> {
        let message = build_message(entry, description, &self.footer_text);
        self.deliver(&message).await?;

        tracing::info!(entry_id = %entry.id, title = %entry.title, "Notification delivered");
        Ok(())
    }

    /// POST an already-built message to the webhook.
    pub async fn deliver(&self, message: &WebhookMessage) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut end = MAX_ERROR_BODY;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
