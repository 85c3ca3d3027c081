use std::time::Duration;

use herald_common::error::ResolveError;
use herald_common::types::Entry;

use crate::html::extract_description;

/// Per-request timeout for article page fetches.
const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Supplies a description for entries whose feed item carries no summary.
pub struct DescriptionResolver {
    client: reqwest::Client,
    timeout: Duration,
}

impl DescriptionResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: PAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return the entry's summary, or a description scraped from its page.
    ///
    /// Never fails: page errors are logged and yield an empty string. A
    /// non-empty summary is returned without touching the network.
    pub async fn resolve(&self, entry: &Entry) -> String {
        if let Some(summary) = entry.summary_text() {
            return summary.to_string();
        }

        let link = entry.link.trim();
        if link.is_empty() {
            tracing::debug!(entry_id = %entry.id, "No summary and no link, description left empty");
            return String::new();
        }

        match self.fetch_page(link).await {
            Ok(page) => extract_description(&page).unwrap_or_else(|| {
                tracing::debug!(entry_id = %entry.id, link, "Page has no usable description");
                String::new()
            }),
            Err(e) => {
                tracing::warn!(
                    entry_id = %entry.id,
                    link,
                    error = %e,
                    "Failed to fetch article page, description left empty"
                );
                String::new()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
