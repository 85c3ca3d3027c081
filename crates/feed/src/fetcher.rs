use herald_common::error::FetchError;
use herald_common::types::Entry;

use crate::parser::parse_latest;

/// Download the feed at `url` and return its newest entry.
pub async fn fetch_latest(client: &reqwest::Client, url: &str) -> Result<Entry, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await?;
    let entry = parse_latest(&body)?;

    tracing::debug!(
        entry_id = %entry.id,
        title = %entry.title,
        bytes = body.len(),
        "Fetched latest feed entry"
    );
    Ok(entry)
}
