//! One-shot check for manual testing.
//!
//! Fetches the newest feed entry and sends it to the webhook regardless of
//! stored state. The state file is never written.
//!
//! ```bash
//! FEED_URL=https://example.com/feed.xml \
//! DISCORD_WEBHOOK_URL=https://discord.com/api/webhooks/... \
//!   cargo run --bin herald-once
//! ```

use herald_common::config::AppConfig;
use herald_feed::{DescriptionResolver, fetch_latest};
use herald_notifier::DiscordNotifier;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    herald_watcher::init_tracing();

    let config = AppConfig::from_env()?;
    let client = config.http_client()?;

    let entry = fetch_latest(&client, &config.feed_url).await?;
    tracing::info!(
        entry_id = %entry.id,
        title = %entry.title,
        link = %entry.link,
        published = ?entry.published,
        "Fetched latest entry"
    );

    let description = DescriptionResolver::new(client.clone()).resolve(&entry).await;

    DiscordNotifier::new(client, config.discord_webhook_url, config.footer_text)
        .send(&entry, &description)
        .await?;

    Ok(())
}
