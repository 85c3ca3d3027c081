use std::time::Duration;

use herald_common::config::AppConfig;
use herald_common::types::FirstRunPolicy;
use herald_feed::{DescriptionResolver, fetch_latest};
use herald_notifier::DiscordNotifier;

use crate::state::StateStore;

/// What to do with the latest entry given the stored identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Notify,
    Skip,
    /// First run under [`FirstRunPolicy::Baseline`]: record without sending.
    Baseline,
}

/// Compare the latest entry id against the stored one. Exact equality only.
pub fn decide(last_id: Option<&str>, entry_id: &str, policy: FirstRunPolicy) -> Decision {
    match last_id {
        Some(last) if last == entry_id => Decision::Skip,
        Some(_) => Decision::Notify,
        None => match policy {
            FirstRunPolicy::Notify => Decision::Notify,
            FirstRunPolicy::Baseline => Decision::Baseline,
        },
    }
}

/// Result of a single check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Notified(String),
    Unchanged,
    Baselined(String),
    FetchFailed,
    NotifyFailed,
}

/// Feed poller that checks the feed on a fixed interval and notifies on new entries.
pub struct FeedPoller {
    client: reqwest::Client,
    feed_url: String,
    poll_interval: Duration,
    first_run: FirstRunPolicy,
    resolver: DescriptionResolver,
    notifier: DiscordNotifier,
    state: StateStore,
}

impl FeedPoller {
    pub fn new(config: &AppConfig, client: reqwest::Client, state: StateStore) -> Self {
        Self {
            resolver: DescriptionResolver::new(client.clone()),
            notifier: DiscordNotifier::new(
                client.clone(),
                config.discord_webhook_url.clone(),
                config.footer_text.clone(),
            ),
            client,
            feed_url: config.feed_url.clone(),
            poll_interval: config.check_interval(),
            first_run: config.first_run,
            state,
        }
    }

    pub fn last_id(&self) -> Option<&str> {
        self.state.last_id()
    }

    /// Run until `shutdown` resolves.
    ///
    /// The first check happens immediately. Shutdown is only observed while
    /// idle between checks, so an in-flight check always completes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            feed_url = %self.feed_url,
            poll_interval_secs = self.poll_interval.as_secs(),
            first_run = %self.first_run,
            last_id = ?self.state.last_id(),
            "Feed poller started"
        );

        loop {
            self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = &mut shutdown => {
                    tracing::info!(last_id = ?self.state.last_id(), "Feed poller stopping");
                    return;
                }
            }
        }
    }

    /// One check cycle: fetch, compare, resolve, notify, save.
    pub async fn tick(&mut self) -> TickOutcome {
        let entry = match fetch_latest(&self.client, &self.feed_url).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    feed_url = %self.feed_url,
                    error = %e,
                    "Feed fetch failed, retrying next cycle"
                );
                return TickOutcome::FetchFailed;
            }
        };

        match decide(self.state.last_id(), &entry.id, self.first_run) {
            Decision::Skip => {
                tracing::debug!(entry_id = %entry.id, "No new entries");
                TickOutcome::Unchanged
            }
            Decision::Baseline => {
                tracing::info!(entry_id = %entry.id, "No previous state, recording baseline");
                self.persist(&entry.id).await;
                TickOutcome::Baselined(entry.id)
            }
            Decision::Notify => {
                tracing::info!(
                    entry_id = %entry.id,
                    previous = ?self.state.last_id(),
                    "New feed entry detected"
                );

                let description = self.resolver.resolve(&entry).await;

                if let Err(e) = self.notifier.send(&entry, &description).await {
                    tracing::error!(
                        entry_id = %entry.id,
                        error = %e,
                        "Notification failed, retrying next cycle"
                    );
                    return TickOutcome::NotifyFailed;
                }

                self.persist(&entry.id).await;
                TickOutcome::Notified(entry.id)
            }
        }
    }

    async fn persist(&mut self, id: &str) {
        if let Err(e) = self.state.save(id).await {
            tracing::error!(
                path = %self.state.path().display(),
                entry_id = id,
                error = %e,
                "Failed to persist last-seen id"
            );
        }
    }
}
