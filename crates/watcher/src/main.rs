use herald_common::config::AppConfig;
use herald_watcher::poller::FeedPoller;
use herald_watcher::state::StateStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    herald_watcher::init_tracing();

    tracing::info!("FeedHerald starting...");

    // Load configuration
    let config = AppConfig::from_env()?;
    let client = config.http_client()?;

    // Open state handle
    let state = StateStore::open(&config.state_file).await;
    match state.last_id() {
        Some(id) => tracing::info!(last_id = id, "Loaded last seen entry id"),
        None => tracing::info!(
            path = %config.state_file.display(),
            "No previous entry id found, starting fresh"
        ),
    }

    let mut poller = FeedPoller::new(&config, client, state);

    // Install the Ctrl+C handler before the first check
    let Some(ctrl_c) = herald_watcher::arm_signal(Box::pin(tokio::signal::ctrl_c())).await else {
        tracing::info!("Received shutdown signal before first check");
        return Ok(());
    };

    // Stop between checks on Ctrl+C
    poller
        .run(async move {
            if let Err(e) = ctrl_c.await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await;

    tracing::info!("FeedHerald stopped.");
    Ok(())
}
