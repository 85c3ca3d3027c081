pub mod poller;
pub mod state;

use std::pin::Pin;
use std::task::Poll;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "herald_watcher=info,herald_feed=info,herald_notifier=info";

/// Initialize tracing from `RUST_LOG`. `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Poll `signal` once so a lazily-installed handler (e.g. `tokio::signal::ctrl_c`)
/// is live before any work starts.
///
/// Returns `None` if the signal had already fired.
pub async fn arm_signal<F>(mut signal: Pin<Box<F>>) -> Option<Pin<Box<F>>>
where
    F: Future,
{
    let fired = std::future::poll_fn(|cx| Poll::Ready(signal.as_mut().poll(cx).is_ready())).await;
    (!fired).then_some(signal)
}
