//! Webhook delivery against an in-process axum server.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use herald_common::error::NotifyError;
use herald_common::types::Entry;
use herald_notifier::DiscordNotifier;

#[derive(Clone)]
struct Webhook {
    received: Arc<Mutex<Vec<Value>>>,
    status: Arc<AtomicU16>,
}

async fn webhook_handler(State(hook): State<Webhook>, Json(body): Json<Value>) -> StatusCode {
    hook.received.lock().unwrap().push(body);
    StatusCode::from_u16(hook.status.load(Ordering::SeqCst)).unwrap()
}

async fn spawn_webhook(status: u16) -> (String, Webhook, tokio::task::JoinHandle<()>) {
    let hook = Webhook {
        received: Arc::new(Mutex::new(Vec::new())),
        status: Arc::new(AtomicU16::new(status)),
    };
    let app = Router::new()
        .route("/webhook", post(webhook_handler))
        .with_state(hook.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/webhook"), hook, handle)
}

fn entry() -> Entry {
    Entry {
        id: "post-2".to_string(),
        title: "Rates hold steady".to_string(),
        link: "https://news.example.com/rates".to_string(),
        published: None,
        summary: None,
        author: None,
        images: vec![],
    }
}

#[tokio::test]
async fn test_send_posts_embed() {
    let (url, hook, server) = spawn_webhook(204).await;
    let notifier = DiscordNotifier::new(reqwest::Client::new(), url, "FeedHerald");

    notifier.send(&entry(), "Market update").await.unwrap();

    let received = hook.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let embed = &received[0]["embeds"][0];
    assert_eq!(embed["title"], "Rates hold steady");
    assert_eq!(embed["description"], "Market update");
    assert_eq!(embed["footer"]["text"], "FeedHerald");

    server.abort();
}

#[tokio::test]
async fn test_any_2xx_is_success() {
    let (url, _, server) = spawn_webhook(200).await;
    let notifier = DiscordNotifier::new(reqwest::Client::new(), url, "FeedHerald");
    assert!(notifier.send(&entry(), "").await.is_ok());
    server.abort();
}

#[tokio::test]
async fn test_rejection_is_error() {
    let (url, hook, server) = spawn_webhook(429).await;
    let notifier = DiscordNotifier::new(reqwest::Client::new(), url, "FeedHerald");

    let err = notifier.send(&entry(), "x").await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected { status: 429, .. }));
    assert_eq!(hook.received.lock().unwrap().len(), 1);

    server.abort();
}

#[tokio::test]
async fn test_unreachable_webhook_is_error() {
    let notifier = DiscordNotifier::new(
        reqwest::Client::new(),
        "http://127.0.0.1:9/webhook",
        "FeedHerald",
    );
    let err = notifier.send(&entry(), "x").await.unwrap_err();
    assert!(matches!(err, NotifyError::Request(_)));
}
