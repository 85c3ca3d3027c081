//! Network-facing tests for the fetcher and description resolver.
//!
//! Each test spawns an in-process axum server on an ephemeral port.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;

use herald_common::error::FetchError;
use herald_feed::{DescriptionResolver, Entry, fetch_latest};

const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Desk</title>
  <item><title>Newest</title><link>https://news.example.com/new</link><guid>post-2</guid></item>
  <item><title>Older</title><link>https://news.example.com/old</link><guid>post-1</guid></item>
</channel></rss>"#;

const ARTICLE: &str = r#"<html><head>
  <meta property="og:description" content="Market update">
</head><body><article><p>Long body</p></article></body></html>"#;

#[derive(Clone, Default)]
struct Hits {
    article: Arc<AtomicUsize>,
}

async fn feed_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/rss+xml")], FEED)
}

async fn empty_feed_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/rss+xml")],
        r#"<rss version="2.0"><channel><title>Quiet</title></channel></rss>"#,
    )
}

async fn article_handler(State(hits): State<Hits>) -> impl IntoResponse {
    hits.article.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "text/html")], ARTICLE)
}

async fn gone_handler() -> StatusCode {
    StatusCode::GONE
}

async fn spawn_server() -> (String, Hits, tokio::task::JoinHandle<()>) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/feed.xml", get(feed_handler))
        .route("/empty.xml", get(empty_feed_handler))
        .route("/article", get(article_handler))
        .route("/gone", get(gone_handler))
        .with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should exist");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });
    (format!("http://{addr}"), hits, handle)
}

fn entry(link: String, summary: Option<&str>) -> Entry {
    Entry {
        id: "post-2".to_string(),
        title: "Newest".to_string(),
        link,
        published: None,
        summary: summary.map(ToString::to_string),
        author: None,
        images: vec![],
    }
}

#[tokio::test]
async fn test_fetch_latest_returns_first_entry() {
    let (base, _, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let latest = fetch_latest(&client, &format!("{base}/feed.xml"))
        .await
        .expect("feed should fetch");
    assert_eq!(latest.id, "post-2");
    assert_eq!(latest.title, "Newest");

    server.abort();
}

#[tokio::test]
async fn test_fetch_latest_errors() {
    let (base, _, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let err = fetch_latest(&client, &format!("{base}/empty.xml"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Empty));

    let err = fetch_latest(&client, &format!("{base}/gone"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus(410)));

    server.abort();

    // Nothing listening on port 9 of the loopback.
    let err = fetch_latest(&client, "http://127.0.0.1:9/feed.xml")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));
}

#[tokio::test]
async fn test_resolver_uses_summary_without_network() {
    let (base, hits, server) = spawn_server().await;
    let resolver = DescriptionResolver::new(reqwest::Client::new());

    let description = resolver
        .resolve(&entry(format!("{base}/article"), Some("Feed summary")))
        .await;
    assert_eq!(description, "Feed summary");
    assert_eq!(hits.article.load(Ordering::SeqCst), 0);

    server.abort();
}

#[tokio::test]
async fn test_resolver_falls_back_to_page() {
    let (base, hits, server) = spawn_server().await;
    let resolver = DescriptionResolver::new(reqwest::Client::new());

    let description = resolver
        .resolve(&entry(format!("{base}/article"), Some("")))
        .await;
    assert_eq!(description, "Market update");
    assert_eq!(hits.article.load(Ordering::SeqCst), 1);

    server.abort();
}

#[tokio::test]
async fn test_resolver_failures_yield_empty() {
    let (base, _, server) = spawn_server().await;
    let resolver = DescriptionResolver::new(reqwest::Client::new());

    assert_eq!(resolver.resolve(&entry(format!("{base}/gone"), None)).await, "");
    assert_eq!(resolver.resolve(&entry(String::new(), None)).await, "");

    server.abort();

    assert_eq!(
        resolver
            .resolve(&entry("http://127.0.0.1:9/article".to_string(), None))
            .await,
        ""
    );
}
