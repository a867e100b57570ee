//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use tracked_cache::{
    api::create_router,
    error::Result,
    store::MemoryStore,
    web::PageFetcher,
    AppState,
};

// == Helper Functions ==

/// Fetcher serving a fixed page body and counting fetches.
#[derive(Default)]
struct CountingFetcher {
    fetches: AtomicU64,
}

#[async_trait]
impl PageFetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(format!("<html>{url}</html>"))
    }
}

async fn create_test_app() -> (Router, Arc<CountingFetcher>) {
    let fetcher = Arc::new(CountingFetcher::default());
    let state = AppState::initialize(Arc::new(MemoryStore::new()), fetcher.clone(), 10)
        .await
        .unwrap();
    (create_router(state), fetcher)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn store_value(app: &Router, body: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    json["key"].as_str().unwrap().to_string()
}

// == Store Endpoint Tests ==

#[tokio::test]
async fn test_store_endpoint_returns_key() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"kind":"text","value":"hello"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    // Keys are hyphenated UUIDs
    assert_eq!(json["key"].as_str().unwrap().len(), 36);
    assert!(json["message"].as_str().unwrap().contains("stored"));
}

#[tokio::test]
async fn test_store_endpoint_rejects_unknown_kind() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"kind":"blob","value":"hello"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Retrieve Endpoint Tests ==

#[tokio::test]
async fn test_retrieve_roundtrip_text() {
    let (app, _) = create_test_app().await;

    let key = store_value(&app, r#"{"kind":"text","value":"round trip"}"#).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/retrieve/{key}?as=text"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"]["kind"], "text");
    assert_eq!(json["value"]["value"], "round trip");
}

#[tokio::test]
async fn test_retrieve_roundtrip_integer() {
    let (app, _) = create_test_app().await;

    let key = store_value(&app, r#"{"kind":"integer","value":42}"#).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/retrieve/{key}?as=integer"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"]["value"], 42);
}

#[tokio::test]
async fn test_retrieve_not_found() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/retrieve/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_retrieve_integer_decode_failure() {
    let (app, _) = create_test_app().await;

    let key = store_value(&app, r#"{"kind":"text","value":"abc"}"#).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/retrieve/{key}?as=integer"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// == Page Endpoint Tests ==

#[tokio::test]
async fn test_page_endpoint_caches_and_counts() {
    let (app, fetcher) = create_test_app().await;

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/page?url=http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_json = body_to_json(first.into_body()).await;
    assert_eq!(first_json["access_count"], 1);

    let second = app
        .oneshot(
            Request::builder()
                .uri("/page?url=http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let second_json = body_to_json(second.into_body()).await;
    assert_eq!(second_json["access_count"], 2);
    assert_eq!(first_json["content"], second_json["content"]);

    // Only the first request reached the fetcher
    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_page_endpoint_rejects_empty_url() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/page?url=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Calls Endpoint Tests ==

#[tokio::test]
async fn test_calls_endpoint_reports_history() {
    let (app, _) = create_test_app().await;

    let key1 = store_value(&app, r#"{"kind":"text","value":"first"}"#).await;
    let key2 = store_value(&app, r#"{"kind":"integer","value":2}"#).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/calls")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["operation"], "TypedCache::store");
    assert_eq!(json["calls"], 2);

    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["input"], "first");
    assert_eq!(records[0]["output"], key1.as_str());
    assert_eq!(records[1]["input"], "2");
    assert_eq!(records[1]["output"], key2.as_str());
}

// == Flush Endpoint Tests ==

#[tokio::test]
async fn test_flush_endpoint_empties_everything() {
    let (app, _) = create_test_app().await;

    let key = store_value(&app, r#"{"kind":"text","value":"doomed"}"#).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/flush")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Previously valid key is now absent
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/retrieve/{key}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Instrumentation state is gone too
    let response = app
        .oneshot(
            Request::builder()
                .uri("/calls")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["calls"], 0);
    assert!(json["records"].as_array().unwrap().is_empty());
}

// == Stats and Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_retrievals() {
    let (app, _) = create_test_app().await;

    let key = store_value(&app, r#"{"kind":"text","value":"hit me"}"#).await;

    // One hit, one miss
    app.clone()
        .oneshot(
            Request::builder()
                .uri(format!("/retrieve/{key}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .uri("/retrieve/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
