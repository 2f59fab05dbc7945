//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, running the router
//! over the in-process store and cache.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use guestbook::{
    cache::{CacheBackend, MemoryCache},
    create_router,
    models::Entry,
    services::{ENTRY_COUNTER_KEY, LISTING_KEY, LISTING_TTL},
    store::{EntryStore, MemoryEntryStore},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

struct TestApp {
    router: Router,
    store: Arc<MemoryEntryStore>,
    cache: Arc<MemoryCache>,
}

fn create_test_app_with(entries: Vec<Entry>) -> TestApp {
    let store = Arc::new(MemoryEntryStore::with_entries(entries));
    let cache = Arc::new(MemoryCache::new());
    let state = AppState::new(store.clone(), cache.clone(), Duration::from_millis(200));
    TestApp {
        router: create_router(state),
        store,
        cache,
    }
}

fn create_test_app() -> TestApp {
    create_test_app_with(Vec::new())
}

fn seeded_entry() -> Entry {
    Entry {
        id: 1,
        name: "A".to_string(),
        message: "hi".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_entry(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/entries")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_all_healthy() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "healthy");
    assert_eq!(json["redis"], "healthy");
}

#[tokio::test]
async fn test_health_database_down_is_degraded() {
    let app = create_test_app();
    app.store.set_available(false);

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "unhealthy");
    assert_eq!(json["redis"], "healthy");
}

#[tokio::test]
async fn test_health_cache_down_is_degraded() {
    let app = create_test_app();
    app.cache.set_available(false);

    let response = app.router.oneshot(get("/health")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["redis"], "unhealthy");
}

// == List Endpoint Tests ==

#[tokio::test]
async fn test_list_miss_then_hit() {
    let app = create_test_app_with(vec![seeded_entry()]);

    let first = app.router.clone().oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    let first_json = body_to_json(first.into_body()).await;
    assert_eq!(first_json[0]["id"], 1);
    assert_eq!(first_json[0]["name"], "A");
    assert_eq!(first_json[0]["message"], "hi");

    let ttl = app.cache.ttl_of(LISTING_KEY).await.unwrap();
    assert!(ttl > LISTING_TTL - Duration::from_secs(1));

    let second = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(second.headers()["x-cache"], "HIT");
    let second_json = body_to_json(second.into_body()).await;
    assert_eq!(first_json, second_json);
}

#[tokio::test]
async fn test_list_cache_hit_serves_cached_value() {
    let app = create_test_app();
    let cached = r#"[{"id":1,"name":"Test User","message":"Test message","created_at":"2024-03-01T09:30:00Z"}]"#;
    app.cache.set(LISTING_KEY, cached, LISTING_TTL).await.unwrap();

    let response = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "HIT");

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Test User");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_with_cache_down_still_served() {
    let app = create_test_app_with(vec![seeded_entry()]);
    app.cache.set_available(false);

    let response = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "MISS");
}

#[tokio::test]
async fn test_list_with_database_down_fails() {
    let app = create_test_app();
    app.store.set_available(false);

    let response = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_list_corrupt_cache_fails() {
    let app = create_test_app_with(vec![seeded_entry()]);
    app.cache.set(LISTING_KEY, "{oops", LISTING_TTL).await.unwrap();

    let response = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_entry_success() {
    let app = create_test_app_with(vec![seeded_entry()]);

    let response = app
        .router
        .oneshot(post_entry(r#"{"name":"B","message":"yo"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 2);
    assert_eq!(json["name"], "B");
    assert_eq!(json["message"], "yo");
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_create_invalidates_cached_listing() {
    let app = create_test_app_with(vec![seeded_entry()]);

    // Warm the cache
    let warm = app.router.clone().oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(warm.headers()["x-cache"], "MISS");

    let created = app
        .router
        .clone()
        .oneshot(post_entry(r#"{"name":"B","message":"yo"}"#))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        app.cache.get(ENTRY_COUNTER_KEY).await.unwrap(),
        Some("1".to_string())
    );

    let after = app.router.oneshot(get("/api/entries")).await.unwrap();
    assert_eq!(after.headers()["x-cache"], "MISS");
    let json = body_to_json(after.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["name"], "B");
}

#[tokio::test]
async fn test_create_with_cache_down_still_succeeds() {
    let app = create_test_app();
    app.cache.set_available(false);

    let response = app
        .router
        .oneshot(post_entry(r#"{"name":"B","message":"yo"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.store.count_entries().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_with_database_down_fails() {
    let app = create_test_app();
    app.store.set_available(false);

    let response = app
        .router
        .oneshot(post_entry(r#"{"name":"B","message":"yo"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.cache.calls(), 0);
}

#[tokio::test]
async fn test_create_invalid_data() {
    let bodies = [
        r#"{"name":"","message":"Test"}"#,
        r#"{"name":"Test","message":""}"#,
        r#"{"name":"","message":""}"#,
        r#"{"message":"Test"}"#,
    ];

    for body in bodies {
        let app = create_test_app();

        let response = app.router.oneshot(post_entry(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(app.store.calls(), 0);
        assert_eq!(app.cache.calls(), 0);
    }
}

#[tokio::test]
async fn test_create_invalid_json() {
    let app = create_test_app();

    let response = app.router.oneshot(post_entry("invalid json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();
    for name in ["A", "B", "C"] {
        let response = app
            .router
            .clone()
            .oneshot(post_entry(&format!(r#"{{"name":"{}","message":"hi"}}"#, name)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.router.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["total_entries_db"], 3);
    assert_eq!(json["total_entries_created"], "3");
    assert_eq!(json["cache_available"], true);
    assert!(json["redis_info"].as_str().unwrap().contains("# Stats"));
}

#[tokio::test]
async fn test_stats_with_cache_down() {
    let app = create_test_app_with(vec![seeded_entry()]);
    app.cache.set_available(false);

    let response = app.router.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["total_entries_db"], 1);
    assert_eq!(json["cache_available"], false);
    assert!(json.get("total_entries_created").is_none());
    assert!(json.get("redis_info").is_none());
}

#[tokio::test]
async fn test_stats_with_database_down_fails() {
    let app = create_test_app();
    app.store.set_available(false);

    let response = app.router.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// == CORS Tests ==

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/entries")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    assert_eq!(
        headers["access-control-allow-headers"]
            .to_str()
            .unwrap()
            .to_lowercase(),
        "content-type"
    );
}

#[tokio::test]
async fn test_cors_on_simple_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/invalid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
