//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles against a temporary document root.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use lru_content_cache::{api::create_router, api::CACHE_STATUS_HEADER, AppState, CacheStore};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

fn create_docroot() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>Hello</h1>").unwrap();
    fs::write(dir.path().join("a.txt"), "alpha").unwrap();
    fs::write(dir.path().join("b.txt"), "bravo").unwrap();
    fs::write(dir.path().join("c.txt"), "charlie").unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    fs::write(dir.path().join("css/site.css"), "body { margin: 0 }").unwrap();
    dir
}

fn create_test_app(dir: &TempDir, max_entries: usize) -> Router {
    let cache = CacheStore::create(max_entries, 0).unwrap();
    create_router(AppState::new(cache, dir.path()))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_to_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn cache_status(response: &Response) -> &str {
    response.headers()[CACHE_STATUS_HEADER].to_str().unwrap()
}

// == File Endpoint Tests ==

#[tokio::test]
async fn test_file_served_with_content_type() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 10);

    let response = get(&app, "/files/index.html").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    assert_eq!(cache_status(&response), "MISS");
    assert_eq!(body_bytes(response).await, b"<h1>Hello</h1>");
}

#[tokio::test]
async fn test_second_request_is_cache_hit() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 10);

    let first = get(&app, "/files/css/site.css").await;
    assert_eq!(cache_status(&first), "MISS");

    // Changing the file on disk is invisible while the entry is cached
    fs::write(dir.path().join("css/site.css"), "changed").unwrap();

    let second = get(&app, "/files/css/site.css").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(cache_status(&second), "HIT");
    assert_eq!(second.headers()[header::CONTENT_TYPE], "text/css");
    assert_eq!(body_bytes(second).await, b"body { margin: 0 }");
}

#[tokio::test]
async fn test_least_recently_used_file_is_evicted() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 2);

    get(&app, "/files/a.txt").await;
    get(&app, "/files/b.txt").await;
    get(&app, "/files/c.txt").await;

    assert_eq!(cache_status(&get(&app, "/files/b.txt").await), "HIT");
    assert_eq!(cache_status(&get(&app, "/files/c.txt").await), "HIT");
    assert_eq!(cache_status(&get(&app, "/files/a.txt").await), "MISS");
}

#[tokio::test]
async fn test_hit_promotes_file() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 2);

    get(&app, "/files/a.txt").await;
    get(&app, "/files/b.txt").await;
    assert_eq!(cache_status(&get(&app, "/files/a.txt").await), "HIT");
    get(&app, "/files/c.txt").await;

    // b was least recently used when c came in
    assert_eq!(cache_status(&get(&app, "/files/a.txt").await), "HIT");
    assert_eq!(cache_status(&get(&app, "/files/c.txt").await), "HIT");
    assert_eq!(cache_status(&get(&app, "/files/b.txt").await), "MISS");
}

#[tokio::test]
async fn test_missing_file_returns_404() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 10);

    let response = get(&app, "/files/nope.html").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("nope.html"));
}

#[tokio::test]
async fn test_path_traversal_rejected() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 10);

    let response = get(&app, "/files/css/../../secret").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert!(json.get("error").is_some());
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_track_hits_misses_and_evictions() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 2);

    get(&app, "/files/a.txt").await; // miss
    get(&app, "/files/a.txt").await; // hit
    get(&app, "/files/b.txt").await; // miss
    get(&app, "/files/c.txt").await; // miss, evicts a

    let response = get(&app, "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 3);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["capacity"], 2);
    assert!((json["hit_rate"].as_f64().unwrap() - 0.25).abs() < 0.001);
}

#[tokio::test]
async fn test_stats_empty_cache() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 5);

    let json = body_to_json(get(&app, "/stats").await).await;
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["total_entries"], 0);
    assert_eq!(json["hit_rate"], 0.0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 5);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let dir = create_docroot();
    let app = create_test_app(&dir, 5);

    let response = get(&app, "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
