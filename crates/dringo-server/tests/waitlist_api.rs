//! End-to-end tests for the HTTP surface.
//!
//! Each test builds the real router over a temporary data directory and a
//! temporary asset directory, then drives it with `oneshot` requests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use dringo_server::app::{build_router, build_state};
use dringo_server::config::ServerConfig;
use dringo_server::state::AppState;

struct TestApp {
    _data: tempfile::TempDir,
    _assets: tempfile::TempDir,
    waitlist_file: std::path::PathBuf,
    state: Arc<AppState>,
    router: Router,
}

fn test_app() -> TestApp {
    let data = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("index.html"), "<h1>Dringo</h1>").unwrap();
    std::fs::write(assets.path().join("app.js"), "console.log('hi');").unwrap();

    let config = ServerConfig {
        data_dir: data.path().to_path_buf(),
        static_dir: assets.path().to_path_buf(),
        ..ServerConfig::from_lookup(|_| None)
    };
    let state = build_state(&config).unwrap();
    let router = build_router(Arc::clone(&state), &config);

    TestApp {
        waitlist_file: data.path().join(&config.waitlist_key),
        _data: data,
        _assets: assets,
        state,
        router,
    }
}

async fn post_json(router: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/waitlist")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn signup_succeeds_and_persists() {
    let app = test_app();

    let (status, body) = post_json(&app.router, r#"{"email":"user@example.com"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(&app.waitlist_file).unwrap()).unwrap();
    let stored = stored.as_array().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["email"], "user@example.com");
    let ts = stored[0]["ts"].as_str().unwrap();
    assert!(ts.ends_with('Z') && ts.len() == 24, "unexpected ts {ts}");
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = test_app();

    post_json(&app.router, r#"{"email":"user@example.com"}"#).await;
    let (status, body) = post_json(&app.router, r#"{"email":"USER@EXAMPLE.COM"}"#).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Already on waitlist" }));
    assert_eq!(app.state.registry.entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_email_is_rejected_without_writing() {
    let app = test_app();

    let (status, body) = post_json(&app.router, r#"{"email":"not-an-email"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid email" }));
    assert!(!app.waitlist_file.exists());
}

#[tokio::test]
async fn unusable_bodies_are_invalid_email() {
    let app = test_app();

    for body in ["{}", r#"{"email":null}"#, r#"{"email":42}"#, r#"{"email":""}"#, "not json"] {
        let (status, json_body) = post_json(&app.router, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json_body, json!({ "error": "Invalid email" }));
    }
}

#[tokio::test]
async fn missing_content_type_is_invalid_email() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/waitlist")
        .body(Body::from(r#"{"email":"user@example.com"}"#))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corrupt_waitlist_file_is_replaced_on_signup() {
    let app = test_app();
    std::fs::write(&app.waitlist_file, "{{{").unwrap();

    let (status, _) = post_json(&app.router, r#"{"email":"user@example.com"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.state.registry.entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn serves_landing_page_assets() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Dringo</h1>");

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/missing.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn waitlist_file_is_not_served_as_an_asset() {
    let app = test_app();
    post_json(&app.router, r#"{"email":"user@example.com"}"#).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/waitlist.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
