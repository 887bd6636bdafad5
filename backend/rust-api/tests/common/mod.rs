#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use learningtown_api::{config::Config, create_router, services::AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router backed by a fresh in-memory database with the seeded question catalog.
pub async fn create_test_app() -> Router {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let config = Config::for_database("sqlite::memory:");

    let app_state = Arc::new(
        AppState::new(config)
            .await
            .expect("Failed to initialize test app state"),
    );

    create_router(app_state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
    )
    .await
}

/// Creates a player through the API and returns its id.
pub async fn create_player(app: &Router, name: &str, gender: &str) -> String {
    let (status, json) = send_json(
        app,
        "POST",
        "/api/players",
        serde_json::json!({ "name": name, "gender": gender }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create player failed: {}", json);
    json["id"].as_str().unwrap().to_string()
}
