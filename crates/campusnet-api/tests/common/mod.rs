//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusnet_core::clock::Clock;
use campusnet_stories::domain::media::StoryPolicy;
use campusnet_stories::domain::playback::PlaybackConfig;
use campusnet_test_support::{FixedClock, InMemoryStoryRepository};
use http_body_util::BodyExt;
use tower::ServiceExt;

use campusnet_api::routes;
use campusnet_api::state::AppState;

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::default())
}

/// Build the full app router over `repository` with a fixed clock and the
/// default policy. Uses the same route structure as `main.rs`.
pub fn build_test_app(repository: Arc<InMemoryStoryRepository>) -> Router {
    let app_state = AppState::new(
        fixed_clock(),
        repository,
        StoryPolicy::default(),
        PlaybackConfig::default(),
    );
    routes::build_router(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
