//! Test fixtures and request helpers
//!
//! Provides reusable payloads, a router with a predictable host identity,
//! and a one-shot request helper built on `tower::ServiceExt`.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use brick_models::host::{FixedResolver, HostIdentity};
use brick_models::http_transport::{create_router, AppState};
use rstest::*;
use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_TAG: &str = "test-replica";
pub const TEST_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3));

/// Host identifier produced by [`test_app`]
pub fn expected_host() -> String {
    format!("tag: {TEST_TAG} - {TEST_ADDR}")
}

/// The reference submission
#[fixture]
pub fn valid_payload() -> Value {
    json!({
        "name": "Starship Enterprise",
        "pieces": 1599,
        "year": 2001,
        "theme": "Sci-Fi",
        "difficulty": "easy",
        "price_us": 199.99
    })
}

/// Router whose host identifier always resolves to [`TEST_ADDR`]
#[fixture]
pub fn test_app() -> Router {
    app_with_resolver(FixedResolver(Some(TEST_ADDR)))
}

pub fn app_with_resolver(resolver: FixedResolver) -> Router {
    create_router(AppState {
        identity: HostIdentity::new(TEST_TAG, Arc::new(resolver)),
    })
}

/// Send one request and return status plus raw body
pub async fn send_raw(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .expect("valid request");

    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    (status, bytes.to_vec())
}

/// POST a raw body to `/models` and decode the JSON response
pub async fn post_models(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, Method::POST, "/models", body.into()).await;
    let json = serde_json::from_slice(&bytes).expect("JSON response body");
    (status, json)
}

/// POST a JSON value to `/models`
pub async fn post_json(app: Router, payload: &Value) -> (StatusCode, Value) {
    post_models(app, payload.to_string()).await
}
