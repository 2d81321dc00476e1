//! Route handlers

use super::AppState;
use crate::models::Item;
use crate::validation::{self, ErrorInfo, RequestRejection};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

pub const GREETING: &str = "Hello, this is the main endpoint of the brick models API";
pub const CREATED_MESSAGE: &str = "Item created successfully";
pub const FAILED_MESSAGE: &str = "Something went wrong";

/// Envelope for every `/models` response
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub host: String,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl ApiResponse<Item> {
    pub fn created(host: String, item: Item) -> Self {
        Self {
            host,
            success: true,
            message: CREATED_MESSAGE.to_string(),
            data: item,
        }
    }
}

impl ApiResponse<ErrorInfo> {
    pub fn rejected(host: String, rejection: &RequestRejection) -> Self {
        Self {
            host,
            success: false,
            message: FAILED_MESSAGE.to_string(),
            data: rejection.error_info(),
        }
    }
}

/// `GET /`
pub async fn root_handler() -> impl IntoResponse {
    Json(GREETING)
}

/// `POST /models`
///
/// The body is taken as raw bytes so that a non-JSON body gets the fixed
/// fallback payload instead of axum's own rejection.
pub async fn create_model(State(state): State<AppState>, body: Bytes) -> Response {
    // Computed before branching so every outcome reports the same host.
    let host = state.identity.identify().await;

    match validation::parse_item(&body) {
        Ok(item) => {
            debug!(name = %item.name, difficulty = %item.difficulty, "Item accepted");
            (StatusCode::OK, Json(ApiResponse::created(host, item))).into_response()
        }
        Err(rejection) => {
            match &rejection {
                RequestRejection::MalformedBody(e) => {
                    warn!(kind = rejection.kind(), "Rejected body: {}", e);
                }
                RequestRejection::SchemaViolation(failure) => {
                    let property = failure
                        .first()
                        .and_then(|issue| issue.field.as_deref())
                        .unwrap_or("unknown");
                    warn!(
                        kind = rejection.kind(),
                        property,
                        issues = failure.len(),
                        "Rejected item"
                    );
                }
            }
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::rejected(host, &rejection)),
            )
                .into_response()
        }
    }
}
