//! HTTP API tests for `GET /` and `POST /models`
//!
//! Drive the full router in-process with `tower::ServiceExt::oneshot`.

use axum::{body::Body, http::Method, http::StatusCode};
use brick_models::host::{FixedResolver, HostIdentity};
use brick_models::http_transport::{create_router, AppState};
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{json, Value};
use std::sync::Arc;

mod common;
use common::*;

#[rstest]
#[tokio::test]
async fn test_valid_item_is_echoed(test_app: axum::Router, valid_payload: Value) {
    let (status, body) = post_json(test_app, &valid_payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "host": expected_host(),
            "success": true,
            "message": "Item created successfully",
            "data": valid_payload
        })
    );
}

#[rstest]
#[case::name("name")]
#[case::pieces("pieces")]
#[case::year("year")]
#[case::theme("theme")]
#[case::difficulty("difficulty")]
#[case::price_us("price_us")]
#[tokio::test]
async fn test_missing_field_is_attributed(#[case] field: &str, valid_payload: Value) {
    let mut payload = valid_payload;
    payload.as_object_mut().unwrap().remove(field);

    let (status, body) = post_json(test_app(), &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Something went wrong");
    assert_eq!(body["host"], expected_host());
    assert_eq!(
        body["data"],
        json!({
            "property": field,
            "user_message": "Invalid data provided.",
            "developer_message": "Field required"
        })
    );
}

#[rstest]
#[case::extreme("extreme")]
#[case::capitalised("Easy")]
#[case::empty("")]
#[tokio::test]
async fn test_difficulty_outside_set(#[case] difficulty: &str, valid_payload: Value) {
    let mut payload = valid_payload;
    payload["difficulty"] = json!(difficulty);

    let (status, body) = post_json(test_app(), &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["property"], "difficulty");
    assert_eq!(
        body["data"]["developer_message"],
        "Input should be 'easy', 'medium' or 'hard'"
    );
}

#[rstest]
#[tokio::test]
async fn test_extreme_difficulty_example(test_app: axum::Router) {
    let payload = json!({
        "name": "X",
        "pieces": 1,
        "year": 2020,
        "theme": "T",
        "difficulty": "extreme",
        "price_us": 9.99
    });

    let (status, body) = post_json(test_app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["property"], "difficulty");
}

#[rstest]
#[case::text("not json")]
#[case::empty("")]
#[case::truncated("{\"name\": \"X\"")]
#[tokio::test]
async fn test_unparseable_body_gets_fixed_payload(#[case] raw: &'static str) {
    let (status, body) = post_models(test_app(), raw).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "host": expected_host(),
            "success": false,
            "message": "Something went wrong",
            "data": {
                "user_message": "Something went wrong",
                "developer_message": "Body could not be processed"
            }
        })
    );
}

#[rstest]
#[tokio::test]
async fn test_first_invalid_field_wins(test_app: axum::Router) {
    let payload = json!({
        "name": "Millennium Falcon",
        "pieces": "7541",
        "year": "last year",
        "theme": ["Star Wars"],
        "difficulty": "expert",
        "price_us": 849.99
    });

    let (status, body) = post_json(test_app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["property"], "year");
    assert_eq!(
        body["data"]["developer_message"],
        "Input should be a valid integer, unable to parse string as an integer"
    );
}

#[rstest]
#[tokio::test]
async fn test_non_object_json_is_unknown_property(test_app: axum::Router) {
    let (status, body) = post_models(test_app, "[1, 2, 3]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["property"], "unknown");
    assert_eq!(body["data"]["user_message"], "Invalid data provided.");
}

#[rstest]
#[tokio::test]
async fn test_same_payload_twice_is_identical(valid_payload: Value) {
    let (first_status, first) = post_json(test_app(), &valid_payload).await;
    let (second_status, second) = post_json(test_app(), &valid_payload).await;

    assert_eq!(first_status, second_status);
    assert_eq!(first, second);
}

#[rstest]
#[tokio::test]
async fn test_numeric_types_are_normalized(valid_payload: Value) {
    let mut payload = valid_payload.clone();
    payload["pieces"] = json!("1599");
    payload["price_us"] = json!(200);

    let (status, body) = post_json(test_app(), &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pieces"], json!(1599));
    assert_eq!(body["data"]["price_us"], json!(200.0));
}

#[rstest]
#[tokio::test]
async fn test_unresolved_address_is_unknown(valid_payload: Value) {
    let app = app_with_resolver(FixedResolver(None));

    let (ok_status, ok_body) = post_json(app.clone(), &valid_payload).await;
    let (bad_status, bad_body) = post_models(app, "not json").await;

    assert_eq!(ok_status, StatusCode::OK);
    assert_eq!(bad_status, StatusCode::BAD_REQUEST);
    assert_eq!(ok_body["host"], format!("tag: {TEST_TAG} - unknown"));
    assert_eq!(bad_body["host"], ok_body["host"]);
}

#[rstest]
#[tokio::test]
async fn test_content_type_is_not_required(test_app: axum::Router, valid_payload: Value) {
    // No Content-Type header is set by the helper.
    let (status, _) = send_raw(
        test_app,
        Method::POST,
        "/models",
        Body::from(valid_payload.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[tokio::test]
async fn test_root_greeting(test_app: axum::Router) {
    let (status, bytes) = send_raw(test_app, Method::GET, "/", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    let greeting: String = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        greeting,
        "Hello, this is the main endpoint of the brick models API"
    );
}

#[rstest]
#[tokio::test]
async fn test_get_models_is_not_allowed(test_app: axum::Router) {
    let (status, _) = send_raw(test_app, Method::GET, "/models", Body::empty()).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[tokio::test]
async fn test_host_tag_with_control_characters_is_verbatim(valid_payload: Value) {
    let app = create_router(AppState {
        identity: HostIdentity::new("blue\tzone", Arc::new(FixedResolver(Some(TEST_ADDR)))),
    });

    let (status, body) = post_json(app, &valid_payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["host"], json!(format!("tag: blue\tzone - {TEST_ADDR}")));
}
