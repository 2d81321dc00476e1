//! WireMock stand-ins for service instances
//!
//! Each mock answers `POST /models` like a replica of the service would, so
//! the load generator can be exercised without running real servers.

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock service instance
pub struct MockModelsInstance {
    pub server: MockServer,
}

impl MockModelsInstance {
    /// Instance that accepts every submission and reports `host`
    pub async fn healthy(host: &str) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "host": host,
                "success": true,
                "message": "Item created successfully",
                "data": {}
            })))
            .mount(&server)
            .await;
        Self { server }
    }

    /// Instance that rejects every submission, still reporting `host`
    pub async fn rejecting(host: &str) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "host": host,
                "success": false,
                "message": "Something went wrong",
                "data": {
                    "property": "difficulty",
                    "user_message": "Invalid data provided.",
                    "developer_message": "Input should be 'easy', 'medium' or 'hard'"
                }
            })))
            .mount(&server)
            .await;
        Self { server }
    }

    /// Instance that answers with a body that is not JSON
    pub async fn garbled() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;
        Self { server }
    }

    /// Instance whose JSON responses carry no `host`
    pub async fn anonymous() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn models_url(&self) -> String {
        format!("{}/models", self.server.uri())
    }
}
