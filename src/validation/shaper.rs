//! Error shaping
//!
//! Converts a rejected request into the stable error payload returned to
//! callers. Only the first validation issue is ever surfaced.

use super::{MalformedBody, ValidationFailure};
use serde::Serialize;
use std::fmt;

pub const INVALID_DATA_MESSAGE: &str = "Invalid data provided.";
pub const GENERIC_USER_MESSAGE: &str = "Something went wrong";
pub const UNPROCESSABLE_BODY_MESSAGE: &str = "Body could not be processed";
pub const UNKNOWN_PROPERTY: &str = "unknown";
pub const FALLBACK_DEVELOPER_MESSAGE: &str = "Validation error";

/// Error payload placed in the `data` field of a 400 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    /// Offending field. Absent for bodies that could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub user_message: String,
    pub developer_message: String,
}

impl ErrorInfo {
    /// Shape a schema violation from its first issue
    pub fn from_failure(failure: &ValidationFailure) -> Self {
        let (property, developer_message) = match failure.first() {
            Some(issue) => (
                issue
                    .field
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_PROPERTY.to_string()),
                if issue.message.is_empty() {
                    FALLBACK_DEVELOPER_MESSAGE.to_string()
                } else {
                    issue.message.clone()
                },
            ),
            None => (
                UNKNOWN_PROPERTY.to_string(),
                FALLBACK_DEVELOPER_MESSAGE.to_string(),
            ),
        };

        Self {
            property: Some(property),
            user_message: INVALID_DATA_MESSAGE.to_string(),
            developer_message,
        }
    }

    /// Fixed payload for a body that is not JSON
    pub fn unprocessable_body() -> Self {
        Self {
            property: None,
            user_message: GENERIC_USER_MESSAGE.to_string(),
            developer_message: UNPROCESSABLE_BODY_MESSAGE.to_string(),
        }
    }
}

/// Why a request was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum RequestRejection {
    /// Body is not valid JSON
    MalformedBody(MalformedBody),
    /// Body is JSON but fails the item schema
    SchemaViolation(ValidationFailure),
}

impl RequestRejection {
    /// Shaped payload for this rejection
    pub fn error_info(&self) -> ErrorInfo {
        match self {
            RequestRejection::MalformedBody(_) => ErrorInfo::unprocessable_body(),
            RequestRejection::SchemaViolation(failure) => ErrorInfo::from_failure(failure),
        }
    }

    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            RequestRejection::MalformedBody(_) => "malformed_body",
            RequestRejection::SchemaViolation(_) => "schema_violation",
        }
    }
}

impl fmt::Display for RequestRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestRejection::MalformedBody(e) => write!(f, "{e}"),
            RequestRejection::SchemaViolation(e) => write!(f, "schema violation: {e}"),
        }
    }
}
