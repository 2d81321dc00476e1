//! Error types for the brick models service
//!
//! Request-path failures (bad bodies, schema violations) are not errors in
//! this sense: they are ordinary values turned into 400 responses by the
//! HTTP layer. `BrickError` covers everything operational around them:
//! start-up configuration, binding the listener, and the load generator.

use thiserror::Error;

/// Result type alias for brick models operations
pub type Result<T> = std::result::Result<T, BrickError>;

/// Operational error types
#[derive(Error, Debug)]
pub enum BrickError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listener / server lifecycle errors
    #[error("Server error: {0}")]
    Server(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Load generator errors
    #[error("Load run error: {0}")]
    LoadRun(String),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrickError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a server error
    pub fn server<S: Into<String>>(msg: S) -> Self {
        Self::Server(msg.into())
    }

    /// Create a load run error
    pub fn load_run<S: Into<String>>(msg: S) -> Self {
        Self::LoadRun(msg.into())
    }

    /// Short category name, used as a structured logging field
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Server(_) | Self::Io(_) => "server",
            Self::Http(_) => "network",
            Self::Json(_) => "data",
            Self::LoadRun(_) => "load",
        }
    }
}
