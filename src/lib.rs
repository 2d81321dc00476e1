//! Brick models service
//!
//! A small HTTP service that validates LEGO model submissions and echoes
//! the normalized item back, tagged with the identity of the instance that
//! served it. A companion load generator fires concurrent submissions and
//! reports how responses were spread across instances.
//!
//! # Features
//!
//! - `POST /models` schema validation with first-issue error attribution
//! - Per-request host identifier (`HOST_TAG` plus resolved address)
//! - Bounded-concurrency load generator with per-host distribution report

pub mod config;
pub mod error;
pub mod host;
pub mod http_transport;
pub mod load;
pub mod logging;
pub mod models;
pub mod validation;

// Re-export main types for convenience
pub use config::ServerConfig;
pub use error::{BrickError, Result};
pub use models::{Difficulty, Item};
