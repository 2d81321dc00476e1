//! Common test utilities

#![allow(dead_code)]

pub mod mock_instance;
pub mod test_fixtures;

pub use mock_instance::MockModelsInstance;
pub use test_fixtures::*;
