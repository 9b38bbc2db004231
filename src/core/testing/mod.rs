//! Test infrastructure shared by unit and integration tests
//!
//! This module provides:
//! - Registry fixtures for common scenarios
//! - A notifier that records calls and returns a scripted outcome

pub mod fixtures;
pub mod mocks;

// Re-export commonly used test utilities
pub use fixtures::*;
pub use mocks::*;
