//! Test Helper Utilities
//!
//! Shared utilities for testing draft-annotations-api

#![allow(dead_code)]

pub mod fakes;
pub mod log_capture;
pub mod test_data;

// Re-export commonly used items
pub use fakes::{FakeConceptRead, FakeUpp, InMemoryRw};
pub use log_capture::{capture_logs, LogCapture};
