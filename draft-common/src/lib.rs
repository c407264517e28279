//! # Draft Annotations Common Library
//!
//! Shared code for the draft annotations services:
//! - Error and result types
//! - Bootstrap TOML configuration loading
//! - Tracing initialization
//! - Transaction id propagation and the per-request context
//! - UUID utilities for concept identifiers

pub mod config;
pub mod error;
pub mod logging;
pub mod transaction;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use transaction::RequestContext;
