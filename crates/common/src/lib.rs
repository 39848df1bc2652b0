//! mkmovies Common Utilities
//!
//! Shared infrastructure for all mkmovies crates:
//! - Error types and result aliases
//! - Run configuration
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
