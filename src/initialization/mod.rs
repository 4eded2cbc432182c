//! Resource setup.
//!
//! This module provides functions to initialize the shared pieces a hop needs:
//! - Logger
//! - DNS resolver
//! - Per-hop HTTP client
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
