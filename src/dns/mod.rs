//! Host address resolution.
//!
//! This module provides async DNS resolution using `hickory-resolver`. IP
//! literals are returned as-is without a query.

mod resolution;

// Re-export public API
pub use resolution::resolve_host_to_ip;
