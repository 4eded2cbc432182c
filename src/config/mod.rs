//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, User-Agent, legacy TLS parameters)
//! - Per-hop fetch options and the redirect policy
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    parse_field, parse_header, BasicAuth, FetchOptions, HttpMethod, LogFormat, LogLevel,
    MethodArg, Opt, ProxyConfig, RedirectPolicy,
};
