//! Error handling.
//!
//! This module provides:
//! - Error type definitions for target construction, configuration and fetching
//! - Error categorization for reporting
//!
//! Errors are split into two kinds:
//! - **Fatal**: [`TargetError`] and [`ConfigError`]; the input is wrong and
//!   retrying cannot help
//! - **Per hop**: [`FetchError`]; returned to the caller, who decides whether to
//!   skip the hop, stop following redirects or abort

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{ConfigError, ErrorType, FetchError, InitializationError, TargetError};
