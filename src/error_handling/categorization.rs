//! Error categorization.
//!
//! Maps hop failures onto [`ErrorType`] so callers can count, report or decide
//! per category without matching on transport internals.

use super::types::{ErrorType, FetchError};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `ErrorType` for the error. Redirect errors cannot occur:
/// clients never follow redirects themselves.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

impl FetchError {
    /// Returns the reporting category of this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            FetchError::File { .. } | FetchError::Unreachable(_) => ErrorType::FileReadError,
            FetchError::MissingHost(_) | FetchError::Config(_) => ErrorType::ConfigurationError,
            FetchError::Resolution { .. } | FetchError::NoAddress(_) => {
                ErrorType::DnsResolutionError
            }
            FetchError::Client(_) => ErrorType::HttpClientInitError,
            FetchError::Transport(e) => categorize_reqwest_error(e),
        }
    }

    /// True for network-level failures (resolution and transport).
    ///
    /// These depend on the remote side and may succeed on a later attempt; the
    /// fetcher itself never retries.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::Resolution { .. } | FetchError::NoAddress(_) | FetchError::Transport(_)
        )
    }
}
