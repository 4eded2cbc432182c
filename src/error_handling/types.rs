//! Error type definitions.
//!
//! This module defines the error types surfaced by a hop and the categories used
//! to report them.
//!
//! Construction and configuration errors ([`TargetError`], [`ConfigError`]) are
//! fatal and must not be retried. [`FetchError`] covers everything that can go
//! wrong while opening a target; the caller decides whether to abort the scan,
//! skip the hop, or stop following redirects.

use std::io;
use std::path::PathBuf;

use hickory_resolver::error::ResolveError;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while classifying a target string.
#[derive(Error, Debug)]
pub enum TargetError {
    /// The target exists but is a directory.
    #[error("Error: {} is a directory", .0.display())]
    IsDirectory(PathBuf),

    /// The target exists but cannot be opened for reading.
    #[error("Error: You do not have permission to view {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target looks like a URL but does not parse as one.
    #[error("Invalid URL {target}: {source}")]
    InvalidUrl {
        target: String,
        #[source]
        source: url::ParseError,
    },
}

/// Invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Error: Invalid REDIRECT mode: {0}")]
    InvalidRedirectPolicy(String),

    #[error("Invalid header (expected \"Name: value\"): {0}")]
    InvalidHeader(String),

    #[error("Invalid POST field (expected key=value): {0}")]
    InvalidField(String),

    #[error("Invalid credentials (expected user:password): {0}")]
    InvalidCredentials(String),

    #[error("Invalid proxy (expected host[:port]): {0}")]
    InvalidProxy(String),

    #[error("POST data given but the method is not POST")]
    UnexpectedPostData,
}

/// Errors raised while opening a single target.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Reading a file target failed.
    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target is neither a URL nor an existing file.
    #[error("{0} is neither a URL nor an existing file")]
    Unreachable(String),

    /// The URL has no host to connect to.
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// DNS resolution of the target host failed.
    #[error("Failed to resolve {host}: {source}")]
    Resolution {
        host: String,
        #[source]
        source: ResolveError,
    },

    /// DNS resolution succeeded but returned no address.
    #[error("No IP addresses found for {0}")]
    NoAddress(String),

    /// A configured value could not be applied to the request.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client (TLS backend, proxy) could not be built.
    #[error("HTTP client initialization error: {0}")]
    Client(#[source] ReqwestError),

    /// Connect, TLS, read/write or timeout failure.
    #[error("HTTP request error: {0}")]
    Transport(#[from] ReqwestError),
}

/// Categories used to report a failed hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestTimeoutError,
    HttpRequestRequestError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpClientInitError,
    // DNS errors
    DnsResolutionError,
    // Local input errors
    FileReadError,
    ConfigurationError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpClientInitError => "HTTP client initialization error",
            ErrorType::DnsResolutionError => "DNS resolution error",
            ErrorType::FileReadError => "File read error",
            ErrorType::ConfigurationError => "Configuration error",
        }
    }
}
