//! target_fetch library: fetch one scan target and normalize the response
//!
//! A target is either a live `http(s)://` URL or a local file holding a captured
//! raw HTTP response (or any other text). Both are opened into the same
//! [`Response`] shape: status, lowercase headers, cookies, body, raw header and
//! response text, an MD5 content hash and a tag pattern for signature matching.
//! [`get_redirection_target`] then decides, under a [`RedirectPolicy`], where the
//! next hop goes.
//!
//! Redirects are never followed automatically; the caller drives the chain.
//!
//! # Example
//!
//! ```no_run
//! use target_fetch::{get_redirection_target, FetchOptions, Fetcher, RedirectPolicy, Target};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new();
//! let target = Target::new("http://example.com")?;
//! let response = fetcher.open(&target, &FetchOptions::default()).await?;
//!
//! println!("{} {} md5={}", target, response.status(), response.content_hash());
//! if let Some(next) = get_redirection_target(&target, &response, RedirectPolicy::SameSite) {
//!     println!("redirects to {next}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
mod dns;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod redirect;
pub mod target;
mod utils;

// Re-export public API
pub use config::{BasicAuth, FetchOptions, HttpMethod, ProxyConfig, RedirectPolicy};
pub use error_handling::{ConfigError, ErrorType, FetchError, TargetError};
pub use fetch::{
    ContentHash, FetchedParts, Fetcher, LenientParser, RawResponseParser, Response, TagPattern,
};
pub use redirect::{get_redirection_target, RedirectDirective};
pub use target::{Target, TargetKind};
