//! Opening a target.
//!
//! [`Fetcher::open`] dispatches on the target kind to one of two leaf fetchers,
//! live HTTP(S) ([`http`]) or local file ([`file`]), and normalizes what they
//! captured into a [`Response`].

pub mod file;
pub mod http;
pub mod raw;
pub mod request;
pub mod response;

use hickory_resolver::TokioAsyncResolver;
use log::debug;

pub use raw::{LenientParser, RawResponseParser};
pub use request::request_path;
pub use response::{ContentHash, FetchedParts, Response, TagPattern};

use crate::config::FetchOptions;
use crate::error_handling::FetchError;
use crate::initialization::init_resolver;
use crate::target::Target;

/// Opens targets, one hop at a time.
///
/// Holds the DNS resolver and the raw-response parser. Nothing else is shared
/// between hops: every live fetch builds its own client from the hop's
/// [`FetchOptions`], so a `Fetcher` can serve concurrent hops with different
/// options.
pub struct Fetcher {
    resolver: TokioAsyncResolver,
    parser: Box<dyn RawResponseParser>,
}

impl Fetcher {
    /// Creates a fetcher with the system resolver and the lenient parser.
    pub fn new() -> Self {
        Self::with_parser(LenientParser)
    }

    /// Creates a fetcher that splits file targets with `parser`.
    pub fn with_parser(parser: impl RawResponseParser + 'static) -> Self {
        Fetcher {
            resolver: init_resolver(),
            parser: Box::new(parser),
        }
    }

    /// Fetches `target` once and normalizes the result.
    ///
    /// Redirects are not followed; see [`crate::redirect::get_redirection_target`].
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unreachable` for a target that is neither a URL nor
    /// an existing file, and whatever the leaf fetcher fails with otherwise.
    pub async fn open(
        &self,
        target: &Target,
        options: &FetchOptions,
    ) -> Result<Response, FetchError> {
        let parts = if let Some(uri) = target.uri() {
            http::fetch_url(uri, options, &self.resolver).await?
        } else if let Some(path) = target.path() {
            file::load_file(&path, self.parser.as_ref()).await?
        } else {
            return Err(FetchError::Unreachable(target.to_string()));
        };

        let response = Response::from_parts(parts);
        debug!(
            "Opened {target}: status {}, md5 {}",
            response.status(),
            response.content_hash()
        );
        Ok(response)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
