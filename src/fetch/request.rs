//! HTTP request building.
//!
//! Turns a hop's [`FetchOptions`] into a `reqwest::RequestBuilder`: the method
//! (with its form body for POST), the custom headers and basic auth.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::{FetchOptions, HttpMethod};
use crate::error_handling::{ConfigError, FetchError};

/// Path and query of a URL as sent on the request line (`/path?query`).
pub fn request_path(uri: &Url) -> String {
    match uri.query() {
        Some(query) => format!("{}?{}", uri.path(), query),
        None => uri.path().to_string(),
    }
}

/// Builds the request for one hop.
///
/// # Errors
///
/// Returns `FetchError::Config` if a custom header name or value is not a
/// valid HTTP header.
pub(crate) fn build_request(
    client: &reqwest::Client,
    uri: &Url,
    options: &FetchOptions,
) -> Result<reqwest::RequestBuilder, FetchError> {
    let mut builder = match &options.method {
        HttpMethod::Get => client.get(uri.clone()),
        HttpMethod::Head => client.head(uri.clone()),
        HttpMethod::Post(fields) => client.post(uri.clone()).form(fields),
    };

    if !options.custom_headers.is_empty() {
        builder = builder.headers(custom_header_map(&options.custom_headers)?);
    }

    if let Some(auth) = &options.basic_auth {
        builder = builder.basic_auth(&auth.username, Some(&auth.password));
    }

    Ok(builder)
}

fn custom_header_map(headers: &[(String, String)]) -> Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || ConfigError::InvalidHeader(format!("{name}: {value}"));
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        // A custom header replaces the client default (e.g. User-Agent)
        map.insert(name, value);
    }
    Ok(map)
}
