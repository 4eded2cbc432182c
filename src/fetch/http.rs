//! Live HTTP(S) fetches.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use hickory_resolver::TokioAsyncResolver;
use log::{debug, trace};
use reqwest::header::{HeaderMap, SET_COOKIE};
use url::{Host, Url};

use super::raw::assemble_raw_headers;
use super::request::{build_request, request_path};
use super::response::FetchedParts;
use crate::config::{FetchOptions, HttpMethod, BODYLESS_STATUS_CODES};
use crate::dns::resolve_host_to_ip;
use crate::error_handling::FetchError;
use crate::initialization::init_client;

/// Fetches a URL once, without following redirects.
///
/// The host is resolved first and the connection is pinned to that address,
/// which is also reported as the hop's IP. Transport failures are returned as
/// they happen; nothing is retried.
///
/// The returned parts carry the status, the header mapping (lowercase names,
/// repeated values joined by `", "`, repeated `set-cookie` values by `\n`), a
/// header block rebuilt from the status line and header lines, and the body.
/// HEAD requests and body-less status codes yield no body. `cookies` is left
/// empty.
///
/// # Errors
///
/// - `FetchError::MissingHost` if the URL has no host
/// - `FetchError::Resolution` / `FetchError::NoAddress` if DNS fails
/// - `FetchError::Config` / `FetchError::Client` if the request or client cannot be set up
/// - `FetchError::Transport` on connect, TLS, timeout or read failures
pub async fn fetch_url(
    uri: &Url,
    options: &FetchOptions,
    resolver: &TokioAsyncResolver,
) -> Result<FetchedParts, FetchError> {
    let host = uri
        .host()
        .ok_or_else(|| FetchError::MissingHost(uri.to_string()))?;
    let ip = resolve_host_to_ip(host.clone(), resolver).await?;
    debug!("Resolved {host} to {ip}");

    let pinned = match host {
        Host::Domain(domain) => {
            let port = uri.port_or_known_default().unwrap_or(80);
            Some((domain, SocketAddr::new(ip, port)))
        }
        Host::Ipv4(_) | Host::Ipv6(_) => None,
    };
    let client = init_client(options, pinned)?;

    debug!(
        "{} {} (host {})",
        options.method.as_str(),
        request_path(uri),
        uri.host_str().unwrap_or_default()
    );
    let response = build_request(&client, uri, options)?.send().await?;

    let status = response.status();
    trace!("Response version: {:?}", response.version());
    let raw_headers = raw_header_block(response.version(), status, response.headers());
    let headers = collect_headers(response.headers());

    let body = if matches!(options.method, HttpMethod::Head)
        || BODYLESS_STATUS_CODES.contains(&status.as_u16())
    {
        None
    } else {
        Some(response.text().await?)
    };
    debug!(
        "{uri} answered {} ({} body bytes)",
        status.as_u16(),
        body.as_ref().map_or(0, String::len)
    );

    Ok(FetchedParts {
        status: status.as_u16(),
        ip: Some(ip),
        headers,
        cookies: Vec::new(),
        body,
        raw_headers: Some(raw_headers),
    })
}

/// Lowercase header name to value.
///
/// Non-UTF-8 bytes in values are replaced rather than failing the hop.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for name in headers.keys() {
        let separator = if *name == SET_COOKIE { "\n" } else { ", " };
        let value = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<String>>()
            .join(separator);
        collected.insert(name.as_str().to_string(), value);
    }
    collected
}

/// Rebuilds the header block as it would appear in a capture file.
fn raw_header_block(
    version: reqwest::Version,
    status: reqwest::StatusCode,
    headers: &HeaderMap,
) -> String {
    let status_line = format!(
        "{:?} {} {}",
        version,
        status.as_str(),
        status.canonical_reason().unwrap_or_default()
    );
    let mut lines = vec![status_line.trim_end().to_string()];
    lines.extend(headers.iter().map(|(name, value)| {
        format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()))
    }));
    assemble_raw_headers(&lines)
}
