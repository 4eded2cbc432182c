//! HTTP client initialization.
//!
//! A client is built for every hop from that hop's [`FetchOptions`]. Idle
//! connections are never kept, so nothing outlives the hop that opened it.

use std::net::SocketAddr;

use reqwest::{ClientBuilder, Proxy};

use crate::config::{FetchOptions, ProxyConfig, LEGACY_CIPHER_LIST};
use crate::error_handling::FetchError;

/// Initializes the HTTP client for one hop.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirects disabled (the caller walks the chain, one hop at a time)
/// - Open timeout as the connect timeout, read timeout as the per-read timeout
///   (a slow but steady body does not fail the hop)
/// - User-Agent header from options
/// - The configured proxy, or no proxy at all (environment proxy variables are ignored)
/// - No idle connection pooling
/// - Certificate/hostname verification off and TLS 1.0 allowed in legacy mode
///
/// # Arguments
///
/// * `options` - Per-hop options
/// * `pinned` - Host name and the address it already resolved to; the
///   connection goes to that address instead of resolving again
///
/// # Errors
///
/// Returns `FetchError::Client` if the proxy or the TLS backend cannot be set up.
pub fn init_client(
    options: &FetchOptions,
    pinned: Option<(&str, SocketAddr)>,
) -> Result<reqwest::Client, FetchError> {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(options.open_timeout)
        .read_timeout(options.read_timeout)
        .user_agent(options.user_agent.clone())
        .pool_max_idle_per_host(0);

    builder = match &options.proxy {
        Some(proxy) => builder.proxy(init_proxy(proxy)?),
        None => builder.no_proxy(),
    };

    if let Some((host, addr)) = pinned {
        builder = builder.resolve(host, addr);
    }

    if options.insecure_legacy_mode {
        log::trace!("Legacy TLS mode: no verification, requested protocols {LEGACY_CIPHER_LIST}");
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .min_tls_version(reqwest::tls::Version::TLS_1_0);
    }

    builder.build().map_err(FetchError::Client)
}

fn init_proxy(proxy: &ProxyConfig) -> Result<Proxy, FetchError> {
    let mut result = Proxy::all(proxy.url()).map_err(FetchError::Client)?;
    if let Some(auth) = &proxy.auth {
        result = result.basic_auth(&auth.username, &auth.password);
    }
    Ok(result)
}
