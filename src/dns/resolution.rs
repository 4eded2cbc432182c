//! IP address resolution.

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;
use url::Host;

use crate::error_handling::FetchError;

/// Resolves the host of a URL to an IP address using DNS.
///
/// # Arguments
///
/// * `host` - The host component of the target URL
/// * `resolver` - The DNS resolver instance
///
/// # Returns
///
/// The first IP address found.
///
/// # Errors
///
/// Returns `FetchError::Resolution` if the lookup fails and
/// `FetchError::NoAddress` if it succeeds without any address.
pub async fn resolve_host_to_ip(
    host: Host<&str>,
    resolver: &TokioAsyncResolver,
) -> Result<IpAddr, FetchError> {
    let domain = match host {
        Host::Ipv4(ip) => return Ok(IpAddr::V4(ip)),
        Host::Ipv6(ip) => return Ok(IpAddr::V6(ip)),
        Host::Domain(domain) => domain,
    };

    let response = resolver
        .lookup_ip(domain)
        .await
        .map_err(|source| FetchError::Resolution {
            host: domain.to_string(),
            source,
        })?;
    response
        .iter()
        .next()
        .ok_or_else(|| FetchError::NoAddress(domain.to_string()))
}
