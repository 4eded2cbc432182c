//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the system configuration (`/etc/resolv.conf` and friends) so targets
/// resolve the way the rest of the machine resolves them. Falls back to the
/// default public resolvers when the system configuration cannot be read.
///
/// Timeouts are configured to prevent hanging on slow or unresponsive DNS servers.
///
/// # Returns
///
/// A configured `TokioAsyncResolver`. Cloning it is cheap and clones share the
/// same cache.
pub fn init_resolver() -> TokioAsyncResolver {
    let (config, mut opts) = match read_system_conf() {
        Ok(conf) => conf,
        Err(e) => {
            log::debug!("Failed to read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = 2; // Reduce retry attempts to fail faster

    TokioAsyncResolver::tokio(config, opts)
}
