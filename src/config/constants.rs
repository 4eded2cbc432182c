//! Configuration constants.
//!
//! This module defines the defaults applied to every hop: timeouts, the
//! User-Agent, and the legacy TLS parameters.

use std::time::Duration;

/// Default time allowed to open a connection (including the TLS handshake).
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(15);

/// Default time allowed for the request to complete once sent.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag or by setting
/// `FetchOptions::user_agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("target_fetch/", env!("CARGO_PKG_VERSION"));

/// Protocol list historically enabled for HTTPS targets.
///
/// Kept as documentation of the compatibility goal. The TLS backend can go as low
/// as TLS 1.0 (see `initialization::client`); SSLv2 and SSLv3 are not offered by
/// any maintained TLS stack and are silently unavailable.
pub const LEGACY_CIPHER_LIST: &str = "TLSv1:TLSv1.1:TLSv1.2:SSLv3:SSLv2";

/// Status codes that never carry a body.
///
/// The connection for these responses terminates right after the header block,
/// so the fetcher records "no body" instead of an empty one.
pub const BODYLESS_STATUS_CODES: [u16; 5] = [101, 102, 204, 205, 304];

/// Terminator appended to every reassembled raw header block.
pub const HEADER_BLOCK_TERMINATOR: &str = "\r\n\r\n";
