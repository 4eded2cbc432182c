//! Configuration types and CLI options.
//!
//! This module defines the per-hop configuration passed to the fetcher
//! ([`FetchOptions`]), the redirect policy, and the command-line options of the
//! binary. Nothing here is global: every entry point receives its configuration
//! explicitly and treats it as read-only.

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_OPEN_TIMEOUT, DEFAULT_READ_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// HTTP method used for a live fetch.
///
/// POST carries its form fields, so a POST without data (or data without a
/// POST) cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// Plain GET request
    #[default]
    Get,
    /// HEAD request (no body is expected back)
    Head,
    /// POST request with URL-encoded form fields
    Post(Vec<(String, String)>),
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post(_) => "POST",
        }
    }
}

/// Method selector used on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Head,
    Post,
}

/// Which redirect signals are followed.
///
/// Parsed from `never`, `http-only`, `meta-only`, `same-site` or `always`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectPolicy {
    /// Never follow a redirect.
    Never,
    /// Follow only the HTTP `Location` header of a 3xx response.
    HttpOnly,
    /// Follow only an HTML meta-refresh directive.
    MetaOnly,
    /// Follow either signal (HTTP first) when it stays on the current host.
    SameSite,
    /// Follow either signal, HTTP `Location` first.
    #[default]
    Always,
}

impl RedirectPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectPolicy::Never => "never",
            RedirectPolicy::HttpOnly => "http-only",
            RedirectPolicy::MetaOnly => "meta-only",
            RedirectPolicy::SameSite => "same-site",
            RedirectPolicy::Always => "always",
        }
    }
}

impl fmt::Display for RedirectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedirectPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(RedirectPolicy::Never),
            "http-only" => Ok(RedirectPolicy::HttpOnly),
            "meta-only" => Ok(RedirectPolicy::MetaOnly),
            "same-site" => Ok(RedirectPolicy::SameSite),
            "always" => Ok(RedirectPolicy::Always),
            other => Err(ConfigError::InvalidRedirectPolicy(other.to_string())),
        }
    }
}

/// Credentials for HTTP basic authentication (origin or proxy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl FromStr for BasicAuth {
    type Err = ConfigError;

    /// Parses `user:password`. The password may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((user, pass)) if !user.is_empty() => Ok(BasicAuth {
                username: user.to_string(),
                password: pass.to_string(),
            }),
            _ => Err(ConfigError::InvalidCredentials(s.to_string())),
        }
    }
}

/// Forward proxy every request is routed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub auth: Option<BasicAuth>,
}

impl ProxyConfig {
    /// Default port when `--proxy` is given without one.
    pub const DEFAULT_PORT: u16 = 8080;

    /// Parses `host[:port]`.
    ///
    /// IPv6 hosts are written `[addr]:port` or `[addr]`; a bare IPv6 address
    /// takes the default port. The host is stored without brackets.
    pub fn parse(address: &str, auth: Option<BasicAuth>) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidProxy(address.to_string());
        let parse_port = |port: &str| port.parse::<u16>().map_err(|_| invalid());

        let (host, port) = if let Some(rest) = address.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
            host.parse::<Ipv6Addr>().map_err(|_| invalid())?;
            match tail {
                "" => (host, Self::DEFAULT_PORT),
                _ => (host, parse_port(tail.strip_prefix(':').ok_or_else(invalid)?)?),
            }
        } else if address.parse::<Ipv6Addr>().is_ok() {
            (address, Self::DEFAULT_PORT)
        } else {
            match address.rsplit_once(':') {
                Some((host, port)) => (host, parse_port(port)?),
                None => (address, Self::DEFAULT_PORT),
            }
        };
        if host.is_empty() {
            return Err(invalid());
        }
        Ok(ProxyConfig {
            host: host.to_string(),
            port,
            auth,
        })
    }

    /// Proxy address in the form reqwest expects.
    pub fn url(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

/// Per-hop request configuration.
///
/// # Examples
///
/// ```
/// use target_fetch::{FetchOptions, HttpMethod};
///
/// let options = FetchOptions {
///     method: HttpMethod::Head,
///     custom_headers: vec![("X-Scan".to_string(), "1".to_string())],
///     ..Default::default()
/// };
/// assert!(options.insecure_legacy_mode);
/// ```
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Request method (and POST form fields)
    pub method: HttpMethod,

    /// Time allowed to open the connection
    pub open_timeout: Duration,

    /// Longest wait for any single read from the connection
    pub read_timeout: Duration,

    /// Optional forward proxy
    pub proxy: Option<ProxyConfig>,

    /// Extra headers attached to every request, in order
    pub custom_headers: Vec<(String, String)>,

    /// Optional basic-auth credentials for the origin server
    pub basic_auth: Option<BasicAuth>,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Skip certificate/hostname verification and accept legacy TLS versions.
    ///
    /// On by default: the point of a hop is to see what a (possibly broken or
    /// ancient) server answers, not to authenticate it.
    pub insecure_legacy_mode: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            proxy: None,
            custom_headers: Vec::new(),
            basic_auth: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure_legacy_mode: true,
        }
    }
}

/// Parses a `Name: value` custom header.
pub fn parse_header(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidHeader(raw.to_string())),
    }
}

/// Parses a `key=value` POST field. A missing `=` yields an empty value.
pub fn parse_field(raw: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    if key.is_empty() {
        return Err(ConfigError::InvalidField(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Command-line options for the single-hop binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "target_fetch",
    version,
    about = "Fetch a URL or raw HTTP response file and report the normalized response"
)]
pub struct Opt {
    /// URL (http:// or https://) or path to a file
    pub target: String,

    /// Request method
    #[arg(long, value_enum, default_value = "get")]
    pub method: MethodArg,

    /// POST field as key=value (repeatable, requires --method post)
    #[arg(short = 'd', long = "data")]
    pub data: Vec<String>,

    /// Custom header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    pub header: Vec<String>,

    /// Basic-auth credentials as user:password
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Proxy as host[:port]
    #[arg(long)]
    pub proxy: Option<String>,

    /// Proxy credentials as user:password
    #[arg(long)]
    pub proxy_user: Option<String>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Connection open timeout in seconds
    #[arg(long, default_value_t = DEFAULT_OPEN_TIMEOUT.as_secs())]
    pub open_timeout: u64,

    /// Read timeout in seconds
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT.as_secs())]
    pub read_timeout: u64,

    /// Redirect policy: never, http-only, meta-only, same-site or always
    #[arg(long, default_value = "always")]
    pub follow_redirect: String,

    /// Verify TLS certificates and refuse legacy protocol versions
    #[arg(long)]
    pub strict_tls: bool,

    /// Print the normalized response as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the per-hop options, validating every free-form value.
    pub fn fetch_options(&self) -> Result<FetchOptions, ConfigError> {
        let fields = self
            .data
            .iter()
            .map(|raw| parse_field(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let method = match self.method {
            MethodArg::Post => HttpMethod::Post(fields),
            _ if !fields.is_empty() => return Err(ConfigError::UnexpectedPostData),
            MethodArg::Get => HttpMethod::Get,
            MethodArg::Head => HttpMethod::Head,
        };

        let custom_headers = self
            .header
            .iter()
            .map(|raw| parse_header(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let basic_auth = self.user.as_deref().map(str::parse::<BasicAuth>).transpose()?;

        let proxy = match &self.proxy {
            Some(address) => {
                let auth = self.proxy_user.as_deref().map(str::parse::<BasicAuth>).transpose()?;
                Some(ProxyConfig::parse(address, auth)?)
            }
            None => None,
        };

        Ok(FetchOptions {
            method,
            open_timeout: Duration::from_secs(self.open_timeout),
            read_timeout: Duration::from_secs(self.read_timeout),
            proxy,
            custom_headers,
            basic_auth,
            user_agent: self.user_agent.clone(),
            insecure_legacy_mode: !self.strict_tls,
        })
    }

    /// Parses the redirect policy; an unknown name is a configuration error.
    pub fn redirect_policy(&self) -> Result<RedirectPolicy, ConfigError> {
        self.follow_redirect.parse()
    }
}
