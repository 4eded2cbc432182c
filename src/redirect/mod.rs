//! Next-hop resolution.
//!
//! A response can point elsewhere in two ways: an HTTP `Location` header on a
//! 3xx status, or an HTML meta-refresh directive in the body. Both are resolved
//! against the current target, and the [`RedirectPolicy`] decides which one (if
//! any) becomes the next hop. Nothing here performs I/O or keeps state between
//! hops; the caller walks the chain.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use url::Url;

use crate::config::RedirectPolicy;
use crate::fetch::Response;
use crate::target::Target;
use crate::utils::decode_html_entities;

/// `<meta http-equiv="refresh" ... content="N;url=...">`
static META_REFRESH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\s+http-equiv\s*=\s*['"]?refresh['"]?[^>]+content\s*=[^>]*[0-9]+;\s*url=['"]?([^"'>\s]+)['"]?[^>]*>"#,
    )
    .expect("Failed to compile meta refresh regex - this is a bug")
});

/// `<meta content="N;url=..." ... http-equiv="refresh">`
static META_REFRESH_CONTENT_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\s+[^>]*?content\s*=\s*['"]?[0-9]+;\s*url=['"]?([^"'>\s]+)['"]?[^>]*http-equiv\s*=\s*['"]?refresh['"]?[^>]*>"#,
    )
    .expect("Failed to compile meta refresh regex - this is a bug")
});

/// Redirect candidates found in one response, already resolved to absolute URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectDirective {
    /// Target of the first meta-refresh tag in the body
    pub from_meta_refresh: Option<String>,
    /// Target of the `Location` header, for 3xx responses only
    pub from_http_location: Option<String>,
}

impl RedirectDirective {
    /// Collects both redirect signals of `response`.
    ///
    /// Candidates that cannot be resolved against `target` (a relative
    /// reference on a file target, an unparsable URL) are left out.
    pub fn from_response(target: &Target, response: &Response) -> Self {
        let from_meta_refresh = find_meta_refresh(response.body())
            .and_then(|reference| resolve_against(target, &reference));

        let from_http_location = if response.is_redirect_status() {
            response
                .header("location")
                .map(normalize_scheme_case)
                .and_then(|location| resolve_against(target, &location))
        } else {
            None
        };

        RedirectDirective {
            from_meta_refresh,
            from_http_location,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from_meta_refresh.is_none() && self.from_http_location.is_none()
    }

    /// Picks the next hop under `policy`.
    ///
    /// The HTTP candidate wins over the meta-refresh one whenever the policy
    /// allows both. A candidate naming `target` itself is suppressed.
    pub fn select(&self, target: &Target, policy: RedirectPolicy) -> Option<String> {
        let http = self.from_http_location.as_ref();
        let meta = self.from_meta_refresh.as_ref();

        let chosen = match policy {
            RedirectPolicy::Never => None,
            RedirectPolicy::HttpOnly => http,
            RedirectPolicy::MetaOnly => meta,
            RedirectPolicy::SameSite => http
                .or(meta)
                .filter(|candidate| same_host(target, candidate)),
            RedirectPolicy::Always => http.or(meta),
        }?;

        if target.is_same_as(chosen) {
            debug!("Ignoring redirect of {target} to itself");
            return None;
        }
        Some(chosen.clone())
    }
}

/// Returns the next target after `response`, if `policy` says to follow one.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use target_fetch::{get_redirection_target, FetchOptions, Fetcher, RedirectPolicy, Target};
///
/// let fetcher = Fetcher::new();
/// let mut target = Target::new("http://example.com")?;
/// loop {
///     let response = fetcher.open(&target, &FetchOptions::default()).await?;
///     match get_redirection_target(&target, &response, RedirectPolicy::Always) {
///         Some(next) => target = Target::new(next)?,
///         None => break,
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn get_redirection_target(
    target: &Target,
    response: &Response,
    policy: RedirectPolicy,
) -> Option<String> {
    let directive = RedirectDirective::from_response(target, response);
    if directive.is_empty() {
        return None;
    }
    debug!("Redirect candidates for {target}: {directive:?} (policy {policy})");
    directive.select(target, policy)
}

/// Extracts the entity-decoded URL of the first meta-refresh tag in `body`.
///
/// Attribute order, quoting and case are not significant. The URL is returned
/// as written, not resolved.
pub fn find_meta_refresh(body: &str) -> Option<String> {
    [&*META_REFRESH, &*META_REFRESH_CONTENT_FIRST]
        .into_iter()
        .filter_map(|regex| regex.captures(body))
        .filter_map(|caps| caps.get(1))
        .min_by_key(|found| found.start())
        .map(|found| decode_html_entities(found.as_str()))
}

fn normalize_scheme_case(location: &str) -> String {
    if let Some(rest) = location.strip_prefix("HTTPS://") {
        format!("https://{rest}")
    } else if let Some(rest) = location.strip_prefix("HTTP://") {
        format!("http://{rest}")
    } else {
        location.to_string()
    }
}

/// Resolves `reference` the way a browser would from the current page.
///
/// File targets have no base URL, so only absolute references resolve.
fn resolve_against(target: &Target, reference: &str) -> Option<String> {
    let resolved = match target.uri() {
        Some(base) => base.join(reference),
        None => Url::parse(reference),
    };
    match resolved {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!("Cannot resolve redirect {reference:?} from {target}: {e}");
            None
        }
    }
}

fn same_host(target: &Target, candidate: &str) -> bool {
    let Some(current) = target.host() else {
        return false;
    };
    Url::parse(candidate)
        .ok()
        .is_some_and(|url| url.host_str() == Some(current))
}

#[cfg(test)]
mod tests;
