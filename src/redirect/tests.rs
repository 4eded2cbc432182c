// Redirect resolution tests.

use std::collections::BTreeMap;
use std::io::Write;

use tempfile::NamedTempFile;

use super::*;
use crate::fetch::FetchedParts;

const ALL_POLICIES: [RedirectPolicy; 5] = [
    RedirectPolicy::Never,
    RedirectPolicy::HttpOnly,
    RedirectPolicy::MetaOnly,
    RedirectPolicy::SameSite,
    RedirectPolicy::Always,
];

fn target(raw: &str) -> Target {
    Target::new(raw).unwrap()
}

fn response(status: u16, location: Option<&str>, body: &str) -> Response {
    let mut headers = BTreeMap::new();
    if let Some(location) = location {
        headers.insert("location".to_string(), location.to_string());
    }
    Response::from_parts(FetchedParts {
        status,
        headers,
        body: Some(body.to_string()),
        raw_headers: Some(format!("HTTP/1.1 {status} X\r\n\r\n")),
        ..Default::default()
    })
}

fn meta(url: &str) -> String {
    format!(r#"<html><head><meta http-equiv="refresh" content="0;url={url}"></head></html>"#)
}

#[test]
fn test_meta_only_resolves_relative_refresh() {
    let current = target("http://example.com/page");
    let resp = response(200, None, &meta("/next"));
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::MetaOnly),
        Some("http://example.com/next".to_string())
    );
}

#[test]
fn test_no_signals_means_no_redirect() {
    let current = target("http://example.com/");
    let resp = response(200, None, "<html><body>plain</body></html>");
    for policy in ALL_POLICIES {
        assert_eq!(get_redirection_target(&current, &resp, policy), None, "{policy}");
    }
}

#[test]
fn test_location_ignored_outside_3xx() {
    let current = target("http://example.com/");
    for status in [200, 299, 400, 404, 500] {
        let resp = response(status, Some("http://example.com/other"), "");
        assert_eq!(
            get_redirection_target(&current, &resp, RedirectPolicy::Always),
            None,
            "status {status}"
        );
    }
}

#[test]
fn test_http_only_follows_location() {
    let current = target("http://example.com/a/b");
    let resp = response(302, Some("c"), "");
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::HttpOnly),
        Some("http://example.com/a/c".to_string())
    );
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::MetaOnly),
        None
    );
}

#[test]
fn test_never_ignores_everything() {
    let current = target("http://example.com/");
    let resp = response(301, Some("http://example.org/"), &meta("/m"));
    assert_eq!(get_redirection_target(&current, &resp, RedirectPolicy::Never), None);
}

#[test]
fn test_always_prefers_http_location() {
    let current = target("http://example.com/");
    let resp = response(301, Some("http://example.com/http"), &meta("/meta"));
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::Always),
        Some("http://example.com/http".to_string())
    );
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::MetaOnly),
        Some("http://example.com/meta".to_string())
    );
}

#[test]
fn test_always_falls_back_to_meta_refresh() {
    let current = target("http://example.com/");
    let resp = response(200, None, &meta("http://example.org/landing"));
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::Always),
        Some("http://example.org/landing".to_string())
    );
}

#[test]
fn test_same_site_rejects_other_host() {
    let current = target("http://example.com/");
    let resp = response(302, Some("http://evil.example.org/"), "");
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::SameSite),
        None
    );
}

#[test]
fn test_same_site_accepts_same_host() {
    let current = target("http://example.com/");
    let resp = response(302, Some("http://EXAMPLE.com/login"), "");
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::SameSite),
        Some("http://example.com/login".to_string())
    );
}

#[test]
fn test_same_site_checks_preferred_candidate_only() {
    // HTTP candidate is off-site, so the on-site meta refresh is not considered
    let current = target("http://example.com/");
    let resp = response(302, Some("http://example.org/"), &meta("/local"));
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::SameSite),
        None
    );
}

#[test]
fn test_self_redirect_suppressed_under_every_policy() {
    let current = target("http://example.com/page");
    let resp = response(301, Some("HTTP://example.com/page"), &meta("http://example.com/page"));
    for policy in ALL_POLICIES {
        assert_eq!(get_redirection_target(&current, &resp, policy), None, "{policy}");
    }
}

#[test]
fn test_self_redirect_to_normalized_form_suppressed() {
    let current = target("http://example.com");
    let resp = response(302, Some("/"), "");
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::Always),
        None
    );
}

#[test]
fn test_uppercase_scheme_is_normalized() {
    let current = target("http://example.com/");
    let resp = response(301, Some("HTTPS://example.com/secure"), "");
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::HttpOnly),
        Some("https://example.com/secure".to_string())
    );
}

#[test]
fn test_meta_refresh_target_is_entity_decoded() {
    let current = target("http://example.com/");
    let resp = response(200, None, &meta("/search?a=1&amp;b=2"));
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::MetaOnly),
        Some("http://example.com/search?a=1&b=2".to_string())
    );
}

#[test]
fn test_file_target_follows_absolute_redirects_only() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"capture").unwrap();
    let current = target(&file.path().to_string_lossy());

    let relative = response(302, Some("/next"), "");
    assert_eq!(
        get_redirection_target(&current, &relative, RedirectPolicy::Always),
        None
    );

    let absolute = response(302, Some("http://example.com/next"), "");
    assert_eq!(
        get_redirection_target(&current, &absolute, RedirectPolicy::Always),
        Some("http://example.com/next".to_string())
    );
    assert_eq!(
        get_redirection_target(&current, &absolute, RedirectPolicy::SameSite),
        None
    );
}

#[test]
fn test_find_meta_refresh_variants() {
    assert_eq!(
        find_meta_refresh(r#"<META HTTP-EQUIV=Refresh CONTENT="5; URL=/x">"#),
        Some("/x".to_string())
    );
    assert_eq!(
        find_meta_refresh(r#"<meta content='3;url=/y' http-equiv='refresh' />"#),
        Some("/y".to_string())
    );
    assert_eq!(
        find_meta_refresh(r#"<meta http-equiv="refresh" content="0;url='/z'">"#),
        Some("/z".to_string())
    );
    assert_eq!(find_meta_refresh(r#"<meta http-equiv="refresh" content="30">"#), None);
    assert_eq!(find_meta_refresh(r#"<meta name="description" content="0;url=/no">"#), None);
}

#[test]
fn test_unquoted_refresh_url_stops_at_whitespace() {
    assert_eq!(
        find_meta_refresh("<meta http-equiv=refresh content=0;url=http://example.com/next />"),
        Some("http://example.com/next".to_string())
    );
    let current = target("http://example.com/");
    let resp = response(200, None, "<meta content=0;url=/next http-equiv=refresh />");
    assert_eq!(
        get_redirection_target(&current, &resp, RedirectPolicy::MetaOnly),
        Some("http://example.com/next".to_string())
    );
}

#[test]
fn test_find_meta_refresh_takes_first_tag() {
    let body = concat!(
        r#"<meta content="0;url=/first" http-equiv="refresh">"#,
        r#"<meta http-equiv="refresh" content="0;url=/second">"#,
    );
    assert_eq!(find_meta_refresh(body), Some("/first".to_string()));
}

#[test]
fn test_directive_from_response() {
    let current = target("http://example.com/dir/");
    let resp = response(307, Some("../up"), &meta("side"));
    let directive = RedirectDirective::from_response(&current, &resp);
    assert_eq!(
        directive.from_http_location.as_deref(),
        Some("http://example.com/up")
    );
    assert_eq!(
        directive.from_meta_refresh.as_deref(),
        Some("http://example.com/dir/side")
    );
}
