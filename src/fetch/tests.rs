// Fetch module tests.

use std::io::Write;

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::NamedTempFile;

use super::*;
use crate::config::HttpMethod;

fn raw_capture(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    file
}

#[tokio::test]
async fn test_open_raw_capture_file() {
    let file = raw_capture(
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\n<html>hi</html>",
    );
    let target = Target::new(file.path().to_string_lossy()).unwrap();

    let response = Fetcher::new()
        .open(&target, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("content-type"), Some("text/html"));
    assert_eq!(response.header("set-cookie"), Some("a=1\nb=2"));
    assert_eq!(response.cookies(), ["a=1".to_string(), "b=2".to_string()]);
    assert_eq!(response.body(), "<html>hi</html>");
    assert_eq!(response.content_hash(), ContentHash::of("<html>hi</html>"));
    assert!(response.ip().is_none());
}

#[tokio::test]
async fn test_open_plain_file_drops_invalid_utf8() {
    let file = raw_capture(b"<p>caf\xe9</p>");
    let target = Target::new(file.path().to_string_lossy()).unwrap();

    let response = Fetcher::new()
        .open(&target, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 0);
    assert_eq!(response.body(), "<p>caf</p>");
    assert_eq!(response.raw_response(), "<p>caf</p>");
    assert_eq!(response.tag_pattern().as_str(), "p,/p");
}

#[tokio::test]
async fn test_open_unresolved_target() {
    let target = Target::new("no-such-file-or-url.invalid").unwrap();
    let result = Fetcher::new().open(&target, &FetchOptions::default()).await;
    assert!(matches!(result, Err(FetchError::Unreachable(_))));
}

#[tokio::test]
async fn test_open_url_get() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/page")).respond_with(
            status_code(200)
                .insert_header("Content-Type", "text/html")
                .append_header("Set-Cookie", "a=1")
                .append_header("Set-Cookie", "b=2")
                .body("<html><title>t</title></html>"),
        ),
    );
    let target = Target::new(server.url("/page").to_string()).unwrap();

    let response = Fetcher::new()
        .open(&target, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), "<html><title>t</title></html>");
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("set-cookie"), Some("a=1\nb=2"));
    assert!(response.cookies().is_empty());
    assert!(response.raw_headers().starts_with("HTTP/1.1 200 OK\n"));
    assert!(response.raw_headers().ends_with("\r\n\r\n"));
    assert_eq!(
        response.raw_response(),
        format!("{}{}", response.raw_headers(), response.body())
    );
    assert!(response.ip().is_some());
}

#[tokio::test]
async fn test_open_url_head_has_empty_body() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/")).respond_with(status_code(200)),
    );
    let target = Target::new(server.url("/").to_string()).unwrap();
    let options = FetchOptions {
        method: HttpMethod::Head,
        ..Default::default()
    };

    let response = Fetcher::new().open(&target, &options).await.unwrap();

    assert_eq!(response.body(), "");
    assert_eq!(response.content_hash(), ContentHash::of(""));
}

#[tokio::test]
async fn test_open_url_connection_refused() {
    let target = Target::new("http://127.0.0.1:1/").unwrap();
    let result = Fetcher::new().open(&target, &FetchOptions::default()).await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}
