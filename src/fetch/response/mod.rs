//! Normalized response data.
//!
//! Both leaf fetchers (file and HTTP) produce [`FetchedParts`]. The parts are
//! turned into a [`Response`] exactly once, after the body is final, so the
//! content hash and the tag pattern always describe the body callers see.

mod tag_pattern;

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use md5::{Digest, Md5};
use serde::{Serialize, Serializer};

pub use tag_pattern::TagPattern;

/// What a leaf fetcher captured, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedParts {
    /// Status code, 0 if none was obtained
    pub status: u16,
    /// Address the target host resolved to (live fetches only)
    pub ip: Option<IpAddr>,
    /// Lowercase header name to value; repeated `set-cookie` values joined by `\n`
    pub headers: BTreeMap<String, String>,
    /// Raw `Set-Cookie` values (file targets only)
    pub cookies: Vec<String>,
    /// Body, or `None` if the exchange ended before one was sent
    pub body: Option<String>,
    /// Header block as transmitted/stored
    pub raw_headers: Option<String>,
}

/// MD5 digest of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    pub fn of(body: &str) -> Self {
        let digest = Md5::digest(body.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest);
        ContentHash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Lowercase hex form, as used in fingerprint databases.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The normalized result of one hop. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    status: u16,
    ip: Option<IpAddr>,
    headers: BTreeMap<String, String>,
    cookies: Vec<String>,
    body: String,
    raw_headers: String,
    raw_response: String,
    content_hash: ContentHash,
    tag_pattern: TagPattern,
}

impl Response {
    /// Normalizes the parts captured by a leaf fetcher.
    ///
    /// - A missing body (connection ended after the headers, HEAD, 204, 304...)
    ///   becomes `""`.
    /// - `content_hash` and `tag_pattern` are derived from that final body.
    /// - With a raw header block, `raw_response` is the block followed by the
    ///   body. Without one, `raw_response` is the body alone, `raw_headers` is
    ///   empty and any cookies are discarded.
    pub fn from_parts(parts: FetchedParts) -> Self {
        let body = parts.body.unwrap_or_default();
        let content_hash = ContentHash::of(&body);
        let tag_pattern = TagPattern::from_body(&body);

        let (raw_headers, raw_response, cookies) = match parts.raw_headers {
            Some(raw_headers) => {
                let raw_response = format!("{raw_headers}{body}");
                (raw_headers, raw_response, parts.cookies)
            }
            None => (String::new(), body.clone(), Vec::new()),
        };

        Response {
            status: parts.status,
            ip: parts.ip,
            headers: parts.headers,
            cookies,
            body,
            raw_headers,
            raw_response,
            content_hash,
            tag_pattern,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn cookies(&self) -> &[String] {
        &self.cookies
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn raw_headers(&self) -> &str {
        &self.raw_headers
    }

    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }

    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    pub fn tag_pattern(&self) -> &TagPattern {
        &self.tag_pattern
    }

    /// True for 3xx status codes.
    pub fn is_redirect_status(&self) -> bool {
        (300..=399).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_known_values() {
        assert_eq!(
            ContentHash::of("").to_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            ContentHash::of("hello").to_string(),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_missing_body_becomes_empty() {
        let response = Response::from_parts(FetchedParts {
            status: 204,
            raw_headers: Some("HTTP/1.1 204 No Content\r\n\r\n".to_string()),
            ..Default::default()
        });
        assert_eq!(response.body(), "");
        assert_eq!(response.content_hash(), ContentHash::of(""));
        assert_eq!(response.raw_response(), "HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[test]
    fn test_body_only_parts_drop_cookies() {
        let response = Response::from_parts(FetchedParts {
            body: Some("<p>plain</p>".to_string()),
            cookies: vec!["a=1".to_string()],
            ..Default::default()
        });
        assert_eq!(response.status(), 0);
        assert_eq!(response.raw_headers(), "");
        assert_eq!(response.raw_response(), "<p>plain</p>");
        assert!(response.cookies().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_hash_and_tag_pattern_follow_final_body() {
        let body = "<html><body>hi</body></html>";
        let response = Response::from_parts(FetchedParts {
            status: 200,
            body: Some(body.to_string()),
            raw_headers: Some("HTTP/1.1 200 OK\r\n\r\n".to_string()),
            cookies: vec!["sid=1".to_string()],
            ..Default::default()
        });
        assert_eq!(response.content_hash(), ContentHash::of(body));
        assert_eq!(response.tag_pattern(), &TagPattern::from_body(body));
        assert_eq!(
            response.raw_response(),
            format!("HTTP/1.1 200 OK\r\n\r\n{body}")
        );
        assert_eq!(response.cookies(), ["sid=1".to_string()]);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/html".to_string());
        let response = Response::from_parts(FetchedParts {
            headers,
            ..Default::default()
        });
        assert_eq!(response.header("Content-Type"), Some("text/html"));
        assert_eq!(response.header("location"), None);
    }

    #[test]
    fn test_is_redirect_status() {
        for (status, expected) in [(299, false), (300, true), (302, true), (399, true), (400, false)] {
            let response = Response::from_parts(FetchedParts {
                status,
                ..Default::default()
            });
            assert_eq!(response.is_redirect_status(), expected, "status {status}");
        }
    }

    #[test]
    fn test_response_serializes_hash_as_hex() {
        let response = Response::from_parts(FetchedParts {
            body: Some("hello".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["content_hash"], "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(json["body"], "hello");
    }
}
