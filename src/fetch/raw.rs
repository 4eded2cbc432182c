//! Lenient parsing of captured raw HTTP responses.
//!
//! Captures come from proxies, `curl -i`, packet dumps and hand-edited files.
//! The parser accepts anything that starts with an `HTTP/1.x NNN` status line
//! and has a blank line after the header block; everything else is treated as
//! a plain body. It never fails.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::response::FetchedParts;
use crate::config::HEADER_BLOCK_TERMINATOR;

static RAW_RESPONSE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\AHTTP/1\.\d \d{3} .+?\r\n\r\n")
        .expect("Failed to compile raw response regex - this is a bug")
});

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\AHTTP/1\.\d (\d{3}) ").expect("Failed to compile status line regex - this is a bug")
});

/// Splits sanitized file content into response parts.
///
/// Implementations must not fail: content that is not a raw HTTP response comes
/// back as body-only parts.
pub trait RawResponseParser: Send + Sync {
    fn parse(&self, content: String) -> FetchedParts;
}

/// Regex-driven parser tolerant of malformed captures.
///
/// - Header lines without a colon are ignored.
/// - A repeated header keeps its last value, except `set-cookie`, whose values
///   are collected in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientParser;

impl RawResponseParser for LenientParser {
    fn parse(&self, content: String) -> FetchedParts {
        if !RAW_RESPONSE_SHAPE.is_match(&content) {
            return FetchedParts {
                body: Some(content),
                ..Default::default()
            };
        }

        let (head, body) = content
            .split_once(HEADER_BLOCK_TERMINATOR)
            .unwrap_or((content.as_str(), ""));
        let lines: Vec<&str> = head.split("\r\n").collect();

        let status = STATUS_LINE
            .captures(lines[0])
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0);

        let mut headers = BTreeMap::new();
        let mut cookies = Vec::new();
        for line in &lines[1..] {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.to_lowercase();
            let value = value.trim_start().to_string();
            if name == "set-cookie" {
                cookies.push(value);
            } else {
                headers.insert(name, value);
            }
        }
        if !cookies.is_empty() {
            headers.insert("set-cookie".to_string(), cookies.join("\n"));
        }

        FetchedParts {
            status,
            ip: None,
            headers,
            cookies,
            body: Some(body.to_string()),
            raw_headers: Some(assemble_raw_headers(&lines)),
        }
    }
}

/// Joins header lines (status line first) with `\n` and terminates the block
/// with a blank line.
pub(crate) fn assemble_raw_headers<S: AsRef<str>>(lines: &[S]) -> String {
    let mut block = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    block.push_str(HEADER_BLOCK_TERMINATOR);
    block
}
