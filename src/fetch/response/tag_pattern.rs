//! Tag pattern: the sequence of tag names in a body.
//!
//! Signature matchers compare a page's tag structure without parsing HTML.
//! The pattern is the lowercase name of every `<...` token, comma-joined, with
//! everything inside `<script>...</script>` left out except the two script
//! tokens themselves.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^\s>]*)").expect("Failed to compile tag token regex - this is a bug")
});

/// Comma-joined tag names of a body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagPattern(String);

impl TagPattern {
    pub fn from_body(body: &str) -> Self {
        let mut in_script = false;
        let mut tags: Vec<String> = Vec::new();

        for caps in TAG_TOKEN.captures_iter(body) {
            let tag = caps[1].to_lowercase();
            if tag == "/script" {
                in_script = false;
                tags.push(tag);
                continue;
            }
            let keep = !in_script;
            if tag == "script" {
                in_script = true;
            }
            if keep {
                tags.push(tag);
            }
        }

        TagPattern(tags.join(","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual tag names, in document order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').filter(|_| !self.0.is_empty())
    }

    /// True if `pattern` (e.g. `"html,head,title"`) occurs in the pattern.
    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
