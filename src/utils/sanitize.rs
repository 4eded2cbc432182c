//! Utilities for sanitizing captured content.
//!
//! Captures on disk are frequently truncated or mixed-encoding. Everything that
//! reaches the text-matching stages must be valid UTF-8, so invalid sequences
//! are dropped here instead of failing the hop.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(quot|apos|amp|lt|gt);").expect("Failed to compile HTML entity regex - this is a bug")
});

/// Converts raw bytes to text, dropping every invalid UTF-8 sequence.
///
/// Unlike `String::from_utf8_lossy`, nothing is substituted for the invalid
/// bytes, and a genuine U+FFFD already present in the input is kept.
///
/// # Arguments
///
/// * `bytes` - The raw content
///
/// # Returns
///
/// The valid UTF-8 portions of `bytes`, concatenated.
pub fn drop_invalid_utf8(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Decodes the five XML entities (`&quot; &apos; &amp; &lt; &gt;`).
///
/// Decoding happens in a single pass, so `&amp;lt;` becomes `&lt;`, not `<`.
/// Other entities and numeric references are left alone.
pub fn decode_html_entities(s: &str) -> String {
    HTML_ENTITY
        .replace_all(s, |caps: &Captures<'_>| match &caps[1] {
            "quot" => "\"",
            "apos" => "'",
            "amp" => "&",
            "lt" => "<",
            _ => ">",
        })
        .into_owned()
}
