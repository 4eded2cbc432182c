//! Utility functions.
//!
//! This module provides:
//! - Content sanitization (invalid UTF-8 dropping, HTML entity decoding)

pub mod sanitize;

pub use sanitize::{decode_html_entities, drop_invalid_utf8};
