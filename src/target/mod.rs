//! Target classification.
//!
//! A [`Target`] is the immutable identity of one hop: the string the caller
//! supplied, whether it names a URL or a local file, and (for URLs) the parsed
//! and normalized address.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error_handling::TargetError;

/// What a target string refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// An `http://` or `https://` URL.
    Url,
    /// An existing, readable local file (typically a captured raw HTTP response).
    File,
    /// Neither; opening it will fail.
    Unresolved,
}

/// One target to fetch.
///
/// # Examples
///
/// ```
/// use target_fetch::Target;
///
/// let target = Target::new("http://example.com").unwrap();
/// assert!(target.is_url());
/// assert_eq!(target.uri().unwrap().path(), "/");
/// ```
#[derive(Debug, Clone)]
pub struct Target {
    raw: String,
    kind: TargetKind,
    uri: Option<Url>,
}

impl Target {
    /// Classifies `raw` as a URL, a file, or neither.
    ///
    /// A case-insensitive `http://`/`https://` prefix makes it a URL. The URL is
    /// parsed, and an empty path is replaced by `/` (many servers answer 400 to
    /// an empty path and 200 to `/`). Anything else is looked up on the local
    /// filesystem.
    ///
    /// # Errors
    ///
    /// - `TargetError::InvalidUrl` if a URL-shaped target does not parse
    /// - `TargetError::IsDirectory` if the path exists and is a directory
    /// - `TargetError::Unreadable` if the path exists and cannot be opened
    pub fn new(raw: impl Into<String>) -> Result<Self, TargetError> {
        let raw = raw.into();

        if has_url_scheme(&raw) {
            let mut uri = Url::parse(&raw).map_err(|source| TargetError::InvalidUrl {
                target: raw.clone(),
                source,
            })?;
            if uri.path().is_empty() {
                uri.set_path("/");
            }
            return Ok(Target {
                raw,
                kind: TargetKind::Url,
                uri: Some(uri),
            });
        }

        let kind = classify_path(Path::new(&raw))?;
        Ok(Target {
            raw,
            kind,
            uri: None,
        })
    }

    /// The string the caller supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_url(&self) -> bool {
        self.kind == TargetKind::Url
    }

    pub fn is_file(&self) -> bool {
        self.kind == TargetKind::File
    }

    /// Parsed and normalized URL; `None` unless this is a URL target.
    pub fn uri(&self) -> Option<&Url> {
        self.uri.as_ref()
    }

    /// Host of the URL, if any.
    pub fn host(&self) -> Option<&str> {
        self.uri.as_ref().and_then(Url::host_str)
    }

    /// Path of a file target.
    pub fn path(&self) -> Option<PathBuf> {
        self.is_file().then(|| PathBuf::from(&self.raw))
    }

    /// True if `candidate` names this very target, either as supplied or in its
    /// normalized URL form.
    pub fn is_same_as(&self, candidate: &str) -> bool {
        candidate == self.raw || self.uri.as_ref().is_some_and(|uri| candidate == uri.as_str())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn has_url_scheme(raw: &str) -> bool {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn classify_path(path: &Path) -> Result<TargetKind, TargetError> {
    let metadata = match path.metadata() {
        Ok(metadata) => metadata,
        Err(_) => return Ok(TargetKind::Unresolved),
    };
    if metadata.is_dir() {
        return Err(TargetError::IsDirectory(path.to_path_buf()));
    }
    // Opening is the only reliable readability check (ACLs, capabilities, root)
    File::open(path).map_err(|source| TargetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TargetKind::File)
}
