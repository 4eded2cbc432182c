//! File targets.
//!
//! A file target stands in for a live fetch: either a captured raw HTTP
//! response, split by the configured [`RawResponseParser`], or any other text,
//! used whole as the body.

use std::path::Path;

use log::debug;

use super::raw::RawResponseParser;
use super::response::FetchedParts;
use crate::error_handling::FetchError;
use crate::utils::drop_invalid_utf8;

/// Reads a file target and splits it into response parts.
///
/// The content is read in one go, invalid UTF-8 sequences are dropped, and the
/// result is handed to `parser`.
///
/// # Errors
///
/// Returns `FetchError::File` if the file cannot be read.
pub async fn load_file(
    path: &Path,
    parser: &dyn RawResponseParser,
) -> Result<FetchedParts, FetchError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| FetchError::File {
            path: path.to_path_buf(),
            source,
        })?;
    let content = drop_invalid_utf8(&bytes);
    if content.len() != bytes.len() {
        debug!(
            "Dropped {} invalid byte(s) from {}",
            bytes.len() - content.len(),
            path.display()
        );
    }

    let parts = parser.parse(content);
    debug!(
        "Loaded {} ({} bytes, status {})",
        path.display(),
        bytes.len(),
        parts.status
    );
    Ok(parts)
}
