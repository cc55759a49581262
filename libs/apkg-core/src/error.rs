//! Error types for apkg-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while reading a packaged deck.
///
/// Recoverable "nothing there" outcomes (unknown category, empty deck,
/// unusable note template) are not errors; the selection functions return
/// `Ok(None)` for those. A missing archive file is the exception: it gets
/// its own variant so callers can still treat it as a retry prompt.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("invalid archive: no collection database member")]
    MissingCollection,

    #[error("category index {index} out of range (have {count} categories)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("collection metadata: {0}")]
    Json(#[from] serde_json::Error),
}
