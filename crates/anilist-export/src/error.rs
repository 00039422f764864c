//! Error types for fetching and exporting lists.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting a list.
///
/// The `Display` output of the remote variants is shown to end users as-is.
#[derive(Debug, Error)]
pub enum ExportError {
    /// AniList could not find the requested user
    #[error("{0}\nCheck username again!!!")]
    UserNotFound(String),

    /// AniList rejected the media type variable
    #[error("{0}\nEnter proper MediaType (ANIME | MANGA)!!!")]
    InvalidMediaType(String),

    /// The HTTP request itself failed (connect, timeout, body decode)
    #[error("Request to AniList failed: {0}")]
    Request(#[from] reqwest::Error),

    /// AniList answered without errors but also without a list collection
    #[error("AniList returned an unexpected response: {0}")]
    InvalidResponse(String),

    /// The document could not be produced as well-formed XML
    #[error("Failed to format XML document: {0}")]
    Format(String),

    /// Writing the export file failed
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Whether the error is caused by the request parameters rather than by
    /// the service or the local machine
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ExportError::UserNotFound(_) | ExportError::InvalidMediaType(_)
        )
    }
}

/// Result alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
