//! File path utilities for export artifacts.
//!
//! Every export lands in one flat directory, named after the requesting
//! user and the list kind, so a second export of the same list replaces the
//! first.

use crate::models::MediaType;
use std::path::{Path, PathBuf};

/// File path manager for exported lists
#[derive(Debug, Clone)]
pub struct ExportPaths {
    root: PathBuf,
    prefix: String,
}

impl ExportPaths {
    /// Create a new ExportPaths writing into `root` with the given file prefix
    pub fn new(root: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    /// Get the export directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the export file for a user's list: `<prefix>-<username>-<TYPE>.xml`
    pub fn export_file(&self, username: &str, media_type: MediaType) -> PathBuf {
        self.root.join(format!(
            "{}-{}-{}.xml",
            self.prefix,
            Self::sanitize(username),
            media_type
        ))
    }

    /// Create the export directory
    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Replace characters that are not valid in file names
    pub fn sanitize(name: &str) -> String {
        let safe = name
            .trim()
            .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");

        match safe.as_str() {
            "" | "." | ".." => "_".to_string(),
            _ => safe,
        }
    }
}
