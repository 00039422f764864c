//! Export orchestrator.
//!
//! Coordinates one export: fetch the lists, build the document, write the
//! file. Nothing is kept between requests; two exports of the same user and
//! media type write the same file and the last one wins.

use crate::api::{AniListClient, MediaList};
use crate::convert::{DocumentSettings, ExportDocument};
use crate::error::{ExportError, Result};
use chrono::{DateTime, Utc};
use shared::{Config, ExportPaths, MediaType, TitleLanguage};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Parameters of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub username: String,
    pub media_type: MediaType,
    pub language: TitleLanguage,
}

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub username: String,
    pub media_type: MediaType,
    pub path: PathBuf,
    pub records: usize,
    pub exported_at: DateTime<Utc>,
}

/// Fetches lists and writes import files
pub struct Exporter {
    client: AniListClient,
    paths: ExportPaths,
    user_id: u64,
}

impl Exporter {
    /// Create a new exporter
    pub fn new(client: AniListClient, paths: ExportPaths, user_id: u64) -> Self {
        Self {
            client,
            paths,
            user_id,
        }
    }

    /// Create an exporter from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = AniListClient::from_config(&config.anilist)?;
        let paths = ExportPaths::new(config.output_dir(), config.export.file_prefix.clone());

        Ok(Self::new(client, paths, config.export.user_id))
    }

    /// Run a complete export: fetch, build, write
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportReport> {
        let collection = self
            .client
            .fetch_list(&request.username, request.media_type)
            .await?;

        self.write(request, &collection.lists)
    }

    /// Build the document for already fetched lists and write it to disk.
    ///
    /// The file is only touched once the document has been fully serialized.
    pub fn write(&self, request: &ExportRequest, lists: &[MediaList]) -> Result<ExportReport> {
        let settings = DocumentSettings {
            user_name: request.username.clone(),
            user_id: self.user_id,
            media_type: request.media_type,
            language: request.language,
        };

        let document = ExportDocument::build(lists, &settings);
        if document.records.is_empty() {
            warn!(
                username = %request.username,
                media_type = %request.media_type,
                "No entries to export"
            );
        }

        let xml = document.to_xml()?;
        let path = self.paths.export_file(&request.username, request.media_type);

        self.paths.create_dirs().map_err(|source| ExportError::Io {
            path: self.paths.root().to_path_buf(),
            source,
        })?;
        self.replace_file(&path, &xml)?;

        info!(
            username = %request.username,
            media_type = %request.media_type,
            records = document.records.len(),
            bytes = xml.len(),
            path = %path.display(),
            "Export written"
        );

        Ok(ExportReport {
            username: request.username.clone(),
            media_type: request.media_type,
            path,
            records: document.records.len(),
            exported_at: Utc::now(),
        })
    }

    /// Write `contents` next to `path` and rename it into place, so readers
    /// see either the previous file or the complete new one.
    fn replace_file(&self, path: &std::path::Path, contents: &[u8]) -> Result<()> {
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = NamedTempFile::new_in(self.paths.root()).map_err(io_error)?;
        file.write_all(contents).map_err(io_error)?;
        file.persist(path).map_err(|e| io_error(e.error))?;

        Ok(())
    }
}
