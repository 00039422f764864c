//! AniList exporter library for producing MyAnimeList import files.
//!
//! This library fetches a user's anime or manga lists from the AniList
//! GraphQL API and converts them into the XML format accepted by the
//! MyAnimeList list importer.

pub mod api;
pub mod convert;
pub mod error;
pub mod exporter;

pub use api::AniListClient;
pub use convert::{ExportDocument, OutputRecord};
pub use error::ExportError;
pub use exporter::{ExportReport, ExportRequest, Exporter};
