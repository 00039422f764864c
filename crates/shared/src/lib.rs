//! Shared library for the AniList to MyAnimeList exporter.
//!
//! This crate provides common functionality used by the CLI and the bot:
//! - Configuration management
//! - Export file paths
//! - Logging infrastructure
//! - Request parameter types (media type, title language)

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;
pub use paths::ExportPaths;
