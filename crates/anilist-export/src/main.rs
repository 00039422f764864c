//! AniList exporter CLI application.

use anilist_export::{ExportRequest, Exporter};
use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, MediaType, TitleLanguage};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export an AniList list as a MyAnimeList import file", long_about = None)]
struct Args {
    /// AniList username
    username: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// List to export (ANIME or MANGA); defaults to the configured type
    #[arg(short, long)]
    media_type: Option<MediaType>,

    /// Preferred title language (english, romaji or native)
    #[arg(short, long)]
    language: Option<TitleLanguage>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    shared::logging::init(shared::LogConfig::from_config(
        &config,
        "anilist-export",
        args.verbose,
    ))?;

    info!(config_file = %args.config.display(), "Loaded configuration");

    let request = ExportRequest {
        username: args.username,
        media_type: args.media_type.unwrap_or(config.export.default_media_type),
        language: args.language.unwrap_or(config.export.default_title_language),
    };

    let exporter = Exporter::from_config(&config).context("Failed to create exporter")?;
    let report = exporter
        .export(&request)
        .await
        .with_context(|| format!("Export failed for {}", request.username))?;

    info!(
        username = %report.username,
        media_type = %report.media_type,
        records = report.records,
        exported_at = %report.exported_at.to_rfc3339(),
        "Export complete"
    );
    println!("{}", report.path.display());

    Ok(())
}
