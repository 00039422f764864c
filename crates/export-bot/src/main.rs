//! Telegram bot that turns AniList lists into MyAnimeList import files.
//!
//! Users send their AniList username (optionally followed by the media type
//! and title language on separate lines) and receive the XML file back.

mod command;
mod handlers;

use anilist_export::Exporter;
use anyhow::{Context, Result};
use clap::Parser;
use command::RequestDefaults;
use handlers::BotState;
use shared::Config;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;

/// Export bot CLI arguments
#[derive(Parser, Debug)]
#[command(name = "export-bot")]
#[command(about = "Telegram bot exporting AniList lists for MyAnimeList import")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    // Initialize logging
    shared::logging::init(shared::LogConfig::from_config(
        &config,
        "export-bot",
        args.verbose,
    ))?;

    let token = config.bot_token().with_context(|| {
        format!(
            "No bot token: set {} or telegram.bot_token",
            shared::config::BOT_TOKEN_ENV
        )
    })?;

    let exporter = Exporter::from_config(&config).context("Failed to create exporter")?;
    let state = Arc::new(BotState {
        exporter,
        defaults: RequestDefaults {
            media_type: config.export.default_media_type,
            language: config.export.default_title_language,
        },
    });

    info!(
        output_dir = %config.output_dir().display(),
        "Starting export bot"
    );

    let bot = Bot::new(token);
    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Export bot stopped");

    Ok(())
}
