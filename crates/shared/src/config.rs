//! Configuration management for the AniList exporter.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use crate::models::{MediaType, TitleLanguage};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `telegram.bot_token`
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// AniList API settings
    pub anilist: AniListConfig,

    /// Export file settings
    pub export: ExportConfig,

    /// Telegram bot settings
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// AniList API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AniListConfig {
    /// GraphQL endpoint
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

/// Export file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory (relative to data directory or absolute)
    pub output_dir: String,

    /// File name prefix, as in `<prefix>-<username>-<type>.xml`
    pub file_prefix: String,

    /// Value written to `<user_id>` in the header.
    ///
    /// The import tool does not match it against the importing account, so
    /// it is a fixed placeholder rather than anything derived from AniList.
    pub user_id: u64,

    /// Media type used when a request does not name one
    pub default_media_type: MediaType,

    /// Title language used when a request does not name one
    pub default_title_language: TitleLanguage,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from BotFather (overridden by `BOT_TOKEN`)
    pub bot_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                root_dir: "data".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
            anilist: AniListConfig {
                api_url: "https://graphql.anilist.co".to_string(),
                timeout_seconds: 30,
                user_agent: "anilist-export/0.1.0".to_string(),
            },
            export: ExportConfig {
                output_dir: "exports".to_string(),
                file_prefix: "MAL".to_string(),
                user_id: 0,
                default_media_type: MediaType::Anime,
                default_title_language: TitleLanguage::English,
            },
            telegram: TelegramConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get the absolute path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the absolute path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.log_dir)
    }

    /// Get the absolute path for the export directory
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.export.output_dir)
    }

    /// Bot token, preferring the environment over the config file
    pub fn bot_token(&self) -> Option<String> {
        std::env::var(BOT_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .or_else(|| Some(self.telegram.bot_token.clone()).filter(|t| !t.is_empty()))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.root_dir, "data");
        assert_eq!(config.anilist.api_url, "https://graphql.anilist.co");
        assert_eq!(config.export.file_prefix, "MAL");
        assert_eq!(config.export.default_media_type, MediaType::Anime);
        assert_eq!(config.export.default_title_language, TitleLanguage::English);
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.export.user_id = 42;
        original_config.export.default_media_type = MediaType::Manga;
        original_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.data.root_dir, original_config.data.root_dir);
        assert_eq!(loaded_config.export.user_id, 42);
        assert_eq!(loaded_config.export.default_media_type, MediaType::Manga);

        Ok(())
    }

    #[test]
    fn test_telegram_section_optional() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut content = toml::to_string_pretty(&Config::default())?;
        let telegram_at = content.find("[telegram]").unwrap_or(content.len());
        content.truncate(telegram_at);
        std::fs::write(&config_path, content)?;

        let config = Config::from_file(&config_path)?;
        assert!(config.telegram.bot_token.is_empty());

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        // Should return default config without error
        assert_eq!(config.data.root_dir, "data");
    }

    #[test]
    fn test_path_resolution() {
        let mut config = Config::default();

        assert!(config.log_dir().ends_with("data/logs"));
        assert!(config.output_dir().ends_with("data/exports"));

        config.export.output_dir = "/srv/exports".to_string();
        assert_eq!(config.output_dir(), PathBuf::from("/srv/exports"));
    }
}
