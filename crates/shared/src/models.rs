//! Data models shared by the exporter and the bot.
//!
//! These are the request parameters of an export: which list to fetch and
//! which title language to prefer when several are available.

use serde::{Deserialize, Serialize};

/// Kind of list on AniList
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    #[default]
    Anime,
    Manga,
}

impl MediaType {
    /// Value sent as the GraphQL `type` variable
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Anime => "ANIME",
            MediaType::Manga => "MANGA",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANIME" => Ok(MediaType::Anime),
            "MANGA" => Ok(MediaType::Manga),
            _ => Err(anyhow::anyhow!("Invalid media type: {}", s)),
        }
    }
}

/// Title language variant on AniList, in the order titles are stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TitleLanguage {
    #[default]
    English,
    Romaji,
    Native,
}

impl TitleLanguage {
    /// All variants in stored order
    pub const ALL: [TitleLanguage; 3] = [
        TitleLanguage::English,
        TitleLanguage::Romaji,
        TitleLanguage::Native,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleLanguage::English => "english",
            TitleLanguage::Romaji => "romaji",
            TitleLanguage::Native => "native",
        }
    }
}

impl std::fmt::Display for TitleLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TitleLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(TitleLanguage::English),
            "romaji" => Ok(TitleLanguage::Romaji),
            "native" => Ok(TitleLanguage::Native),
            _ => Err(anyhow::anyhow!("Invalid title language: {}", s)),
        }
    }
}
