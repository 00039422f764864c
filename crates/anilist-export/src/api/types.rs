//! AniList GraphQL response types.
//!
//! These types mirror the shape selected by [`MEDIA_LIST_QUERY`](super::query::MEDIA_LIST_QUERY).
//! Almost everything is nullable on AniList's side, so most leaves are `Option`.

use serde::{Deserialize, Serialize};
use shared::TitleLanguage;

/// GraphQL response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the GraphQL `errors` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}

/// `data` payload of the list query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaListData {
    #[serde(rename = "MediaListCollection")]
    pub media_list_collection: Option<MediaListCollection>,
}

/// All of a user's lists for one media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaListCollection {
    #[serde(default)]
    pub lists: Vec<MediaList>,
}

/// A named status bucket ("Watching", "Completed", custom lists, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaList {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// One tracked media item with the user's progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub media: Media,
    pub progress: Option<u32>,
    pub progress_volumes: Option<u32>,
    pub started_at: Option<PartialDate>,
    pub completed_at: Option<PartialDate>,
    /// Score on the 0-10 decimal scale (`POINT_10_DECIMAL`)
    pub score: Option<f64>,
    pub repeat: Option<u32>,
    pub notes: Option<String>,
}

/// Media metadata attached to an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// MyAnimeList ID, absent for titles MAL does not know
    pub id_mal: Option<u32>,
    pub title: MediaTitle,
    /// TV, MOVIE, OVA, ONA, SPECIAL, TV_SHORT, MUSIC, MANGA, NOVEL, ONE_SHOT
    pub format: Option<String>,
    pub episodes: Option<u32>,
    pub volumes: Option<u32>,
    pub chapters: Option<u32>,
}

/// Title variants of a media item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaTitle {
    pub english: Option<String>,
    pub romaji: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    /// Title for a single language
    pub fn get(&self, language: TitleLanguage) -> Option<&str> {
        match language {
            TitleLanguage::English => self.english.as_deref(),
            TitleLanguage::Romaji => self.romaji.as_deref(),
            TitleLanguage::Native => self.native.as_deref(),
        }
    }

    /// Variants in stored order (english, romaji, native)
    pub fn variants(&self) -> impl Iterator<Item = (TitleLanguage, Option<&str>)> {
        TitleLanguage::ALL
            .into_iter()
            .map(move |language| (language, self.get(language)))
    }
}

/// AniList `FuzzyDate`: any component may be unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDate {
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}
