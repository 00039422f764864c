//! Mapping of AniList entries onto MyAnimeList import records.
//!
//! Each record type lists its fields in the order the import format expects.
//! Fields the import tool requires but AniList has no counterpart for are
//! emitted with fixed values.

use super::date::format_date;
use super::title::resolve_title;
use crate::api::Entry;
use shared::{MediaType, TitleLanguage};

/// One `(element name, text)` pair of a record
pub type Field = (&'static str, String);

/// A flattened list entry ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub enum OutputRecord {
    Anime(AnimeRecord),
    Manga(MangaRecord),
}

/// Fields of an `<anime>` element that depend on the entry
#[derive(Debug, Clone, PartialEq)]
pub struct AnimeRecord {
    pub mal_id: u32,
    pub title: String,
    pub series_type: &'static str,
    pub episodes: u32,
    pub watched_episodes: u32,
    pub start_date: String,
    pub finish_date: String,
    pub score: f64,
    pub status: &'static str,
    pub comments: String,
    pub times_watched: u32,
}

/// Fields of a `<manga>` element that depend on the entry
#[derive(Debug, Clone, PartialEq)]
pub struct MangaRecord {
    pub mal_id: u32,
    pub title: String,
    pub volumes: u32,
    pub chapters: u32,
    pub read_volumes: u32,
    pub read_chapters: u32,
    pub start_date: String,
    pub finish_date: String,
    pub score: f64,
    pub status: &'static str,
    pub comments: String,
    pub times_read: u32,
}

/// Map one entry of the list named `category`.
pub fn map_entry(
    entry: &Entry,
    category: &str,
    language: TitleLanguage,
    media_type: MediaType,
) -> OutputRecord {
    let media = &entry.media;
    let title = resolve_title(&media.title, language);
    let start_date = format_date(entry.started_at.as_ref());
    let finish_date = format_date(entry.completed_at.as_ref());
    let score = entry.score.unwrap_or(0.0);
    let comments = entry.notes.clone().unwrap_or_default();

    match media_type {
        MediaType::Anime => OutputRecord::Anime(AnimeRecord {
            mal_id: media.id_mal.unwrap_or(0),
            title,
            series_type: series_type(media.format.as_deref()),
            episodes: media.episodes.unwrap_or(0),
            watched_episodes: entry.progress.unwrap_or(0),
            start_date,
            finish_date,
            score,
            status: anime_status(category),
            comments,
            times_watched: entry.repeat.unwrap_or(0),
        }),
        MediaType::Manga => OutputRecord::Manga(MangaRecord {
            mal_id: media.id_mal.unwrap_or(0),
            title,
            volumes: media.volumes.unwrap_or(0),
            chapters: media.chapters.unwrap_or(0),
            read_volumes: entry.progress_volumes.unwrap_or(0),
            read_chapters: entry.progress.unwrap_or(0),
            start_date,
            finish_date,
            score,
            status: manga_status(category),
            comments,
            times_read: entry.repeat.unwrap_or(0),
        }),
    }
}

/// MAL status for an AniList anime list name; unknown lists get no status.
pub fn anime_status(category: &str) -> &'static str {
    match category {
        "Completed" => "Completed",
        "Watching" => "Watching",
        "Dropped" => "Dropped",
        "Paused" => "On-Hold",
        "Planning" => "Plan to Watch",
        _ => "",
    }
}

/// MAL status for an AniList manga list name; unknown lists count as completed.
pub fn manga_status(category: &str) -> &'static str {
    match category {
        "Completed" => "Completed",
        "Reading" => "Reading",
        "Dropped" => "Dropped",
        "Paused" => "On-Hold",
        "Planning" => "Plan to Read",
        _ => "Completed",
    }
}

/// MAL series type for an AniList media format
pub fn series_type(format: Option<&str>) -> &'static str {
    match format {
        Some("MOVIE") => "Movie",
        Some("OVA") => "OVA",
        Some("ONA") => "ONA",
        Some("SPECIAL") => "Special",
        Some("TV_SHORT") => "Short",
        Some("MUSIC") => "Music",
        _ => "TV",
    }
}

fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

impl OutputRecord {
    /// Element name of the record in the document
    pub fn element_name(&self) -> &'static str {
        match self {
            OutputRecord::Anime(_) => "anime",
            OutputRecord::Manga(_) => "manga",
        }
    }

    /// MAL status label (first sort key)
    pub fn status(&self) -> &str {
        match self {
            OutputRecord::Anime(record) => record.status,
            OutputRecord::Manga(record) => record.status,
        }
    }

    /// Display title (second sort key)
    pub fn title(&self) -> &str {
        match self {
            OutputRecord::Anime(record) => &record.title,
            OutputRecord::Manga(record) => &record.title,
        }
    }

    /// Free-text fields taken from user data
    pub fn text_fields_mut(&mut self) -> [&mut String; 2] {
        match self {
            OutputRecord::Anime(record) => [&mut record.title, &mut record.comments],
            OutputRecord::Manga(record) => [&mut record.title, &mut record.comments],
        }
    }

    /// All fields in schema order
    pub fn fields(&self) -> Vec<Field> {
        match self {
            OutputRecord::Anime(record) => record.fields(),
            OutputRecord::Manga(record) => record.fields(),
        }
    }
}

impl AnimeRecord {
    fn fields(&self) -> Vec<Field> {
        vec![
            ("series_animedb_id", self.mal_id.to_string()),
            ("series_title", self.title.clone()),
            ("series_type", self.series_type.to_string()),
            ("series_episodes", self.episodes.to_string()),
            ("my_id", "0".to_string()),
            ("my_watched_episodes", self.watched_episodes.to_string()),
            ("my_start_date", self.start_date.clone()),
            ("my_finish_date", self.finish_date.clone()),
            ("my_rated", String::new()),
            ("my_score", format_score(self.score)),
            ("my_storage", String::new()),
            ("my_storage_value", "0.00".to_string()),
            ("my_status", self.status.to_string()),
            ("my_comments", self.comments.clone()),
            ("my_times_watched", self.times_watched.to_string()),
            ("my_rewatch_value", String::new()),
            ("my_priority", "LOW".to_string()),
            ("my_tags", String::new()),
            ("my_rewatching", "0".to_string()),
            ("my_rewatching_ep", "0".to_string()),
            ("my_discuss", "0".to_string()),
            ("my_sns", "default".to_string()),
            ("update_on_import", "1".to_string()),
        ]
    }
}

impl MangaRecord {
    fn fields(&self) -> Vec<Field> {
        vec![
            ("manga_mangadb_id", self.mal_id.to_string()),
            ("manga_title", self.title.clone()),
            ("manga_volumes", self.volumes.to_string()),
            ("manga_chapters", self.chapters.to_string()),
            ("my_id", "0".to_string()),
            ("my_read_volumes", self.read_volumes.to_string()),
            ("my_read_chapters", self.read_chapters.to_string()),
            ("my_start_date", self.start_date.clone()),
            ("my_finish_date", self.finish_date.clone()),
            ("my_scanalation_group", String::new()),
            ("my_score", format_score(self.score)),
            ("my_storage", String::new()),
            ("my_retail_volumes", "0".to_string()),
            ("my_status", self.status.to_string()),
            ("my_comments", self.comments.clone()),
            ("my_times_read", self.times_read.to_string()),
            ("my_tags", String::new()),
            ("my_priority", "Low".to_string()),
            ("my_reread_value", String::new()),
            ("my_rereading", "NO".to_string()),
            ("my_discuss", "YES".to_string()),
            ("my_sns", "default".to_string()),
            ("update_on_import", "1".to_string()),
        ]
    }
}
