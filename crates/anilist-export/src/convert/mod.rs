//! Conversion of AniList lists into the MyAnimeList import format.
//!
//! The pipeline is leaf-first: dates and titles are normalized per field,
//! entries become flat records, and the document collects, counts and sorts
//! them before writing XML.

pub mod counter;
pub mod date;
pub mod document;
pub mod record;
pub mod title;

pub use counter::{category_total, total_entries, FAVORITES};
pub use date::format_date;
pub use document::{DocumentSettings, ExportDocument, ListHeader};
pub use record::{map_entry, AnimeRecord, MangaRecord, OutputRecord};
pub use title::resolve_title;
