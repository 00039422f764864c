//! Per-status entry counts for the export header.

use crate::api::MediaList;

/// Pseudo-category that mirrors favourites and never gets exported
pub const FAVORITES: &str = "Favorites";

/// Number of entries in the list named `status`, or 0 when there is none
pub fn category_total(lists: &[MediaList], status: &str) -> usize {
    lists
        .iter()
        .find(|list| list.name == status)
        .map_or(0, |list| list.entries.len())
}

/// Number of entries across every exported list
pub fn total_entries(lists: &[MediaList]) -> usize {
    exported_lists(lists).map(|list| list.entries.len()).sum()
}

/// Lists that end up in the document, in their original order
pub fn exported_lists(lists: &[MediaList]) -> impl Iterator<Item = &MediaList> {
    lists.iter().filter(|list| list.name != FAVORITES)
}
