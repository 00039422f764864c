//! Display title selection.

use crate::api::MediaTitle;
use shared::TitleLanguage;

/// Pick the display title for a media item.
///
/// The preferred language wins when it has a non-empty title; otherwise the
/// first non-empty variant in stored order is used. Angle brackets are
/// removed from the result. With no usable variant the title is empty.
pub fn resolve_title(title: &MediaTitle, preferred: TitleLanguage) -> String {
    non_empty(title.get(preferred))
        .or_else(|| title.variants().find_map(|(_, value)| non_empty(value)))
        .map(strip_angle_brackets)
        .unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn strip_angle_brackets(value: &str) -> String {
    value.replace(['<', '>'], "")
}
