//! Fixed-width rendering of partial dates.

use crate::api::PartialDate;

/// Rendering of a date that was never set
pub const UNKNOWN_DATE: &str = "0000-00-00";

/// Render a partial date as `YYYY-MM-DD`, zero-filling unknown components.
///
/// A missing date object renders the same as one with every component unknown.
pub fn format_date(date: Option<&PartialDate>) -> String {
    let date = date.copied().unwrap_or_default();

    format!(
        "{:04}-{:02}-{:02}",
        date.year.unwrap_or(0),
        date.month.unwrap_or(0),
        date.day.unwrap_or(0)
    )
}
