//! Date and time utility functions
//!
//! Projects and catalog entries carry a UTC creation timestamp; these helpers
//! turn it into the short human-readable form shown on the listing pages.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Standard date format used for full dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Prefix format for stored upload names, e.g. `20250115_143000`
pub const UPLOAD_PREFIX_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Format a creation timestamp relative to the local date
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    let date = created_at.with_timezone(&Local).date_naive();
    format_relative_date(date, Local::now().date_naive())
}

/// Format `date` relative to `today`
///
/// # Returns
/// * `"today"`, `"yesterday"`, `"N days ago"` within a month,
///   otherwise `"Jan 15"` (same year) or `"Jan 15, 2024"`
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days_ago = (today - date).num_days();

    match days_ago {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        d if (2..=30).contains(&d) => format!("{d} days ago"),
        _ => {
            if date.year() == today.year() {
                date.format("%b %d").to_string()
            } else {
                date.format("%b %d, %Y").to_string()
            }
        }
    }
}
