//! Shared utility functions.

use chrono::{DateTime, Utc};

/// Maximum length of a Discord embed field value.
pub const EMBED_FIELD_LIMIT: usize = 1024;

/// Formats a timestamp as a calendar date for display.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Converts a Blizzard millisecond epoch timestamp to a UTC datetime.
pub fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
