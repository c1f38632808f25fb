//! Common helper functions for output formatting.

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a publication date relative to `now`.
pub fn format_pub_date(date: Option<&DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let local = date.with_timezone(&Local);
    let today = now.with_timezone(&Local).date_naive();
    let day = local.date_naive();

    if day == today {
        local.format("%H:%M").to_string()
    } else if day == today - chrono::Duration::days(1) {
        "Yesterday".to_string()
    } else {
        local.format("%b %d").to_string()
    }
}

/// Formats the unread marker for an item.
pub fn format_unread(unread: bool, use_colors: bool) -> String {
    let marker = if unread { "N" } else { " " };
    if use_colors && unread {
        marker.green().bold().to_string()
    } else {
        marker.to_string()
    }
}

/// Formats a count of unread items out of a total.
pub fn format_counts(unread: usize, total: usize, use_colors: bool) -> String {
    let counts = format!("({unread}/{total})");
    if use_colors && unread > 0 {
        counts.green().to_string()
    } else {
        counts
    }
}
