//! Item output formatting.

use chrono::Utc;
use owo_colors::OwoColorize;
use serde::Serialize;

use newsfilter_core::ItemInFeed;

use super::helpers::{format_pub_date, format_unread, truncate_str};

/// JSON output structure for the items and search commands.
#[derive(Serialize)]
pub struct ItemsListOutput<'a> {
    pub items: Vec<ItemOutput<'a>>,
    pub total: usize,
    pub has_more: bool,
}

/// JSON output structure for a single item.
#[derive(Serialize)]
pub struct ItemOutput<'a> {
    pub guid: &'a str,
    pub title: &'a str,
    pub link: &'a str,
    pub author: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    pub unread: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure_url: Option<&'a str>,
    pub feed_url: &'a str,
    pub feed_title: &'a str,
}

/// Formats items as JSON. `total` counts matches before any limit.
pub fn format_items_json(items: &[ItemInFeed<'_>], total: usize) -> Result<String, serde_json::Error> {
    let items_output: Vec<ItemOutput> = items
        .iter()
        .map(|view| ItemOutput {
            guid: &view.item.guid,
            title: &view.item.title,
            link: &view.item.link,
            author: &view.item.author,
            pub_date: view.item.pub_date.map(|d| d.to_rfc3339()),
            unread: view.item.unread,
            flags: Some(view.item.flags.as_str()).filter(|f| !f.is_empty()),
            enclosure_url: view.item.enclosure_url.as_deref(),
            feed_url: &view.feed.rss_url,
            feed_title: &view.feed.title,
        })
        .collect();

    let output = ItemsListOutput {
        has_more: total > items_output.len(),
        items: items_output,
        total,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats items as a table.
pub fn format_items_table(items: &[ItemInFeed<'_>], use_colors: bool) -> String {
    if items.is_empty() {
        return "No items found.\n".to_string();
    }

    let now = Utc::now();
    let mut output = String::new();

    // Header
    let header = format!("{:<1} {:<9} {:<20} {}", "", "Date", "Feed", "Title");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for view in items {
        let unread = format_unread(view.item.unread, use_colors);
        let date = format_pub_date(view.item.pub_date.as_ref(), now);
        let feed = truncate_str(&view.feed.title, 20);
        let title = truncate_str(&view.item.title, 60);
        let title = if use_colors && view.item.unread {
            title.bold().to_string()
        } else {
            title
        };

        output.push_str(&format!("{:<1} {:<9} {:<20} {}\n", unread, date, feed, title));
    }

    output
}
