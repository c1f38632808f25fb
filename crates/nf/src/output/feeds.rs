//! Feed output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use newsfilter_core::RssFeed;

use super::helpers::{format_counts, truncate_str};

/// JSON output structure for the feeds command.
#[derive(Serialize)]
pub struct FeedsListOutput<'a> {
    pub feeds: Vec<FeedOutput<'a>>,
}

/// JSON output structure for a single feed.
#[derive(Serialize)]
pub struct FeedOutput<'a> {
    pub rss_url: &'a str,
    pub title: &'a str,
    pub link: &'a str,
    pub tags: &'a [String],
    pub unread_count: usize,
    pub total_count: usize,
}

/// Formats feeds as JSON.
pub fn format_feeds_json(feeds: &[&RssFeed]) -> Result<String, serde_json::Error> {
    let feeds_output: Vec<FeedOutput> = feeds
        .iter()
        .map(|f| FeedOutput {
            rss_url: &f.rss_url,
            title: &f.title,
            link: &f.link,
            tags: &f.tags,
            unread_count: f.unread_count(),
            total_count: f.total_count(),
        })
        .collect();

    serde_json::to_string_pretty(&FeedsListOutput {
        feeds: feeds_output,
    })
}

/// Formats feeds as a table.
pub fn format_feeds_table(feeds: &[&RssFeed], use_colors: bool) -> String {
    if feeds.is_empty() {
        return "No feeds found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<10} {:<30} {:<20} {}", "Unread", "Title", "Tags", "URL");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for feed in feeds {
        // pad before coloring so escape codes don't break alignment
        let counts = format!(
            "{:<10}",
            format_counts(feed.unread_count(), feed.total_count(), false)
        );
        let counts = if use_colors && feed.unread_count() > 0 {
            counts.green().to_string()
        } else {
            counts
        };
        let title = if feed.title.is_empty() {
            &feed.rss_url
        } else {
            &feed.title
        };
        let title = truncate_str(title, 30);
        let tags = truncate_str(&feed.tags.join(" "), 20);

        output.push_str(&format!(
            "{} {:<30} {:<20} {}\n",
            counts, title, tags, feed.rss_url
        ));
    }

    output
}
