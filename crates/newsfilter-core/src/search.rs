//! Search and interactive filter state.
//!
//! [`FilterSlot`] holds the filter currently applied to a view. Replacing it
//! only succeeds for valid queries, so a user editing a query never loses a
//! working filter to a half-typed one.

use crate::feed::{ItemInFeed, RssFeed};
use crate::filter::{FilterResult, Matcher};
use crate::text::quote;
use crate::Matchable;

/// The active filter of a view, if any.
#[derive(Debug, Clone, Default)]
pub struct FilterSlot {
    active: Option<Matcher>,
}

impl FilterSlot {
    /// Creates an empty slot that lets every record through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `query` and makes it the active filter.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `query` is invalid. The previously active
    /// filter is kept in that case.
    pub fn apply(&mut self, query: &str) -> FilterResult<()> {
        match Matcher::bind(query) {
            Ok(matcher) => {
                self.active = Some(matcher);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(query, error = %err, "rejected filter, keeping previous");
                Err(err)
            }
        }
    }

    /// Removes the active filter.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Returns the active filter.
    pub fn active(&self) -> Option<&Matcher> {
        self.active.as_ref()
    }

    /// Returns true if no filter is active or the record matches it.
    pub fn matches<R: Matchable + ?Sized>(&self, record: &R) -> bool {
        self.active
            .as_ref()
            .map_or(true, |matcher| matcher.matches(record))
    }
}

/// Builds the filter query used for a free-text search.
///
/// The phrase is matched case-insensitively and literally against item
/// titles and contents.
///
/// # Example
///
/// ```
/// use newsfilter_core::search::search_query;
///
/// assert_eq!(
///     search_query("C++"),
///     r#"title =~ "(?i)C\\+\\+" or content =~ "(?i)C\\+\\+""#
/// );
/// ```
pub fn search_query(phrase: &str) -> String {
    let pattern = quote(&format!("(?i){}", regex::escape(phrase)));
    format!("title =~ {pattern} or content =~ {pattern}")
}

/// Searches the items of `feeds` for `phrase`.
///
/// With `feed_url` set, only that feed is searched. Deleted items are never
/// returned.
///
/// # Errors
///
/// Returns an error only if the generated query fails to parse, which
/// `search_query` rules out for every phrase.
pub fn search_items<'a>(
    feeds: &'a [RssFeed],
    phrase: &str,
    feed_url: Option<&str>,
) -> FilterResult<Vec<ItemInFeed<'a>>> {
    let matcher = Matcher::bind(&search_query(phrase))?;

    let results = feeds
        .iter()
        .filter(|feed| feed_url.map_or(true, |url| feed.rss_url == url))
        .flat_map(|feed| feed.visible_items().map(move |item| ItemInFeed::new(feed, item)))
        .filter(|view| matcher.matches(view))
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::RssItem;
    use crate::filter::FilterError;

    fn item(guid: &str, title: &str, content: &str) -> RssItem {
        RssItem {
            guid: guid.to_string(),
            title: title.to_string(),
            description: content.to_string(),
            ..RssItem::default()
        }
    }

    fn feeds() -> Vec<RssFeed> {
        let mut deleted = item("3", "Rust deleted", "");
        deleted.deleted = true;
        vec![
            RssFeed {
                rss_url: "https://a/rss".to_string(),
                items: vec![
                    item("1", "Learning Rust", "ownership"),
                    item("2", "Go news", "nothing about rust here"),
                    deleted,
                ],
                ..RssFeed::default()
            },
            RssFeed {
                rss_url: "https://b/rss".to_string(),
                items: vec![item("4", "RUST weekly", ""), item("5", "C++ (2023)", "")],
                ..RssFeed::default()
            },
        ]
    }

    fn guids(results: &[ItemInFeed<'_>]) -> Vec<String> {
        results.iter().map(|v| v.item.guid.clone()).collect()
    }

    #[test]
    fn test_slot_without_filter_matches_everything() {
        let slot = FilterSlot::new();
        assert!(slot.active().is_none());
        assert!(slot.matches(&item("1", "x", "")));
    }

    #[test]
    fn test_slot_apply_and_clear() {
        let mut slot = FilterSlot::new();
        slot.apply(r#"title = "x""#).unwrap();
        assert!(slot.matches(&item("1", "x", "")));
        assert!(!slot.matches(&item("1", "y", "")));

        slot.clear();
        assert!(slot.matches(&item("1", "y", "")));
    }

    #[test]
    fn test_slot_keeps_previous_filter_on_invalid_query() {
        let mut slot = FilterSlot::new();
        slot.apply(r#"title = "x""#).unwrap();

        let err = slot.apply(r#"title = "x"#).unwrap_err();
        assert!(matches!(err, FilterError::UnterminatedString { .. }));

        let active = slot.active().unwrap();
        assert_eq!(active.query(), r#"title = "x""#);
        assert!(slot.matches(&item("1", "x", "")));
        assert!(!slot.matches(&item("1", "y", "")));
    }

    #[test]
    fn test_search_query_is_valid_for_special_characters() {
        for phrase in ["plain", "C++", "a\"quote", "back\\slash", "(paren", "", "tab\t"] {
            let query = search_query(phrase);
            assert!(
                crate::filter::FilterParser::validate(&query),
                "invalid query for {phrase:?}: {query}"
            );
        }
    }

    #[test]
    fn test_search_all_feeds_case_insensitive() {
        let feeds = feeds();
        let results = search_items(&feeds, "rust", None).unwrap();
        assert_eq!(guids(&results), vec!["1", "2", "4"]);
    }

    #[test]
    fn test_search_single_feed() {
        let feeds = feeds();
        let results = search_items(&feeds, "rust", Some("https://b/rss")).unwrap();
        assert_eq!(guids(&results), vec!["4"]);
    }

    #[test]
    fn test_search_phrase_is_literal() {
        let feeds = feeds();
        let results = search_items(&feeds, "C++ (", None).unwrap();
        assert_eq!(guids(&results), vec!["5"]);
    }
}
