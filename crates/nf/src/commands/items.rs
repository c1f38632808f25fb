//! Items command implementation.
//!
//! Lists items from the feed cache, optionally filtered by an expression,
//! a saved filter, a feed URL, or read state.

use newsfilter_core::feed::all_items;
use newsfilter_core::filter::Matcher;
use newsfilter_core::{ItemInFeed, RssFeed};

use super::config::load_config;
use super::{CommandContext, Result};
use crate::output::{format_items_json, format_items_table};

/// Options for the items command.
#[derive(Debug, Default)]
pub struct ItemsOptions {
    /// Filter expression.
    pub filter: Option<String>,
    /// Name of a filter saved in the config file.
    pub saved: Option<String>,
    /// Only items of the feed with this URL.
    pub feed: Option<String>,
    /// Show only unread items.
    pub unread: bool,
    /// Limit results.
    pub limit: usize,
    /// Show all items (no limit).
    pub all: bool,
}

/// Executes the items command.
///
/// # Errors
///
/// Returns an error if the cache cannot be read, the saved filter does not
/// exist, or the filter expression is invalid.
pub fn execute(ctx: &CommandContext, opts: &ItemsOptions) -> Result<()> {
    let query = resolve_query(opts)?;
    let feeds = ctx.load_feeds()?;

    let items = filter_items(&feeds, query.as_deref(), opts)?;
    let total = items.len();
    let items = apply_limit(items, opts);

    if ctx.verbose {
        eprintln!("{total} matching item(s), showing {}", items.len());
    }

    if ctx.json_output {
        println!("{}", format_items_json(&items, total)?);
    } else if !ctx.quiet {
        print!("{}", format_items_table(&items, ctx.use_colors));
    }

    Ok(())
}

/// Returns the filter expression to apply, looking up saved filters by name.
fn resolve_query(opts: &ItemsOptions) -> Result<Option<String>> {
    if let Some(name) = &opts.saved {
        let config = load_config()?;
        return Ok(Some(config.saved_filter(name)?.to_string()));
    }
    Ok(opts.filter.clone())
}

/// Selects the items of `feeds` matching the options.
fn filter_items<'a>(
    feeds: &'a [RssFeed],
    query: Option<&str>,
    opts: &ItemsOptions,
) -> Result<Vec<ItemInFeed<'a>>> {
    let mut items = all_items(feeds);

    if let Some(url) = &opts.feed {
        items.retain(|view| view.feed.rss_url == *url);
    }

    if opts.unread {
        items.retain(|view| view.item.unread);
    }

    if let Some(query) = query {
        let matcher = Matcher::bind(query)?;
        items.retain(|view| matcher.matches(view));
    }

    Ok(items)
}

/// Truncates the list unless `--all` was given.
fn apply_limit<'a>(mut items: Vec<ItemInFeed<'a>>, opts: &ItemsOptions) -> Vec<ItemInFeed<'a>> {
    if !opts.all {
        items.truncate(opts.limit);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;
    use newsfilter_core::RssItem;

    fn item(guid: &str, author: &str, unread: bool) -> RssItem {
        RssItem {
            guid: guid.to_string(),
            title: format!("Item {guid}"),
            author: author.to_string(),
            unread,
            ..RssItem::default()
        }
    }

    fn feeds() -> Vec<RssFeed> {
        vec![
            RssFeed {
                rss_url: "https://a/rss".to_string(),
                title: "A".to_string(),
                items: vec![item("1", "ak", true), item("2", "bob", false)],
                ..RssFeed::default()
            },
            RssFeed {
                rss_url: "https://b/rss".to_string(),
                title: "B".to_string(),
                items: vec![item("3", "ak", false), item("4", "eve", true)],
                ..RssFeed::default()
            },
        ]
    }

    fn guids(items: &[ItemInFeed<'_>]) -> Vec<String> {
        items.iter().map(|v| v.item.guid.clone()).collect()
    }

    #[test]
    fn test_no_options_returns_everything() {
        let feeds = feeds();
        let items = filter_items(&feeds, None, &ItemsOptions::default()).unwrap();
        assert_eq!(guids(&items), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_filter_expression() {
        let feeds = feeds();
        let items =
            filter_items(&feeds, Some(r#"author = "ak""#), &ItemsOptions::default()).unwrap();
        assert_eq!(guids(&items), vec!["1", "3"]);
    }

    #[test]
    fn test_filter_by_feed_attribute() {
        let feeds = feeds();
        let items =
            filter_items(&feeds, Some(r#"feedtitle = "B""#), &ItemsOptions::default()).unwrap();
        assert_eq!(guids(&items), vec!["3", "4"]);
    }

    #[test]
    fn test_feed_and_unread_options_combine_with_filter() {
        let feeds = feeds();
        let opts = ItemsOptions {
            feed: Some("https://b/rss".to_string()),
            unread: true,
            ..ItemsOptions::default()
        };
        let items = filter_items(&feeds, Some(r#"author != "ak""#), &opts).unwrap();
        assert_eq!(guids(&items), vec!["4"]);
    }

    #[test]
    fn test_invalid_filter_is_an_error() {
        let feeds = feeds();
        let err = filter_items(&feeds, Some("author = ak"), &ItemsOptions::default()).unwrap_err();
        assert!(matches!(err, CommandError::Filter(_)));
    }

    #[test]
    fn test_apply_limit() {
        let feeds = feeds();
        let all = filter_items(&feeds, None, &ItemsOptions::default()).unwrap();

        let opts = ItemsOptions {
            limit: 2,
            ..ItemsOptions::default()
        };
        assert_eq!(guids(&apply_limit(all.clone(), &opts)), vec!["1", "2"]);

        let opts = ItemsOptions {
            limit: 2,
            all: true,
            ..ItemsOptions::default()
        };
        assert_eq!(apply_limit(all, &opts).len(), 4);
    }

    #[test]
    fn test_resolve_query_prefers_explicit_filter() {
        let opts = ItemsOptions {
            filter: Some(r#"a = "b""#.to_string()),
            ..ItemsOptions::default()
        };
        assert_eq!(resolve_query(&opts).unwrap().as_deref(), Some(r#"a = "b""#));
        assert_eq!(resolve_query(&ItemsOptions::default()).unwrap(), None);
    }
}
