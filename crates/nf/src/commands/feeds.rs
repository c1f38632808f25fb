//! Feeds command implementation.
//!
//! Lists feeds from the cache, optionally filtered by feed attributes
//! (`feedtitle`, `rssurl`, `tags`, `unread_count`, ...).

use newsfilter_core::filter::Matcher;
use newsfilter_core::RssFeed;

use super::{CommandContext, Result};
use crate::output::{format_feeds_json, format_feeds_table};

/// Executes the feeds command.
///
/// # Errors
///
/// Returns an error if the cache cannot be read or the filter is invalid.
pub fn execute(ctx: &CommandContext, filter: Option<&str>) -> Result<()> {
    let feeds = ctx.load_feeds()?;
    let feeds = filter_feeds(&feeds, filter)?;

    if ctx.json_output {
        println!("{}", format_feeds_json(&feeds)?);
    } else if !ctx.quiet {
        print!("{}", format_feeds_table(&feeds, ctx.use_colors));
    }

    Ok(())
}

fn filter_feeds<'a>(feeds: &'a [RssFeed], filter: Option<&str>) -> Result<Vec<&'a RssFeed>> {
    match filter {
        Some(query) => Ok(Matcher::bind(query)?.filter_records(feeds)),
        None => Ok(feeds.iter().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsfilter_core::RssItem;

    fn feed(title: &str, tags: &[&str], unread: usize) -> RssFeed {
        RssFeed {
            rss_url: format!("https://{}/rss", title.to_lowercase()),
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            items: (0..unread)
                .map(|i| RssItem {
                    guid: i.to_string(),
                    unread: true,
                    ..RssItem::default()
                })
                .collect(),
            ..RssFeed::default()
        }
    }

    #[test]
    fn test_without_filter() {
        let feeds = vec![feed("A", &[], 0), feed("B", &[], 1)];
        assert_eq!(filter_feeds(&feeds, None).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_on_tags_and_counts() {
        let feeds = vec![
            feed("Blog", &["tech"], 0),
            feed("Podcast", &["audio", "tech"], 3),
            feed("News", &["world"], 5),
        ];
        let matched = filter_feeds(&feeds, Some(r#"tags =~ "tech" and unread_count != "0""#))
            .unwrap();
        let titles: Vec<&str> = matched.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Podcast"]);
    }

    #[test]
    fn test_item_attributes_are_missing_on_feeds() {
        let feeds = vec![feed("A", &[], 1)];
        assert!(filter_feeds(&feeds, Some(r#"title = "A""#))
            .unwrap()
            .is_empty());
        assert_eq!(
            filter_feeds(&feeds, Some(r#"title != "A""#)).unwrap().len(),
            1
        );
    }
}
