//! Feed and item records, and the attributes they expose to filters.
//!
//! | record    | attributes |
//! |-----------|------------|
//! | [`RssItem`] | `title link author content date guid unread enclosure_url enclosure_type flags age feedurl` |
//! | [`RssFeed`] | `feedtitle description feedlink rssurl tags unread_count total_count` |
//!
//! [`ItemInFeed`] answers item attributes first and falls back to those of
//! the feed the item belongs to.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use crate::Matchable;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Rendering of the `date` attribute.
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Attribute names exposed by [`RssItem`].
pub const ITEM_ATTRIBUTES: &[&str] = &[
    "title",
    "link",
    "author",
    "content",
    "date",
    "guid",
    "unread",
    "enclosure_url",
    "enclosure_type",
    "flags",
    "age",
    "feedurl",
];

/// Attribute names exposed by [`RssFeed`].
pub const FEED_ATTRIBUTES: &[&str] = &[
    "feedtitle",
    "description",
    "feedlink",
    "rssurl",
    "tags",
    "unread_count",
    "total_count",
];

/// A single feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssItem {
    /// Unique identifier of the entry within its feed.
    pub guid: String,

    /// Entry title.
    #[serde(default)]
    pub title: String,

    /// Link to the full article.
    #[serde(default)]
    pub link: String,

    /// Author name.
    #[serde(default)]
    pub author: String,

    /// Entry body.
    #[serde(default)]
    pub description: String,

    /// Publication time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,

    /// Whether the entry has not been read yet.
    #[serde(default)]
    pub unread: bool,

    /// Enclosure (podcast) URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure_url: Option<String>,

    /// Enclosure MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure_type: Option<String>,

    /// User flags, one character each.
    #[serde(default)]
    pub flags: String,

    /// URL of the feed this entry came from.
    #[serde(default)]
    pub feed_url: String,

    /// Entry was deleted by the user but is kept to suppress re-download.
    #[serde(default)]
    pub deleted: bool,
}

impl RssItem {
    /// Returns the value of an attribute, or `None` if the item lacks it.
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "title" => Some(Cow::Borrowed(&self.title)),
            "link" => Some(Cow::Borrowed(&self.link)),
            "author" => Some(Cow::Borrowed(&self.author)),
            "content" => Some(Cow::Borrowed(&self.description)),
            "guid" => Some(Cow::Borrowed(&self.guid)),
            "unread" => Some(Cow::Borrowed(if self.unread { "yes" } else { "no" })),
            "flags" => Some(Cow::Borrowed(&self.flags)),
            "feedurl" => Some(Cow::Borrowed(&self.feed_url)),
            "date" => self
                .pub_date
                .map(|date| Cow::Owned(date.format(DATE_FORMAT).to_string())),
            "age" => self.age_days().map(|days| Cow::Owned(days.to_string())),
            "enclosure_url" => non_empty(self.enclosure_url.as_deref()),
            "enclosure_type" => non_empty(self.enclosure_type.as_deref()),
            _ => None,
        }
    }

    /// Returns the number of whole days since publication.
    pub fn age_days(&self) -> Option<i64> {
        self.pub_date
            .map(|date| (Utc::now() - date).num_days().max(0))
    }
}

fn non_empty(value: Option<&str>) -> Option<Cow<'_, str>> {
    value.filter(|v| !v.is_empty()).map(Cow::Borrowed)
}

impl Matchable for RssItem {
    fn has_attribute(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        self.lookup(name).unwrap_or_default()
    }
}

/// A subscribed feed with its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    /// URL the feed is fetched from; identifies the feed.
    pub rss_url: String,

    /// Feed title.
    #[serde(default)]
    pub title: String,

    /// Feed description.
    #[serde(default)]
    pub description: String,

    /// Link to the feed's website.
    #[serde(default)]
    pub link: String,

    /// User-assigned tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Entries, newest first.
    #[serde(default)]
    pub items: Vec<RssItem>,
}

impl RssFeed {
    /// Returns the entries that have not been deleted.
    pub fn visible_items(&self) -> impl Iterator<Item = &RssItem> {
        self.items.iter().filter(|item| !item.deleted)
    }

    /// Returns the number of unread, non-deleted entries.
    pub fn unread_count(&self) -> usize {
        self.visible_items().filter(|item| item.unread).count()
    }

    /// Returns the number of non-deleted entries.
    pub fn total_count(&self) -> usize {
        self.visible_items().count()
    }

    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "feedtitle" => Some(Cow::Borrowed(&self.title)),
            "description" => Some(Cow::Borrowed(&self.description)),
            "feedlink" => Some(Cow::Borrowed(&self.link)),
            "rssurl" => Some(Cow::Borrowed(&self.rss_url)),
            "tags" => Some(Cow::Owned(self.tags.join(" "))),
            "unread_count" => Some(Cow::Owned(self.unread_count().to_string())),
            "total_count" => Some(Cow::Owned(self.total_count().to_string())),
            _ => None,
        }
    }
}

impl Matchable for RssFeed {
    fn has_attribute(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        self.lookup(name).unwrap_or_default()
    }
}

/// An item viewed together with the feed it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ItemInFeed<'a> {
    /// The owning feed.
    pub feed: &'a RssFeed,
    /// The entry.
    pub item: &'a RssItem,
}

impl<'a> ItemInFeed<'a> {
    /// Pairs an item with its feed.
    pub fn new(feed: &'a RssFeed, item: &'a RssItem) -> Self {
        Self { feed, item }
    }
}

impl Matchable for ItemInFeed<'_> {
    fn has_attribute(&self, name: &str) -> bool {
        self.item.has_attribute(name) || self.feed.has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        if self.item.has_attribute(name) {
            self.item.get_attribute(name)
        } else {
            self.feed.get_attribute(name)
        }
    }
}

/// Returns every item of every feed, paired with its feed, skipping deleted ones.
pub fn all_items(feeds: &[RssFeed]) -> Vec<ItemInFeed<'_>> {
    feeds
        .iter()
        .flat_map(|feed| feed.visible_items().map(move |item| ItemInFeed::new(feed, item)))
        .collect()
}

/// Returns true if `name` is an item or feed attribute.
pub fn is_known_attribute(name: &str) -> bool {
    ITEM_ATTRIBUTES.contains(&name) || FEED_ATTRIBUTES.contains(&name)
}

/// Suggests the closest known attribute name for a misspelled one.
///
/// Returns `None` for exact matches and for names that are not close to any
/// attribute.
pub fn suggest_attribute(name: &str) -> Option<&'static str> {
    let query_lower = name.to_lowercase();

    let (best_match, best_distance) = ITEM_ATTRIBUTES
        .iter()
        .chain(FEED_ATTRIBUTES)
        .map(|candidate| (*candidate, levenshtein(&query_lower, candidate)))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}
