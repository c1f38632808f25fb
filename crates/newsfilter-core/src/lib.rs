//! Filter engine and feed records for the newsfilter reader.
//!
//! The heart of this crate is [`filter`]: a small query language of
//! attribute comparisons joined by `and`/`or`, parsed once into an
//! [`Expr`](filter::Expr) and evaluated against any [`Matchable`] record.
//!
//! ```
//! use newsfilter_core::filter::Matcher;
//! use newsfilter_core::feed::RssItem;
//!
//! let matcher = Matcher::bind(r#"unread = "yes" and author !~ "^bot""#).unwrap();
//!
//! let item = RssItem {
//!     author: "ak".to_string(),
//!     unread: true,
//!     ..RssItem::default()
//! };
//! assert!(matcher.matches(&item));
//! ```

pub mod feed;
pub mod filter;
mod matchable;
pub mod search;
pub mod store;
pub mod text;

pub use feed::{ItemInFeed, RssFeed, RssItem};
pub use matchable::Matchable;
pub use store::{FeedStore, FeedStoreError};
