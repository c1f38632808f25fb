//! Filter expression parser and evaluator.
//!
//! Filters are boolean expressions over named record attributes, used to
//! select feed items and feeds.
//!
//! # Syntax
//!
//! ## Comparisons
//! - `attr = "text"` - the attribute equals `text`
//! - `attr != "text"` - the attribute does not equal `text`
//! - `attr =~ "regex"` - the attribute contains a match for `regex`
//! - `attr !~ "regex"` - the attribute contains no match for `regex`
//!
//! Literals are always double-quoted and accept the escapes `\"`, `\\`,
//! `\r`, `\n` and `\t`.
//!
//! ## Boolean Operators
//! - `and` - AND (binds tighter than `or`)
//! - `or` - OR
//! - `()` - Grouping
//!
//! # Example
//!
//! ```
//! use newsfilter_core::filter::{FilterParser, Matcher};
//! use newsfilter_core::feed::RssItem;
//!
//! assert!(FilterParser::validate(r#"(unread = "yes") and author != "spam""#));
//!
//! let matcher = Matcher::bind(r#"title =~ "[Rr]ust""#).unwrap();
//!
//! let item = RssItem {
//!     title: "Rust 1.80 released".to_string(),
//!     ..RssItem::default()
//! };
//! assert!(matcher.matches(&item));
//! ```

mod ast;
mod error;
mod lexer;
mod matcher;
mod parser;

pub use ast::{Comparison, Expr, Operator};
pub use error::{EvaluationError, FilterError, FilterResult};
pub use lexer::{Cursor, FilterToken, PositionedToken};
pub use matcher::{Evaluation, Matcher};
pub use parser::FilterParser;


#[cfg(test)]
mod matcher_tests;
