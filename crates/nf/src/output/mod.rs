//! Output formatting utilities for the nf CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`items`] - Item output formatting (items, search)
//! - [`feeds`] - Feed output formatting
//! - [`check`] - Filter check reports
//! - [`helpers`] - Common formatting utilities (truncation, dates, counts)

mod check;
mod feeds;
pub mod helpers;
mod items;

pub use check::{format_check_json, format_check_table};
pub use feeds::{format_feeds_json, format_feeds_table};
pub use items::{format_items_json, format_items_table};
