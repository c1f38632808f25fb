//! Search command implementation.

use newsfilter_core::search::{search_items, search_query};

use super::{CommandContext, Result};
use crate::output::{format_items_json, format_items_table};

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if the cache cannot be read.
pub fn execute(ctx: &CommandContext, phrase: &str, feed: Option<&str>) -> Result<()> {
    let feeds = ctx.load_feeds()?;

    if ctx.verbose {
        eprintln!("Query: {}", search_query(phrase));
    }

    let items = search_items(&feeds, phrase, feed)?;

    if ctx.json_output {
        println!("{}", format_items_json(&items, items.len())?);
    } else if !ctx.quiet {
        print!("{}", format_items_table(&items, ctx.use_colors));
    }

    Ok(())
}
