//! Check command implementation.
//!
//! Parses a filter expression and reports how it was understood: the
//! canonical fully parenthesised form, the attributes it reads, likely
//! misspelled attribute names, and regex literals that will never match.

use newsfilter_core::feed::{is_known_attribute, suggest_attribute};
use newsfilter_core::filter::Matcher;

use super::{CommandContext, Result};
use crate::output::{format_check_json, format_check_table};

/// An attribute referenced by a query.
#[derive(Debug)]
pub struct AttributeReport {
    /// Attribute name as written.
    pub name: String,
    /// Whether any feed or item exposes this attribute.
    pub known: bool,
    /// Closest known attribute, for unknown names.
    pub suggestion: Option<&'static str>,
}

/// Result of checking a query.
#[derive(Debug)]
pub struct CheckReport {
    /// The query as given.
    pub query: String,
    /// Canonical form of the parsed expression.
    pub canonical: String,
    /// Attributes in order of first use.
    pub attributes: Vec<AttributeReport>,
    /// Messages for regex literals that fail to compile.
    pub pattern_errors: Vec<String>,
}

impl CheckReport {
    /// Returns true if the query reads only known attributes and all its
    /// patterns compile.
    pub fn is_clean(&self) -> bool {
        self.pattern_errors.is_empty() && self.attributes.iter().all(|a| a.known)
    }
}

/// Builds the report for `query`.
///
/// # Errors
///
/// Returns a filter error if the query does not parse.
pub fn check_query(query: &str) -> Result<CheckReport> {
    let matcher = Matcher::bind(query)?;

    let attributes = matcher
        .expr()
        .attributes()
        .into_iter()
        .map(|name| {
            let known = is_known_attribute(name);
            AttributeReport {
                name: name.to_string(),
                known,
                suggestion: if known { None } else { suggest_attribute(name) },
            }
        })
        .collect();

    Ok(CheckReport {
        query: query.to_string(),
        canonical: matcher.expr().to_string(),
        attributes,
        pattern_errors: matcher
            .pattern_errors()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    })
}

/// Executes the check command.
///
/// # Errors
///
/// Returns an error if the query does not parse.
pub fn execute(ctx: &CommandContext, query: &str) -> Result<()> {
    let report = check_query(query)?;

    if ctx.json_output {
        println!("{}", format_check_json(&report)?);
    } else if !ctx.quiet {
        print!("{}", format_check_table(&report, ctx.use_colors));
    }

    Ok(())
}
