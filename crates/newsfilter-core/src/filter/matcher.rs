//! Evaluation of bound filters against [`Matchable`] records.
//!
//! A [`Matcher`] is bound once from query text and then evaluated any number
//! of times. Binding parses the query and compiles each distinct regex
//! literal; evaluation is a read-only walk over the tree.
//!
//! # Missing attributes
//!
//! An attribute the record does not have never equals and never matches a
//! literal:
//!
//! | operator | missing attribute |
//! |----------|-------------------|
//! | `=`      | false             |
//! | `!=`     | true              |
//! | `=~`     | false             |
//! | `!~`     | true              |
//!
//! # Invalid patterns
//!
//! Regex syntax is not checked by the parser. A comparison whose literal is
//! not a valid pattern evaluates to `false` for both `=~` and `!~`. The
//! failure is logged once when the matcher is bound and returned by
//! [`Matcher::evaluate`] for every record it affects.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use newsfilter_core::filter::Matcher;
//!
//! let matcher = Matcher::bind(r#"author = "ak" or title =~ "^Re:""#).unwrap();
//!
//! let mut record = HashMap::new();
//! record.insert("title".to_string(), "Re: newsbeuter".to_string());
//! assert!(matcher.matches(&record));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use regex::Regex;

use super::ast::{Comparison, Expr, Operator};
use super::error::{EvaluationError, FilterResult};
use super::parser::FilterParser;
use crate::Matchable;

/// Outcome of evaluating a filter with diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the record satisfies the filter.
    pub matched: bool,
    /// Errors met during evaluation, each of which made one comparison false.
    pub errors: Vec<EvaluationError>,
}

/// A parsed filter ready to be evaluated against records.
///
/// `Matcher` is immutable after binding and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: String,
    expr: Expr,
    patterns: HashMap<String, Result<Regex, EvaluationError>>,
}

impl Matcher {
    /// Parses `query` and prepares it for evaluation.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`](super::FilterError) if the query is not a
    /// well-formed expression. Invalid regex literals are not an error here.
    pub fn bind(query: &str) -> FilterResult<Self> {
        let expr = FilterParser::parse(query)?;
        Ok(Self::with_query(query.to_string(), expr))
    }

    /// Wraps an already built expression.
    pub fn from_expr(expr: Expr) -> Self {
        let query = expr.to_string();
        Self::with_query(query, expr)
    }

    fn with_query(query: String, expr: Expr) -> Self {
        let patterns: HashMap<String, Result<Regex, EvaluationError>> = expr
            .regex_literals()
            .into_iter()
            .map(|literal| (literal.to_string(), compile_pattern(literal)))
            .collect();

        for err in patterns.values().filter_map(|compiled| compiled.as_ref().err()) {
            tracing::warn!(query = %query, error = %err, "pattern can never match");
        }

        tracing::debug!(
            query = %query,
            patterns = patterns.len(),
            "bound filter expression"
        );

        Self {
            query,
            expr,
            patterns,
        }
    }

    /// Returns the query text this matcher was bound from.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the parsed expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the errors of regex literals that failed to compile.
    pub fn pattern_errors(&self) -> Vec<&EvaluationError> {
        let mut errors: Vec<&EvaluationError> = self
            .patterns
            .values()
            .filter_map(|compiled| compiled.as_ref().err())
            .collect();
        errors.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        errors
    }

    /// Returns true if `record` satisfies the filter.
    ///
    /// Evaluation errors resolve to `false` for the affected comparison.
    pub fn matches<R: Matchable + ?Sized>(&self, record: &R) -> bool {
        self.evaluate_expr(&self.expr, record, &mut |err| {
            tracing::trace!(query = %self.query, error = %err, "comparison evaluated to false");
        })
    }

    /// Evaluates the filter and reports any evaluation errors.
    ///
    /// `matched` always agrees with [`matches`](Matcher::matches).
    pub fn evaluate<R: Matchable + ?Sized>(&self, record: &R) -> Evaluation {
        let mut errors = Vec::new();
        let matched = self.evaluate_expr(&self.expr, record, &mut |err| {
            tracing::trace!(query = %self.query, error = %err, "comparison evaluated to false");
            errors.push(err.clone());
        });
        Evaluation { matched, errors }
    }

    /// Filters a slice of records, returning only those that match.
    pub fn filter_records<'b, R: Matchable>(&self, records: &'b [R]) -> Vec<&'b R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Evaluates an expression against a record.
    fn evaluate_expr<R, F>(&self, expr: &Expr, record: &R, on_error: &mut F) -> bool
    where
        R: Matchable + ?Sized,
        F: FnMut(&EvaluationError),
    {
        match expr {
            Expr::Comparison(cmp) => self.compare(cmp, record, on_error),
            Expr::And(left, right) => {
                self.evaluate_expr(left, record, on_error)
                    && self.evaluate_expr(right, record, on_error)
            }
            Expr::Or(left, right) => {
                self.evaluate_expr(left, record, on_error)
                    || self.evaluate_expr(right, record, on_error)
            }
        }
    }

    /// Evaluates a single comparison.
    fn compare<R, F>(&self, cmp: &Comparison, record: &R, on_error: &mut F) -> bool
    where
        R: Matchable + ?Sized,
        F: FnMut(&EvaluationError),
    {
        if !record.has_attribute(&cmp.attribute) {
            return cmp.op.is_negated();
        }

        let value = record.get_attribute(&cmp.attribute);

        match cmp.op {
            Operator::Eq => value.as_ref() == cmp.literal,
            Operator::NotEq => value.as_ref() != cmp.literal,
            Operator::RegexMatch | Operator::RegexNotMatch => {
                match self.pattern(&cmp.literal) {
                    Ok(regex) => regex.is_match(&value) == (cmp.op == Operator::RegexMatch),
                    Err(err) => {
                        on_error(&err);
                        false
                    }
                }
            }
        }
    }

    /// Looks up the compiled pattern for a literal.
    fn pattern(&self, literal: &str) -> Result<Cow<'_, Regex>, EvaluationError> {
        match self.patterns.get(literal) {
            Some(Ok(regex)) => Ok(Cow::Borrowed(regex)),
            Some(Err(err)) => Err(err.clone()),
            // every regex literal is compiled at bind time
            None => compile_pattern(literal).map(Cow::Owned),
        }
    }
}

fn compile_pattern(literal: &str) -> Result<Regex, EvaluationError> {
    Regex::new(literal).map_err(|e| EvaluationError::InvalidPattern {
        pattern: literal.to_string(),
        message: e.to_string(),
    })
}
