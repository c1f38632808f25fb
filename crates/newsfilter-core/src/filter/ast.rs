//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;

use crate::text::quote;

/// A comparison operator between an attribute and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=` - exact equality.
    Eq,
    /// `!=` - negated equality.
    NotEq,
    /// `=~` - the value contains a match for the pattern.
    RegexMatch,
    /// `!~` - the value contains no match for the pattern.
    RegexNotMatch,
}

impl Operator {
    /// Returns the operator as written in a query.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::RegexMatch => "=~",
            Operator::RegexNotMatch => "!~",
        }
    }

    /// Returns true for operators whose literal is a regular expression.
    pub fn is_regex(self) -> bool {
        matches!(self, Operator::RegexMatch | Operator::RegexNotMatch)
    }

    /// Returns true for the negating operators (`!=`, `!~`).
    pub fn is_negated(self) -> bool {
        matches!(self, Operator::NotEq | Operator::RegexNotMatch)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf predicate: `attribute op "literal"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Attribute name; never empty.
    pub attribute: String,
    /// The comparison operator.
    pub op: Operator,
    /// The unescaped literal; may be empty.
    pub literal: String,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.op, quote(&self.literal))
    }
}

/// Represents a parsed filter expression.
///
/// Parentheses only steer parsing and leave no node of their own. Each
/// boolean node owns both of its subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single attribute comparison.
    Comparison(Comparison),

    /// Logical AND of two expressions.
    And(Box<Expr>, Box<Expr>),

    /// Logical OR of two expressions.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a comparison leaf.
    ///
    /// # Example
    ///
    /// ```
    /// use newsfilter_core::filter::{Expr, Operator};
    ///
    /// let expr = Expr::comparison("title", Operator::RegexMatch, "rust");
    /// assert_eq!(expr.to_string(), r#"title =~ "rust""#);
    /// ```
    pub fn comparison(
        attribute: impl Into<String>,
        op: Operator,
        literal: impl Into<String>,
    ) -> Self {
        Expr::Comparison(Comparison {
            attribute: attribute.into(),
            op,
            literal: literal.into(),
        })
    }

    /// Creates an AND node from two expressions.
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR node from two expressions.
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Returns every comparison in the tree, left to right.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Expr::Comparison(cmp) => out.push(cmp),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_comparisons(out);
                right.collect_comparisons(out);
            }
        }
    }

    /// Returns the distinct attribute names referenced, in first-use order.
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for cmp in self.comparisons() {
            if !names.contains(&cmp.attribute.as_str()) {
                names.push(&cmp.attribute);
            }
        }
        names
    }

    /// Returns the distinct literals used with `=~` or `!~`.
    pub fn regex_literals(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = Vec::new();
        for cmp in self.comparisons() {
            if cmp.op.is_regex() && !patterns.contains(&cmp.literal.as_str()) {
                patterns.push(&cmp.literal);
            }
        }
        patterns
    }
}

/// Renders a canonical query that parses back to the same tree.
///
/// Every boolean node is parenthesised, so the output does not depend on
/// operator precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison(cmp) => write!(f, "{cmp}"),
            Expr::And(left, right) => write!(f, "({left} and {right})"),
            Expr::Or(left, right) => write!(f, "({left} or {right})"),
        }
    }
}
