//! Recursive descent parser for filter expressions.

use super::ast::{Comparison, Expr};
use super::error::{FilterError, FilterResult};
use super::lexer::{Cursor, FilterToken, PositionedToken};

/// Maximum depth of nested parentheses.
const MAX_NESTING: usize = 128;

/// Parser for filter expressions.
///
/// # Grammar
///
/// ```text
/// expr       ::= and_expr ("or" and_expr)*
/// and_expr   ::= term ("and" term)*
/// term       ::= "(" expr ")" | comparison
/// comparison ::= IDENTIFIER comp_op STRING
/// comp_op    ::= "=" | "!=" | "=~" | "!~"
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. comparison operators
/// 2. `and` - binary, left-associative
/// 3. `or` - binary, left-associative
///
/// # Example
///
/// ```
/// use newsfilter_core::filter::{Expr, FilterParser};
///
/// let expr = FilterParser::parse(r#"unread = "yes" and title =~ "rust""#).unwrap();
/// assert!(matches!(expr, Expr::And(_, _)));
///
/// assert!(!FilterParser::validate(r#"title = rust"#));
/// ```
pub struct FilterParser<'a> {
    /// The token under inspection.
    current: PositionedToken,
    /// Cursor positioned right after `current`.
    cursor: Cursor<'a>,
    depth: usize,
}

impl<'a> FilterParser<'a> {
    /// Parses a filter expression string into an [`Expr`].
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyExpression` if the input is blank, a lexical
    /// error for unterminated strings or unknown operators, and
    /// `FilterError::UnexpectedToken` if input remains after a complete
    /// expression.
    pub fn parse(input: &'a str) -> FilterResult<Expr> {
        if input.trim().is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let (current, cursor) = Cursor::new(input).next_token()?;
        let mut parser = Self {
            current,
            cursor,
            depth: 0,
        };
        let expr = parser.parse_expression()?;

        // Everything must be consumed, including stray ')'
        if parser.current.token != FilterToken::End {
            return Err(FilterError::unexpected_token(
                parser.current.token.describe(),
                parser.current.position,
            ));
        }

        Ok(expr)
    }

    /// Returns whether `input` is a well-formed filter expression.
    ///
    /// This is exactly `parse(input).is_ok()`.
    pub fn validate(input: &str) -> bool {
        FilterParser::parse(input).is_ok()
    }

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> FilterResult<PositionedToken> {
        let (next, cursor) = self.cursor.next_token()?;
        self.cursor = cursor;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Checks if the current token matches the expected token.
    fn check(&self, expected: &FilterToken) -> bool {
        self.current.token == *expected
    }

    /// Builds the error for an unexpected current token.
    fn unexpected(&self) -> FilterError {
        match self.current.token {
            FilterToken::End => FilterError::UnexpectedEndOfInput,
            ref token => FilterError::unexpected_token(token.describe(), self.current.position),
        }
    }

    /// Parses the top-level expression (OR expression).
    fn parse_expression(&mut self) -> FilterResult<Expr> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `and_expr ("or" and_expr)*`
    fn parse_or_expr(&mut self) -> FilterResult<Expr> {
        let mut left = self.parse_and_expr()?;

        while self.check(&FilterToken::Or) {
            self.advance()?;
            let right = self.parse_and_expr()?;
            left = Expr::or(left, right);
        }

        Ok(left)
    }

    /// Parses AND expressions: `term ("and" term)*`
    fn parse_and_expr(&mut self) -> FilterResult<Expr> {
        let mut left = self.parse_term()?;

        while self.check(&FilterToken::And) {
            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::and(left, right);
        }

        Ok(left)
    }

    /// Parses terms: `"(" expr ")" | comparison`
    fn parse_term(&mut self) -> FilterResult<Expr> {
        match self.current.token {
            FilterToken::OpenParen => {
                let open = self.advance()?;
                if self.depth >= MAX_NESTING {
                    return Err(FilterError::NestingTooDeep {
                        position: open.position,
                    });
                }

                self.depth += 1;
                let inner = self.parse_expression()?;
                self.depth -= 1;

                if !self.check(&FilterToken::CloseParen) {
                    return Err(FilterError::UnclosedParenthesis {
                        position: open.position,
                    });
                }
                self.advance()?;
                Ok(inner)
            }
            FilterToken::Identifier(_) => self.parse_comparison(),
            _ => Err(self.unexpected()),
        }
    }

    /// Parses `IDENTIFIER comp_op STRING`.
    fn parse_comparison(&mut self) -> FilterResult<Expr> {
        let FilterToken::Identifier(attribute) = self.advance()?.token else {
            return Err(self.unexpected());
        };

        let FilterToken::Op(op) = self.current.token else {
            return Err(self.unexpected());
        };
        self.advance()?;

        // Only quoted literals are valid operands
        let literal = match &self.current.token {
            FilterToken::Str(value) => value.clone(),
            FilterToken::End => return Err(FilterError::UnexpectedEndOfInput),
            other => {
                return Err(FilterError::expected_string(
                    other.describe(),
                    self.current.position,
                ));
            }
        };
        self.advance()?;

        Ok(Expr::Comparison(Comparison {
            attribute,
            op,
            literal,
        }))
    }
}
