//! Lexer (tokenizer) for filter expressions.
//!
//! Tokens are produced lazily from a [`Cursor`]. The cursor is a small `Copy`
//! value; reading a token returns the token together with the advanced
//! cursor and leaves the original untouched.

use super::ast::Operator;
use super::error::{FilterError, FilterResult};
use crate::text::scan_quoted;

/// A token in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// An attribute name.
    Identifier(String),

    /// A quoted string literal, already unescaped.
    Str(String),

    /// A comparison operator (`=`, `!=`, `=~`, `!~`).
    Op(Operator),

    /// The `and` keyword.
    And,

    /// The `or` keyword.
    Or,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,

    /// End of input.
    End,
}

impl FilterToken {
    /// Describes the token for error messages.
    pub fn describe(&self) -> String {
        match self {
            FilterToken::Identifier(name) => format!("identifier '{name}'"),
            FilterToken::Str(value) => format!("string {value:?}"),
            FilterToken::Op(op) => format!("operator '{op}'"),
            FilterToken::And => "'and'".to_string(),
            FilterToken::Or => "'or'".to_string(),
            FilterToken::OpenParen => "'('".to_string(),
            FilterToken::CloseParen => "')'".to_string(),
            FilterToken::End => "end of input".to_string(),
        }
    }
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// Read position within a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the unread part of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn advance(self, bytes: usize) -> Self {
        Self {
            input: self.input,
            position: self.position + bytes,
        }
    }

    fn skip_whitespace(self) -> Self {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.advance(rest.len() - trimmed.len())
    }

    /// Reads the next token.
    ///
    /// At the end of input this keeps returning [`FilterToken::End`] without
    /// moving.
    pub fn next_token(self) -> FilterResult<(PositionedToken, Cursor<'a>)> {
        let cursor = self.skip_whitespace();
        let start = cursor.position;
        let rest = cursor.rest();

        let Some(c) = rest.chars().next() else {
            return Ok((
                PositionedToken {
                    token: FilterToken::End,
                    position: start,
                },
                cursor,
            ));
        };

        let (token, len) = match c {
            '(' => (FilterToken::OpenParen, 1),
            ')' => (FilterToken::CloseParen, 1),

            '=' => {
                if rest[1..].starts_with('~') {
                    (FilterToken::Op(Operator::RegexMatch), 2)
                } else {
                    (FilterToken::Op(Operator::Eq), 1)
                }
            }
            '!' => match rest[1..].chars().next() {
                Some('=') => (FilterToken::Op(Operator::NotEq), 2),
                Some('~') => (FilterToken::Op(Operator::RegexNotMatch), 2),
                Some(other) => {
                    return Err(FilterError::unknown_operator(format!("!{other}"), start));
                }
                None => return Err(FilterError::unknown_operator("!", start)),
            },

            '"' => {
                let scan = scan_quoted(&rest[1..]);
                if !scan.terminated {
                    return Err(FilterError::UnterminatedString { position: start });
                }
                (FilterToken::Str(scan.value), 1 + scan.consumed)
            }

            _ if is_identifier_char(c) => {
                let len = rest
                    .find(|ch: char| !is_identifier_char(ch))
                    .unwrap_or(rest.len());
                let word = &rest[..len];
                let token = match word {
                    "and" => FilterToken::And,
                    "or" => FilterToken::Or,
                    _ => FilterToken::Identifier(word.to_string()),
                };
                (token, len)
            }

            _ => {
                return Err(FilterError::UnexpectedCharacter {
                    character: c,
                    position: start,
                });
            }
        };

        Ok((
            PositionedToken {
                token,
                position: start,
            },
            cursor.advance(len),
        ))
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Collects all tokens up to (not including) [`FilterToken::End`].
#[cfg(test)]
pub fn tokenize(input: &str) -> FilterResult<Vec<FilterToken>> {
    let mut cursor = Cursor::new(input);
    let mut tokens = Vec::new();
    loop {
        let (positioned, next) = cursor.next_token()?;
        if positioned.token == FilterToken::End {
            return Ok(tokens);
        }
        tokens.push(positioned.token);
        cursor = next;
    }
}
