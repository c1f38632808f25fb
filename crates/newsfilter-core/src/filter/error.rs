//! Error types for filter parsing and evaluation.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing a filter expression.
///
/// Any of these rejects the whole query; no partial expression is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// An unexpected token was encountered during parsing.
    #[error("unexpected {token} at position {position}")]
    UnexpectedToken {
        /// Description of the unexpected token.
        token: String,
        /// Byte offset of the token.
        position: usize,
    },

    /// The expression ended where more input was required.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// A quoted string was not closed before the end of input.
    #[error("unterminated string starting at position {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A comparison operator that is not part of the language.
    #[error("unknown operator '{operator}' at position {position}")]
    UnknownOperator {
        /// The operator text.
        operator: String,
        /// Byte offset of the operator.
        position: usize,
    },

    /// A character that cannot start any token.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// An opening parenthesis was never closed.
    #[error("unclosed parenthesis opened at position {position}")]
    UnclosedParenthesis {
        /// Byte offset of the opening parenthesis.
        position: usize,
    },

    /// Parentheses nest deeper than the parser allows.
    #[error("parentheses nested too deeply at position {position}")]
    NestingTooDeep {
        /// Byte offset of the parenthesis that exceeded the limit.
        position: usize,
    },

    /// A comparison operand was not a quoted string.
    #[error("expected a quoted string at position {position}, found {found}")]
    ExpectedString {
        /// Description of what was found instead.
        found: String,
        /// Byte offset of the operand.
        position: usize,
    },
}

impl FilterError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Creates an unknown operator error.
    pub fn unknown_operator(operator: impl Into<String>, position: usize) -> Self {
        FilterError::UnknownOperator {
            operator: operator.into(),
            position,
        }
    }

    /// Creates an expected-string error.
    pub fn expected_string(found: impl Into<String>, position: usize) -> Self {
        FilterError::ExpectedString {
            found: found.into(),
            position,
        }
    }

    /// Returns the byte offset the error refers to, when there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            FilterError::EmptyExpression | FilterError::UnexpectedEndOfInput => None,
            FilterError::UnexpectedToken { position, .. }
            | FilterError::UnterminatedString { position }
            | FilterError::UnknownOperator { position, .. }
            | FilterError::UnexpectedCharacter { position, .. }
            | FilterError::UnclosedParenthesis { position }
            | FilterError::NestingTooDeep { position }
            | FilterError::ExpectedString { position, .. } => Some(*position),
        }
    }
}

/// Errors raised while evaluating a bound filter against a record.
///
/// These never abort evaluation; the affected comparison evaluates to
/// `false` and the error is reported alongside the verdict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// A regex operator was used with a literal that is not a valid pattern.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidPattern {
        /// The literal that failed to compile.
        pattern: String,
        /// The regex compiler's message.
        message: String,
    },
}
