//! Contains the error types for the library and the `Diagnostic` that
//! renders one of them against its source text.
//!
//! Every failure carries the byte offset where it was detected. The
//! `Diagnostic` turns that offset into a 1-indexed line and column.
use std::fmt;
use thiserror::Error;

/// The input text does not decompose into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `"` with no closing `"` before the end of input.
    #[error("Unterminated string")]
    UnterminatedString {
        /// Offset of the opening quote.
        offset: usize,
    },
    /// A character that cannot start any token.
    #[error("Unexpected character '{found}'")]
    InvalidCharacter {
        /// Offset of the offending character.
        offset: usize,
        /// The offending character.
        found: char,
    },
}

impl LexError {
    /// The byte offset where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedString { offset } | LexError::InvalidCharacter { offset, .. } => {
                *offset
            }
        }
    }
}

/// The token sequence does not match the JSON value grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// An object key was not followed by `:`.
    #[error("Expected ':' after key")]
    ExpectedColon { offset: usize },
    /// An object member was followed by something other than `,` or `}`.
    #[error("Expected '}}' or ',' in object")]
    ExpectedBraceOrComma { offset: usize },
    /// An array element was followed by something other than `,` or `]`.
    #[error("Expected ']' or ',' in array")]
    ExpectedBracketOrComma { offset: usize },
    /// A token in value position is not a JSON scalar.
    #[error("Invalid JSON value: {text}")]
    InvalidValue { text: String, offset: usize },
    /// The token stream ended where a token was required.
    #[error("Unexpected end of input")]
    UnexpectedEnd { offset: usize },
    /// A container opened past the configured nesting limit.
    #[error("Maximum nesting depth of {limit} exceeded")]
    NestingTooDeep { limit: usize, offset: usize },
    /// Tokens remain after the top-level value.
    #[error("Unexpected trailing token")]
    TrailingTokens { offset: usize },
}

impl SyntaxError {
    /// The byte offset where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::ExpectedColon { offset }
            | SyntaxError::ExpectedBraceOrComma { offset }
            | SyntaxError::ExpectedBracketOrComma { offset }
            | SyntaxError::InvalidValue { offset, .. }
            | SyntaxError::UnexpectedEnd { offset }
            | SyntaxError::NestingTooDeep { offset, .. }
            | SyntaxError::TrailingTokens { offset } => *offset,
        }
    }
}

/// The primary error type for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Tokenization failed.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens do not form a JSON value.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The input was rejected before tokenization.
    #[error("Input of {size} bytes exceeds maximum size of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

impl Error {
    /// The byte offset where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            Error::Lex(e) => e.offset(),
            Error::Syntax(e) => e.offset(),
            Error::InputTooLarge { .. } => 0,
        }
    }
}

/// A human-readable report of an `Error`.
///
/// This struct contains the error message and the location (byte offset,
/// line and column) where the error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// A description of what went wrong.
    pub message: String,
    /// The byte offset where the error was detected.
    pub offset: usize,
    /// The line number (1-indexed) where the error was detected.
    pub line: usize,
    /// The column number (1-indexed, in characters) where the error was detected.
    pub column: usize,
}

impl Diagnostic {
    /// Resolves `error` against the `source` it was produced from.
    pub fn new(error: &Error, source: &str) -> Self {
        let (line, column) = line_column(source, error.offset());
        Diagnostic {
            message: error.to_string(),
            offset: error.offset(),
            line,
            column,
        }
    }
}

/// Converts a byte offset into a 1-indexed (line, column) pair.
/// Offsets past the end or inside a multi-byte character are clamped.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

// --- Error Formatting ---
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error: {} at line {}, column {}.",
            self.message, self.line, self.column
        )
    }
}
