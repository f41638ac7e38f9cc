//! # json-check
//!
//! `json-check` tells you whether a text is JSON, and if it is not, where
//! the first problem is. It is a validator, not a deserializer: nothing is
//! built in memory beyond the token list.
//!
//! ## Pipeline
//!
//! * **Tokenizer:** one left-to-right pass over the input producing
//!   `Token`s that borrow from it (punctuation, quoted text, words and
//!   number literals), or a `LexError`.
//! * **Validator:** a recursive-descent check of the token sequence
//!   against the JSON value grammar, failing with a `SyntaxError` on the
//!   first mismatch.
//!
//! Both stages fail fast: exactly one error is reported per run, together
//! with the byte offset where it was detected.
//!
//! ## Quick Start
//!
//! ```
//! use json_check::{validate, Diagnostic, Error, SyntaxError};
//!
//! assert!(validate(r#"{ "name": "Babbage", "id": 1815 }"#).is_ok());
//!
//! let input = r#"{"name" "Babbage"}"#;
//! let err = validate(input).unwrap_err();
//! assert_eq!(err, Error::Syntax(SyntaxError::ExpectedColon { offset: 8 }));
//! assert_eq!(
//!     Diagnostic::new(&err, input).to_string(),
//!     "Error: Expected ':' after key at line 1, column 9."
//! );
//! ```
//!
//! ## Known limitations
//!
//! * Quoted text is taken verbatim up to the next `"`: escape sequences
//!   are neither decoded nor checked, and `"a\"b"` is not one string.
//! * Unless `Options::reject_trailing_tokens` is set, anything after the
//!   first complete value is ignored (`{}{}` is accepted).
//! * Object keys are not checked: any single token is accepted as a key.

/// Contains the error types and the `Diagnostic` renderer.
pub mod error;
/// Contains the `Options` for a validation run.
pub mod options;
/// Contains the recursive-descent `Validator`.
pub mod parser;
/// Contains the scalar-literal check.
pub mod scalar;
/// Contains the `Token` types.
pub mod token;
/// Contains the `Tokenizer`.
pub mod tokenizer;

pub use error::{Diagnostic, Error, LexError, SyntaxError};
pub use options::{Options, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_BYTES};
pub use parser::Validator;
pub use scalar::is_scalar_literal;
pub use token::{Punctuation, Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};

use log::debug;

/// Validates `input` with the default `Options`.
///
/// # Errors
/// Returns the first lexical or syntax error found.
///
/// # Examples
/// ```
/// use json_check::{validate, Error, LexError};
///
/// assert!(validate("[1, true, null]").is_ok());
/// assert_eq!(
///     validate("[1, ?]"),
///     Err(Error::Lex(LexError::InvalidCharacter { offset: 4, found: '?' }))
/// );
/// ```
pub fn validate(input: &str) -> Result<(), Error> {
    validate_with(input, &Options::default())
}

/// Validates `input` with explicit `options`.
///
/// # Errors
/// Returns `Error::InputTooLarge` before tokenizing if the input exceeds
/// `options.max_input_bytes`, otherwise the first lexical or syntax error.
pub fn validate_with(input: &str, options: &Options) -> Result<(), Error> {
    if input.len() > options.max_input_bytes {
        let error = Error::InputTooLarge {
            size: input.len(),
            limit: options.max_input_bytes,
        };
        log_rejection(&error);
        return Err(error);
    }

    let tokens = tokenize(input)
        .map_err(Error::from)
        .inspect_err(log_rejection)?;
    debug!("tokenized {} bytes into {} tokens", input.len(), tokens.len());

    Validator::new(&tokens, options)
        .validate()
        .map_err(Error::from)
        .inspect_err(log_rejection)?;
    Ok(())
}

fn log_rejection(error: &Error) {
    debug!("rejected at byte {}: {}", error.offset(), error);
}
