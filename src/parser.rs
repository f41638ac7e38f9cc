//! Contains the `Validator`, the recursive-descent grammar check.
//!
//! The validator walks a token slice with a single forward cursor. Three
//! mutually recursive procedures (`parse_value`, `parse_object` and
//! `parse_array`) match the JSON value grammar; the first mismatch is
//! returned as a `SyntaxError` and nothing is retried.
//!
//! Recursion depth equals nesting depth, so every container entered is
//! counted against `Options::max_depth`.

use crate::error::SyntaxError;
use crate::options::Options;
use crate::scalar::is_scalar_literal;
use crate::token::{Punctuation, Token, TokenKind};
use log::debug;

/// The grammar validator.
///
/// Owns the cursor state for exactly one run: `validate` consumes it, so
/// the cursor can only ever move forward.
pub struct Validator<'t, 'a> {
    /// The token sequence under validation.
    tokens: &'t [Token<'a>],
    /// Index of the current token. `tokens.len()` means end of stream.
    cursor: usize,
    /// Number of containers currently open.
    depth: usize,
    max_depth: usize,
    reject_trailing_tokens: bool,
}

impl<'t, 'a> Validator<'t, 'a> {
    /// Creates a validator over `tokens`.
    pub fn new(tokens: &'t [Token<'a>], options: &Options) -> Self {
        Validator {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: options.max_depth,
            reject_trailing_tokens: options.reject_trailing_tokens,
        }
    }

    /// Checks that the tokens start with one complete JSON value.
    ///
    /// Tokens after that value are ignored unless the validator was built
    /// with `reject_trailing_tokens`.
    pub fn validate(mut self) -> Result<(), SyntaxError> {
        self.parse_value()?;

        if let Some(token) = self.current() {
            if self.reject_trailing_tokens {
                return Err(SyntaxError::TrailingTokens {
                    offset: token.offset,
                });
            }
            debug!(
                "ignoring {} token(s) after the top-level value",
                self.tokens.len() - self.cursor
            );
        }
        Ok(())
    }

    /// The current token, or `None` at the end of the stream.
    fn current(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.cursor)
    }

    /// Moves the cursor one token forward.
    fn advance(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// Byte offset just past the last token.
    fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, Token::end)
    }

    /// The current token, or `UnexpectedEnd` if the stream is exhausted.
    fn expect_token(&self) -> Result<&'t Token<'a>, SyntaxError> {
        self.current().ok_or_else(|| SyntaxError::UnexpectedEnd {
            offset: self.end_offset(),
        })
    }

    /// Returns `true` if the current token is `punctuation`.
    fn at(&self, punctuation: Punctuation) -> bool {
        self.current().is_some_and(|t| t.is(punctuation))
    }

    /// Counts a container opening at `offset` against the depth limit.
    fn enter(&mut self, offset: usize) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.max_depth,
                offset,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parses a single JSON value starting at the current token.
    fn parse_value(&mut self) -> Result<(), SyntaxError> {
        let token = self.expect_token()?;
        match token.kind {
            TokenKind::Punctuation(Punctuation::LeftBrace) => {
                self.enter(token.offset)?;
                self.advance();
                if self.at(Punctuation::RightBrace) {
                    self.advance();
                } else {
                    self.parse_object()?;
                }
                self.leave();
            }
            TokenKind::Punctuation(Punctuation::LeftBracket) => {
                self.enter(token.offset)?;
                self.advance();
                if self.at(Punctuation::RightBracket) {
                    self.advance();
                } else {
                    self.parse_array()?;
                }
                self.leave();
            }
            // Quoted text is a string scalar as-is; escapes are not decoded.
            TokenKind::QuotedText(_) => self.advance(),
            _ => {
                if !is_scalar_literal(token.text()) {
                    return Err(SyntaxError::InvalidValue {
                        text: token.text().to_string(),
                        offset: token.offset,
                    });
                }
                self.advance();
            }
        }
        Ok(())
    }

    /// Parses object members; entered after `{` when the object is not empty.
    fn parse_object(&mut self) -> Result<(), SyntaxError> {
        loop {
            // Any token is accepted as a key.
            self.expect_token()?;
            self.advance();

            let token = self.expect_token()?;
            if !token.is(Punctuation::Colon) {
                return Err(SyntaxError::ExpectedColon {
                    offset: token.offset,
                });
            }
            self.advance();

            self.parse_value()?;

            let token = self.expect_token()?;
            match token.kind {
                TokenKind::Punctuation(Punctuation::Comma) => self.advance(),
                TokenKind::Punctuation(Punctuation::RightBrace) => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    return Err(SyntaxError::ExpectedBraceOrComma {
                        offset: token.offset,
                    })
                }
            }
        }
    }

    /// Parses array elements; entered after `[` when the array is not empty.
    fn parse_array(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.parse_value()?;

            let token = self.expect_token()?;
            match token.kind {
                TokenKind::Punctuation(Punctuation::Comma) => {
                    self.advance();
                    // A ']' right after ',' is not an element.
                    if let Some(next) = self.current() {
                        if next.is(Punctuation::RightBracket) {
                            return Err(SyntaxError::ExpectedBracketOrComma {
                                offset: next.offset,
                            });
                        }
                    }
                }
                TokenKind::Punctuation(Punctuation::RightBracket) => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    return Err(SyntaxError::ExpectedBracketOrComma {
                        offset: token.offset,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn check_with(input: &str, options: &Options) -> Result<(), SyntaxError> {
        let tokens = tokenize(input).expect("test input should tokenize");
        Validator::new(&tokens, options).validate()
    }

    fn check(input: &str) -> Result<(), SyntaxError> {
        check_with(input, &Options::default())
    }

    #[test]
    fn test_scalars() {
        for input in ["null", "true", "false", "0", "-1.5e3", r#""text""#] {
            assert_eq!(check(input), Ok(()), "{input}");
        }
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(check("{}"), Ok(()));
        assert_eq!(check("[]"), Ok(()));
        assert_eq!(check("[{}, [], {\"a\": []}]"), Ok(()));
    }

    #[test]
    fn test_nested_document() {
        let input = r#"{"arr": [1, {"nested": true}], "num": 42, "s": "x"}"#;
        assert_eq!(check(input), Ok(()));
    }

    #[test]
    fn test_unquoted_and_odd_keys_accepted() {
        assert_eq!(check("{key: 1, other_key: [null]}"), Ok(()));
        assert_eq!(check("{1: 2}"), Ok(()));
    }

    #[test]
    fn test_quoted_text_not_decoded() {
        assert_eq!(check(r#"["a\q", "\u12"]"#), Ok(()));
    }

    #[test]
    fn test_invalid_value() {
        assert_eq!(
            check("[1, banana]"),
            Err(SyntaxError::InvalidValue {
                text: "banana".to_string(),
                offset: 4
            })
        );
        assert_eq!(
            check("0123"),
            Err(SyntaxError::InvalidValue {
                text: "0123".to_string(),
                offset: 0
            })
        );
        assert_eq!(
            check("{\"a\": }"),
            Err(SyntaxError::InvalidValue {
                text: "}".to_string(),
                offset: 6
            })
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            check(r#"{"a" 1}"#),
            Err(SyntaxError::ExpectedColon { offset: 5 })
        );
    }

    #[test]
    fn test_expected_brace_or_comma() {
        assert_eq!(
            check(r#"{"a": 1 "b": 2}"#),
            Err(SyntaxError::ExpectedBraceOrComma { offset: 8 })
        );
        assert_eq!(
            check(r#"{"a": 1]"#),
            Err(SyntaxError::ExpectedBraceOrComma { offset: 7 })
        );
    }

    #[test]
    fn test_expected_bracket_or_comma() {
        assert_eq!(
            check("[1 true]"),
            Err(SyntaxError::ExpectedBracketOrComma { offset: 3 })
        );
    }

    #[test]
    fn test_trailing_commas_rejected() {
        assert_eq!(
            check("[1,2,]"),
            Err(SyntaxError::ExpectedBracketOrComma { offset: 5 })
        );
        // '}' is taken as a key and the colon is then missing.
        assert_eq!(
            check(r#"{"a": 1,}"#),
            Err(SyntaxError::UnexpectedEnd { offset: 9 })
        );
        assert_eq!(
            check(r#"{"a": 1,} ]"#),
            Err(SyntaxError::ExpectedColon { offset: 10 })
        );
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(check("{"), Err(SyntaxError::UnexpectedEnd { offset: 1 }));
        assert_eq!(check("["), Err(SyntaxError::UnexpectedEnd { offset: 1 }));
        assert_eq!(
            check(r#"{"a":"#),
            Err(SyntaxError::UnexpectedEnd { offset: 5 })
        );
        assert_eq!(check("[1,"), Err(SyntaxError::UnexpectedEnd { offset: 3 }));
        assert_eq!(check(""), Err(SyntaxError::UnexpectedEnd { offset: 0 }));
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(check("{}{}"), Ok(()));
        assert_eq!(check("[1] banana"), Ok(()));
        assert_eq!(
            check_with("[1] [2]", &Options::strict()),
            Err(SyntaxError::TrailingTokens { offset: 4 })
        );
        assert_eq!(check_with(" [1] ", &Options::strict()), Ok(()));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let options = Options::new().with_max_depth(2);
        assert_eq!(check_with("[[1]]", &options), Ok(()));
        assert_eq!(check_with("[{}, [], {\"a\": 1}]", &options), Ok(()));
        assert_eq!(
            check_with("[{}, [], {\"a\": []}]", &options),
            Err(SyntaxError::NestingTooDeep {
                limit: 2,
                offset: 15
            })
        );
        assert_eq!(
            check_with("[[{\"a\": 1}]]", &options),
            Err(SyntaxError::NestingTooDeep {
                limit: 2,
                offset: 2
            })
        );
        assert_eq!(
            check_with("[[[1]]]", &options),
            Err(SyntaxError::NestingTooDeep {
                limit: 2,
                offset: 2
            })
        );

        let evil_input = "[".repeat(101) + &"]".repeat(101);
        assert_eq!(
            check(&evil_input),
            Err(SyntaxError::NestingTooDeep {
                limit: 100,
                offset: 100
            })
        );
        let ok_input = "[".repeat(100) + &"]".repeat(100);
        assert_eq!(check(&ok_input), Ok(()));
    }

    #[test]
    fn test_depth_is_released_between_siblings() {
        let options = Options::new().with_max_depth(1);
        assert_eq!(check_with("[1, 2]", &options), Ok(()));
        let siblings = format!("{{{}}}", "\"k\": 1, ".repeat(50) + "\"z\": 0");
        assert_eq!(check_with(&siblings, &options), Ok(()));
        assert!(check_with("[[]]", &options).is_err());
    }
}
