//! The byte-based tokenizer (lexer).
//!
//! It consumes the raw input `&str` once, left to right, and produces
//! `Token`s that borrow from it. No grammar is checked here: `banana` is a
//! perfectly good `Word`, and it is the validator's job to reject it.

use crate::error::LexError;
use crate::token::{Punctuation, Token, TokenKind};
use log::trace;
use memchr::memchr;
use std::iter::FusedIterator;

// --- The Lookup Table (LUT) ---
// A 256-entry array classifying ASCII bytes with a single lookup.
// Bytes >= 0x80 are left at 0 and classified by decoding the `char`.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural
const Q: u8 = 3; // Quote
const A: u8 = 4; // Letter or '_'
const N: u8 = 5; // Digit

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\t' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[0x0B] = W; // vertical tab
    table[0x0C] = W; // form feed
    let mut sep = 0x1C; // file, group, record and unit separators
    while sep <= 0x1F {
        table[sep] = W;
        sep += 1;
    }

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b'"' as usize] = Q;

    let mut i = 0;
    while i < 26 {
        table[(b'a' + i) as usize] = A;
        table[(b'A' + i) as usize] = A;
        i += 1;
    }
    table[b'_' as usize] = A;

    let mut d = b'0';
    while d <= b'9' {
        table[d as usize] = N;
        d += 1;
    }
    table
};

/// The tokenizer.
///
/// An `Iterator` over `Result<Token, LexError>`. It stops for good after
/// yielding the first error.
pub struct Tokenizer<'a> {
    /// The input text.
    input: &'a str,
    /// The raw bytes of `input`.
    bytes: &'a [u8],
    /// The current position (byte index). Always on a `char` boundary.
    cursor: usize,
    /// Set once an error has been yielded.
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` from an input string.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            failed: false,
        }
    }

    /// The `char` at the cursor.
    fn current_char(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    fn invalid_character(&self) -> LexError {
        LexError::InvalidCharacter {
            offset: self.cursor,
            found: self.current_char().unwrap_or(char::REPLACEMENT_CHARACTER),
        }
    }

    /// Skips ASCII whitespace through the LUT and any other Unicode
    /// whitespace by decoding it.
    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if byte < 0x80 {
                if BYTE_PROPERTIES[byte as usize] != W {
                    break;
                }
                self.cursor += 1;
            } else {
                match self.current_char() {
                    Some(c) if c.is_whitespace() => self.cursor += c.len_utf8(),
                    _ => break,
                }
            }
        }
    }

    /// Returns `true` if the (non-ASCII) character at the cursor may start a `Word`.
    fn at_unicode_letter(&self) -> bool {
        self.current_char().is_some_and(char::is_alphabetic)
    }

    /// Scans from an opening `"` to the next `"`. The text in between is
    /// taken verbatim, backslashes included.
    fn lex_quoted(&mut self) -> Result<TokenKind<'a>, LexError> {
        let open = self.cursor;
        let content_start = open + 1;
        match memchr(b'"', &self.bytes[content_start..]) {
            Some(len) => {
                self.cursor = content_start + len + 1;
                Ok(TokenKind::QuotedText(
                    &self.input[content_start..content_start + len],
                ))
            }
            None => Err(LexError::UnterminatedString { offset: open }),
        }
    }

    /// Consumes the maximal run of letters, digits and `_`.
    fn lex_word(&mut self) -> TokenKind<'a> {
        let start = self.cursor;
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if byte < 0x80 {
                if !matches!(BYTE_PROPERTIES[byte as usize], A | N) {
                    break;
                }
                self.cursor += 1;
            } else {
                match self.current_char() {
                    Some(c) if c.is_alphanumeric() => self.cursor += c.len_utf8(),
                    _ => break,
                }
            }
        }
        TokenKind::Word(&self.input[start..self.cursor])
    }

    /// Consumes the longest number prefix at the cursor.
    fn lex_number(&mut self) -> Result<TokenKind<'a>, LexError> {
        let start = self.cursor;
        let len = number_prefix_len(&self.bytes[start..]);
        if len == 0 {
            return Err(self.invalid_character());
        }
        self.cursor += len;
        Ok(TokenKind::NumberLiteral(&self.input[start..self.cursor]))
    }
}

/// Length of the longest prefix of `bytes` matching
/// `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`, or 0 if nothing matches.
///
/// The optional parts are all-or-nothing: in `1.e5` only `1` matches.
fn number_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |i: usize| bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_digits = digits_from(end);
    if int_digits == 0 {
        return 0;
    }
    end += int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if let Some(b'e' | b'E') = bytes.get(end) {
        let mut exp = end + 1;
        if let Some(b'+' | b'-') = bytes.get(exp) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

impl FusedIterator for Tokenizer<'_> {}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    /// Gets the next `Token` from the input.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        // 1. Skip insignificant whitespace.
        self.skip_whitespace();

        // 2. Peek at the next byte; `None` is the clean end of input.
        let byte = *self.bytes.get(self.cursor)?;
        let offset = self.cursor;

        // 3. Dispatch on the byte class.
        let kind = match BYTE_PROPERTIES[byte as usize] {
            S => match Punctuation::from_byte(byte) {
                Some(p) => {
                    self.cursor += 1;
                    Ok(TokenKind::Punctuation(p))
                }
                None => Err(self.invalid_character()),
            },
            Q => self.lex_quoted(),
            A => Ok(self.lex_word()),
            _ if byte >= 0x80 && self.at_unicode_letter() => Ok(self.lex_word()),
            _ => self.lex_number(),
        };

        match kind {
            Ok(kind) => {
                trace!("token {:?} at byte {}", kind, offset);
                Some(Ok(Token { kind, offset }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Tokenizes the whole `input`, failing on the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Tokenizer::new(input).collect()
}
