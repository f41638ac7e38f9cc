//! Defines the `Token`, `TokenKind` and `Punctuation` types.
//!
//! These are the intermediate representation between the `Tokenizer`
//! (lexer) and the `Validator` (grammar check). A token never owns its
//! text: it borrows the slice of the input it was scanned from.

use std::fmt;

/// One of the six single-character structural tokens.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Punctuation {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
}

impl Punctuation {
    /// Maps a byte to its structural token, if it is one.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Punctuation::LeftBrace),
            b'}' => Some(Punctuation::RightBrace),
            b'[' => Some(Punctuation::LeftBracket),
            b']' => Some(Punctuation::RightBracket),
            b':' => Some(Punctuation::Colon),
            b',' => Some(Punctuation::Comma),
            _ => None,
        }
    }

    /// The source text of this token.
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuation::LeftBrace => "{",
            Punctuation::RightBrace => "}",
            Punctuation::LeftBracket => "[",
            Punctuation::RightBracket => "]",
            Punctuation::Colon => ":",
            Punctuation::Comma => ",",
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The specific type of a `Token`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind<'a> {
    /// A structural character.
    Punctuation(Punctuation),
    /// Raw text between two `"`. Escape sequences are *not* interpreted.
    QuotedText(&'a str),
    /// A letter or `_` followed by letters, digits or `_`.
    /// Covers `true`, `false`, `null` and unquoted object keys.
    Word(&'a str),
    /// Text matching `-?digits(.digits)?([eE][+-]?digits)?`.
    NumberLiteral(&'a str),
}

/// A single token produced by the `Tokenizer`.
///
/// It contains the `TokenKind` and the byte offset in the source
/// where the token starts, which is what error reporting relies on.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token<'a> {
    /// The type of the token.
    pub(crate) kind: TokenKind<'a>,
    /// The byte offset where the token starts (the opening quote for
    /// `QuotedText`).
    pub(crate) offset: usize,
}

impl<'a> Token<'a> {
    /// Creates a token of `kind` starting at `offset`.
    pub fn new(kind: TokenKind<'a>, offset: usize) -> Self {
        Token { kind, offset }
    }

    /// The type of the token.
    pub fn kind(&self) -> TokenKind<'a> {
        self.kind
    }

    /// The byte offset where the token starts.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The token's text. For `QuotedText` this is the content between
    /// the quotes.
    pub fn text(&self) -> &'a str {
        match self.kind {
            TokenKind::Punctuation(p) => p.as_str(),
            TokenKind::QuotedText(s) | TokenKind::Word(s) | TokenKind::NumberLiteral(s) => s,
        }
    }

    /// The byte offset just past the token, closing quote included.
    pub fn end(&self) -> usize {
        match self.kind {
            TokenKind::QuotedText(s) => self.offset + s.len() + 2,
            _ => self.offset + self.text().len(),
        }
    }

    /// Returns `true` if this token is the given punctuation.
    pub fn is(&self, punctuation: Punctuation) -> bool {
        self.kind == TokenKind::Punctuation(punctuation)
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Punctuation(p) => write!(f, "punctuation '{}'", p),
            TokenKind::QuotedText(s) => write!(f, "quoted text \"{}\"", s),
            TokenKind::Word(s) => write!(f, "word {}", s),
            TokenKind::NumberLiteral(s) => write!(f, "number {}", s),
        }
    }
}
