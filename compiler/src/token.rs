//! Token types for the Microwave language.
//!
//! Each token carries its kind, its lexeme (the raw source text), and the
//! 1-based line/column where it starts. Position is tracked purely for
//! diagnostics; nothing downstream depends on it for semantics.
//!
//! Unlike lexers that bake literal values into the token kind, the kind
//! here is a flat tag and the text is kept verbatim. The parser dispatches
//! on exact source text (keyword names, operator spellings), and the code
//! generator reproduces number literals exactly as written, so the lexeme
//! is the payload.

use std::fmt;

/// The six token categories of the Microwave language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word in the fixed keyword set (`mode`, `heat`, `int`, ...).
    Keyword,
    /// Any other identifier-shaped word.
    Identifier,
    /// Integer or decimal literal, text preserved verbatim.
    Number,
    /// String literal contents (quotes stripped, escapes left raw).
    String,
    /// Operator or punctuation, up to three characters (`<<=`).
    Symbol,
    /// Sentinel appended after the last real token.
    EndOfFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// True if this token is a keyword with exactly this text.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// True if this token is a symbol with exactly this text.
    pub fn is_symbol(&self, sym: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == sym
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfFile => write!(f, "end of input"),
            TokenKind::String => write!(f, "\"{}\"", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}
