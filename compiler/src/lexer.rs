//! Lexer — Tokenizes Microwave source code.
//!
//! A single left-to-right scan over the characters, classifying each by
//! category. Key design decisions:
//!
//! - **The lexer is total.** It never fails: characters outside the
//!   language are silently skipped. Tolerance is the policy here; the
//!   parser is where missing structure becomes an error.
//!
//! - **Lexemes are verbatim.** Number literals keep their exact source
//!   text (no numeric conversion), and string contents are passed through
//!   raw — a backslash consumes the next character as a pair but neither
//!   is interpreted. The code generator re-emits both untouched.
//!
//! - **Maximal munch.** Operator tokens always take the longest valid
//!   spelling at the current position: one character by default, promoted
//!   to two for the compound-operator table, and to three only for the
//!   shift-assign forms `<<=` and `>>=`.

use crate::token::{Token, TokenKind};

/// The fixed keyword set. Statement keywords, type names, boolean
/// literals, the builtin state names, and `lambda`.
const KEYWORDS: &[&str] = &[
    "heat",
    "timer",
    "beep",
    "defrost",
    "mode",
    "popcorn",
    "door_closed",
    "door_open",
    "if",
    "else",
    "while",
    "for",
    "break",
    "continue",
    "return",
    "int",
    "float",
    "string",
    "bool",
    "true",
    "false",
    "lambda",
    "auto",
    "void",
];

/// Characters that can start an operator or punctuation token.
const SYMBOL_CHARS: &str = "+-*/=<>!&|^~%{}();,[].";

/// Two-character operators. Brace/paren/bracket/semicolon/comma/dot are
/// never promoted; everything else in this table is.
const TWO_CHAR_OPS: &[&str] = &[
    "++", "--", "==", "!=", "<=", ">=", "<<", ">>", "&&", "||", "+=", "-=", "*=", "/=", "%=",
    "^=", "&=", "|=",
];

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

/// Tokenize a complete source string. Always succeeds and always ends
/// with exactly one `EndOfFile` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).scan_tokens()
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }
        self.tokens
            .push(Token::new(TokenKind::EndOfFile, "", self.line, self.column));
        self.tokens
    }

    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            ' ' | '\t' => {
                self.advance();
            }
            '\n' => {
                self.pos += 1;
                self.line += 1;
                self.column = 1;
            }
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.word(),
            c if SYMBOL_CHARS.contains(c) => self.symbol(),
            // Anything else is outside the language; skip it.
            _ => {
                self.advance();
            }
        }
    }

    // ── Literal scanners ─────────────────────────────────────────────

    fn word(&mut self) {
        let line = self.line;
        let column = self.column;
        let mut text = String::new();
        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            text.push(self.advance());
        }
        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.tokens.push(Token::new(kind, text, line, column));
    }

    fn number(&mut self) {
        let line = self.line;
        let column = self.column;
        let mut text = String::new();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            text.push(self.advance());
        }
        // Optional decimal part. The dot is consumed even when no digits
        // follow it; the literal keeps whatever text was scanned.
        if !self.is_at_end() && self.peek() == '.' {
            text.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
        }
        self.tokens
            .push(Token::new(TokenKind::Number, text, line, column));
    }

    fn string(&mut self) {
        let line = self.line;
        let column = self.column;
        self.advance(); // opening quote
        let mut text = String::new();
        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();
            if c == '\\' && !self.is_at_end() {
                // Escape pair: keep both characters raw.
                text.push(c);
                text.push(self.advance());
            } else {
                text.push(c);
            }
        }
        // Unterminated strings run to end of input; no error.
        if !self.is_at_end() {
            self.advance(); // closing quote
        }
        self.tokens
            .push(Token::new(TokenKind::String, text, line, column));
    }

    fn symbol(&mut self) {
        let line = self.line;
        let column = self.column;
        let mut text = String::from(self.advance());

        if !self.is_at_end() {
            let two = format!("{}{}", text, self.peek());
            if TWO_CHAR_OPS.contains(&two.as_str()) {
                text.push(self.advance());
                // Shift-assign is the only three-character promotion.
                if (text == "<<" || text == ">>") && !self.is_at_end() && self.peek() == '=' {
                    text.push(self.advance());
                }
            }
        }

        self.tokens
            .push(Token::new(TokenKind::Symbol, text, line, column));
    }

    // ── Character-level helpers ──────────────────────────────────────

    fn advance(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let toks = kinds_and_texts("mode heat waffles timer _temp");
        assert_eq!(toks[0], (TokenKind::Keyword, "mode".into()));
        assert_eq!(toks[1], (TokenKind::Keyword, "heat".into()));
        assert_eq!(toks[2], (TokenKind::Identifier, "waffles".into()));
        assert_eq!(toks[3], (TokenKind::Keyword, "timer".into()));
        assert_eq!(toks[4], (TokenKind::Identifier, "_temp".into()));
    }

    #[test]
    fn test_builtin_state_names_are_keywords() {
        let toks = kinds_and_texts("door_closed door_open popcorn");
        assert!(toks[..3].iter().all(|(k, _)| *k == TokenKind::Keyword));
    }

    #[test]
    fn test_numbers_kept_verbatim() {
        let toks = kinds_and_texts("42 3.14 007");
        assert_eq!(toks[0], (TokenKind::Number, "42".into()));
        assert_eq!(toks[1], (TokenKind::Number, "3.14".into()));
        assert_eq!(toks[2], (TokenKind::Number, "007".into()));
    }

    #[test]
    fn test_number_with_trailing_dot() {
        // The dot is consumed even with no digits after it.
        let toks = kinds_and_texts("12.");
        assert_eq!(toks[0], (TokenKind::Number, "12.".into()));
        assert_eq!(toks[1].0, TokenKind::EndOfFile);
    }

    #[test]
    fn test_string_contents_raw() {
        let toks = kinds_and_texts(r#""hello world""#);
        assert_eq!(toks[0], (TokenKind::String, "hello world".into()));
    }

    #[test]
    fn test_string_escape_kept_as_pair() {
        // "a\"b" — the backslash and quote stay in the text untouched.
        let toks = kinds_and_texts(r#""a\"b""#);
        assert_eq!(toks[0].0, TokenKind::String);
        assert_eq!(toks[0].1, "a\\\"b");
        assert_eq!(toks[0].1.chars().count(), 4);
        assert_eq!(toks[1].0, TokenKind::EndOfFile);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let toks = kinds_and_texts("\"never closed");
        assert_eq!(toks[0], (TokenKind::String, "never closed".into()));
        assert_eq!(toks[1].0, TokenKind::EndOfFile);
    }

    #[test]
    fn test_maximal_munch_two_chars() {
        let toks = kinds_and_texts("<=");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0], (TokenKind::Symbol, "<=".into()));
    }

    #[test]
    fn test_maximal_munch_three_chars() {
        let toks = kinds_and_texts("a <<= 2");
        assert_eq!(toks[1], (TokenKind::Symbol, "<<=".into()));
        let toks = kinds_and_texts("a >>= 2");
        assert_eq!(toks[1], (TokenKind::Symbol, ">>=".into()));
    }

    #[test]
    fn test_adjacent_operators_split_greedily() {
        // "+++" munches "++" then "+".
        let toks = kinds_and_texts("+++");
        assert_eq!(toks[0], (TokenKind::Symbol, "++".into()));
        assert_eq!(toks[1], (TokenKind::Symbol, "+".into()));
    }

    #[test]
    fn test_punctuation_never_promoted() {
        let toks = kinds_and_texts("(){};,[].");
        let texts: Vec<&str> = toks[..8].iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["(", ")", "{", "}", ";", ",", "[", "]"]);
    }

    #[test]
    fn test_unknown_characters_skipped() {
        let toks = kinds_and_texts("1 @ 2 $ 3");
        assert_eq!(toks.len(), 4); // three numbers + EOF
        assert!(toks[..3].iter().all(|(k, _)| *k == TokenKind::Number));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = tokenize("heat\n  beep");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn test_full_statement() {
        let toks = kinds_and_texts("timer(3) { heat 900; }");
        let texts: Vec<&str> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec!["timer", "(", "3", ")", "{", "heat", "900", ";", "}", ""]
        );
    }
}
