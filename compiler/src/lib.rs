//! Microwave Compiler — Frontend and C backend for the Microwave language.
//!
//! # Compiler Pipeline
//!
//! ```text
//! Source Code (.mw)
//!     │
//!     ▼
//! ┌──────────┐
//! │  Lexer    │  Tokenizes source into kind/text tokens with line/column
//! └────┬─────┘
//!      │
//!      ▼
//! ┌──────────┐
//! │  Parser   │  Recursive descent (statements) + precedence climbing
//! └────┬─────┘   (expressions) into an owned AST
//!      │
//!      ▼
//! ┌──────────┐
//! │  Codegen  │  Direct tree-to-text lowering
//! └────┬─────┘
//!      │
//!      ▼
//! C Source (.c)
//! ```
//!
//! Each stage is a pure function of its input: the parser consumes the
//! lexer's full token vector, the generator consumes the parser's full
//! tree, and nothing is shared or mutated across stages. The lexer and
//! generator are total; only the parser can fail, with a [`ParseError`]
//! on the first structural mismatch.

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod token;

pub use errors::ParseError;

/// Run the full pipeline: source text in, C source text out.
pub fn compile(source: &str) -> Result<String, ParseError> {
    let tokens = lexer::tokenize(source);
    let program = parser::parse(tokens)?;
    Ok(codegen::generate(&program))
}
