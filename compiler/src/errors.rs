//! Parse error type.
//!
//! Grammar violations are expected failures, so they travel as a single
//! explicit error value rather than a panic: the parser aborts on the
//! first missing construct and callers must handle the `Result`.

use miette::Diagnostic;
use thiserror::Error;

/// Raised the instant an expected token or construct is absent. Carries
/// a description of what the parser wanted, what it found, and where.
#[derive(Error, Debug, Diagnostic)]
#[error("expected {expected}, found {found} at line {line}, column {column}")]
#[diagnostic(code(microwave::parse))]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
            line,
            column,
        }
    }
}
