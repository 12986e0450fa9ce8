//! Compile diagnostics for the Byte compiler

use crate::lexer::{LexError, Span};
use thiserror::Error;

/// A diagnostic reported while compiling
///
/// Diagnostics are structured values; the only place they become text is
/// their `Display` implementation:
///
/// ```text
/// [line 1] SyntaxError at ')': expected an expression
/// [line 3] SyntaxError at end: expected ')' after expression
/// [line 2] SyntaxError: unexpected character @
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The kind of diagnostic
    pub kind: DiagnosticKind,
    /// 1-based line of the offending token
    pub line: u32,
    /// How the offending token is described
    pub location: Location,
    /// Source range of the offending token
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic
    #[must_use]
    pub fn new(kind: DiagnosticKind, line: u32, location: Location, span: Span) -> Self {
        Self {
            kind,
            line,
            location,
            span,
        }
    }

    /// Returns true if this diagnostic came from the scanner
    #[must_use]
    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Lexical(_))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] SyntaxError", self.line)?;
        match &self.location {
            Location::End => write!(f, " at end")?,
            Location::Newline => write!(f, " at newline")?,
            Location::String => write!(f, " at string")?,
            Location::Interpolation => write!(f, " at interpolation")?,
            Location::Lexeme(lexeme) => write!(f, " at '{lexeme}'")?,
            Location::Omitted => {}
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for Diagnostic {}

/// Where a diagnostic points, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The end of the input
    End,
    /// A line break
    Newline,
    /// A string literal, whose content may be empty
    String,
    /// The literal segment before a `${`
    Interpolation,
    /// A token, quoted by its source text
    Lexeme(String),
    /// Nothing is shown; error tokens are not source text
    Omitted,
}

/// The kind of compile diagnostic
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("{0}")]
    Lexical(#[from] LexError),

    #[error("expected an expression")]
    ExpectedExpression,

    #[error("expected '{expected}' after {context}")]
    ExpectedAfter {
        expected: &'static str,
        context: &'static str,
    },

    #[error("too many constants in one chunk (maximum {max})")]
    TooManyConstants { max: usize },

    #[error("expression nested too deeply (maximum {max})")]
    NestingTooDeep { max: usize },

    #[error("invalid number literal")]
    InvalidNumber,
}
