//! Error types for ingrid operations.
//!
//! Malformed lines are described by a [`SyntaxError`]. The mapper wraps it in
//! a [`LineError`] carrying the line number and the raw line, and every
//! [`LineError`] belongs to the umbrella "syntax error" category checked with
//! [`Error::is_syntax`] or [`LineError::kind`].

use serde::Serialize;
use std::io;
use thiserror::Error;

/// The reason a single line could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxError {
    /// A section header starts with `[` but has no closing `]`.
    #[error("missing right bracket")]
    MissingRightBracket,

    /// A key/value line has no `=`.
    #[error("missing equal sign")]
    MissingEqualSign,

    /// The key of a key/value line contains a space.
    #[error("space not allowed in key")]
    SpaceInKey,

    /// A quoted value could not be unquoted.
    #[error("missing end quote")]
    MissingEndQuote,
}

/// A [`SyntaxError`] annotated with where it happened.
///
/// Displays as `<line number> <line> SYNTAX ERROR: <detail>`, e.g.
/// `16 color SYNTAX ERROR: missing equal sign`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{line_number} {line} SYNTAX ERROR: {kind}")]
pub struct LineError {
    line_number: usize,
    line: String,
    #[source]
    kind: SyntaxError,
}

impl LineError {
    /// Creates a new `LineError` for the 1-based `line_number`.
    #[must_use]
    pub fn new(line_number: usize, line: impl Into<String>, kind: SyntaxError) -> Self {
        Self {
            line_number,
            line: line.into(),
            kind,
        }
    }

    /// Returns the 1-based line number of the malformed line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the trimmed text of the malformed line.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns what was wrong with the line.
    #[must_use]
    pub fn kind(&self) -> SyntaxError {
        self.kind
    }
}

/// The error type for ingrid operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading lines.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line was malformed and mapping was aborted.
    #[error(transparent)]
    Syntax(#[from] LineError),
}

impl Error {
    /// Returns `true` if this error is a syntax error in the input.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// Returns the line error if this is a syntax error.
    #[must_use]
    pub fn as_line_error(&self) -> Option<&LineError> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Io(_) => None,
        }
    }
}

/// A specialized Result type for ingrid operations.
pub type Result<T> = std::result::Result<T, Error>;
