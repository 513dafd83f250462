use core::fmt;

use thiserror::Error;

use crate::locate::{Location, render_snippet};

/// Failure raised by a token action or by [`ParseContext::finalize`].
///
/// [`ParseContext::finalize`]: crate::ParseContext::finalize
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// A grammar error tied to an explicit source offset.
    #[error("{message}")]
    Positioned {
        /// Absolute byte offset into the source text.
        offset: usize,
        /// Human readable description.
        message: String,
    },
    /// The active context rejected a value or punctuation token. The engine
    /// positions it at the token being processed.
    #[error("{0}")]
    Value(String),
    /// A broken internal invariant. Never expected from a well formed rule
    /// table.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ActionError {
    pub(crate) fn positioned(offset: usize, message: impl Into<String>) -> Self {
        Self::Positioned {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn value(message: impl Into<String>) -> Self {
        Self::Value(message.into())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Failure while compiling a rule table.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule pattern is not a valid regular expression.
    #[error("invalid pattern for rule `{name}`: {source}")]
    InvalidPattern {
        /// Name of the offending rule.
        name: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// Two rules share the same name.
    #[error("duplicate rule name `{0}`")]
    DuplicateName(String),
}

/// Category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not conform to the grammar.
    Syntax,
    /// An implementation bug surfaced while parsing.
    Internal,
}

/// A parse failure enriched with its source position.
///
/// The [`Display`](fmt::Display) output is the full diagnostic: the
/// description, `(line: N)` when the input spans more than one line, the
/// offending source line and a caret under the failing column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    description: String,
    offset: usize,
    location: Location,
    report: String,
}

impl ParseError {
    pub(crate) fn new(
        kind: ErrorKind,
        description: String,
        offset: usize,
        source: &str,
        location: Location,
    ) -> Self {
        let report = render_snippet(&description, source, &location);
        Self {
            kind,
            description,
            offset,
            location,
            report,
        }
    }

    /// Whether this is a grammar error or an internal one.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The bare description, without position information.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Absolute byte offset of the failure.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number.
    #[must_use]
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// 0-based column, counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.location.column
    }

    /// The source line holding the failure, without its terminator.
    #[must_use]
    pub fn line_text(&self) -> &str {
        &self.location.text
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report)
    }
}

impl core::error::Error for ParseError {}
