//! Error types
//!
//! Two things can go wrong while parsing. The input may not match the
//! grammar, which is a [`ParseFailure`] and is routine: choices, optionals and
//! repetitions consume these while backtracking. Or the grammar itself may be
//! malformed, which is a [`GrammarError`] and is never consumed by any
//! combinator.

use crate::input::{location_of, Input, Location};
use std::fmt;
use thiserror::Error;

/// The input did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    expected: String,
    offset: usize,
    location: Option<Location>,
    cause: Option<Box<ParseFailure>>,
}

impl ParseFailure {
    /// A failure to match `expected` at `at`
    pub fn new(expected: impl Into<String>, at: Input<'_>) -> Self {
        Self {
            expected: expected.into(),
            offset: at.offset(),
            location: None,
            cause: None,
        }
    }

    pub(crate) fn caused_by(mut self, cause: ParseFailure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Description of the parser that failed
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Byte offset where the parser was tried
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line/column of the offset. Filled in by the top-level entry points;
    /// `None` for failures taken straight from [`crate::Parser::try_match`].
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// The failure of the last alternative tried, for a failed choice
    pub fn cause(&self) -> Option<&ParseFailure> {
        self.cause.as_deref()
    }

    /// This failure followed by its causes, outermost first
    pub fn chain(&self) -> impl Iterator<Item = &ParseFailure> {
        std::iter::successors(Some(self), |failure| failure.cause())
    }

    /// Resolve line/column for this failure and its causes
    pub(crate) fn locate(mut self, source: &str) -> Self {
        self.location = Some(location_of(source, self.offset));
        self.cause = self.cause.map(|cause| Box::new(cause.locate(source)));
        self
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} at ", self.expected)?;
        match self.location {
            Some(location) => write!(f, "{}", location),
            None => write!(f, "offset {}", self.offset),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// The grammar is malformed. These are programming errors, not bad input.
#[derive(Debug, Clone, Error)]
pub enum GrammarError {
    #[error("reference `{name}` was invoked before being bound")]
    Unbound { name: String },
    #[error("reference `{name}` is already bound")]
    AlreadyBound { name: String },
    #[error("invalid pattern /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Anything a parse can return instead of a value.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseFailure),
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),
}

impl Error {
    /// The parse failure, if this is one
    pub fn as_failure(&self) -> Option<&ParseFailure> {
        match self {
            Error::Parse(failure) => Some(failure),
            Error::Grammar(_) => None,
        }
    }
}
