//! Terminal matchers: literals and regex patterns
//!
//! Patterns are anchored at the current position; they never search ahead.
//! Before compiling, unescaped parentheses in the caller's pattern are
//! escaped, so `pattern("f(x)")` matches the text `f(x)`. Everything else
//! (character classes, quantifiers, alternation) keeps its regex meaning.

use crate::error::GrammarError;
use crate::parser::{Kind, Parser};
use regex::Regex;
use std::fmt;

/// A compiled, start-anchored regex.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, GrammarError> {
        let anchored = format!("^(?:{})", escape_groups(source));
        let regex = Regex::new(&anchored).map_err(|e| GrammarError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Self::from_regex(source, regex))
    }

    /// Wrap an already anchored regex
    pub(crate) fn from_regex(source: &str, regex: Regex) -> Self {
        Self {
            source: source.to_string(),
            regex,
        }
    }

    /// The pattern as the caller wrote it
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The matched prefix of `text`, if any
    pub fn match_prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .find(text)
            .filter(|m| m.start() == 0)
            .map(|m| m.as_str())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

/// Escape every `(` and `)` not already escaped
fn escape_groups(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut escaped = false;
    for c in pattern.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '(' || c == ')' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Match `text` exactly
pub fn literal(text: impl Into<String>) -> Parser {
    Parser::from_kind(Kind::Literal(text.into()))
}

/// Match a prefix of the input against a regex
pub fn pattern(source: &str) -> Result<Parser, GrammarError> {
    Ok(Parser::from_kind(Kind::Pattern(Pattern::new(source)?)))
}

/// Match any single character from `chars`
pub fn one_of(chars: &str) -> Result<Parser, GrammarError> {
    pattern(&format!("[{}]", regex::escape(chars)))
}

/// Match `word` exactly, regex metacharacters included
pub fn exact_word(word: &str) -> Result<Parser, GrammarError> {
    pattern(&regex::escape(word))
}
