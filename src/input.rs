//! Input positions
//!
//! An [`Input`] is the only state threaded through a parse: a view of the
//! unconsumed suffix of the original text. Matching never mutates an input;
//! a successful match hands back a new one further along.

use std::fmt;

/// Line and column of a byte offset, both 1-based.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The remaining, unconsumed part of a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Input<'a> {
    /// Start at the beginning of `source`
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// The full original text
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of this position in the original text
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed suffix
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// True when nothing is left to consume
    pub fn is_empty(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// A new position `len` bytes further along.
    ///
    /// `len` must land on a char boundary inside the source; matchers only
    /// ever advance by the length of something they matched.
    pub fn advance(&self, len: usize) -> Self {
        debug_assert!(self.source.is_char_boundary(self.offset + len));
        Self {
            source: self.source,
            offset: self.offset + len,
        }
    }

    /// Line/column of this position
    pub fn location(&self) -> Location {
        location_of(self.source, self.offset)
    }
}

/// Compute the 1-based line/column of `offset` within `source`.
pub(crate) fn location_of(source: &str, offset: usize) -> Location {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    Location { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_does_not_touch_original() {
        let start = Input::new("abc");
        let next = start.advance(2);

        assert_eq!(start.rest(), "abc");
        assert_eq!(next.rest(), "c");
        assert_eq!(next.source(), "abc");
        assert_eq!(next.offset(), 2);
        assert!(!next.is_empty());
        assert!(next.advance(1).is_empty());
    }

    #[test]
    fn test_location_counts_lines_and_chars() {
        let input = Input::new("ab\ncdé\nf").advance(7);
        assert_eq!(input.rest(), "\nf");
        assert_eq!(input.location(), Location { line: 2, column: 4 });

        assert_eq!(Input::new("").location(), Location { line: 1, column: 1 });
    }

    #[test]
    fn test_location_display() {
        let location = Location { line: 3, column: 9 };
        assert_eq!(location.to_string(), "line 3, column 9");
    }
}
