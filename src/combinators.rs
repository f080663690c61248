//! Structural combinators
//!
//! Constructors for the non-terminal node kinds. See [`crate::parser`] for
//! how each kind is evaluated.

use crate::parser::{Kind, Parser};
use crate::value::Value;

/// Match each parser in turn; yields a [`Value::List`] of their values
pub fn sequence(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::from_kind(Kind::Sequence(parsers.into_iter().collect()))
}

/// Ordered choice: the first alternative that matches wins
pub fn choice(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::from_kind(Kind::Choice(parsers.into_iter().collect()))
}

/// Zero or more; always succeeds with a [`Value::List`]
pub fn repeat(parser: Parser) -> Parser {
    Parser::from_kind(Kind::Repeat(parser))
}

/// Zero or one; yields [`Value::Absent`] when `parser` does not match
pub fn optional(parser: Parser) -> Parser {
    Parser::from_kind(Kind::Optional(parser))
}

/// Succeed without consuming iff `parser` matches here
///
/// Always yields [`Value::Absent`]; actions attached to the result are
/// discarded.
pub fn and_lookahead(parser: Parser) -> Parser {
    Parser::from_kind(Kind::And(parser))
}

/// Succeed without consuming iff `parser` does not match here
///
/// Like [`and_lookahead`], yields [`Value::Absent`] and takes no action.
pub fn not_lookahead(parser: Parser) -> Parser {
    Parser::from_kind(Kind::Not(parser))
}

/// Attach `action` to `parser`, composing over any existing action.
/// Same as [`Parser::map`].
pub fn attach_action(
    parser: Parser,
    action: impl Fn(Value) -> Value + Send + Sync + 'static,
) -> Parser {
    parser.map(action)
}
