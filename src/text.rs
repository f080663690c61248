//! Ready-made text terminals
//!
//! Whitespace, identifiers and integers come up in nearly every text grammar.
//! The integer parsers convert their match to [`Value::Int`]; a numeral too
//! large for `i64` is left as text.

use crate::parser::{Kind, Parser};
use crate::terminals::Pattern;
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! builtin {
    ($name:ident, $source:literal) => {
        static $name: Lazy<Pattern> = Lazy::new(|| {
            Pattern::from_regex(
                $source,
                Regex::new(concat!("^(?:", $source, ")")).unwrap(),
            )
        });
    };
}

builtin!(WS, r"\s+");
builtin!(OWS, r"\s*");
builtin!(IDENT, r"[a-zA-Z_][a-zA-Z0-9_]*");
builtin!(POSITIVE_INTEGER, r"\+?[0-9]+");
builtin!(NEGATIVE_INTEGER, r"-[0-9]+");
builtin!(INTEGER, r"[-+]?[0-9]+");

fn builtin(pattern: &Lazy<Pattern>) -> Parser {
    Parser::from_kind(Kind::Pattern(Pattern::clone(pattern)))
}

/// Convert a matched numeral to [`Value::Int`]
pub fn to_int(value: Value) -> Value {
    match value {
        Value::Text(text) => match text.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(text),
        },
        other => other,
    }
}

/// One or more whitespace characters
pub fn ws() -> Parser {
    builtin(&WS)
}

/// Optional whitespace
pub fn ows() -> Parser {
    builtin(&OWS)
}

/// An identifier: a letter or `_`, then letters, digits and `_`
pub fn ident() -> Parser {
    builtin(&IDENT)
}

/// Digits with an optional leading `+`
pub fn positive_integer() -> Parser {
    builtin(&POSITIVE_INTEGER).map(to_int)
}

/// Digits with a leading `-`
pub fn negative_integer() -> Parser {
    builtin(&NEGATIVE_INTEGER).map(to_int)
}

/// Digits with an optional sign
pub fn integer() -> Parser {
    builtin(&INTEGER).map(to_int)
}
