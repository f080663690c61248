//! Arithmetic expressions
//!
//! ```text
//! expr    := sum
//! sum     := product (("+" | "-") product)*
//! product := value (("*" | "/") value)*
//! value   := number | "(" expr ")"
//! ```
//!
//! Operators are left-associative and `*`/`/` bind tighter than `+`/`-`.
//! A parse yields nested `[left, operator, right]` lists over
//! [`Value::Int`] leaves, which [`evaluate`] reduces to a number.

use crate::error::{Error, GrammarError};
use crate::helpers::{binop, bracketed};
use crate::parser::Parser;
use crate::reference::Reference;
use crate::terminals::{literal, one_of, pattern};
use crate::text::to_int;
use crate::value::Value;
use once_cell::sync::Lazy;

static GRAMMAR: Lazy<Parser> =
    Lazy::new(|| build().expect("calculator grammar patterns are valid"));

/// Errors from [`eval`] and [`evaluate`]
#[derive(Debug, Clone, thiserror::Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] Error),
    #[error("division by zero")]
    DivisionByZero,
    #[error("not an arithmetic expression: {0}")]
    Malformed(String),
}

/// Build a fresh copy of the grammar
///
/// The `expression` rule refers to itself, so every built grammar is a
/// reference cycle that is never freed. Prefer the shared [`grammar`].
pub fn build() -> Result<Parser, GrammarError> {
    let expr = Reference::named("expression");

    let number = pattern("[0-9]+")?.map(to_int).named("number");
    let group = bracketed(literal("("), expr.parser(), literal(")"));
    let value = (number | group).named("number or parenthesised expression");
    let product = binop(value, one_of("*/")?);
    let sum = binop(product, one_of("+-")?);

    expr.bind(sum)?;
    Ok(expr.parser())
}

/// The shared grammar
pub fn grammar() -> &'static Parser {
    &GRAMMAR
}

/// Parse `text` into an expression tree
pub fn parse(text: &str) -> Result<Value, Error> {
    grammar().parse(text)
}

/// Reduce an expression tree to its value
pub fn evaluate(tree: &Value) -> Result<f64, CalcError> {
    match tree {
        Value::Int(n) => Ok(*n as f64),
        // Numerals too wide for i64 are left as text by `to_int`
        Value::Text(numeral) => numeral
            .parse()
            .map_err(|_| CalcError::Malformed(tree.to_string())),
        Value::List(items) if items.len() == 3 => {
            let left = evaluate(&items[0])?;
            let right = evaluate(&items[2])?;
            match items[1].as_text() {
                Some("+") => Ok(left + right),
                Some("-") => Ok(left - right),
                Some("*") => Ok(left * right),
                Some("/") if right == 0.0 => Err(CalcError::DivisionByZero),
                Some("/") => Ok(left / right),
                _ => Err(CalcError::Malformed(tree.to_string())),
            }
        }
        other => Err(CalcError::Malformed(other.to_string())),
    }
}

/// Parse and evaluate `text`
pub fn eval(text: &str) -> Result<f64, CalcError> {
    evaluate(&parse(text)?)
}
