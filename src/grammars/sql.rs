//! A subset of SQL `select`
//!
//! ```text
//! select  := "select" ws columns (ws from)?
//! columns := column (ows "," ows column)*
//! column  := "*" | ref
//! ref     := name ("." name)*
//! from    := "from" ws ref ("," ref)* (ws join (ws join)*)?
//! join    := "join" ws ref
//! ```
//!
//! Results are [`Value::Node`] trees: `Select(columns, from)`,
//! `From(tables, joins)`, `Join(table)`, `Ref(parts...)` and `AllColumns()`.
//! Missing clauses are [`Value::Absent`].

use crate::combinators::{optional, sequence};
use crate::error::{Error, GrammarError};
use crate::helpers::separated;
use crate::parser::Parser;
use crate::terminals::{exact_word, literal, pattern};
use crate::text::{ows, ws};
use crate::value::Value;
use once_cell::sync::Lazy;

static GRAMMAR: Lazy<Parser> = Lazy::new(|| build().expect("sql grammar patterns are valid"));

/// Take the items at `indices` out of a sequence value
fn pick(value: Value, indices: &[usize]) -> Vec<Value> {
    let mut items = value.into_list().unwrap_or_default();
    indices
        .iter()
        .map(|&i| {
            items
                .get_mut(i)
                .map(|slot| std::mem::replace(slot, Value::Absent))
                .unwrap_or(Value::Absent)
        })
        .collect()
}

/// `ws p`, if present, yielding only `p`
fn spaced(parser: Parser) -> Parser {
    optional(sequence([ws(), parser])).map(|v| v.into_item(1).unwrap_or(Value::Absent))
}

fn keyword(word: &str) -> Result<Parser, GrammarError> {
    Ok(exact_word(word)?.named(format!("keyword `{}`", word)))
}

/// Build a fresh copy of the grammar
pub fn build() -> Result<Parser, GrammarError> {
    let name = pattern("[a-zA-Z_]+")?.named("name");
    let table_ref = separated(name, literal("."))
        .map(|v| Value::node("Ref", v.into_list().unwrap_or_default()));

    let all_columns = literal("*").map(|_| Value::node("AllColumns", vec![]));
    let column = (all_columns | table_ref.clone()).named("column");
    let columns = separated(column, sequence([ows(), literal(","), ows()]));

    let join = sequence([keyword("join")?, ws(), table_ref.clone()])
        .map(|v| Value::node("Join", pick(v, &[2])));
    let joins = separated(join, ws());
    let tables = separated(table_ref, literal(","));
    let from = sequence([keyword("from")?, ws(), tables, spaced(joins)])
        .map(|v| Value::node("From", pick(v, &[2, 3])));

    let select = sequence([keyword("select")?, ws(), columns, spaced(from)])
        .map(|v| Value::node("Select", pick(v, &[2, 3])));
    Ok(select.named("select statement"))
}

/// The shared grammar
pub fn grammar() -> &'static Parser {
    &GRAMMAR
}

/// Parse a `select` statement
pub fn parse(text: &str) -> Result<Value, Error> {
    grammar().parse(text)
}
