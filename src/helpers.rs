//! Grammar building helpers
//!
//! Common shapes assembled from the primitive combinators, with actions that
//! tidy their raw sequence values.

use crate::combinators::{repeat, sequence};
use crate::parser::Parser;
use crate::value::Value;

/// `open inner close`, yielding only the value of `inner`
pub fn bracketed(open: Parser, inner: Parser, close: Parser) -> Parser {
    sequence([open, inner, close]).map(|v| v.into_item(1).unwrap_or(Value::Absent))
}

/// One or more `parser`, flattened into a single list
pub fn one_or_more(parser: Parser) -> Parser {
    sequence([parser.clone(), repeat(parser)]).map(head_and_tail)
}

/// `[head, [tail...]]` into `[head, tail...]`
fn head_and_tail(value: Value) -> Value {
    let mut parts = match value.into_list() {
        Ok(parts) => parts.into_iter(),
        Err(other) => return other,
    };
    let mut items: Vec<Value> = parts.next().into_iter().collect();
    if let Some(Value::List(tail)) = parts.next() {
        items.extend(tail);
    }
    Value::List(items)
}

/// `item (separator item)*`, yielding the list of items
pub fn separated(item: Parser, separator: Parser) -> Parser {
    let tail = repeat(sequence([separator, item.clone()])).map(|v| match v.into_list() {
        Ok(pairs) => Value::List(pairs.into_iter().filter_map(|p| p.into_item(1)).collect()),
        Err(other) => other,
    });
    sequence([item, tail]).map(head_and_tail)
}

/// A left-associative chain `operand (operator operand)*`.
///
/// `1-2-3` yields `[[1, "-", 2], "-", 3]`; a lone operand yields itself.
pub fn binop(operand: Parser, operator: Parser) -> Parser {
    sequence([operand.clone(), repeat(sequence([operator, operand]))]).map(fold_left)
}

fn fold_left(value: Value) -> Value {
    let mut parts = match value.into_list() {
        Ok(parts) => parts.into_iter(),
        Err(other) => return other,
    };
    let first = parts.next().unwrap_or(Value::Absent);
    let rest = match parts.next() {
        Some(Value::List(rest)) => rest,
        _ => return first,
    };
    rest.into_iter().fold(first, |left, step| match step.into_list() {
        Ok(step) => {
            let mut step = step.into_iter();
            let operator = step.next().unwrap_or(Value::Absent);
            let right = step.next().unwrap_or(Value::Absent);
            Value::List(vec![left, operator, right])
        }
        Err(_) => left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminals::{literal, one_of};
    use crate::text::integer;

    #[test]
    fn test_bracketed_keeps_inner_value() {
        let parser = bracketed(literal("("), integer(), literal(")"));
        assert_eq!(parser.parse("(12)").unwrap(), Value::Int(12));
        assert!(parser.parse("(12").is_err());
    }

    #[test]
    fn test_one_or_more() {
        let parser = one_or_more(literal("a"));
        assert!(parser.parse("").is_err());
        assert_eq!(parser.parse("a").unwrap(), Value::List(vec!["a".into()]));
        assert_eq!(
            parser.parse("aaa").unwrap(),
            Value::List(vec!["a".into(), "a".into(), "a".into()])
        );
    }

    #[test]
    fn test_separated() {
        let parser = separated(integer(), literal(","));
        assert_eq!(
            parser.parse("1,2,3").unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(parser.parse("1").unwrap(), Value::List(vec![Value::Int(1)]));
        assert!(parser.parse("1,").is_err());
    }

    #[test]
    fn test_binop_is_left_associative() {
        let parser = binop(integer(), one_of("+-").unwrap());
        assert_eq!(parser.parse("7").unwrap(), Value::Int(7));
        assert_eq!(
            parser.parse("1-2-3").unwrap(),
            Value::List(vec![
                Value::List(vec![Value::Int(1), "-".into(), Value::Int(2)]),
                "-".into(),
                Value::Int(3),
            ])
        );
    }
}
