//! Behaviour of the combinators through the public API
//!
//! Covers ordered choice, total repetition, action ordering, lookahead width,
//! full-input consumption and sharing a grammar between threads.

use peg::{
    and_lookahead, attach_action, bind, choice, literal, not_lookahead, optional, parse,
    parse_opt, pattern, reference, repeat, sequence, Error, Input, Parser, Value,
};
use proptest::prelude::*;
use rstest::rstest;

fn suffix(suffix: &'static str) -> impl Fn(Value) -> Value + Send + Sync + 'static {
    move |value| match value {
        Value::Text(text) => Value::Text(text + suffix),
        other => other,
    }
}

#[rstest]
#[case::repetition(repeat(literal("a")), Value::List(vec![]))]
#[case::optional(optional(literal("a")), Value::Absent)]
#[case::nested(
    sequence([repeat(literal("a")), optional(literal("b"))]),
    Value::List(vec![Value::List(vec![]), Value::Absent])
)]
fn test_empty_input_on_empty_accepting_grammar(#[case] parser: Parser, #[case] expected: Value) {
    assert_eq!(parse(&parser, "").unwrap(), expected);
}

#[rstest]
#[case::literal(literal("a"))]
#[case::sequence(sequence([literal("a"), repeat(literal("a"))]))]
#[case::choice(choice([literal("a"), literal("b")]))]
#[case::lookahead(and_lookahead(literal("a")))]
fn test_empty_input_on_non_empty_grammar(#[case] parser: Parser) {
    assert!(matches!(parse(&parser, ""), Err(Error::Parse(_))));
    assert_eq!(parse_opt(&parser, "").unwrap(), None);
}

#[test]
fn test_choice_is_order_sensitive() {
    let parser = choice([literal("a"), literal("ab")]);

    let (value, rest) = parser.try_match(Input::new("ab")).unwrap();
    assert_eq!(value, Value::from("a"));
    assert_eq!(rest.rest(), "b");

    let error = parse(&parser, "ab").unwrap_err();
    let failure = error.as_failure().unwrap();
    assert_eq!(failure.expected(), "end of input");
    assert_eq!(failure.offset(), 1);
}

#[test]
fn test_operator_choice_matches_function_choice() {
    let by_operator = literal("x") | literal("y") | literal("z");
    let by_function = choice([literal("x"), literal("y"), literal("z")]);
    for text in ["x", "y", "z", "w"] {
        assert_eq!(
            by_operator.parse_opt(text).unwrap(),
            by_function.parse_opt(text).unwrap()
        );
    }
}

#[test]
fn test_repetition_is_total() {
    let parser = repeat(literal("a"));
    assert_eq!(parse(&parser, "").unwrap(), Value::List(vec![]));

    let (value, rest) = parser.try_match(Input::new("aaab")).unwrap();
    assert_eq!(value.as_list().map(<[Value]>::len), Some(3));
    assert_eq!(rest.rest(), "b");
}

#[test]
fn test_actions_run_in_attachment_order() {
    let parser = literal("x").map(suffix("1")).map(suffix("2"));
    assert_eq!(parse(&parser, "x").unwrap(), Value::from("x12"));

    let parser = attach_action(attach_action(literal("x"), suffix("1")), suffix("2"));
    assert_eq!(parse(&parser, "x").unwrap(), Value::from("x12"));
}

#[test]
fn test_action_layers_compose() {
    // Raw syntax, then coercion, then wrapping, all on one rule
    let number = pattern("[0-9]+")
        .unwrap()
        .map(|v| Value::List(vec![v]))
        .map(|v| match v.into_item(0).as_ref().and_then(Value::as_text) {
            Some(text) => text.parse().map(Value::Int).unwrap_or(Value::Absent),
            None => Value::Absent,
        })
        .map(|v| Value::node("Number", vec![v]));

    assert_eq!(
        parse(&number, "42").unwrap(),
        Value::node("Number", vec![Value::Int(42)])
    );
}

#[test]
fn test_lookahead_is_zero_width() {
    let parser = sequence([and_lookahead(literal("a")), literal("a")]);
    let (_, rest) = parser.try_match(Input::new("a")).unwrap();
    assert_eq!(rest.offset(), 1);
    assert!(parse(&parser, "a").is_ok());

    let parser = sequence([not_lookahead(literal("b")), literal("a")]);
    let (_, rest) = parser.try_match(Input::new("a")).unwrap();
    assert_eq!(rest.offset(), 1);
}

#[test]
fn test_trailing_input_is_rejected() {
    let digits = pattern("[0-9]+").unwrap();
    let sum = sequence([digits.clone(), literal("+"), digits]);
    assert!(parse(&sum, "1+2").is_ok());

    let error = parse(&sum, "1+2 ").unwrap_err();
    let failure = error.as_failure().unwrap();
    assert_eq!(failure.offset(), 3);
    assert_eq!(
        failure.to_string(),
        "expected end of input at line 1, column 4"
    );
}

#[test]
fn test_mutually_recursive_rules() {
    // list := "[" items? "]"; items := element ("," element)*; element := "x" | list
    let list = reference();
    let items = reference();
    let element = literal("x") | list.parser();

    bind(
        &items,
        sequence([element.clone(), repeat(sequence([literal(","), element]))]),
    )
    .unwrap();
    bind(
        &list,
        sequence([literal("["), optional(items.parser()), literal("]")]),
    )
    .unwrap();

    let parser = list.parser();
    for text in ["[]", "[x]", "[x,[x,[]],x]"] {
        assert!(parse(&parser, text).is_ok(), "{} should parse", text);
    }
    for text in ["[", "[x,]", "[x][x]"] {
        assert!(parse(&parser, text).is_err(), "{} should not parse", text);
    }
}

#[test]
fn test_shared_grammar_across_threads() {
    let word = pattern("[a-z]+").unwrap();
    let parser = sequence([word.clone(), repeat(sequence([literal(" "), word]))]);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = &parser;
                scope.spawn(move || {
                    let text = vec!["abc"; i + 1].join(" ");
                    parse(parser, &text).map(|_| i)
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap().unwrap(), i);
        }
    });
}

proptest! {
    #[test]
    fn test_repetition_consumes_exactly_the_run(run in 0usize..40, tail in "[b-z]{0,5}") {
        let text = format!("{}{}", "a".repeat(run), tail);
        let (value, rest) = repeat(literal("a")).try_match(Input::new(&text)).unwrap();

        prop_assert_eq!(value.as_list().map(<[Value]>::len), Some(run));
        prop_assert_eq!(rest.rest(), tail.as_str());
    }

    #[test]
    fn test_positions_never_move_backwards(text in "[ab]{0,12}") {
        let parser = choice([
            sequence([literal("a"), literal("b")]),
            optional(literal("b")),
        ]);
        let input = Input::new(&text);
        if let Ok((_, rest)) = parser.try_match(input) {
            prop_assert!(rest.offset() >= input.offset());
        }
    }
}
