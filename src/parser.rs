//! Parser nodes and evaluation
//!
//! A [`Parser`] is a cheap-to-clone handle on one node of a grammar graph.
//! The node kinds form a closed set ([`Kind`]); every kind shares the single
//! capability [`Parser::try_match`], which either consumes a prefix of the
//! input and returns a value with the new position, or fails.
//!
//! Backtracking happens only where a construct defines it: a [`Kind::Choice`]
//! retries from its starting position, and [`Kind::Repeat`],
//! [`Kind::Optional`] and [`Kind::Not`] treat a child failure as an answer.
//! A [`Kind::Sequence`] never revisits a child that already succeeded.
//!
//! ## Actions
//!
//! A parser may carry an action that rewrites its raw value before it is
//! returned. Attaching a second action composes it over the first, so
//! `p.map(f).map(g)` yields `g(f(raw))`.

use crate::error::{Error, GrammarError, ParseFailure};
use crate::input::Input;
use crate::reference::Reference;
use crate::terminals::Pattern;
use crate::value::Value;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// Outcome of one matching attempt
pub type Match<'a> = Result<(Value, Input<'a>), Error>;

/// A value transform attached to a parser.
#[derive(Clone)]
pub(crate) struct Action(Arc<dyn Fn(Value) -> Value + Send + Sync>);

impl Action {
    fn new(f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Action(Arc::new(f))
    }

    /// `outer` applied to the result of `self`
    fn then(self, outer: Action) -> Action {
        let inner = self.0;
        let outer = outer.0;
        Action(Arc::new(move |value| outer(inner(value))))
    }

    fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}

/// The node kinds a grammar is built from.
#[derive(Debug)]
pub enum Kind {
    Literal(String),
    Pattern(Pattern),
    Sequence(Vec<Parser>),
    Choice(Vec<Parser>),
    Repeat(Parser),
    Optional(Parser),
    And(Parser),
    Not(Parser),
    Reference(Reference),
}

/// A grammar rule.
#[derive(Clone)]
pub struct Parser {
    kind: Arc<Kind>,
    action: Option<Action>,
    label: Option<Arc<str>>,
}

impl Parser {
    pub(crate) fn from_kind(kind: Kind) -> Self {
        Self {
            kind: Arc::new(kind),
            action: None,
            label: None,
        }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The diagnostic name given with [`Parser::named`], if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether an action will rewrite this parser's value
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Attach an action, composing it over any action already attached.
    ///
    /// Lookahead parsers always yield [`Value::Absent`]; an action attached to
    /// one is discarded and the parser is returned unchanged.
    pub fn map(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        if matches!(*self.kind, Kind::And(_) | Kind::Not(_)) {
            log::debug!("ignoring action attached to lookahead {}", self);
            return self;
        }
        let action = Action::new(f);
        self.action = Some(match self.action.take() {
            Some(inner) => inner.then(action),
            None => action,
        });
        self
    }

    /// Name this rule in failure reports
    pub fn named(mut self, label: impl Into<String>) -> Self {
        let label: String = label.into();
        self.label = Some(Arc::from(label));
        self
    }

    fn apply(&self, value: Value) -> Value {
        match &self.action {
            Some(action) => action.apply(value),
            None => value,
        }
    }

    fn fail(&self, at: Input<'_>) -> ParseFailure {
        ParseFailure::new(self.to_string(), at)
    }

    /// Try to consume a prefix of `input`.
    ///
    /// Unlike [`Parser::parse`], leftover input is not an error here.
    pub fn try_match<'a>(&self, input: Input<'a>) -> Match<'a> {
        match &*self.kind {
            Kind::Literal(expected) => {
                if input.rest().starts_with(expected.as_str()) {
                    let value = self.apply(Value::Text(expected.clone()));
                    Ok((value, input.advance(expected.len())))
                } else {
                    Err(self.fail(input).into())
                }
            }
            Kind::Pattern(pattern) => match pattern.match_prefix(input.rest()) {
                Some(matched) => {
                    let value = self.apply(Value::Text(matched.to_string()));
                    Ok((value, input.advance(matched.len())))
                }
                None => Err(self.fail(input).into()),
            },
            Kind::Sequence(parsers) => {
                let mut values = Vec::with_capacity(parsers.len());
                let mut position = input;
                for parser in parsers {
                    let (value, next) = parser.try_match(position)?;
                    values.push(value);
                    position = next;
                }
                Ok((self.apply(Value::List(values)), position))
            }
            Kind::Choice(parsers) => {
                let mut last = None;
                for parser in parsers {
                    match parser.try_match(input) {
                        Ok((value, next)) => return Ok((self.apply(value), next)),
                        Err(Error::Parse(failure)) => last = Some(failure),
                        Err(error) => return Err(error),
                    }
                }
                let failure = self.fail(input);
                Err(match last {
                    Some(cause) => failure.caused_by(cause),
                    None => failure,
                }
                .into())
            }
            Kind::Repeat(parser) => {
                let mut values = Vec::new();
                let mut position = input;
                loop {
                    match parser.try_match(position) {
                        // A zero-width match would repeat forever
                        Ok((_, next)) if next.offset() == position.offset() => break,
                        Ok((value, next)) => {
                            values.push(value);
                            position = next;
                        }
                        Err(Error::Parse(_)) => break,
                        Err(error) => return Err(error),
                    }
                }
                Ok((self.apply(Value::List(values)), position))
            }
            Kind::Optional(parser) => match parser.try_match(input) {
                Ok((value, next)) => Ok((self.apply(value), next)),
                Err(Error::Parse(_)) => Ok((Value::Absent, input)),
                Err(error) => Err(error),
            },
            Kind::And(parser) => {
                parser.try_match(input)?;
                Ok((Value::Absent, input))
            }
            Kind::Not(parser) => match parser.try_match(input) {
                Ok(_) => Err(self.fail(input).into()),
                Err(Error::Parse(_)) => Ok((Value::Absent, input)),
                Err(error) => Err(error),
            },
            Kind::Reference(reference) => {
                let target = reference.target().ok_or_else(|| {
                    log::error!("reference `{}` invoked before being bound", reference.name());
                    GrammarError::Unbound {
                        name: reference.name().to_string(),
                    }
                })?;
                let (value, next) = target.try_match(input)?;
                Ok((self.apply(value), next))
            }
        }
    }

    /// Parse all of `text`.
    ///
    /// Input left over after the parser succeeds is a failure: a grammar has
    /// to account for the whole document.
    pub fn parse(&self, text: &str) -> Result<Value, Error> {
        log::trace!("parsing {} bytes with {}", text.len(), self);
        let result = self.try_match(Input::new(text)).and_then(|(value, rest)| {
            if rest.is_empty() {
                Ok(value)
            } else {
                log::debug!("trailing input at offset {}", rest.offset());
                Err(ParseFailure::new("end of input", rest).into())
            }
        });
        result.map_err(|error| match error {
            Error::Parse(failure) => {
                let failure = failure.locate(text);
                log::debug!("parse failed: {}", failure);
                Error::Parse(failure)
            }
            other => other,
        })
    }

    /// Parse all of `text`, returning `Ok(None)` when it does not match.
    ///
    /// Grammar errors are still reported.
    pub fn parse_opt(&self, text: &str) -> Result<Option<Value>, GrammarError> {
        match self.parse(text) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Parse(_)) => Ok(None),
            Err(Error::Grammar(error)) => Err(error),
        }
    }
}

/// Parse all of `text` with `parser`
pub fn parse(parser: &Parser, text: &str) -> Result<Value, Error> {
    parser.parse(text)
}

/// Parse all of `text` with `parser`, tolerating a mismatch
pub fn parse_opt(parser: &Parser, text: &str) -> Result<Option<Value>, GrammarError> {
    parser.parse_opt(text)
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            return write!(f, "{}", label);
        }
        match &*self.kind {
            Kind::Literal(text) => write!(f, "{:?}", text),
            Kind::Pattern(pattern) => write!(f, "{}", pattern),
            Kind::Sequence(parsers) => write!(f, "sequence of {}", parsers.len()),
            Kind::Choice(parsers) => write!(f, "one of {} alternatives", parsers.len()),
            Kind::Repeat(parser) => write!(f, "zero or more {}", parser),
            Kind::Optional(parser) => write!(f, "optional {}", parser),
            Kind::And(parser) => write!(f, "&{}", parser),
            Kind::Not(parser) => write!(f, "!{}", parser),
            Kind::Reference(reference) => write!(f, "{}", reference.name()),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("rule", &self.to_string())
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// `a | b` tries `a`, then `b`.
impl BitOr for Parser {
    type Output = Parser;

    fn bitor(self, rhs: Parser) -> Parser {
        if self.action.is_none() && self.label.is_none() {
            if let Kind::Choice(alternatives) = &*self.kind {
                let mut alternatives = alternatives.clone();
                alternatives.push(rhs);
                return Parser::from_kind(Kind::Choice(alternatives));
            }
        }
        Parser::from_kind(Kind::Choice(vec![self, rhs]))
    }
}

impl From<&Reference> for Parser {
    fn from(reference: &Reference) -> Self {
        reference.parser()
    }
}
