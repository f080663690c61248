//! # peg
//!
//! Parsing expression grammar combinators.
//!
//! A grammar is a graph of [`Parser`] values built from terminals
//! ([`literal`], [`pattern`], [`one_of`], [`exact_word`]) and combinators
//! ([`sequence`], [`choice`] or `|`, [`repeat`], [`optional`],
//! [`and_lookahead`], [`not_lookahead`]). Any rule can carry actions that
//! rewrite its [`Value`], and rules that refer to themselves go through a
//! [`Reference`] that is bound once the grammar is complete.
//!
//! ```text
//! let expr = Reference::named("expr");
//! let number = pattern("[0-9]+")?.map(text::to_int);
//! let group = helpers::bracketed(literal("("), expr.parser(), literal(")"));
//! let value = number | group;
//! expr.bind(helpers::binop(value, one_of("+-")?))?;
//!
//! let tree = expr.parser().parse("1+(2-3)")?;
//! ```
//!
//! Choices commit to the first alternative that matches and there is no
//! memoization, so grammars should put longer alternatives first and avoid
//! left recursion. [`Parser::parse`] requires the whole input to match;
//! [`Parser::parse_opt`] reports a mismatch as `None` instead of an error.

pub mod combinators;
pub mod error;
pub mod grammars;
pub mod helpers;
pub mod input;
pub mod parser;
pub mod reference;
pub mod terminals;
pub mod text;
pub mod value;

pub use combinators::{
    and_lookahead, attach_action, choice, not_lookahead, optional, repeat, sequence,
};
pub use error::{Error, GrammarError, ParseFailure};
pub use input::{Input, Location};
pub use parser::{parse, parse_opt, Kind, Match, Parser};
pub use reference::{bind, reference, Reference};
pub use terminals::{exact_word, literal, one_of, pattern, Pattern};
pub use value::{Tree, Value};
