//! Bundled grammars
//!
//! Two small grammars built only from the public combinators:
//!
//! - [`calc`]: integer arithmetic with `+ - * /` and parentheses
//! - [`sql`]: the column list, `from` and `join` parts of a SQL `select`
//!
//! Each grammar is built once on first use and shared from then on.

pub mod calc;
pub mod sql;
