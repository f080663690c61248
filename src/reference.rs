//! Late-bound rules
//!
//! A rule that refers to itself, or to a rule defined further down, starts
//! life as an unbound [`Reference`]. Use [`Reference::parser`] wherever the
//! rule is needed, then bind the finished rule once the grammar is complete:
//!
//! ```text
//! let expr = reference();
//! let group = sequence([literal("("), expr.parser(), literal(")")]);
//! let value = literal("x") | group;
//! expr.bind(value)?;
//! ```
//!
//! Binding must finish before a grammar is shared between threads. Building
//! grammars inside a `once_cell::sync::Lazy` takes care of that.

use crate::error::GrammarError;
use crate::parser::{Kind, Parser};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// A write-once slot holding the target rule.
#[derive(Clone)]
pub struct Reference {
    slot: Arc<OnceCell<Parser>>,
    name: Arc<str>,
}

impl Reference {
    /// An unbound reference called `name` in failure reports
    pub fn named(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            slot: Arc::new(OnceCell::new()),
            name: Arc::from(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The bound rule, if any
    pub fn target(&self) -> Option<&Parser> {
        self.slot.get()
    }

    /// A parser that delegates to whatever this reference is bound to
    pub fn parser(&self) -> Parser {
        Parser::from_kind(Kind::Reference(self.clone()))
    }

    /// Bind to `target`. A reference can only be bound once.
    pub fn bind(&self, target: Parser) -> Result<(), GrammarError> {
        self.slot
            .set(target)
            .map_err(|_| GrammarError::AlreadyBound {
                name: self.name.to_string(),
            })
    }
}

impl Default for Reference {
    fn default() -> Self {
        Reference::named("reference")
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The target may lead back here, so only report whether it is set
        f.debug_struct("Reference")
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// An unbound reference
pub fn reference() -> Reference {
    Reference::default()
}

/// Bind `reference` to `target`
pub fn bind(reference: &Reference, target: Parser) -> Result<(), GrammarError> {
    reference.bind(target)
}
