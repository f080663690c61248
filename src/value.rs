//! Semantic values
//!
//! Every parser yields a [`Value`] and every action maps a `Value` to a
//! `Value`. Terminals produce [`Value::Text`], sequences and repetitions
//! produce [`Value::List`], and optionals and lookaheads produce
//! [`Value::Absent`] when they have nothing to report. Grammars build richer
//! results with [`Value::Int`] and named [`Tree`] nodes from their actions.

use serde::Serialize;
use std::fmt;

/// A named interior node built by a grammar action, e.g. `Select(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    pub kind: String,
    pub children: Vec<Value>,
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Nothing matched here: a failed optional or a lookahead
    Absent,
    Text(String),
    Int(i64),
    List(Vec<Value>),
    Node(Tree),
}

impl Value {
    /// Build a [`Value::Node`]
    pub fn node(kind: impl Into<String>, children: Vec<Value>) -> Self {
        Value::Node(Tree {
            kind: kind.into(),
            children,
        })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Take the items out of a list; any other value becomes `Err(self)`
    pub fn into_list(self) -> Result<Vec<Value>, Value> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other),
        }
    }

    /// Take the `index`th item out of a list, if there is one
    pub fn into_item(self, index: usize) -> Option<Value> {
        self.into_list().ok()?.into_iter().nth(index)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Absent)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "none"),
            Value::Text(text) => write!(f, "{:?}", text),
            Value::Int(n) => write!(f, "{}", n),
            Value::List(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Node(tree) => write!(f, "{}", tree),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        write_joined(f, &self.children)?;
        write!(f, ")")
    }
}
