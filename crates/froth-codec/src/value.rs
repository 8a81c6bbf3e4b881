use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The mapping a stash holds: key to typed value.
///
/// A `BTreeMap` keeps encodings deterministic, so the same logical mapping
/// always produces the same bytes.
pub type ValueMap = BTreeMap<String, Value>;

/// The kind of a stored value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// A single text value.
    Text,
    /// An ordered list of text values.
    TextList,
    /// A signed integer.
    Integer,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::TextList => write!(f, "text-list"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

/// A single stored value, tagged with its kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    TextList(Vec<String>),
    Integer(i64),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::TextList(_) => ValueKind::TextList,
            Self::Integer(_) => ValueKind::Integer,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::TextList(items) => write!(f, "[{}]", items.join(", ")),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

impl From<&[&str]> for Value {
    fn from(value: &[&str]) -> Self {
        Self::TextList(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}
