//! Type definitions for JSON Pointer paths.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde_json::Value;

use crate::util::{format_json_pointer, is_valid_index, parse_json_pointer};
use crate::validate::validate_json_pointer;
use crate::JsonPointerError;

/// Reserved token addressing the slot one past the last array element.
pub const APPEND_TOKEN: &str = "-";

/// A single step in a [`Path`].
///
/// Tokens compare by their textual form, so `Index(3)` equals `Key("3")` and
/// `Append` equals `Key("-")`. Whether a token names a member or a position
/// is only decided when it is resolved against a concrete container.
#[derive(Debug, Clone)]
pub enum PathToken {
    /// An object member name.
    Key(String),
    /// An array position.
    Index(usize),
    /// One past the last element of an array (`-`).
    Append,
}

impl PathToken {
    /// Builds a token from its unescaped text.
    ///
    /// `-` becomes [`PathToken::Append`] and canonical non-negative integers
    /// become [`PathToken::Index`]; everything else is a [`PathToken::Key`].
    pub fn new(step: impl Into<String>) -> Self {
        let step = step.into();
        if step == APPEND_TOKEN {
            return PathToken::Append;
        }
        if is_valid_index(&step) {
            if let Ok(idx) = step.parse() {
                return PathToken::Index(idx);
            }
        }
        PathToken::Key(step)
    }

    /// The unescaped text of this token.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            PathToken::Key(key) => Cow::Borrowed(key),
            PathToken::Index(idx) => Cow::Owned(idx.to_string()),
            PathToken::Append => Cow::Borrowed(APPEND_TOKEN),
        }
    }

    /// The array position this token denotes, if any.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathToken::Index(idx) => Some(*idx),
            PathToken::Key(key) if is_valid_index(key) => key.parse().ok(),
            _ => None,
        }
    }

    /// Whether this is the append marker.
    pub fn is_append(&self) -> bool {
        match self {
            PathToken::Append => true,
            PathToken::Key(key) => key == APPEND_TOKEN,
            PathToken::Index(_) => false,
        }
    }
}

impl PartialEq for PathToken {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for PathToken {}

impl Hash for PathToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl From<&str> for PathToken {
    fn from(step: &str) -> Self {
        PathToken::new(step)
    }
}

impl From<String> for PathToken {
    fn from(step: String) -> Self {
        PathToken::new(step)
    }
}

impl From<&String> for PathToken {
    fn from(step: &String) -> Self {
        PathToken::new(step.as_str())
    }
}

impl From<usize> for PathToken {
    fn from(idx: usize) -> Self {
        PathToken::Index(idx)
    }
}

/// An immutable location inside a JSON document.
///
/// Every "modifying" method returns a new path; the receiver is never
/// changed. Two paths are equal iff their token sequences are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    tokens: Vec<PathToken>,
}

impl Path {
    /// The empty path, addressing the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from a sequence of tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PathToken>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// A new path with one more token at the end.
    pub fn append(&self, token: impl Into<PathToken>) -> Path {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend_from_slice(&self.tokens);
        tokens.push(token.into());
        Path { tokens }
    }

    /// The path without its last token.
    ///
    /// # Errors
    ///
    /// Returns [`JsonPointerError::NoParent`] for the root path.
    pub fn parent(&self) -> Result<Path, JsonPointerError> {
        match self.tokens.split_last() {
            Some((_, rest)) => Ok(Path {
                tokens: rest.to_vec(),
            }),
            None => Err(JsonPointerError::NoParent),
        }
    }

    /// Splits into the parent path and the last token, or `None` at the root.
    pub fn split_last(&self) -> Option<(Path, &PathToken)> {
        self.tokens.split_last().map(|(last, rest)| {
            (
                Path {
                    tokens: rest.to_vec(),
                },
                last,
            )
        })
    }

    pub fn last_token(&self) -> Option<&PathToken> {
        self.tokens.last()
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// True if `prefix` equals this path or is one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.tokens.len() >= prefix.tokens.len()
            && self.tokens[..prefix.tokens.len()] == prefix.tokens[..]
    }

    /// True if this path is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        other.tokens.len() > self.tokens.len() && other.starts_with(self)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_json_pointer(self))
    }
}

impl FromStr for Path {
    type Err = JsonPointerError;

    fn from_str(pointer: &str) -> Result<Self, Self::Err> {
        validate_json_pointer(pointer)?;
        Ok(parse_json_pointer(pointer))
    }
}

impl<T: Into<PathToken>> FromIterator<T> for Path {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Path::from_tokens(iter)
    }
}

/// A resolved location: the value found (if any), its container and the key
/// used to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference<'a> {
    /// The target value. `None` if the container has no such member.
    pub val: Option<&'a Value>,
    /// The value holding the target. `None` for the root.
    pub obj: Option<&'a Value>,
    /// The last token of the resolved path. `None` for the root.
    pub key: Option<PathToken>,
}

impl Reference<'_> {
    pub fn is_array_reference(&self) -> bool {
        matches!(self.obj, Some(Value::Array(_)))
    }

    pub fn is_object_reference(&self) -> bool {
        matches!(self.obj, Some(Value::Object(_)))
    }
}
