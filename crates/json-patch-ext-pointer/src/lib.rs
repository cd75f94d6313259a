//! JSON Pointer (RFC 6901) paths.
//!
//! A [`Path`] is an immutable sequence of [`PathToken`]s identifying a
//! location inside a `serde_json::Value`. This crate parses and formats the
//! slash-delimited textual form and resolves paths against documents
//! without ever mutating them.
//!
//! # Example
//!
//! ```
//! use json_patch_ext_pointer::{get, Path};
//!
//! let path: Path = "/foo/bar".parse().unwrap();
//! assert_eq!(path.to_string(), "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{Path, PathToken, Reference, APPEND_TOKEN};

pub mod util;
pub use util::{
    escape_component, format_json_pointer, is_valid_index, parse_json_pointer,
    unescape_component,
};

pub mod validate;
pub use validate::validate_json_pointer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("INVALID_ESCAPE")]
    InvalidEscape,
}

/// Look up the child of `container` named by `token`.
///
/// Returns `None` for a missing member, an out-of-range or non-numeric array
/// step, the append marker, and any scalar container.
pub fn child<'a>(container: &'a Value, token: &PathToken) -> Option<&'a Value> {
    match container {
        Value::Object(map) => map.get(token.as_str().as_ref()),
        Value::Array(arr) => arr.get(token.as_index()?),
        _ => None,
    }
}

/// Mutable counterpart of [`child`].
pub fn child_mut<'a>(container: &'a mut Value, token: &PathToken) -> Option<&'a mut Value> {
    match container {
        Value::Object(map) => map.get_mut(token.as_str().as_ref()),
        Value::Array(arr) => arr.get_mut(token.as_index()?),
        _ => None,
    }
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if the path doesn't resolve.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::{get, Path};
/// use serde_json::json;
///
/// let doc = json!({"foo": [10, 20]});
/// assert_eq!(get(&doc, &Path::from_tokens(["foo", "1"])), Some(&json!(20)));
/// assert_eq!(get(&doc, &Path::from_tokens(["foo", "-"])), None);
/// assert_eq!(get(&doc, &Path::from_tokens(["missing"])), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &Path) -> Option<&'a Value> {
    path.tokens()
        .iter()
        .try_fold(val, |current, token| child(current, token))
}

/// Get a mutable reference to a value in a JSON document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    let mut current = val;
    for token in path.tokens() {
        current = child_mut(current, token)?;
    }
    Some(current)
}

/// Resolve a path into a [`Reference`].
///
/// Every step but the last must resolve; the last one may be absent, in
/// which case the reference carries the container but no value.
///
/// # Errors
///
/// Returns [`JsonPointerError::NotFound`] if the parent of the target does
/// not resolve.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::{find, Path};
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}});
/// let r = find(&doc, &Path::from_tokens(["foo", "baz"])).unwrap();
/// assert_eq!(r.val, None);
/// assert!(r.is_object_reference());
///
/// assert!(find(&doc, &Path::from_tokens(["nope", "baz"])).is_err());
/// ```
pub fn find<'a>(val: &'a Value, path: &Path) -> Result<Reference<'a>, JsonPointerError> {
    let Some((parent_path, key)) = path.split_last() else {
        return Ok(Reference {
            val: Some(val),
            obj: None,
            key: None,
        });
    };
    let obj = get(val, &parent_path).ok_or(JsonPointerError::NotFound)?;
    Ok(Reference {
        val: child(obj, key),
        obj: Some(obj),
        key: Some(key.clone()),
    })
}
