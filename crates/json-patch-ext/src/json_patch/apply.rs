//! JSON Patch apply logic.
//!
//! Operations run strictly in order against a private working copy of the
//! document. The first failing operation aborts the whole patch and the
//! working copy is dropped, so callers never observe a half-applied patch.

use json_patch_ext_pointer::{child, find, get, get_mut, Path, PathToken};
use serde_json::Value;

use super::types::{
    kind_name, ApplyPatchOptions, Op, OpResult, PatchApplicationError, PatchError, PatchResult,
};
use crate::json_equal::deep_equal;

// ── Path navigation ───────────────────────────────────────────────────────

/// Mutable navigation to the container holding `path`'s last token.
fn parent_mut<'a>(
    doc: &'a mut Value,
    path: &Path,
) -> Result<(&'a mut Value, Path, PathToken), PatchError> {
    let (parent_path, key) = path.split_last().ok_or_else(|| PatchError::InvalidPath {
        path: path.clone(),
        reason: "the document root has no container",
    })?;
    let key = key.clone();
    match get_mut(doc, &parent_path) {
        Some(parent) => Ok((parent, parent_path, key)),
        None => Err(PatchError::PathNotFound(parent_path)),
    }
}

/// Array position for an insertion; `-` appends.
fn insert_index(arr: &[Value], path: &Path, key: &PathToken) -> Result<usize, PatchError> {
    if key.is_append() {
        return Ok(arr.len());
    }
    let idx = key.as_index().ok_or_else(|| PatchError::InvalidPath {
        path: path.clone(),
        reason: "array index must be a non-negative integer or \"-\"",
    })?;
    if idx > arr.len() {
        return Err(PatchError::InvalidPath {
            path: path.clone(),
            reason: "array index out of bounds",
        });
    }
    Ok(idx)
}

/// Detach the value at `path` from its container, if there is one.
fn take_child(container: &mut Value, key: &PathToken) -> Option<Value> {
    match container {
        Value::Object(map) => map.shift_remove(key.as_str().as_ref()),
        Value::Array(arr) => {
            let idx = key.as_index().filter(|&idx| idx < arr.len())?;
            Some(arr.remove(idx))
        }
        _ => None,
    }
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &Path, value: Value) -> Result<Option<Value>, PatchError> {
    if path.is_root() {
        return Ok(Some(std::mem::replace(doc, value)));
    }
    let (parent, parent_path, key) = parent_mut(doc, path)?;
    match parent {
        Value::Object(map) => Ok(map.insert(key.as_str().into_owned(), value)),
        Value::Array(arr) => {
            let idx = insert_index(arr, path, &key)?;
            arr.insert(idx, value);
            Ok(None)
        }
        other => Err(PatchError::TypeMismatch {
            path: parent_path,
            expected: "object or array",
            found: kind_name(other),
        }),
    }
}

fn apply_remove(doc: &mut Value, path: &Path) -> Result<Value, PatchError> {
    if path.is_root() {
        return Err(PatchError::InvalidPath {
            path: path.clone(),
            reason: "the document root cannot be removed",
        });
    }
    let (parent, _, key) = parent_mut(doc, path).map_err(|_| PatchError::PathNotFound(path.clone()))?;
    take_child(parent, &key).ok_or_else(|| PatchError::PathNotFound(path.clone()))
}

fn apply_replace(doc: &mut Value, path: &Path, value: Value) -> Result<Value, PatchError> {
    let target = get_mut(doc, path).ok_or_else(|| PatchError::PathNotFound(path.clone()))?;
    Ok(std::mem::replace(target, value))
}

fn apply_copy(doc: &mut Value, path: &Path, from: &Path) -> Result<Option<Value>, PatchError> {
    let src = get(doc, from)
        .ok_or_else(|| PatchError::PathNotFound(from.clone()))?
        .clone();
    apply_add(doc, path, src)
}

fn apply_move(doc: &mut Value, path: &Path, from: &Path) -> Result<Option<Value>, PatchError> {
    if from.is_ancestor_of(path) {
        return Err(PatchError::InvalidPath {
            path: path.clone(),
            reason: "a value cannot be moved into one of its own children",
        });
    }
    if from == path {
        return match get(doc, from) {
            Some(_) => Ok(None),
            None => Err(PatchError::PathNotFound(from.clone())),
        };
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &Path, value: &Value) -> Result<(), PatchError> {
    match get(doc, path) {
        Some(actual) if deep_equal(actual, value) => Ok(()),
        actual => Err(PatchError::TestFailed {
            path: path.clone(),
            expected: value.clone(),
            actual: actual.cloned(),
        }),
    }
}

/// Why `parent` does not name a container: the first step that descends
/// into a scalar, or the first step that is missing.
fn unresolved_parent(doc: &Value, parent: &Path) -> PatchError {
    let tokens = parent.tokens();
    let mut current = doc;
    for (depth, token) in tokens.iter().enumerate() {
        if !current.is_object() && !current.is_array() {
            return not_a_container(&tokens[..depth], current);
        }
        match child(current, token) {
            Some(next) => current = next,
            None => {
                return PatchError::PathNotFound(Path::from_tokens(tokens[..=depth].iter().cloned()))
            }
        }
    }
    not_a_container(tokens, current)
}

fn not_a_container(tokens: &[PathToken], found: &Value) -> PatchError {
    PatchError::TypeMismatch {
        path: Path::from_tokens(tokens.iter().cloned()),
        expected: "object or array",
        found: kind_name(found),
    }
}

/// Shared body of `omit` and `omitOptional`.
///
/// The target being absent is always fine. A parent that is missing or is
/// not a container is fine only when `parent_optional` is set.
fn apply_omit(
    doc: &mut Value,
    path: &Path,
    parent_optional: bool,
) -> Result<Option<Value>, PatchError> {
    if path.is_root() {
        return Err(PatchError::InvalidPath {
            path: path.clone(),
            reason: "the document root cannot be omitted",
        });
    }
    match find(doc, path) {
        Ok(reference) if reference.is_object_reference() || reference.is_array_reference() => {
            if reference.val.is_none() {
                return Ok(None);
            }
        }
        _ if parent_optional => return Ok(None),
        _ => {
            let parent = path.parent().unwrap_or_default();
            return Err(unresolved_parent(doc, &parent));
        }
    }
    apply_remove(doc, path).map(Some)
}

// ── Main apply function ───────────────────────────────────────────────────

/// Apply a single operation to the document in place.
///
/// Returns the value displaced by the operation, if any. This is the
/// building block of [`apply_patch`]; on its own it is not atomic, since a
/// failing `move` may already have detached its source.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Option<Value>, PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path).map(Some),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()).map(Some),
        Op::Move { from, path } => apply_move(doc, path, from),
        Op::Copy { from, path } => apply_copy(doc, path, from),
        Op::Test { path, value } => apply_test(doc, path, value).map(|()| None),
        Op::Omit { path } => apply_omit(doc, path, false),
        Op::OmitOptional { path } => apply_omit(doc, path, true),
    }
}

fn run_ops(
    working: &mut Value,
    ops: &[Op],
    mut on_applied: impl FnMut(&Value, Option<Value>),
) -> Result<(), PatchApplicationError> {
    for (index, op) in ops.iter().enumerate() {
        match apply_op(working, op) {
            Ok(old) => {
                tracing::trace!(index, op = op.op_name(), path = %op.path(), "applied operation");
                on_applied(working, old);
            }
            Err(reason) => {
                tracing::debug!(index, op = op.op_name(), error = %reason, "patch aborted");
                return Err(PatchApplicationError {
                    index,
                    op: op.op_name(),
                    reason,
                });
            }
        }
    }
    Ok(())
}

/// Apply a sequence of operations, returning the patched document.
///
/// `doc` is left untouched whether or not the patch succeeds.
///
/// # Errors
///
/// Returns the index of the first failing operation and why it failed.
///
/// # Example
///
/// ```
/// use json_patch_ext::json_patch::{apply, Op};
/// use serde_json::json;
///
/// let doc = json!({"a": 1});
/// let ops = [Op::Omit { path: "/b".parse().unwrap() }];
/// assert_eq!(apply(&doc, &ops).unwrap(), doc);
/// ```
pub fn apply(doc: &Value, ops: &[Op]) -> Result<Value, PatchApplicationError> {
    let mut working = doc.clone();
    run_ops(&mut working, ops, |_, _| {})?;
    Ok(working)
}

/// Apply a sequence of operations to `doc`, replacing it only when every
/// operation succeeded.
///
/// # Errors
///
/// Same as [`apply`]; on error `doc` keeps its previous value.
pub fn apply_in_place(doc: &mut Value, ops: &[Op]) -> Result<(), PatchApplicationError> {
    let patched = apply(doc, ops)?;
    *doc = patched;
    Ok(())
}

/// Apply a sequence of operations, also reporting per-operation results.
///
/// # Errors
///
/// Same as [`apply`].
pub fn apply_patch(
    doc: &Value,
    ops: &[Op],
    options: &ApplyPatchOptions,
) -> Result<PatchResult, PatchApplicationError> {
    let mut working = doc.clone();
    let mut res = Vec::with_capacity(ops.len());
    run_ops(&mut working, ops, |current, old| {
        res.push(OpResult {
            doc: options.snapshots.then(|| current.clone()),
            old,
        });
    })?;
    Ok(PatchResult { doc: working, res })
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> Path {
        s.parse().expect("valid pointer")
    }

    fn run(doc: Value, op: Op) -> Result<Value, PatchError> {
        let mut doc = doc;
        apply_op(&mut doc, &op)?;
        Ok(doc)
    }

    #[test]
    fn add_to_object() {
        let doc = run(json!({"a": 1}), Op::Add { path: path("/b"), value: json!(2) }).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn add_overwrites_member() {
        let mut doc = json!({"a": 1});
        let old = apply_op(&mut doc, &Op::Add { path: path("/a"), value: json!(2) }).unwrap();
        assert_eq!(doc, json!({"a": 2}));
        assert_eq!(old, Some(json!(1)));
    }

    #[test]
    fn add_to_array() {
        let doc = run(json!([1, 2, 3]), Op::Add { path: path("/1"), value: json!(99) }).unwrap();
        assert_eq!(doc, json!([1, 99, 2, 3]));
    }

    #[test]
    fn add_append_array() {
        let doc = run(json!([1, 2]), Op::Add { path: path("/-"), value: json!(3) }).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));
        let doc = run(json!([1, 2]), Op::Add { path: path("/2"), value: json!(3) }).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));
    }

    #[test]
    fn add_array_index_out_of_bounds() {
        let err = run(json!([1]), Op::Add { path: path("/5"), value: json!(3) }).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath { .. }));
        let err = run(json!([1]), Op::Add { path: path("/x"), value: json!(3) }).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath { .. }));
    }

    #[test]
    fn add_missing_parent() {
        let err = run(json!({}), Op::Add { path: path("/a/b"), value: json!(1) }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/a")));
    }

    #[test]
    fn add_into_scalar() {
        let err = run(json!({"a": 1}), Op::Add { path: path("/a/b"), value: json!(1) }).unwrap_err();
        assert_eq!(
            err,
            PatchError::TypeMismatch { path: path("/a"), expected: "object or array", found: "number" }
        );
    }

    #[test]
    fn add_root_replaces_document() {
        let doc = run(json!({"a": 1}), Op::Add { path: Path::root(), value: json!([1]) }).unwrap();
        assert_eq!(doc, json!([1]));
    }

    #[test]
    fn remove_from_object() {
        let mut doc = json!({"a": 1, "b": 2});
        let old = apply_op(&mut doc, &Op::Remove { path: path("/a") }).unwrap();
        assert_eq!(doc, json!({"b": 2}));
        assert_eq!(old, Some(json!(1)));
    }

    #[test]
    fn remove_shifts_array() {
        let doc = run(json!([1, 2, 3]), Op::Remove { path: path("/0") }).unwrap();
        assert_eq!(doc, json!([2, 3]));
    }

    #[test]
    fn remove_missing() {
        let err = run(json!({"a": 1}), Op::Remove { path: path("/b") }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/b")));
        let err = run(json!([1]), Op::Remove { path: path("/1") }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/1")));
        let err = run(json!({}), Op::Remove { path: path("/x/y") }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/x/y")));
    }

    #[test]
    fn remove_root_is_invalid() {
        let err = run(json!({}), Op::Remove { path: Path::root() }).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath { .. }));
    }

    #[test]
    fn replace_value() {
        let doc = run(json!({"a": 1}), Op::Replace { path: path("/a"), value: json!(99) }).unwrap();
        assert_eq!(doc, json!({"a": 99}));
    }

    #[test]
    fn replace_missing_does_not_add() {
        let err = run(json!({"a": 1}), Op::Replace { path: path("/b"), value: json!(2) }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/b")));
    }

    #[test]
    fn copy_op() {
        let doc = run(
            json!({"a": {"x": 1}, "b": {}}),
            Op::Copy { from: path("/a/x"), path: path("/b/x") },
        )
        .unwrap();
        assert_eq!(doc, json!({"a": {"x": 1}, "b": {"x": 1}}));
    }

    #[test]
    fn copy_missing_source() {
        let err = run(json!({}), Op::Copy { from: path("/a"), path: path("/b") }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/a")));
    }

    #[test]
    fn move_op() {
        let doc = run(json!({"a": 1, "b": 2}), Op::Move { from: path("/a"), path: path("/c") }).unwrap();
        assert_eq!(doc, json!({"b": 2, "c": 1}));
    }

    #[test]
    fn move_within_array() {
        let doc = run(json!([1, 2, 3]), Op::Move { from: path("/0"), path: path("/-") }).unwrap();
        assert_eq!(doc, json!([2, 3, 1]));
    }

    #[test]
    fn move_into_own_child() {
        let err = run(
            json!({"a": {"b": {}}}),
            Op::Move { from: path("/a"), path: path("/a/b/c") },
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath { .. }));
    }

    #[test]
    fn move_to_itself() {
        let doc = run(json!({"a": 1}), Op::Move { from: path("/a"), path: path("/a") }).unwrap();
        assert_eq!(doc, json!({"a": 1}));
        let err = run(json!({}), Op::Move { from: path("/a"), path: path("/a") }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/a")));
    }

    #[test]
    fn test_pass() {
        let doc = run(json!({"a": 42}), Op::Test { path: path("/a"), value: json!(42.0) }).unwrap();
        assert_eq!(doc, json!({"a": 42}));
    }

    #[test]
    fn test_fail() {
        let err = run(json!({"a": 42}), Op::Test { path: path("/a"), value: json!(99) }).unwrap_err();
        assert_eq!(
            err,
            PatchError::TestFailed { path: path("/a"), expected: json!(99), actual: Some(json!(42)) }
        );
        let err = run(json!({}), Op::Test { path: path("/a"), value: json!(null) }).unwrap_err();
        assert!(matches!(err, PatchError::TestFailed { actual: None, .. }));
    }

    #[test]
    fn omit_present_and_absent() {
        let doc = run(json!({"a": 1, "b": 2}), Op::Omit { path: path("/a") }).unwrap();
        assert_eq!(doc, json!({"b": 2}));
        let doc = run(doc, Op::Omit { path: path("/a") }).unwrap();
        assert_eq!(doc, json!({"b": 2}));
        let doc = run(json!([1, 2]), Op::Omit { path: path("/5") }).unwrap();
        assert_eq!(doc, json!([1, 2]));
    }

    #[test]
    fn omit_requires_parent() {
        let err = run(json!({}), Op::Omit { path: path("/a/b") }).unwrap_err();
        assert_eq!(err, PatchError::PathNotFound(path("/a")));
        let err = run(json!({"a": 1}), Op::Omit { path: path("/a/b") }).unwrap_err();
        assert_eq!(
            err,
            PatchError::TypeMismatch { path: path("/a"), expected: "object or array", found: "number" }
        );
    }

    #[test]
    fn omit_reports_same_cause_at_any_depth() {
        let doc = json!({"a": 1, "o": {}});
        for p in ["/a/b", "/a/b/c", "/a/b/c/d"] {
            let err = run(doc.clone(), Op::Omit { path: path(p) }).unwrap_err();
            assert!(
                matches!(&err, PatchError::TypeMismatch { path: at, .. } if *at == path("/a")),
                "{p}: {err}"
            );
        }
        for p in ["/o/x/y", "/o/x/y/z"] {
            let err = run(doc.clone(), Op::Omit { path: path(p) }).unwrap_err();
            assert_eq!(err, PatchError::PathNotFound(path("/o/x")), "{p}");
        }
    }

    #[test]
    fn omit_optional_tolerates_scalar_parent() {
        let doc = json!({"a": 1, "s": "text"});
        for p in ["/a/b", "/a/b/c", "/s/0", "/s/x/y"] {
            let out = run(doc.clone(), Op::OmitOptional { path: path(p) }).unwrap();
            assert_eq!(out, doc, "{p}");
        }
        let out = run(json!(7), Op::OmitOptional { path: path("/x") }).unwrap();
        assert_eq!(out, json!(7));
    }

    #[test]
    fn omit_optional_tolerates_missing_parent() {
        let doc = run(json!({}), Op::OmitOptional { path: path("/a/b/c") }).unwrap();
        assert_eq!(doc, json!({}));
        let doc = run(json!({"a": {"b": 1, "c": 2}}), Op::OmitOptional { path: path("/a/b") }).unwrap();
        assert_eq!(doc, json!({"a": {"c": 2}}));
    }

    #[test]
    fn omit_root_is_invalid() {
        let err = run(json!({}), Op::OmitOptional { path: Path::root() }).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath { .. }));
    }

    #[test]
    fn apply_is_atomic() {
        let doc = json!({"a": 1});
        let ops = vec![
            Op::Add { path: path("/b"), value: json!(2) },
            Op::Remove { path: path("/zzz") },
        ];
        let err = apply(&doc, &ops).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.op, "remove");
        assert_eq!(doc, json!({"a": 1}));

        let mut doc = doc;
        assert!(apply_in_place(&mut doc, &ops).is_err());
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn apply_patch_reports_results() {
        let doc = json!({"a": 1});
        let ops = vec![
            Op::Add { path: path("/b"), value: json!(2) },
            Op::Replace { path: path("/a"), value: json!(10) },
        ];
        let result = apply_patch(&doc, &ops, &ApplyPatchOptions { snapshots: true }).unwrap();
        assert_eq!(result.doc, json!({"a": 10, "b": 2}));
        assert_eq!(result.res.len(), 2);
        assert_eq!(result.res[0].doc, Some(json!({"a": 1, "b": 2})));
        assert_eq!(result.res[1].old, Some(json!(1)));

        let result = apply_patch(&doc, &ops, &ApplyPatchOptions::default()).unwrap();
        assert!(result.res.iter().all(|r| r.doc.is_none()));
    }
}
