//! Core types for the JSON Patch module: the operation enum, the errors the
//! patch engine raises, and apply options/results.

use serde_json::Value;
use thiserror::Error;

pub use json_patch_ext_pointer::{Path, PathToken};

// ── Error ─────────────────────────────────────────────────────────────────

/// Why a single operation could not be applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// A location that must exist does not resolve.
    #[error("no value at \"{0}\"")]
    PathNotFound(Path),
    /// The path is structurally illegal for the operation.
    #[error("invalid path \"{path}\": {reason}")]
    InvalidPath { path: Path, reason: &'static str },
    /// The container at `path` is not of a kind the operation can act on.
    #[error("type mismatch at \"{path}\": expected {expected}, found {found}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },
    /// A `test` operation found a different value (or none).
    #[error("test failed at \"{path}\": expected {expected}, found {}", display_actual(.actual))]
    TestFailed {
        path: Path,
        expected: Value,
        actual: Option<Value>,
    },
}

fn display_actual(actual: &Option<Value>) -> String {
    match actual {
        Some(v) => v.to_string(),
        None => "nothing".to_string(),
    }
}

/// A failed patch: the position of the first failing operation and why it
/// failed. Nothing after that operation was attempted.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("operation [index = {index}] ({op}) failed: {reason}")]
pub struct PatchApplicationError {
    pub index: usize,
    pub op: &'static str,
    #[source]
    pub reason: PatchError,
}

/// Short name of a JSON value's kind, used in error messages.
pub fn kind_name(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch operation: the six RFC 6902 operations plus the two
/// idempotent removals `omit` and `omitOptional`.
///
/// Operations are plain values; applying one never changes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ── RFC 6902 operations ───────────────────────────────────────────────
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Move { from: Path, path: Path },
    Copy { from: Path, path: Path },
    Test { path: Path, value: Value },

    // ── Extended operations ───────────────────────────────────────────────
    /// Remove `path` if it exists; succeed either way. The parent must exist.
    Omit { path: Path },
    /// Like [`Op::Omit`], but a missing parent is also a no-op.
    OmitOptional { path: Path },
}

impl Op {
    /// The wire name of the operation (`"add"`, `"omitOptional"`, ...).
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
            Op::Omit { .. } => "omit",
            Op::OmitOptional { .. } => "omitOptional",
        }
    }

    /// The target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. }
            | Op::Omit { path }
            | Op::OmitOptional { path } => path,
        }
    }

    /// The source path, for `move` and `copy`.
    pub fn from(&self) -> Option<&Path> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// The carried value, for `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}

// ── Result types ──────────────────────────────────────────────────────────

/// Result of applying a single operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OpResult {
    /// The document after the operation, when snapshots were requested.
    pub doc: Option<Value>,
    /// The value displaced by the operation, if any.
    pub old: Option<Value>,
}

/// Result of applying a full patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchResult {
    pub doc: Value,
    pub res: Vec<OpResult>,
}

/// Options for `apply_patch`.
#[derive(Debug, Clone, Default)]
pub struct ApplyPatchOptions {
    /// Record a copy of the document after every operation.
    pub snapshots: bool,
}
