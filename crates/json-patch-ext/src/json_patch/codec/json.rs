//! JSON codec for JSON Patch operations.
//!
//! Converts operations to/from `serde_json::Value` records of the form
//! `{"op", "path", "from"?, "value"?}`: RFC 6902 for the first six
//! operations, plus `omit` and `omitOptional`.

use serde_json::{json, Value};
use thiserror::Error;

use crate::json_patch::types::{Op, Path};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("operation must be an object")]
    NotAnObject,
    #[error("patch must be an array")]
    NotAnArray,
    #[error("missing \"op\" field")]
    MissingOp,
    #[error("unknown operation \"{0}\"")]
    UnknownOp(String),
    #[error("\"{op}\" requires \"{field}\"")]
    MissingField { op: String, field: &'static str },
    #[error("\"{field}\" is not a valid JSON Pointer: {source}")]
    InvalidPointer {
        field: &'static str,
        #[source]
        source: json_patch_ext_pointer::JsonPointerError,
    },
    #[error("operation [index = {index}]: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &Path) -> Value {
    Value::String(path.to_string())
}

fn decode_path(v: &Value, field: &'static str) -> Result<Path, CodecError> {
    let s = v.as_str().ok_or(CodecError::InvalidPointer {
        field,
        source: json_patch_ext_pointer::JsonPointerError::PointerInvalid,
    })?;
    s.parse()
        .map_err(|source| CodecError::InvalidPointer { field, source })
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } | Op::Replace { path, value } | Op::Test { path, value } => {
            json!({
                "op": op.op_name(),
                "path": encode_path(path),
                "value": value
            })
        }
        Op::Move { from, path } | Op::Copy { from, path } => json!({
            "op": op.op_name(),
            "from": encode_path(from),
            "path": encode_path(path)
        }),
        Op::Remove { path } | Op::Omit { path } | Op::OmitOptional { path } => json!({
            "op": op.op_name(),
            "path": encode_path(path)
        }),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize a `serde_json::Value` into an `Op`.
///
/// # Errors
///
/// Fails on a non-object record, an unknown `op`, a missing required field,
/// or a malformed pointer.
pub fn from_json(v: &Value) -> Result<Op, CodecError> {
    let obj = v.as_object().ok_or(CodecError::NotAnObject)?;
    let op_str = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingOp)?;

    let field = |name: &'static str| {
        obj.get(name).ok_or_else(|| CodecError::MissingField {
            op: op_str.to_string(),
            field: name,
        })
    };
    let value = || field("value").cloned();
    let from = || decode_path(field("from")?, "from");
    let path = decode_path(field("path")?, "path")?;

    match op_str {
        "add" => Ok(Op::Add { path, value: value()? }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace { path, value: value()? }),
        "move" => Ok(Op::Move { from: from()?, path }),
        "copy" => Ok(Op::Copy { from: from()?, path }),
        "test" => Ok(Op::Test { path, value: value()? }),
        "omit" => Ok(Op::Omit { path }),
        "omitOptional" => Ok(Op::OmitOptional { path }),
        other => Err(CodecError::UnknownOp(other.to_string())),
    }
}

/// Deserialize a JSON array into a list of operations.
///
/// # Errors
///
/// Fails if `v` is not an array or any record fails to decode; the error
/// names the index of the first bad record.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, CodecError> {
    let arr = v.as_array().ok_or(CodecError::NotAnArray)?;
    arr.iter()
        .enumerate()
        .map(|(index, record)| {
            from_json(record).map_err(|source| CodecError::AtIndex {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}
