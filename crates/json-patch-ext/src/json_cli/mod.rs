//! `json-cli`: core logic behind the command-line tools.
//!
//! - `json-patch`: apply a JSON Patch to a document
//! - `json-diff`: print the JSON Patch between two documents

use serde_json::Value;
use thiserror::Error;

use crate::json_patch::codec::json::{from_json_patch, to_json_patch};
use crate::json_patch::{apply, CodecError, PatchApplicationError};
use crate::json_patch_diff::{diff_with_options, DiffOptions};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid patch: {0}")]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Patch(#[from] PatchApplicationError),
}

// ── json-patch ────────────────────────────────────────────────────────────

/// Apply a JSON Patch (RFC 6902 plus `omit`/`omitOptional`) to a document.
///
/// `doc_json`: the document as a JSON string.
/// `patch_json`: the patch operations as a JSON array string.
///
/// Returns the patched document as a pretty-printed JSON string.
pub fn apply_json_patch(doc_json: &str, patch_json: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let ops_raw: Value = serde_json::from_str(patch_json)?;
    let ops = from_json_patch(&ops_raw)?;
    let result = apply(&doc, &ops)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

// ── json-diff ─────────────────────────────────────────────────────────────

/// Compute the patch turning `src_json` into `dst_json`, as a
/// pretty-printed JSON array string.
pub fn diff_json(src_json: &str, dst_json: &str, options: &DiffOptions) -> Result<String, CliError> {
    let src: Value = serde_json::from_str(src_json)?;
    let dst: Value = serde_json::from_str(dst_json)?;
    let ops = diff_with_options(&src, &dst, options);
    Ok(serde_json::to_string_pretty(&to_json_patch(&ops))?)
}

// ── Tests ─────────────────────────────────────────────────────────────────
