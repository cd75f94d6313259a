//! JSON Patch implementation (RFC 6902 + extensions).
//!
//! # Operations
//!
//! All standard RFC 6902 operations are supported:
//! `add`, `remove`, `replace`, `move`, `copy`, `test`.
//!
//! Extensions:
//! - `omit` removes a value if present and succeeds if it is already absent.
//! - `omitOptional` additionally succeeds when the parent container is
//!   missing, for patches written against a full schema but applied to
//!   sparse documents.

pub mod types;
pub mod apply;
pub mod codec;

pub use types::{
    ApplyPatchOptions, Op, OpResult, PatchApplicationError, PatchError, PatchResult, Path,
    PathToken,
};
pub use apply::{apply, apply_in_place, apply_op, apply_patch};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch, CodecError};
