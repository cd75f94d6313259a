//! json-patch-ext: JSON Patch (RFC 6902) application and structural diff,
//! extended with the idempotent `omit` and `omitOptional` operations.
//!
//! - [`json_patch`]: operation type, atomic patch engine and wire codec
//! - [`json_patch_diff`]: produces a patch turning one document into another
//! - [`json_equal`]: deep equality shared by `test` and the differ
//! - [`json_cli`]: logic behind the `json-patch` and `json-diff` binaries

pub mod json_equal;
pub mod json_patch;
pub mod json_patch_diff;
pub mod json_cli;
