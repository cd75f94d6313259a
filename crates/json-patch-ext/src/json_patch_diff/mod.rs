//! JSON Patch diff: generate a JSON Patch from two document values.
//!
//! The produced operations, applied in order to `src`, yield a document
//! deeply equal to `dst`. Identical inputs produce an empty patch.

mod lcs;
mod operation;

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::json_equal::deep_equal;
use crate::json_patch::{Op, Path};

pub use operation::{to_op, DiffOperation, DiffOperationType};

// ── Options ───────────────────────────────────────────────────────────────

/// Tuning knobs for patch shape. None of them affect the resulting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Turn a removed object member plus an added member with an equal value
    /// into a single `move`.
    pub detect_moves: bool,
    /// Turn an added object member equal to an unchanged sibling into a
    /// `copy`.
    pub detect_copies: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            detect_moves: true,
            detect_copies: false,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Generate a JSON Patch (list of operations) that transforms `src` into `dst`.
pub fn diff(src: &Value, dst: &Value) -> Vec<Op> {
    diff_with_options(src, dst, &DiffOptions::default())
}

pub fn diff_with_options(src: &Value, dst: &Value, options: &DiffOptions) -> Vec<Op> {
    diff_operations(src, dst, options).iter().map(to_op).collect()
}

/// Like [`diff_with_options`], but keeps the values each edit displaces.
pub fn diff_operations(src: &Value, dst: &Value, options: &DiffOptions) -> Vec<DiffOperation> {
    let mut differ = Differ {
        options,
        ops: Vec::new(),
    };
    differ.diff_value(&Path::root(), src, dst);
    tracing::trace!(ops = differ.ops.len(), "diff computed");
    differ.ops
}

// ── Core recursive differ ─────────────────────────────────────────────────

struct Differ<'a> {
    options: &'a DiffOptions,
    ops: Vec<DiffOperation>,
}

impl Differ<'_> {
    fn diff_value(&mut self, path: &Path, src: &Value, dst: &Value) {
        if deep_equal(src, dst) {
            return;
        }
        match (src, dst) {
            (Value::Object(s), Value::Object(d)) => self.diff_obj(path, s, d),
            (Value::Array(s), Value::Array(d)) => self.diff_arr(path, s, d),
            _ => self
                .ops
                .push(DiffOperation::replace(path.clone(), src.clone(), dst.clone())),
        }
    }

    fn diff_obj(&mut self, path: &Path, src: &Map<String, Value>, dst: &Map<String, Value>) {
        // added key -> (removed key, its value)
        let mut moves: HashMap<&str, (&str, &Value)> = HashMap::new();
        if self.options.detect_moves {
            let mut taken: HashSet<&str> = HashSet::new();
            for (key, value) in dst.iter().filter(|(k, _)| !src.contains_key(*k)) {
                let found = src.iter().find(|(k, v)| {
                    !dst.contains_key(*k) && !taken.contains(k.as_str()) && deep_equal(v, value)
                });
                if let Some((from, old)) = found {
                    taken.insert(from.as_str());
                    moves.insert(key.as_str(), (from.as_str(), old));
                }
            }
        }
        let moved_away: HashSet<&str> = moves.values().map(|(from, _)| *from).collect();

        for (key, value) in src {
            if !dst.contains_key(key) && !moved_away.contains(key.as_str()) {
                self.ops
                    .push(DiffOperation::remove(path.append(key), value.clone()));
            }
        }

        for (key, dst_val) in dst {
            let child = path.append(key);
            if let Some(src_val) = src.get(key) {
                self.diff_value(&child, src_val, dst_val);
            } else if let Some((from, old)) = moves.get(key.as_str()) {
                self.ops.push(DiffOperation::relocate(
                    path.append(*from),
                    (*old).clone(),
                    child,
                    dst_val.clone(),
                ));
            } else if let Some(sibling) = self.copy_source(src, dst, dst_val) {
                self.ops
                    .push(DiffOperation::copy(path.append(sibling), child, dst_val.clone()));
            } else {
                self.ops.push(DiffOperation::add(child, dst_val.clone()));
            }
        }
    }

    /// An unchanged member of the object whose value equals `value`.
    fn copy_source<'m>(
        &self,
        src: &'m Map<String, Value>,
        dst: &Map<String, Value>,
        value: &Value,
    ) -> Option<&'m String> {
        if !self.options.detect_copies {
            return None;
        }
        src.iter()
            .find(|(k, v)| {
                deep_equal(v, value) && dst.get(k.as_str()).is_some_and(|d| deep_equal(v, d))
            })
            .map(|(k, _)| k)
    }

    fn diff_arr(&mut self, path: &Path, src: &[Value], dst: &[Value]) {
        // For each target index, the source element it grows out of.
        let mut origin: Vec<Option<usize>> = vec![None; dst.len()];
        let mut kept = vec![false; src.len()];

        let anchors = lcs::lcs(src, dst);
        let (mut i, mut j) = (0, 0);
        for (next_i, next_j) in anchors
            .into_iter()
            .chain(std::iter::once((src.len(), dst.len())))
        {
            // Elements between two anchors pair up positionally.
            while i < next_i && j < next_j {
                origin[j] = Some(i);
                kept[i] = true;
                i += 1;
                j += 1;
            }
            if next_i < src.len() && next_j < dst.len() {
                origin[next_j] = Some(next_i);
                kept[next_i] = true;
            }
            i = next_i + 1;
            j = next_j + 1;
        }

        for idx in (0..src.len()).rev().filter(|&idx| !kept[idx]) {
            self.ops
                .push(DiffOperation::remove(path.append(idx), src[idx].clone()));
        }

        for (idx, dst_val) in dst.iter().enumerate() {
            let child = path.append(idx);
            match origin[idx] {
                Some(src_idx) => self.diff_value(&child, &src[src_idx], dst_val),
                None => self.ops.push(DiffOperation::add(child, dst_val.clone())),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
