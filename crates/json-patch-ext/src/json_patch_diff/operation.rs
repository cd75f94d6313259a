//! The intermediate form produced while walking two documents.

use serde_json::Value;

use crate::json_patch::{Op, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOperationType {
    Add,
    Copy,
    Move,
    Remove,
    Replace,
}

/// One edit found by the differ, together with the value it displaces.
///
/// Which fields are set is fixed by the type, and only the constructors
/// below can build one.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOperation {
    op_type: DiffOperationType,
    /// An op's "from", if any.
    from: Option<Path>,
    /// Value displaced by this operation, if any.
    old_value: Option<Value>,
    /// An op's "path".
    path: Option<Path>,
    /// An op's "value", if any.
    value: Option<Value>,
}

impl DiffOperation {
    pub fn add(path: Path, value: Value) -> Self {
        Self {
            op_type: DiffOperationType::Add,
            from: None,
            old_value: None,
            path: Some(path),
            value: Some(value),
        }
    }

    pub fn copy(from: Path, path: Path, value: Value) -> Self {
        Self {
            op_type: DiffOperationType::Copy,
            from: Some(from),
            old_value: None,
            path: Some(path),
            value: Some(value),
        }
    }

    pub fn relocate(from: Path, old_value: Value, path: Path, value: Value) -> Self {
        Self {
            op_type: DiffOperationType::Move,
            from: Some(from),
            old_value: Some(old_value),
            path: Some(path),
            value: Some(value),
        }
    }

    pub fn remove(path: Path, old_value: Value) -> Self {
        Self {
            op_type: DiffOperationType::Remove,
            from: None,
            old_value: Some(old_value),
            path: Some(path),
            value: None,
        }
    }

    pub fn replace(path: Path, old_value: Value, value: Value) -> Self {
        Self {
            op_type: DiffOperationType::Replace,
            from: None,
            old_value: Some(old_value),
            path: Some(path),
            value: Some(value),
        }
    }

    pub fn op_type(&self) -> DiffOperationType {
        self.op_type
    }

    pub fn from(&self) -> Option<&Path> {
        self.from.as_ref()
    }

    pub fn old_value(&self) -> Option<&Value> {
        self.old_value.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// Convert a [`DiffOperation`] into the patch operation it stands for.
pub fn to_op(op: &DiffOperation) -> Op {
    let path = op.path.clone().unwrap_or_default();
    let from = || op.from.clone().unwrap_or_default();
    let value = || op.value.clone().unwrap_or(Value::Null);
    match op.op_type {
        DiffOperationType::Add => Op::Add {
            path,
            value: value(),
        },
        DiffOperationType::Copy => Op::Copy { from: from(), path },
        DiffOperationType::Move => Op::Move { from: from(), path },
        DiffOperationType::Remove => Op::Remove { path },
        DiffOperationType::Replace => Op::Replace {
            path,
            value: value(),
        },
    }
}
