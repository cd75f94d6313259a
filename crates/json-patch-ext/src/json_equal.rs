//! Deep equality for JSON values.
//!
//! Differs from `Value`'s `PartialEq` in one respect: numbers compare by
//! numeric value, so `1` and `1.0` are equal. Object member order is
//! ignored.

use serde_json::{Number, Value};

/// Performs a deep equality check between two JSON values.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_patch_ext::json_equal::deep_equal;
///
/// assert!(deep_equal(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2]})));
/// assert!(!deep_equal(&json!({"a": [1, 2]}), &json!({"a": [2, 1]})));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            obj_a.len() == obj_b.len()
                && obj_a
                    .iter()
                    .all(|(key, val_a)| obj_b.get(key).is_some_and(|val_b| deep_equal(val_a, val_b)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_f64().is_some_and(|f| float_is_integer(f, x)),
        (None, Some(y)) => a.as_f64().is_some_and(|f| float_is_integer(f, y)),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Exact comparison; `as` saturates, and every saturated value lies far
/// outside the `i64`/`u64` range.
fn float_is_integer(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}
