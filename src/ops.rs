//! Operators on values

use crate::error::{JsError, JsResult};
use crate::value::{JsString, JsValue};

/// `a + b`: concatenation when either side is a String, numeric otherwise
pub fn add(a: &JsValue, b: &JsValue) -> JsValue {
    if a.is_string() || b.is_string() {
        JsValue::String(a.to_js_string() + &b.to_js_string())
    } else {
        JsValue::Number(a.to_number() + b.to_number())
    }
}

pub fn sub(a: &JsValue, b: &JsValue) -> JsValue {
    JsValue::Number(a.to_number() - b.to_number())
}

pub fn mul(a: &JsValue, b: &JsValue) -> JsValue {
    JsValue::Number(a.to_number() * b.to_number())
}

/// `a % b`; the sign follows the dividend
pub fn rem(a: &JsValue, b: &JsValue) -> JsValue {
    JsValue::Number(a.to_number() % b.to_number())
}

/// Abstract relational comparison: two Strings compare by content,
/// anything else numerically. `None` means a NaN was involved.
fn compare(a: &JsValue, b: &JsValue) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (JsValue::String(x), JsValue::String(y)) => Some(x.as_str().cmp(y.as_str())),
        _ => a.to_number().partial_cmp(&b.to_number()),
    }
}

pub fn less_than(a: &JsValue, b: &JsValue) -> bool {
    compare(a, b).is_some_and(|o| o.is_lt())
}

pub fn less_equal(a: &JsValue, b: &JsValue) -> bool {
    compare(a, b).is_some_and(|o| o.is_le())
}

pub fn greater_than(a: &JsValue, b: &JsValue) -> bool {
    compare(a, b).is_some_and(|o| o.is_gt())
}

pub fn greater_equal(a: &JsValue, b: &JsValue) -> bool {
    compare(a, b).is_some_and(|o| o.is_ge())
}

/// `a && b`, returning one of the operands
pub fn and(a: &JsValue, b: &JsValue) -> JsValue {
    if a.to_boolean() { b.clone() } else { a.clone() }
}

/// `a || b`, returning one of the operands
pub fn or(a: &JsValue, b: &JsValue) -> JsValue {
    if a.to_boolean() { a.clone() } else { b.clone() }
}

pub fn not(a: &JsValue) -> JsValue {
    JsValue::Boolean(!a.to_boolean())
}

/// In-place `++`; only Numbers can be incremented
pub fn increment(value: &mut JsValue) -> JsResult<()> {
    step(value, 1.0, "increment")
}

/// In-place `--`; only Numbers can be decremented
pub fn decrement(value: &mut JsValue) -> JsResult<()> {
    step(value, -1.0, "decrement")
}

fn step(value: &mut JsValue, delta: f64, op: &str) -> JsResult<()> {
    match value {
        JsValue::Number(n) => {
            *n += delta;
            Ok(())
        }
        other => Err(JsError::wrong_receiver(format!(
            "cannot {op} a value of type {}",
            other.type_of()
        ))),
    }
}

/// String concatenation helper for callers building text from values
pub fn concat(parts: &[JsValue]) -> JsString {
    let mut out = String::new();
    for part in parts {
        out.push_str(part.to_js_string().as_str());
    }
    JsString::from(out)
}
