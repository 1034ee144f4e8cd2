//! JSON built-in methods

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{JsError, JsResult};
use crate::intrinsics::key;
use crate::prelude::*;
use crate::value::{JsString, JsValue};

/// Object exposing `parse` and `stringify`
pub fn json_global() -> JsValue {
    JsValue::new_object([
        (key("parse"), JsValue::new_function(json_parse)),
        (key("stringify"), JsValue::new_function(json_stringify)),
    ])
}

/// JSON.parse(text)
pub fn json_parse(_this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let Some(JsValue::String(text)) = args.first() else {
        return Err(JsError::wrong_receiver("JSON.parse expects a string"));
    };
    let json: serde_json::Value =
        serde_json::from_str(text.as_str()).map_err(|e| JsError::syntax(e.to_string()))?;
    Ok(json_to_js_value(&json))
}

/// JSON.stringify(value, replacer, indent)
///
/// The replacer argument is accepted and ignored. Returns `undefined` when
/// the value itself has no JSON form.
pub fn json_stringify(_this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let value = args.first().cloned().unwrap_or_default();

    // Boxed values currently being serialized, for cycle detection
    let mut ancestors = index_set_new();
    let Some(json) = js_value_to_json(&value, &mut ancestors)? else {
        return Ok(JsValue::Undefined);
    };

    let text = match indent_unit(args.get(2)) {
        Some(unit) => {
            let mut out = Vec::new();
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut ser = Serializer::with_formatter(&mut out, formatter);
            json.serialize(&mut ser)
                .map_err(|e| JsError::invalid_argument(e.to_string()))?;
            String::from_utf8(out).map_err(|e| JsError::invalid_argument(e.to_string()))?
        }
        None => {
            serde_json::to_string(&json).map_err(|e| JsError::invalid_argument(e.to_string()))?
        }
    };
    Ok(JsValue::from(text))
}

/// Indentation string for pretty output: a Number is a count of spaces,
/// a String is used as-is. Both are capped at ten characters.
fn indent_unit(indent: Option<&JsValue>) -> Option<String> {
    match indent? {
        JsValue::Number(n) if *n >= 1.0 => Some(" ".repeat(n.min(10.0) as usize)),
        JsValue::String(s) if !s.is_empty() => Some(s.as_str().chars().take(10).collect()),
        _ => None,
    }
}

/// Convert a JsValue to JSON. `None` means the value is skipped
/// (undefined and functions).
pub fn js_value_to_json(
    value: &JsValue,
    ancestors: &mut IndexSet<usize>,
) -> JsResult<Option<serde_json::Value>> {
    let json = match value {
        JsValue::Undefined | JsValue::Function(_) => return Ok(None),
        JsValue::Boolean(b) => serde_json::Value::Bool(*b),
        JsValue::Number(n) => number_to_json(*n),
        JsValue::String(s) => serde_json::Value::String(s.to_string()),
        JsValue::ByteBuffer(_) => serde_json::Value::Object(serde_json::Map::new()),
        JsValue::Array(arr) => {
            enter(value, ancestors)?;
            let mut items = Vec::with_capacity(arr.len());
            for index in 0..arr.len() {
                let Some(elem) = arr.get(index) else { break };
                let item = js_value_to_json(&elem, ancestors)?;
                items.push(item.unwrap_or(serde_json::Value::Null));
            }
            ancestors.pop();
            serde_json::Value::Array(items)
        }
        JsValue::Object(obj) => {
            enter(value, ancestors)?;
            let mut map = serde_json::Map::new();
            let mut index = 0;
            loop {
                let entry = obj
                    .properties()
                    .borrow()
                    .entry_at(index)
                    .map(|(k, prop)| (k.clone(), prop.clone()));
                let Some((member_key, prop)) = entry else { break };
                index += 1;

                let JsValue::String(name) = member_key else { continue };
                if name == "__proto__" {
                    continue;
                }
                let member = prop.materialize(value)?.into_value();
                if let Some(json) = js_value_to_json(&member, ancestors)? {
                    map.insert(name.to_string(), json);
                }
            }
            ancestors.pop();
            serde_json::Value::Object(map)
        }
    };
    Ok(Some(json))
}

fn enter(value: &JsValue, ancestors: &mut IndexSet<usize>) -> JsResult<()> {
    let Some(id) = value.boxed_id() else {
        return Ok(());
    };
    if !ancestors.insert(id) {
        return Err(JsError::invalid_argument(
            "Converting circular structure to JSON",
        ));
    }
    Ok(())
}

fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if math::is_integral(n) && n.abs() < 9_007_199_254_740_992.0 {
        serde_json::Value::Number(serde_json::Number::from(n as i64))
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

/// Convert a parsed document to a JsValue. `null` becomes `undefined`.
pub fn json_to_js_value(json: &serde_json::Value) -> JsValue {
    match json {
        serde_json::Value::Null => JsValue::Undefined,
        serde_json::Value::Bool(b) => JsValue::Boolean(*b),
        serde_json::Value::Number(n) => JsValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => JsValue::String(JsString::from(s.as_str())),
        serde_json::Value::Array(items) => JsValue::new_array(items.iter().map(json_to_js_value)),
        serde_json::Value::Object(map) => JsValue::new_object(
            map.iter()
                .map(|(k, v)| (JsValue::from(k.as_str()), json_to_js_value(v))),
        ),
    }
}
