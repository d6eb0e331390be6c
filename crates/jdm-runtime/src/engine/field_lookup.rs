//! Member and index access on runtime values

use crate::error::{Result, RuntimeError};
use jdm_core::Value;

/// `target.property`. A missing key is `null`; a non-mapping target is an
/// error.
pub(crate) fn get_member(target: &Value, property: &str) -> Result<Value> {
    match target {
        Value::Object(map) => Ok(map.get(property).cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::TypeError(format!(
            "Cannot access property '{}' on {}",
            property,
            other.type_name()
        ))),
    }
}

/// `target[index]`
///
/// Arrays take integer indexes, negative ones counting from the end; an out
/// of range index is `null`. Objects take string keys.
pub(crate) fn get_index(target: &Value, index: &Value) -> Result<Value> {
    match (target, index) {
        (Value::Array(items), Value::Number(n)) => {
            if n.fract() != 0.0 {
                return Err(RuntimeError::TypeError(format!(
                    "Array index must be an integer, got {}",
                    n
                )));
            }
            let len = items.len() as i64;
            let position = if *n < 0.0 { len + *n as i64 } else { *n as i64 };
            if position < 0 || position >= len {
                tracing::debug!("Index {} out of range for array of length {}", n, len);
                return Ok(Value::Null);
            }
            Ok(items[position as usize].clone())
        }
        (Value::Object(_), Value::String(key)) => get_member(target, key),
        (Value::Array(_), other) => Err(RuntimeError::TypeError(format!(
            "Array index must be a number, got {}",
            other.type_name()
        ))),
        (Value::Object(_), other) => Err(RuntimeError::TypeError(format!(
            "Object key must be a string, got {}",
            other.type_name()
        ))),
        (other, _) => Err(RuntimeError::TypeError(format!(
            "Cannot index into {}",
            other.type_name()
        ))),
    }
}
