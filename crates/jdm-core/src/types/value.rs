//! Runtime value types for JDM expressions
//!
//! The `Value` enum represents all possible runtime values flowing through a
//! decision graph. It mirrors JSON: contexts come in as JSON-like data and
//! results go out the same way.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    /// Name of the value's type, as reported in error messages and by `type()`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Truthiness used by logical operators, table rows and switch statements.
    ///
    /// `false`, `null`, `0`, `""`, `[]` and `{}` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a direct child of an object, `None` for anything else
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Assign `value` at a dotted path (`"a.b.c"`), creating intermediate
    /// objects and replacing non-object intermediates.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let mut current = self;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if !matches!(current, Value::Object(_)) {
                *current = Value::Object(HashMap::new());
            }
            if let Value::Object(map) = current {
                if segments.peek().is_none() {
                    map.insert(segment.to_string(), value);
                    return;
                }
                current = map.entry(segment.to_string()).or_insert(Value::Null);
            }
        }
    }

    /// Create an empty object value
    pub fn object() -> Self {
        Value::Object(HashMap::new())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                // Integral numbers round-trip as integers so `21` does not come back as `21.0`
                if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            other => match serde_json::to_string(other) {
                Ok(json) => write!(f, "{}", json),
                Err(_) => write!(f, "<{}>", other.type_name()),
            },
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
                    serde_json::Value::from(n as i64)
                } else {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(!Value::object().is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(Value::String("x".to_string()).is_truthy());
    }

    #[test]
    fn test_value_object() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), Value::String("Alice".to_string()));
        map.insert("age".to_string(), Value::Number(25.0));

        let val = Value::Object(map);
        assert_eq!(val.get("age"), Some(&Value::Number(25.0)));
        assert_eq!(val.get("missing"), None);
        assert_eq!(Value::Number(1.0).get("age"), None);
    }

    #[test]
    fn test_set_path_creates_nested_objects() {
        let mut val = Value::object();
        val.set_path("customer.tier", Value::from("gold"));
        val.set_path("customer.limit", Value::from(500.0));
        val.set_path("flag", Value::Bool(true));

        let customer = val.get("customer").unwrap();
        assert_eq!(customer.get("tier"), Some(&Value::from("gold")));
        assert_eq!(customer.get("limit"), Some(&Value::Number(500.0)));
        assert_eq!(val.get("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_set_path_replaces_scalar_intermediate() {
        let mut val = Value::object();
        val.set_path("a", Value::Number(1.0));
        val.set_path("a.b", Value::Number(2.0));

        assert_eq!(val.get("a").and_then(|a| a.get("b")), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_value_serde_json() {
        let val: Value = serde_json::from_str(r#"{"count": 42, "ratio": 0.5, "tags": ["a"], "none": null}"#).unwrap();

        assert_eq!(val.get("count"), Some(&Value::Number(42.0)));
        assert_eq!(val.get("none"), Some(&Value::Null));

        let json = serde_json::to_string(&val).unwrap();
        assert!(json.contains("\"count\":42"));
        assert!(!json.contains("42.0"));
        assert!(json.contains("0.5"));

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(val, back);
    }

    #[test]
    fn test_from_serde_json_value() {
        let json = serde_json::json!({"user": {"age": 30, "active": true}});
        let val = Value::from(json.clone());

        assert_eq!(
            val.get("user").and_then(|u| u.get("age")),
            Some(&Value::Number(30.0))
        );
        assert_eq!(serde_json::Value::from(val), json);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Array(vec![Value::Bool(true)]).to_string(), "[true]");
    }
}
