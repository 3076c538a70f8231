//! In-memory representation of values flowing through the codecs.
//!
//! [Value] mirrors JSON but keeps raw bytes ([Value::Bytes]) and explicit variant pairs
//! ([Value::Variant]) distinct from strings and arrays, so that "already serialized" payloads
//! and "which arm" information are never guessed from a string's shape.

use bytes::Bytes;
use eosio_utils::hex;
use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;

/// Fields of an object value.
pub type Map = BTreeMap<String, Value>;

/// A value in its in-memory form.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Bytes),
    Array(Vec<Value>),
    Object(Map),
    /// A tagged union value: (arm index, payload).
    Variant(u32, Box<Value>),
}

impl Value {
    /// Short description of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Variant(..) => "variant",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field of an object value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(field))
    }

    /// Renders the value without type information: bytes become hex strings and variants
    /// become `[tag, payload]` pairs.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Bytes(b) => JsonValue::String(hex(b)),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::Variant(tag, payload) => {
                JsonValue::Array(vec![JsonValue::from(*tag), payload.to_json()])
            }
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"a": [1, "x", null], "b": true}));
        let map = value.as_object().unwrap();
        assert_eq!(
            map["a"],
            Value::Array(vec![Value::from(1u64), Value::from("x"), Value::Null])
        );
        assert_eq!(value.get("b"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_to_json() {
        let mut map = Map::new();
        map.insert("data".into(), Value::Bytes(Bytes::from_static(&[0x03, 0x0a])));
        map.insert(
            "key".into(),
            Value::Variant(1, Box::new(Value::from("abc"))),
        );
        assert_eq!(
            Value::from(map).to_json(),
            json!({"data": "030a", "key": [1, "abc"]})
        );
    }
}
