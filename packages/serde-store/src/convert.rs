//! Conversions between Value and serde types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use statebind_core_store::{Error, State, Value};

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::decode(e.to_string()))
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Ok(json_to_value(json))
}

/// Build a fresh state snapshot from JSON.
pub fn json_state(json: serde_json::Value) -> State {
    Arc::new(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
///
/// Non-finite floats have no JSON form and become `null`.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // u64 beyond i64::MAX
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}
