//! Untyped raw values
//!
//! A filter argument arrives either as a wire value (JSON) or as an
//! already-typed native value. `RawValue` is the closed union of both.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::model::AtomValue;

/// An untyped filter argument
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
    /// Already-typed value, passed through when its category matches
    Native(AtomValue),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Returns the value-kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) | RawValue::UInt(_) | RawValue::Float(_) => "number",
            RawValue::Text(_) => "string",
            RawValue::Bytes(_) => "bytes",
            RawValue::Sequence(_) => "array",
            RawValue::Map(_) => "object",
            RawValue::Native(_) => "native",
        }
    }

    /// Converts to a JSON value.
    ///
    /// Bytes become an array of numbers, native values their canonical
    /// JSON form, and non-finite floats null.
    pub fn to_json(&self) -> Value {
        match self {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(*b),
            RawValue::Int(i) => Value::from(*i),
            RawValue::UInt(u) => Value::from(*u),
            RawValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RawValue::Text(s) => Value::String(s.clone()),
            RawValue::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
            RawValue::Sequence(items) => Value::Array(items.iter().map(RawValue::to_json).collect()),
            RawValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            RawValue::Native(atom) => native_to_json(atom),
        }
    }
}

fn native_to_json(atom: &AtomValue) -> Value {
    match atom {
        AtomValue::Boolean(b) => Value::Bool(*b),
        AtomValue::Int8(v) => Value::from(*v),
        AtomValue::Int16(v) => Value::from(*v),
        AtomValue::Int32(v) => Value::from(*v),
        AtomValue::Int64(v) => Value::from(*v),
        AtomValue::UInt8(v) => Value::from(*v),
        AtomValue::UInt16(v) => Value::from(*v),
        AtomValue::UInt32(v) => Value::from(*v),
        AtomValue::UInt64(v) => Value::from(*v),
        AtomValue::Float32(v) => RawValue::Float(f64::from(*v)).to_json(),
        AtomValue::Float64(v) => RawValue::Float(*v).to_json(),
        other => Value::String(other.to_canonical_string()),
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    RawValue::UInt(u)
                } else {
                    n.as_f64().map(RawValue::Float).unwrap_or(RawValue::Null)
                }
            }
            Value::String(s) => RawValue::Text(s),
            Value::Array(items) => RawValue::Sequence(items.into_iter().map(RawValue::from).collect()),
            Value::Object(entries) => RawValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        RawValue::from(value.clone())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::UInt(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<AtomValue> for RawValue {
    fn from(value: AtomValue) -> Self {
        RawValue::Native(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawValue::from)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Native(atom) => write!(f, "{}", atom),
            other => write!(f, "{}", other.to_json()),
        }
    }
}
