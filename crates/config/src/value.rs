//! Dynamically-typed configuration values.
//!
//! Responsibilities:
//! - Define the closed `Value` variant stored in every configuration tree.
//! - Provide conversions from plain Rust scalars and from `serde_json` documents.
//! - Provide the natural string form used when a value is spliced into a placeholder.
//!
//! Does NOT handle:
//! - Navigation by dotted key (see `path.rs`).
//! - Coercion to a requested type (see `coerce.rs`).
//!
//! Invariants:
//! - JSON `null` has no counterpart: null mapping entries become absent keys and
//!   null sequence elements are skipped.
//! - Mappings are ordered by key so that dumps are deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// A mapping from key segment to value; the storage of every tree node.
pub type Map = BTreeMap<String, Value>;

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Duration(Duration),
    Mapping(Map),
    Sequence(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in type-mismatch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Convert a JSON value, returning `None` for `null`.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        let value = match json {
            serde_json::Value::Null => return None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 above i64::MAX and every non-integer land here
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().filter_map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::Mapping(
                fields
                    .into_iter()
                    .filter_map(|(key, field)| Value::from_json(field).map(|v| (key, v)))
                    .collect(),
            ),
        };
        Some(value)
    }

    /// Convert to a JSON value.
    ///
    /// Durations become their human-readable string and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Duration(d) => {
                serde_json::Value::String(humantime::format_duration(*d).to_string())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

/// Convert a parsed JSON document into a root mapping.
///
/// The document root must be an object.
pub fn map_from_json(json: serde_json::Value) -> Result<Map, ConfigError> {
    match Value::from_json(json) {
        Some(Value::Mapping(map)) => Ok(map),
        Some(other) => Err(ConfigError::InvalidDocument(format!(
            "expected an object at the document root, found {}",
            other.kind()
        ))),
        None => Err(ConfigError::InvalidDocument(
            "expected an object at the document root, found null".to_string(),
        )),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Duration(d) => write!(f, "{}", humantime::format_duration(*d)),
            Value::Mapping(_) | Value::Sequence(_) => write!(f, "{}", self.to_json()),
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

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or(Value::Float(value as f64))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Mapping(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}
