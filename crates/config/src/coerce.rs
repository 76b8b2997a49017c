//! Coercion of resolved values into requested Rust types.
//!
//! Invariants:
//! - A value that cannot be coerced is a `TypeMismatch`, never a zero value.
//! - Strings are parsed with the standard literal grammar of the target type.

use std::time::Duration;

use crate::error::ConfigError;
use crate::value::Value;

fn mismatch(key: &str, expected: &'static str, value: &Value) -> ConfigError {
    let found = match value {
        Value::String(s) => format!("string \"{}\"", s),
        other => format!("{} {}", other.kind(), other),
    };
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found,
    }
}

pub(crate) fn to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn to_bool(key: &str, value: Value) -> Result<bool, ConfigError> {
    match &value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => parse_bool(s).ok_or_else(|| mismatch(key, "bool", &value)),
        _ => Err(mismatch(key, "bool", &value)),
    }
}

pub(crate) fn to_int(key: &str, value: Value) -> Result<i64, ConfigError> {
    match &value {
        Value::Int(i) => Ok(*i),
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
        Value::Float(f) if f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| mismatch(key, "integer", &value)),
        _ => Err(mismatch(key, "integer", &value)),
    }
}

pub(crate) fn to_uint(key: &str, value: Value) -> Result<u64, ConfigError> {
    match &value {
        Value::Int(i) => u64::try_from(*i).map_err(|_| mismatch(key, "unsigned integer", &value)),
        Value::Float(f) if f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64 => {
            Ok(f.trunc() as u64)
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| mismatch(key, "unsigned integer", &value)),
        _ => Err(mismatch(key, "unsigned integer", &value)),
    }
}

pub(crate) fn to_float(key: &str, value: Value) -> Result<f64, ConfigError> {
    match &value {
        Value::Float(f) => Ok(*f),
        Value::Int(i) => Ok(*i as f64),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| mismatch(key, "float", &value)),
        _ => Err(mismatch(key, "float", &value)),
    }
}

pub(crate) fn to_duration(key: &str, value: Value) -> Result<Duration, ConfigError> {
    let parse = |raw: &str| humantime::parse_duration(raw.trim()).ok();
    match &value {
        Value::Duration(d) => Ok(*d),
        Value::String(s) => parse(s).ok_or_else(|| mismatch(key, "duration", &value)),
        Value::Int(_) | Value::Float(_) => {
            parse(&value.to_string()).ok_or_else(|| mismatch(key, "duration", &value))
        }
        _ => Err(mismatch(key, "duration", &value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_stringifies_scalars() {
        assert_eq!(to_string(Value::from(true)), "true");
        assert_eq!(to_string(Value::from(12)), "12");
        assert_eq!(to_string(Value::from("x")), "x");
    }

    #[test]
    fn test_to_bool_literals() {
        for raw in ["true", "TRUE", "True", "t", "1", "yes", "on"] {
            assert!(to_bool("k", Value::from(raw)).unwrap(), "{raw}");
        }
        for raw in ["false", "False", "f", "0", "no", "off"] {
            assert!(!to_bool("k", Value::from(raw)).unwrap(), "{raw}");
        }
        assert!(matches!(
            to_bool("k", Value::from("maybe")),
            Err(ConfigError::TypeMismatch { .. })
        ));
        assert!(matches!(
            to_bool("k", Value::from(1)),
            Err(ConfigError::TypeMismatch { expected: "bool", .. })
        ));
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int("k", Value::from(5)).unwrap(), 5);
        assert_eq!(to_int("k", Value::from(" -42 ")).unwrap(), -42);
        assert_eq!(to_int("k", Value::from(3.9)).unwrap(), 3);
        assert!(matches!(
            to_int("nope", Value::from(true)),
            Err(ConfigError::TypeMismatch { key, .. }) if key == "nope"
        ));
        assert!(to_int("k", Value::from("12abc")).is_err());
        assert!(to_int("k", Value::from("99999999999999999999")).is_err());
        assert!(to_int("k", Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_to_uint_rejects_negative() {
        assert_eq!(to_uint("k", Value::from(7)).unwrap(), 7);
        assert_eq!(to_uint("k", Value::from("18446744073709551615")).unwrap(), u64::MAX);
        assert!(to_uint("k", Value::from(-1)).is_err());
        assert!(to_uint("k", Value::from("-1")).is_err());
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float("k", Value::from(2)).unwrap(), 2.0);
        assert_eq!(to_float("k", Value::from("1.25")).unwrap(), 1.25);
        assert!(to_float("k", Value::from("fast")).is_err());
    }

    #[test]
    fn test_to_duration() {
        assert_eq!(
            to_duration("k", Value::from("2h")).unwrap(),
            Duration::from_secs(7200)
        );
        assert_eq!(
            to_duration("k", Value::from("30s")).unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(
            to_duration("k", Value::from(Duration::from_millis(5))).unwrap(),
            Duration::from_millis(5)
        );
        // Bare numbers carry no unit.
        assert!(matches!(
            to_duration("k", Value::from(30)),
            Err(ConfigError::TypeMismatch { expected: "duration", .. })
        ));
        assert!(to_duration("k", Value::from(true)).is_err());
    }
}
