//! Deep copy with placeholder expansion.
//!
//! Responsibilities:
//! - Copy a value of any shape, expanding every string leaf on the way.
//!
//! Does NOT handle:
//! - Surfacing expansion errors: a leaf that fails to expand is kept as-is.
//!
//! Invariants:
//! - The shape (mapping keys, sequence order and length) is preserved exactly.
//! - Non-string leaves are copied unchanged.

use crate::expand::{Expander, Resolve};
use crate::value::Value;

/// Return a copy of `value` with every string leaf expanded.
pub fn translate<R: Resolve + ?Sized>(expander: &Expander<'_, R>, value: &Value) -> Value {
    match value {
        Value::String(raw) => match expander.expand(raw) {
            Ok(expanded) => Value::String(expanded),
            Err(error) => {
                tracing::debug!(error = %error, "keeping unexpanded string leaf");
                Value::String(raw.clone())
            }
        },
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(key, item)| (key.clone(), translate(expander, item)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|item| translate(expander, item)).collect())
        }
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Duration(_) => value.clone(),
    }
}
