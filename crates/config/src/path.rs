//! Dotted key-path navigation and first-wins merging.
//!
//! Responsibilities:
//! - Split dotted keys into segments.
//! - Navigate nested mappings, optionally creating missing sections.
//! - Merge one mapping into another without overwriting existing keys.
//!
//! Does NOT handle:
//! - Defaults or environment fallbacks (see `defaults.rs`).
//! - Placeholder expansion (see `expand.rs`).
//!
//! Invariants:
//! - Empty segments are ignored, so `a..b` addresses the same value as `a.b`.
//! - Navigating through a scalar always fails, whether or not creation is enabled.
//! - On conflict the destination always wins; only mapping/mapping conflicts recurse.

use std::collections::btree_map::Entry;

use crate::constants::KEY_SEPARATOR;
use crate::error::ConfigError;
use crate::value::{Map, Value};

/// Why navigation stopped before reaching the requested section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment does not exist.
    Absent,
    /// A segment exists but holds a scalar.
    NotAMapping { segment: String },
}

/// Result of looking up a full dotted key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'m> {
    Found(&'m Value),
    Missing,
    NotAMapping { segment: String },
}

impl Lookup<'_> {
    /// Convert a failed lookup of `key` into the matching error.
    ///
    /// A successful lookup maps to `MissingKey` as well; callers only use this on misses.
    pub fn into_error(self, key: &str) -> ConfigError {
        match self {
            Lookup::NotAMapping { segment } => ConfigError::NotAMapping {
                key: key.to_string(),
                segment,
            },
            Lookup::Found(_) | Lookup::Missing => ConfigError::MissingKey(key.to_string()),
        }
    }
}

/// Split a dotted key into its non-empty, trimmed segments.
pub fn split(key: &str) -> Vec<&str> {
    key.split(KEY_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Last non-empty segment of a dotted key.
pub fn last_segment(key: &str) -> Option<&str> {
    split(key).pop()
}

/// Walk `segments` from `map` without creating anything.
pub fn navigate<'m>(map: &'m Map, segments: &[&str]) -> Result<&'m Map, PathError> {
    let mut current = map;
    for segment in segments {
        match current.get(*segment) {
            Some(Value::Mapping(inner)) => current = inner,
            Some(_) => {
                return Err(PathError::NotAMapping {
                    segment: (*segment).to_string(),
                });
            }
            None => return Err(PathError::Absent),
        }
    }
    Ok(current)
}

/// Walk `segments` from `map`, inserting empty mappings for absent segments.
pub fn navigate_mut<'m>(mut map: &'m mut Map, segments: &[&str]) -> Result<&'m mut Map, PathError> {
    for segment in segments {
        let entry = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Mapping(Map::new()));
        match entry {
            Value::Mapping(inner) => map = inner,
            _ => {
                return Err(PathError::NotAMapping {
                    segment: (*segment).to_string(),
                });
            }
        }
    }
    Ok(map)
}

/// Look up a dotted key inside `map`.
pub fn lookup<'m>(map: &'m Map, key: &str) -> Lookup<'m> {
    let segments = split(key);
    let Some((leaf, parents)) = segments.split_last() else {
        return Lookup::Missing;
    };
    match navigate(map, parents) {
        Ok(section) => section.get(*leaf).map_or(Lookup::Missing, Lookup::Found),
        Err(PathError::Absent) => Lookup::Missing,
        Err(PathError::NotAMapping { segment }) => Lookup::NotAMapping { segment },
    }
}

/// Merge `source` into `destination`, keeping every value already in `destination`.
///
/// Keys absent from `destination` are moved across; keys holding mappings on
/// both sides are merged recursively; any other conflict leaves `destination`
/// untouched.
pub fn merge(source: Map, destination: &mut Map) {
    for (key, incoming) in source {
        match destination.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                if let (Value::Mapping(existing), Value::Mapping(incoming)) =
                    (slot.get_mut(), incoming)
                {
                    merge(incoming, existing);
                }
            }
        }
    }
}

/// Store `value` at the dotted `key`, creating intermediate sections.
///
/// Returns `false` when nothing was stored: the key has no segments, an
/// intermediate segment is a scalar, or the leaf already holds a value that
/// cannot be merged with `value`.
pub fn set_value(map: &mut Map, key: &str, value: Value) -> bool {
    let segments = split(key);
    let Some((leaf, parents)) = segments.split_last() else {
        return false;
    };
    let Ok(section) = navigate_mut(map, parents) else {
        return false;
    };
    match section.entry((*leaf).to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
            (Value::Mapping(existing), Value::Mapping(incoming)) => {
                merge(incoming, existing);
                true
            }
            _ => false,
        },
    }
}
