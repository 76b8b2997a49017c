//! Configuration trees and typed getters.
//!
//! Responsibilities:
//! - Own the root mapping and the shared `DefaultTable` (`ConfigTree`).
//! - Expose borrowed nodes carved out of the root (`ConfigView`) with their parent chain.
//! - Resolve keys through tree, defaults and caller fallback, then expand and coerce.
//!
//! Does NOT handle:
//! - Parsing documents (see `loader`).
//! - The expansion algorithm itself (see `expand.rs`).
//!
//! Invariants:
//! - Getters look only at the node's own mapping; placeholder keys also search every ancestor.
//! - Views never own storage: they borrow the root's mapping and defaults.
//! - The root is only mutated through `merge`, `set_value` and the defaults setters,
//!   which borrowck keeps from overlapping with live views.

use std::borrow::Cow;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::coerce;
use crate::defaults::DefaultTable;
use crate::error::ConfigError;
use crate::expand::{Expander, Resolve};
use crate::path::{self, Lookup};
use crate::translate::translate;
use crate::value::{Map, Value};

/// Root of a configuration: owns the values and the default table.
#[derive(Debug, Clone, Default)]
pub struct ConfigTree {
    values: Map,
    defaults: DefaultTable,
}

/// A borrowed node of a `ConfigTree`.
///
/// `ancestors` lists the mappings this node was extracted from, nearest first.
#[derive(Debug, Clone)]
pub struct ConfigView<'a> {
    values: &'a Map,
    ancestors: Vec<&'a Map>,
    defaults: &'a DefaultTable,
}

impl ConfigTree {
    pub fn new(values: Map, defaults: DefaultTable) -> Self {
        Self { values, defaults }
    }

    /// Set the recursion ceiling on construction.
    pub fn with_max_recursion(mut self, max: u32) -> Self {
        self.defaults.set_max_recursion(max);
        self
    }

    /// The root node.
    pub fn view(&self) -> ConfigView<'_> {
        ConfigView {
            values: &self.values,
            ancestors: Vec::new(),
            defaults: &self.defaults,
        }
    }

    pub fn values(&self) -> &Map {
        &self.values
    }

    pub fn defaults(&self) -> &DefaultTable {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut DefaultTable {
        &mut self.defaults
    }

    pub fn add_default(&mut self, key: &str, value: impl Into<Value>) -> bool {
        self.defaults.add_default(key, value)
    }

    pub fn set_max_recursion(&mut self, max: u32) {
        self.defaults.set_max_recursion(max);
    }

    /// Merge another document in; keys already present are kept.
    pub fn merge(&mut self, incoming: Map) {
        path::merge(incoming, &mut self.values);
    }

    /// Store `value` at `key` unless a value is already there.
    ///
    /// Returns whether anything was stored (see [`path::set_value`]).
    pub fn set_value(&mut self, key: &str, value: impl Into<Value>) -> bool {
        path::set_value(&mut self.values, key, value.into())
    }

    pub fn get_value(&self, key: &str) -> Result<Value, ConfigError> {
        self.view().get_value(key)
    }

    pub fn get_value_or(&self, key: &str, fallback: impl Into<Value>) -> Result<Value, ConfigError> {
        self.view().get_value_or(key, fallback)
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.view().get_string(key)
    }

    pub fn get_string_or(&self, key: &str, fallback: impl Into<Value>) -> Result<String, ConfigError> {
        self.view().get_string_or(key, fallback)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        self.view().get_bool(key)
    }

    pub fn get_bool_or(&self, key: &str, fallback: impl Into<Value>) -> Result<bool, ConfigError> {
        self.view().get_bool_or(key, fallback)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.view().get_int(key)
    }

    pub fn get_int_or(&self, key: &str, fallback: impl Into<Value>) -> Result<i64, ConfigError> {
        self.view().get_int_or(key, fallback)
    }

    pub fn get_uint(&self, key: &str) -> Result<u64, ConfigError> {
        self.view().get_uint(key)
    }

    pub fn get_uint_or(&self, key: &str, fallback: impl Into<Value>) -> Result<u64, ConfigError> {
        self.view().get_uint_or(key, fallback)
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        self.view().get_float(key)
    }

    pub fn get_float_or(&self, key: &str, fallback: impl Into<Value>) -> Result<f64, ConfigError> {
        self.view().get_float_or(key, fallback)
    }

    pub fn get_duration(&self, key: &str) -> Result<Duration, ConfigError> {
        self.view().get_duration(key)
    }

    pub fn get_duration_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<Duration, ConfigError> {
        self.view().get_duration_or(key, fallback)
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.view().get_as(key)
    }

    /// Sub-section at `key`, whose parent is the root.
    pub fn get_config(&self, key: &str) -> Result<ConfigView<'_>, ConfigError> {
        self.view().get_config(key)
    }

    /// Expand placeholders in an arbitrary string against the root.
    pub fn expand(&self, raw: &str) -> Result<String, ConfigError> {
        self.view().expand(raw)
    }
}

impl<'a> ConfigView<'a> {
    pub fn values(&self) -> &'a Map {
        self.values
    }

    pub fn defaults(&self) -> &'a DefaultTable {
        self.defaults
    }

    /// The node this one was extracted from, if any.
    pub fn parent(&self) -> Option<ConfigView<'a>> {
        let (parent, rest) = self.ancestors.split_first()?;
        Some(ConfigView {
            values: parent,
            ancestors: rest.to_vec(),
            defaults: self.defaults,
        })
    }

    fn expander(&self) -> Expander<'_, Self> {
        Expander::new(self, self.defaults.max_recursion())
    }

    /// Resolve `key` then expand it.
    ///
    /// Resolution order: this node's mapping, the default table (then the
    /// environment), the caller's fallback. Strings are expanded with errors
    /// surfaced; composites are deep-translated.
    fn get(&self, key: &str, fallback: Option<Value>) -> Result<Value, ConfigError> {
        let raw: Cow<'_, Value> = match path::lookup(self.values, key) {
            Lookup::Found(value) => Cow::Borrowed(value),
            miss => match (self.defaults.resolve(key), fallback) {
                (Some(value), _) => value,
                (None, Some(value)) => Cow::Owned(value),
                (None, None) => return Err(miss.into_error(key)),
            },
        };

        let expander = self.expander();
        match &*raw {
            Value::String(s) => expander.expand(s).map(Value::String),
            other => Ok(translate(&expander, other)),
        }
    }

    pub fn get_value(&self, key: &str) -> Result<Value, ConfigError> {
        self.get(key, None)
    }

    pub fn get_value_or(&self, key: &str, fallback: impl Into<Value>) -> Result<Value, ConfigError> {
        self.get(key, Some(fallback.into()))
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key, None).map(coerce::to_string)
    }

    pub fn get_string_or(&self, key: &str, fallback: impl Into<Value>) -> Result<String, ConfigError> {
        self.get(key, Some(fallback.into())).map(coerce::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        coerce::to_bool(key, self.get(key, None)?)
    }

    pub fn get_bool_or(&self, key: &str, fallback: impl Into<Value>) -> Result<bool, ConfigError> {
        coerce::to_bool(key, self.get(key, Some(fallback.into()))?)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        coerce::to_int(key, self.get(key, None)?)
    }

    pub fn get_int_or(&self, key: &str, fallback: impl Into<Value>) -> Result<i64, ConfigError> {
        coerce::to_int(key, self.get(key, Some(fallback.into()))?)
    }

    pub fn get_uint(&self, key: &str) -> Result<u64, ConfigError> {
        coerce::to_uint(key, self.get(key, None)?)
    }

    pub fn get_uint_or(&self, key: &str, fallback: impl Into<Value>) -> Result<u64, ConfigError> {
        coerce::to_uint(key, self.get(key, Some(fallback.into()))?)
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        coerce::to_float(key, self.get(key, None)?)
    }

    pub fn get_float_or(&self, key: &str, fallback: impl Into<Value>) -> Result<f64, ConfigError> {
        coerce::to_float(key, self.get(key, Some(fallback.into()))?)
    }

    pub fn get_duration(&self, key: &str) -> Result<Duration, ConfigError> {
        coerce::to_duration(key, self.get(key, None)?)
    }

    pub fn get_duration_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<Duration, ConfigError> {
        coerce::to_duration(key, self.get(key, Some(fallback.into()))?)
    }

    /// Deserialize the expanded value at `key` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.get(key, None)?;
        serde_json::from_value(value.to_json()).map_err(|source| ConfigError::Deserialize {
            key: key.to_string(),
            source,
        })
    }

    /// Sub-section at `key`, whose parent is this node.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingKey` when nothing is stored at `key`.
    /// - `ConfigError::NotAMapping` when `key` or one of its parents holds a scalar.
    pub fn get_config(&self, key: &str) -> Result<ConfigView<'a>, ConfigError> {
        match path::lookup(self.values, key) {
            Lookup::Found(Value::Mapping(section)) => {
                let mut ancestors = Vec::with_capacity(self.ancestors.len() + 1);
                ancestors.push(self.values);
                ancestors.extend_from_slice(&self.ancestors);
                Ok(ConfigView {
                    values: section,
                    ancestors,
                    defaults: self.defaults,
                })
            }
            Lookup::Found(_) => Err(ConfigError::NotAMapping {
                key: key.to_string(),
                segment: path::last_segment(key).unwrap_or(key).to_string(),
            }),
            miss => Err(miss.into_error(key)),
        }
    }

    /// Expand placeholders in an arbitrary string against this node.
    pub fn expand(&self, raw: &str) -> Result<String, ConfigError> {
        self.expander().expand(raw)
    }
}

impl Resolve for ConfigView<'_> {
    /// Placeholder resolution: this node, then each ancestor nearest first,
    /// then defaults by full key, then defaults by last segment.
    fn resolve(&self, key: &str) -> Option<Cow<'_, Value>> {
        let scopes = std::iter::once(self.values).chain(self.ancestors.iter().copied());
        for scope in scopes {
            if let Lookup::Found(value) = path::lookup(scope, key) {
                return Some(Cow::Borrowed(value));
            }
        }

        if let Some(value) = self.defaults.resolve(key) {
            return Some(value);
        }
        match path::last_segment(key) {
            Some(last) if last != key => self.defaults.resolve(last),
            _ => None,
        }
    }
}
