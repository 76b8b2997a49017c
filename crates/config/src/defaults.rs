//! Default values and environment fallbacks.
//!
//! Responsibilities:
//! - Hold the default-value table shared by every tree derived from one root.
//! - Resolve a dotted key against the table, then against a prefixed environment variable.
//! - Hold the recursion ceiling used by placeholder expansion.
//!
//! Does NOT handle:
//! - Lookups in the configuration tree itself (see `tree.rs`).
//! - Loading `.env` files into the process environment (see `loader/env.rs`).
//!
//! Invariants:
//! - The prefix is upper-cased at construction.
//! - Defaults always outrank environment variables.
//! - Environment access goes through the injected lookup so tests never need real variables.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::constants::{DEFAULT_MAX_RECURSION, ENV_SEPARATOR, KEY_SEPARATOR};
use crate::path::{self, Lookup};
use crate::value::{Map, Value};

/// Function used to read a named environment variable.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Read a variable from the process environment.
///
/// Unlike a filtered lookup, a variable set to the empty string is reported as present.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Fallback values consulted when a key is absent from the tree.
#[derive(Clone)]
pub struct DefaultTable {
    prefix: String,
    values: Map,
    max_recursion: u32,
    env: EnvLookup,
}

impl fmt::Debug for DefaultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultTable")
            .field("prefix", &self.prefix)
            .field("values", &self.values)
            .field("max_recursion", &self.max_recursion)
            .finish_non_exhaustive()
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self::new("")
    }
}

impl DefaultTable {
    /// Create an empty table reading the process environment.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_uppercase(),
            values: Map::new(),
            max_recursion: DEFAULT_MAX_RECURSION,
            env: Arc::new(process_env),
        }
    }

    /// Create a table pre-filled with `values`.
    ///
    /// Dotted keys in `values` are stored as nested sections, exactly as
    /// [`DefaultTable::add_default`] would store them.
    pub fn with_values(prefix: &str, values: Map) -> Self {
        let mut table = Self::new(prefix);
        for (key, value) in values {
            table.add_default(&key, value);
        }
        table
    }

    /// Replace the environment lookup.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    pub fn set_env(&mut self, lookup: EnvLookup) {
        self.env = lookup;
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn values(&self) -> &Map {
        &self.values
    }

    pub fn max_recursion(&self) -> u32 {
        self.max_recursion
    }

    /// Set the expansion ceiling; 0 disables expansion.
    pub fn set_max_recursion(&mut self, max: u32) {
        self.max_recursion = max;
    }

    /// Name of the environment variable backing `key`.
    ///
    /// `database.url` with prefix `APP_` becomes `APP_DATABASE_URL`.
    pub fn env_var_name(&self, key: &str) -> String {
        let suffix = key
            .replace(KEY_SEPARATOR, ENV_SEPARATOR)
            .to_uppercase();
        format!("{}{}", self.prefix, suffix)
    }

    /// Resolve `key` against the table, then the environment.
    ///
    /// `None` means "not found"; a found empty string is `Some`.
    pub fn resolve(&self, key: &str) -> Option<Cow<'_, Value>> {
        if let Lookup::Found(value) = path::lookup(&self.values, key) {
            return Some(Cow::Borrowed(value));
        }
        (self.env)(&self.env_var_name(key)).map(|raw| Cow::Owned(Value::String(raw)))
    }

    /// Add a default at the dotted `key`.
    ///
    /// Returns `false` when nothing was stored (empty key, scalar in the way,
    /// or an existing scalar default at that key).
    pub fn add_default(&mut self, key: &str, value: impl Into<Value>) -> bool {
        let stored = path::set_value(&mut self.values, key, value.into());
        if !stored {
            tracing::debug!(key, "default not stored: conflicting value already present");
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_prefix_is_uppercased() {
        assert_eq!(DefaultTable::new("Ctx_").prefix(), "CTX_");
    }

    #[test]
    fn test_env_var_name() {
        let table = DefaultTable::new("app_");
        assert_eq!(table.env_var_name("database.url"), "APP_DATABASE_URL");
        assert_eq!(table.env_var_name("test0"), "APP_TEST0");
    }

    #[test]
    fn test_resolve_missing_everywhere() {
        let table = DefaultTable::new("Ctx_").with_env(|_: &str| None);
        assert!(table.resolve("nope").is_none());
    }

    #[test]
    fn test_resolve_from_env() {
        let table = DefaultTable::new("Ctx_").with_env(fake_env(&[("CTX_TEST0", "test")]));
        assert_eq!(
            table.resolve("test0").as_deref(),
            Some(&Value::from("test"))
        );
    }

    #[test]
    fn test_defaults_outrank_env() {
        let mut table = DefaultTable::new("Ctx_").with_env(fake_env(&[("CTX_TEST0", "B")]));
        assert!(table.add_default("test0", "A"));
        assert_eq!(table.resolve("test0").as_deref(), Some(&Value::from("A")));
    }

    #[test]
    fn test_empty_env_value_is_found() {
        let table = DefaultTable::new("X_").with_env(fake_env(&[("X_EMPTY", "")]));
        assert_eq!(table.resolve("empty").as_deref(), Some(&Value::from("")));
    }

    #[test]
    fn test_dotted_defaults_resolve_by_path() {
        let mut table = DefaultTable::new("").with_env(|_: &str| None);
        assert!(table.add_default("test.none", "X"));
        assert!(table.add_default("test.other", "Z"));
        assert_eq!(table.resolve("test.none").as_deref(), Some(&Value::from("X")));
        assert_eq!(table.resolve("test..other").as_deref(), Some(&Value::from("Z")));
        assert!(table.resolve("none").is_none());
    }

    #[test]
    fn test_add_default_keeps_first_scalar() {
        let mut table = DefaultTable::new("");
        assert!(table.add_default("port", 1));
        assert!(!table.add_default("port", 2));
        assert!(!table.add_default("", 2));
        assert_eq!(table.values()["port"], Value::Int(1));
    }

    #[test]
    fn test_with_values_nests_dotted_keys() {
        let mut values = Map::new();
        values.insert("test.none".to_string(), Value::from("X"));
        values.insert("nope.none".to_string(), Value::from("Y"));
        let table = DefaultTable::with_values("", values).with_env(|_: &str| None);
        assert_eq!(table.resolve("test.none").as_deref(), Some(&Value::from("X")));
        assert_eq!(table.resolve("nope.none").as_deref(), Some(&Value::from("Y")));
    }

    #[test]
    fn test_max_recursion_default_and_setter() {
        let mut table = DefaultTable::new("");
        assert_eq!(table.max_recursion(), DEFAULT_MAX_RECURSION);
        table.set_max_recursion(0);
        assert_eq!(table.max_recursion(), 0);
    }
}
