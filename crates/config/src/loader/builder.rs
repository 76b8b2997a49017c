//! Configuration builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigBuilder` that merges documents into one tree.
//! - Support JSON and text documents from strings, readers and files.
//! - Carry defaults, the environment prefix and the recursion ceiling into the tree.
//!
//! Does NOT handle:
//! - Text document syntax (delegated to text.rs).
//! - `.env` parsing (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Documents loaded first take precedence over documents loaded later.
//! - The prefix is upper-cased when the builder is created.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::env::{load_dotenv, load_dotenv_from};
use super::text::parse_text;
use crate::defaults::DefaultTable;
use crate::error::ConfigError;
use crate::tree::ConfigTree;
use crate::value::{Map, Value, map_from_json};

/// Builds a `ConfigTree` from defaults and documents.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    tree: ConfigTree,
}

impl ConfigBuilder {
    /// Create a builder with an empty tree and `prefix` for environment fallbacks.
    pub fn new(prefix: &str) -> Self {
        Self {
            tree: ConfigTree::new(Map::new(), DefaultTable::new(prefix)),
        }
    }

    /// The upper-cased environment prefix.
    pub fn prefix(&self) -> &str {
        self.tree.defaults().prefix()
    }

    /// Add every entry of `defaults` (dotted keys allowed).
    pub fn with_defaults(mut self, defaults: Map) -> Self {
        for (key, value) in defaults {
            self.tree.add_default(&key, value);
        }
        self
    }

    /// Add one default value.
    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.tree.add_default(key, value);
        self
    }

    /// Set the expansion ceiling; 0 disables expansion.
    pub fn with_max_recursion(mut self, max: u32) -> Self {
        self.tree.set_max_recursion(max);
        self
    }

    /// Replace the environment lookup used for fallbacks.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.tree.defaults_mut().set_env(std::sync::Arc::new(lookup));
        self
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the `.env` file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        load_dotenv()?;
        Ok(self)
    }

    /// Like [`ConfigBuilder::load_dotenv`] but for an explicit file.
    pub fn load_dotenv_from(self, path: &Path) -> Result<Self, ConfigError> {
        load_dotenv_from(path)?;
        Ok(self)
    }

    /// Merge an already-parsed mapping.
    pub fn merge(mut self, map: Map) -> Self {
        self.tree.merge(map);
        self
    }

    /// Merge a JSON object document.
    pub fn load_json_str(self, json: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Ok(self.merge(map_from_json(document)?))
    }

    /// Merge a JSON object document read from `reader`.
    pub fn load_json<R: Read>(self, reader: R) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_json::from_reader(reader)?;
        Ok(self.merge(map_from_json(document)?))
    }

    /// Merge a JSON file.
    pub fn load_json_file(self, path: &Path) -> Result<Self, ConfigError> {
        let file = open(path)?;
        tracing::debug!(path = %path.display(), "loading JSON config file");
        self.load_json(BufReader::new(file))
            .map_err(|e| parse_error(path, e))
    }

    /// Merge a `key = value` text document.
    pub fn load_text_str(self, text: &str) -> Result<Self, ConfigError> {
        Ok(self.merge(parse_text(text.as_bytes())?))
    }

    /// Merge a `key = value` text document read from `reader`.
    pub fn load_text<R: Read>(self, reader: R) -> Result<Self, ConfigError> {
        Ok(self.merge(parse_text(BufReader::new(reader))?))
    }

    /// Merge a `key = value` text file.
    pub fn load_text_file(self, path: &Path) -> Result<Self, ConfigError> {
        let file = open(path)?;
        tracing::debug!(path = %path.display(), "loading text config file");
        self.load_text(file).map_err(|e| parse_error(path, e))
    }

    /// Merge a file, choosing the format by extension (`.json` or text).
    pub fn load_file(self, path: &Path) -> Result<Self, ConfigError> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.load_json_file(path)
        } else {
            self.load_text_file(path)
        }
    }

    /// Merge several files in order; the first file wins on conflicts.
    ///
    /// With `ignore_missing`, files that do not exist are skipped.
    pub fn load_files<P: AsRef<Path>>(
        mut self,
        ignore_missing: bool,
        paths: &[P],
    ) -> Result<Self, ConfigError> {
        for path in paths {
            let path = path.as_ref();
            self = match self.clone().load_file(path) {
                Ok(builder) => builder,
                Err(e) if ignore_missing && e.is_not_found() => {
                    tracing::debug!(path = %path.display(), "skipping missing config file");
                    self
                }
                Err(e) => return Err(e),
            };
        }
        Ok(self)
    }

    /// Borrow the tree built so far.
    pub fn config(&self) -> &ConfigTree {
        &self.tree
    }

    /// Finish building.
    pub fn build(self) -> ConfigTree {
        self.tree
    }
}

fn open(path: &Path) -> Result<File, ConfigError> {
    File::open(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(path: &Path, error: ConfigError) -> ConfigError {
    ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source: Box::new(error),
    }
}
