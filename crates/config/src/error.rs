//! Error types for configuration lookup, expansion and loading.
//!
//! Responsibilities:
//! - Define one error variant per lookup/coercion/expansion failure kind.
//! - Define the variants raised by the document loaders.
//!
//! Does NOT handle:
//! - Mapping errors to process exit codes (see `crates/cli`).
//!
//! Invariants:
//! - Expansion errors carry the original, unexpanded string.
//! - Text and dotenv syntax errors NEVER include raw line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("key '{0}' does not exist")]
    MissingKey(String),

    #[error("value for '{key}' cannot be read as {expected}: {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("cannot navigate '{key}': segment '{segment}' is not a mapping")]
    NotAMapping { key: String, segment: String },

    #[error("missing key '{key}' while expanding '{original}'")]
    ExpandMissingKey { key: String, original: String },

    #[error("max recursion reached ({max}) while expanding '{original}'")]
    ExpandRecursionExceeded { max: u32, original: String },

    #[error("failed to deserialize '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration document: {0}")]
    InvalidDocument(String),

    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of a text document is neither blank, a comment, nor `key = value`.
    ///
    /// SAFETY: Only the line number is reported, never the line content.
    #[error("invalid text document syntax at line {line}")]
    TextSyntax { line: usize },

    #[error("failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// The original string of a failed expansion, returned untouched.
    pub fn unexpanded(&self) -> Option<&str> {
        match self {
            ConfigError::ExpandMissingKey { original, .. }
            | ConfigError::ExpandRecursionExceeded { original, .. } => Some(original),
            _ => None,
        }
    }

    /// Whether this error was raised by placeholder expansion.
    pub fn is_expansion(&self) -> bool {
        self.unexpanded().is_some()
    }

    /// Whether this error means a file was not found on disk.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigFileRead { source, .. } if source.kind() == ErrorKind::NotFound
        )
    }
}
