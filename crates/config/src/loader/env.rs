//! `.env` loading for environment fallbacks.
//!
//! Responsibilities:
//! - Load a `.env` file into the process environment so prefixed fallbacks can see it.
//! - Translate `dotenvy` errors into `ConfigError` without leaking file contents.
//!
//! Does NOT handle:
//! - Reading individual variables (see `DefaultTable::resolve`).
//!
//! Invariants:
//! - `DOTENV_DISABLED=1` or `DOTENV_DISABLED=true` skips loading entirely.
//! - A missing `.env` file is not an error.
//! - Variables already present in the environment are never overridden.

use std::path::Path;

use crate::constants::DOTENV_DISABLED_VAR;
use crate::error::ConfigError;

/// Check if dotenv loading is disabled via environment variable.
pub(crate) fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load `.env` from the current directory or its ancestors.
pub(crate) fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }
    translate_result(dotenvy::dotenv().map(|path| {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }))
}

/// Load a specific dotenv file.
pub(crate) fn load_dotenv_from(path: &Path) -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }
    translate_result(dotenvy::from_path(path).map(|()| {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }))
}

fn translate_result(result: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
