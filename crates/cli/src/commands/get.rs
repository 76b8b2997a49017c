//! Get command implementation.
//!
//! Responsibilities:
//! - Read one value by dotted key, coerced to the requested type.
//! - Print it on a single line.
//!
//! Does NOT handle:
//! - Coercion rules (see `nestconf::ConfigTree` getters).

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use nestconf::{ConfigError, ConfigTree};

/// Type a value is read as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Int,
    Uint,
    Float,
    Duration,
}

/// Use `with_fallback` when a fallback was given, `plain` otherwise.
fn read<T>(
    fallback: Option<&str>,
    plain: impl FnOnce() -> Result<T, ConfigError>,
    with_fallback: impl FnOnce(&str) -> Result<T, ConfigError>,
) -> Result<T, ConfigError> {
    match fallback {
        Some(value) => with_fallback(value),
        None => plain(),
    }
}

/// Run the get command.
pub fn run<W: Write>(
    config: &ConfigTree,
    key: &str,
    kind: ValueKind,
    fallback: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let rendered = match kind {
        ValueKind::String => read(
            fallback,
            || config.get_string(key),
            |f| config.get_string_or(key, f),
        ),
        ValueKind::Bool => read(
            fallback,
            || config.get_bool(key),
            |f| config.get_bool_or(key, f),
        )
        .map(|v| v.to_string()),
        ValueKind::Int => read(
            fallback,
            || config.get_int(key),
            |f| config.get_int_or(key, f),
        )
        .map(|v| v.to_string()),
        ValueKind::Uint => read(
            fallback,
            || config.get_uint(key),
            |f| config.get_uint_or(key, f),
        )
        .map(|v| v.to_string()),
        ValueKind::Float => read(
            fallback,
            || config.get_float(key),
            |f| config.get_float_or(key, f),
        )
        .map(|v| v.to_string()),
        ValueKind::Duration => read(
            fallback,
            || config.get_duration(key),
            |f| config.get_duration_or(key, f),
        )
        .map(|v| humantime::format_duration(v).to_string()),
    }
    .with_context(|| format!("failed to read '{key}'"))?;

    writeln!(out, "{rendered}")?;
    Ok(())
}
