//! Dump command implementation.
//!
//! Responsibilities:
//! - Print the whole tree, or the section at a key, as pretty JSON.
//!
//! Invariants:
//! - Strings are expanded; those that fail to expand are printed as written.
//! - Default values and environment variables are not included in a full dump.

use std::io::Write;

use anyhow::{Context, Result};
use nestconf::{ConfigTree, Expander, Value, translate};

/// Run the dump command.
pub fn run<W: Write>(config: &ConfigTree, key: Option<&str>, out: &mut W) -> Result<()> {
    let value = match key {
        Some(key) => config
            .get_value(key)
            .with_context(|| format!("failed to read '{key}'"))?,
        None => {
            let root = config.view();
            let expander = Expander::new(&root, config.defaults().max_recursion());
            translate(&expander, &Value::Mapping(config.values().clone()))
        }
    };

    let rendered = serde_json::to_string_pretty(&value.to_json())?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
