//! Expand command implementation.

use std::io::Write;

use anyhow::{Context, Result};
use nestconf::ConfigTree;

/// Run the expand command.
pub fn run<W: Write>(config: &ConfigTree, text: &str, out: &mut W) -> Result<()> {
    let expanded = config
        .expand(text)
        .with_context(|| format!("failed to expand '{text}'"))?;
    writeln!(out, "{expanded}")?;
    Ok(())
}
