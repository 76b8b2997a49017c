//! Command dispatch logic.
//!
//! Responsibilities:
//! - Load the configuration named by the global options.
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code selection (see `error` module).
//!
//! Invariants:
//! - Command output goes to stdout; diagnostics go to stderr.

use std::io::Write;

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::load_config;

/// Dispatch CLI commands to their respective handlers, writing results to `out`.
pub(crate) fn run_command<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Get {
            key,
            kind,
            fallback,
        } => commands::get::run(&config, &key, kind, fallback.as_deref(), out)?,
        Commands::Expand { text } => commands::expand::run(&config, &text, out)?,
        Commands::Dump { key } => commands::dump::run(&config, key.as_deref(), out)?,
    }

    out.flush()?;
    Ok(())
}
