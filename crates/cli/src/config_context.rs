//! Configuration loading for command execution.
//!
//! Responsibilities:
//! - Turn the global CLI options into a loaded `ConfigTree`.
//!
//! Does NOT handle:
//! - `.env` loading (done in `main()` before argument parsing).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Files are loaded in command-line order; the first file wins on conflicts.
//! - `--default` values are registered before any file is read.

use anyhow::Result;
use nestconf::{ConfigBuilder, ConfigTree};

use crate::args::Cli;

/// Build the configuration tree described by the global options.
pub(crate) fn load_config(cli: &Cli) -> Result<ConfigTree> {
    let mut builder = ConfigBuilder::new(&cli.prefix);

    if let Some(max) = cli.max_recursion {
        builder = builder.with_max_recursion(max);
    }
    for (key, value) in &cli.defaults {
        builder = builder.with_default(key, value.as_str());
    }

    let builder = builder.load_files(cli.ignore_missing, cli.files.as_slice())?;
    tracing::debug!(
        files = cli.files.len(),
        prefix = builder.prefix(),
        "configuration loaded"
    );
    Ok(builder.build())
}
