//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `KEY=VALUE` default definitions.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration files (see `config_context` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::get::ValueKind;

#[derive(Parser, Debug)]
#[command(name = "nestconf")]
#[command(about = "Read values from layered configuration files with ${...} expansion", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  nestconf -f app.json -f defaults.conf get database.url\n  nestconf --prefix app_ -f app.json get server.port --as uint\n  nestconf -f app.json --default env=dev dump database\n  nestconf -f app.json expand 'postgres://${database.user}@${database.host}'\n"
)]
pub struct Cli {
    /// Prefix of environment variables used as fallbacks (e.g., APP_ for APP_DATABASE_URL)
    #[arg(long, global = true, env = "NESTCONF_PREFIX", default_value = "")]
    pub prefix: String,

    /// Default value consulted when a key is absent from every file (repeatable)
    #[arg(
        short,
        long = "default",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_key_value
    )]
    pub defaults: Vec<(String, String)>,

    /// Maximum placeholder nesting depth; 0 disables expansion
    #[arg(long, global = true, value_name = "N")]
    pub max_recursion: Option<u32>,

    /// Skip configuration files that do not exist
    #[arg(long, global = true)]
    pub ignore_missing: bool,

    /// Configuration file to load; `.json` files are JSON, others are `key = value` text.
    ///
    /// Repeatable. Files listed first take precedence.
    #[arg(short, long = "file", global = true, value_name = "PATH")]
    pub files: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value stored at a dotted key
    Get {
        /// Dotted key path (e.g., database.url)
        key: String,

        /// Type the value is read as
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Value used when the key is found nowhere
        #[arg(long, allow_hyphen_values = true)]
        fallback: Option<String>,
    },

    /// Expand placeholders in a string against the loaded configuration
    Expand {
        /// Text containing ${...} placeholders
        text: String,
    },

    /// Print the configuration, or one section of it, as JSON
    Dump {
        /// Dotted key of the section to print (defaults to the whole tree)
        key: Option<String>,
    },
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
