//! Document loaders feeding the configuration tree.
//!
//! Responsibilities:
//! - Parse JSON documents and line-oriented `key = value` text documents into raw mappings.
//! - Provide a builder-pattern `ConfigBuilder` that merges documents into one tree.
//! - Load `.env` files into the process environment for prefixed fallbacks.
//!
//! Does NOT handle:
//! - Lookup, expansion or coercion (see `tree.rs`).
//!
//! Invariants / Assumptions:
//! - The first loaded document wins: later documents only add keys.
//! - Placeholders are stored verbatim; they are resolved on read, never on load.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy` is called.

mod builder;
mod env;
mod text;

pub use builder::ConfigBuilder;
pub use text::parse_text;

#[cfg(test)]
mod tests;
