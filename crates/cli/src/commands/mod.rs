//! CLI command implementations.

pub mod dump;
pub mod expand;
pub mod get;
