//! Hierarchical configuration store with placeholder expansion.
//!
//! This crate keeps configuration as a tree of nested mappings, reads typed
//! values by dotted key path, and resolves `${...}` placeholders against the
//! tree itself, a default-value table and prefixed environment variables.
//!
//! ```rust,ignore
//! let config = ConfigBuilder::new("app_")
//!     .with_default("env", "dev")
//!     .load_json_str(r#"{"dev": {"db": {"pwd": "azerty"}}, "database": {"pwd": "${ ${env}.db.pwd }"}}"#)?
//!     .build();
//!
//! assert_eq!(config.get_string("database.pwd")?, "azerty");
//! ```

pub mod constants;
pub mod defaults;
mod coerce;
mod error;
pub mod expand;
mod loader;
pub mod path;
pub mod translate;
mod tree;
pub mod value;

pub use defaults::{DefaultTable, EnvLookup};
pub use error::ConfigError;
pub use expand::{Expander, Resolve};
pub use loader::{ConfigBuilder, parse_text};
pub use translate::translate;
pub use tree::{ConfigTree, ConfigView};
pub use value::{Map, Value, map_from_json};
