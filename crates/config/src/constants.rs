//! Centralized constants for the nestconf workspace.
//!
//! This module contains the syntax tokens and default limits shared by the
//! engine, the loaders and the CLI.

// =============================================================================
// Key Paths
// =============================================================================

/// Separator between segments of a dotted key path.
pub const KEY_SEPARATOR: char = '.';

/// Stands in for the key separator in environment variable names.
pub const ENV_SEPARATOR: &str = "_";

// =============================================================================
// Placeholder Expansion
// =============================================================================

/// Token opening a `${...}` placeholder.
pub const PLACEHOLDER_OPEN: &str = "${";

/// Token closing a `${...}` placeholder.
pub const PLACEHOLDER_CLOSE: u8 = b'}';

/// Default ceiling for nested placeholder expansion.
///
/// A ceiling of 0 disables expansion entirely.
pub const DEFAULT_MAX_RECURSION: u32 = 5;

// =============================================================================
// Text Documents
// =============================================================================

/// Prefixes marking a whole line of a text document as a comment.
pub const TEXT_COMMENT_PREFIXES: &[&str] = &["#", "//"];

/// Separator between key and value on a text document line.
pub const TEXT_ASSIGNMENT: char = '=';

// =============================================================================
// Environment
// =============================================================================

/// Variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
