//! Tests for the configuration builder.
//!
//! Responsibilities:
//! - Test JSON and text loading from strings, readers and files.
//! - Test document precedence and missing-file handling.
//! - Test environment fallbacks and `.env` loading.
//!
//! Does NOT handle:
//! - Expansion algorithm details (tested in expand.rs).
//! - Getter coercion rules (tested in coerce.rs and tree.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod env_tests;
pub mod file_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
