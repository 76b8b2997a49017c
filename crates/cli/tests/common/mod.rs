//! Shared test utilities for nestconf integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write configuration fixtures into temporary directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `NESTCONF_PREFIX` is cleared so the host environment cannot change the prefix.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Returns a hermetic `nestconf` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `NESTCONF_PREFIX` and `RUST_LOG` are cleared to avoid leakage from the host.
pub fn nestconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nestconf");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("NESTCONF_PREFIX").env_remove("RUST_LOG");

    cmd
}

/// Write `contents` to `name` inside `dir` and return the full path.
#[allow(dead_code)]
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}
