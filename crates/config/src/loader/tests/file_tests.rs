//! File loading tests for the configuration builder.
//!
//! Responsibilities:
//! - Test format selection by file extension.
//! - Test `load_files` ordering and missing-file handling.
//! - Test that file errors carry the path and wrap the parse failure.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::ConfigError;
use crate::loader::builder::ConfigBuilder;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn builder() -> ConfigBuilder {
    ConfigBuilder::new("").with_env(|_: &str| None)
}

#[test]
fn test_load_file_picks_format_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let json = write(temp_dir.path(), "app.JSON", r#"{"from": "json"}"#);
    let text = write(temp_dir.path(), "app.conf", "from = text\nonly.text = yes\n");

    let config = builder()
        .load_file(&json)
        .unwrap()
        .load_file(&text)
        .unwrap()
        .build();

    assert_eq!(config.get_string("from").unwrap(), "json");
    assert!(config.get_bool("only.text").unwrap());
}

#[test]
fn test_load_files_first_wins() {
    let temp_dir = TempDir::new().unwrap();
    let local = write(temp_dir.path(), "local.json", r#"{"db": {"host": "localhost"}}"#);
    let shared = write(
        temp_dir.path(),
        "shared.txt",
        "db.host = shared\ndb.port = 5432\n",
    );

    let config = builder()
        .load_files(false, &[&local, &shared])
        .unwrap()
        .build();

    assert_eq!(config.get_string("db.host").unwrap(), "localhost");
    assert_eq!(config.get_int("db.port").unwrap(), 5432);
}

#[test]
fn test_load_files_ignore_missing() {
    let temp_dir = TempDir::new().unwrap();
    let present = write(temp_dir.path(), "present.json", r#"{"key": "value"}"#);
    let missing = temp_dir.path().join("missing.json");

    let config = builder()
        .load_files(true, &[missing.clone(), present.clone()])
        .unwrap()
        .build();
    assert_eq!(config.get_string("key").unwrap(), "value");

    let err = builder().load_files(false, &[missing, present]).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ConfigError::ConfigFileRead { .. }));
}

#[test]
fn test_ignore_missing_does_not_hide_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    let broken = write(temp_dir.path(), "broken.json", "{\"key\": ");

    let err = builder().load_files(true, &[&broken]).unwrap_err();
    match err {
        ConfigError::ConfigFileParse { path, source } => {
            assert_eq!(path, broken);
            assert!(matches!(*source, ConfigError::Json(_)));
        }
        other => panic!("Expected ConfigFileParse, got {}", other),
    }
}

#[test]
fn test_text_file_syntax_error_reports_path_and_line() {
    let temp_dir = TempDir::new().unwrap();
    let secret = "hunter2-secret";
    let broken = write(
        temp_dir.path(),
        "broken.conf",
        &format!("ok = 1\n{}\n", secret),
    );

    let err = builder().load_text_file(&broken).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.conf"), "got {}", message);
    assert!(!message.contains(secret));
    match err {
        ConfigError::ConfigFileParse { source, .. } => {
            assert!(matches!(*source, ConfigError::TextSyntax { line: 2 }));
        }
        other => panic!("Expected ConfigFileParse, got {}", other),
    }
}
