//! Environment variable tests for the configuration builder.
//!
//! Responsibilities:
//! - Test prefixed environment fallbacks against the real process environment.
//! - Test precedence between tree values, defaults and environment.
//! - Test that empty environment values count as present.

use serial_test::serial;

use super::env_lock;
use crate::loader::builder::ConfigBuilder;

#[test]
#[serial]
fn test_env_fallback_with_prefix() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("NESTCONF_LOADER_TEST0", Some("test")),
            ("NESTCONF_LOADER_DATABASE_URL", Some("pg://env")),
        ],
        || {
            let config = ConfigBuilder::new("nestconf_loader_").build();

            assert_eq!(config.get_string("test0").unwrap(), "test");
            assert_eq!(config.get_string("database.url").unwrap(), "pg://env");
            assert_eq!(config.expand("${ test0 }-x").unwrap(), "test-x");
        },
    );
}

#[test]
#[serial]
fn test_tree_and_defaults_outrank_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("NESTCONF_LOADER_KEY", Some("from-env")),
            ("NESTCONF_LOADER_PORT", Some("1")),
        ],
        || {
            let config = ConfigBuilder::new("nestconf_loader_")
                .with_default("port", 8080)
                .load_json_str(r#"{"key": "from-tree"}"#)
                .unwrap()
                .build();

            assert_eq!(config.get_string("key").unwrap(), "from-tree");
            assert_eq!(config.get_int("port").unwrap(), 8080);
        },
    );
}

#[test]
#[serial]
fn test_empty_env_value_is_present() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("NESTCONF_LOADER_EMPTY", Some(""))], || {
        let config = ConfigBuilder::new("nestconf_loader_").build();
        assert_eq!(config.get_string_or("empty", "fallback").unwrap(), "");
    });
}

#[test]
#[serial]
fn test_unset_env_uses_fallback() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("NESTCONF_LOADER_UNSET", None::<&str>)], || {
        let config = ConfigBuilder::new("nestconf_loader_").build();
        assert_eq!(config.get_string_or("unset", "fallback").unwrap(), "fallback");
    });
}
