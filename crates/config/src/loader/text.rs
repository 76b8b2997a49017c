//! Line-oriented `key = value` documents.
//!
//! Responsibilities:
//! - Parse text documents into a raw mapping of string values.
//!
//! Does NOT handle:
//! - Placeholder expansion; values such as `user:${db.passwd}@/dbname` are kept as written.
//!
//! Invariants:
//! - Blank lines and lines starting with `#` or `//` are ignored; comments must be alone on a line.
//! - The first `=` separates key from value; both sides are trimmed.
//! - Within one document the first occurrence of a key wins.
//! - Syntax errors report the 1-based line number only.
//!
//! Format:
//!
//! ```text
//! # comment
//! // other type of comment
//! name = app name
//! database.url = user:${db.passwd}@/dbname
//! database.port = 3456
//! ```

use std::io::BufRead;

use crate::constants::{TEXT_ASSIGNMENT, TEXT_COMMENT_PREFIXES};
use crate::error::ConfigError;
use crate::path;
use crate::value::{Map, Value};

fn is_comment(line: &str) -> bool {
    TEXT_COMMENT_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// Parse a text document from a buffered reader.
pub fn parse_text<R: BufRead>(reader: R) -> Result<Map, ConfigError> {
    let mut map = Map::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let number = index + 1;
        let Some((key, value)) = line.split_once(TEXT_ASSIGNMENT) else {
            return Err(ConfigError::TextSyntax { line: number });
        };
        let key = key.trim();
        if path::split(key).is_empty() {
            return Err(ConfigError::TextSyntax { line: number });
        }

        if !path::set_value(&mut map, key, Value::String(value.trim().to_string())) {
            tracing::warn!(line = number, key, "ignoring text entry that conflicts with an earlier one");
        }
    }
    Ok(map)
}
