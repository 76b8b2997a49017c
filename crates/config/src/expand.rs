//! `${...}` placeholder expansion.
//!
//! Responsibilities:
//! - Replace every `${expr}` span of a string with the resolved value of `expr`.
//! - Expand placeholders nested inside the key expression (`${ key${idx} }`).
//! - Expand placeholders found inside resolved values.
//!
//! Does NOT handle:
//! - Deciding where a key resolves to (see the `Resolve` implementations in `tree.rs`).
//! - Walking composite values (see `translate.rs`).
//!
//! Invariants:
//! - A ceiling of 0 disables expansion: the input is returned as-is.
//! - Brackets are matched by nesting level, never by the first `}`.
//! - An unmatched `${` is literal text, not an error.
//! - On any failure the caller receives the original string inside the error,
//!   never a partially expanded one.
//! - Every recursive entry (key expression or resolved value) counts one level.

use std::borrow::Cow;

use crate::constants::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use crate::error::ConfigError;
use crate::value::Value;

/// Something placeholder keys can be resolved against.
pub trait Resolve {
    /// Resolve a trimmed placeholder key, `None` when it is unknown everywhere.
    fn resolve(&self, key: &str) -> Option<Cow<'_, Value>>;
}

/// Expands placeholders against a resolver with a recursion ceiling.
pub struct Expander<'r, R: ?Sized> {
    resolver: &'r R,
    max_recursion: u32,
}

/// Why an expansion was abandoned; turned into a `ConfigError` at the top level.
enum Abort {
    MissingKey(String),
    Recursion,
}

impl<'r, R: Resolve + ?Sized> Expander<'r, R> {
    pub fn new(resolver: &'r R, max_recursion: u32) -> Self {
        Self {
            resolver,
            max_recursion,
        }
    }

    pub fn max_recursion(&self) -> u32 {
        self.max_recursion
    }

    /// Expand every placeholder in `input`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ExpandMissingKey` when a placeholder key resolves nowhere.
    /// - `ConfigError::ExpandRecursionExceeded` when nesting passes the ceiling.
    ///
    /// Both carry `input` unchanged (see [`ConfigError::unexpanded`]).
    pub fn expand(&self, input: &str) -> Result<String, ConfigError> {
        if self.max_recursion == 0 || !input.contains(PLACEHOLDER_OPEN) {
            return Ok(input.to_string());
        }

        let mut output = String::with_capacity(input.len() * 2);
        match self.expand_into(&mut output, input, 0) {
            Ok(()) => Ok(output),
            Err(Abort::MissingKey(key)) => Err(ConfigError::ExpandMissingKey {
                key,
                original: input.to_string(),
            }),
            Err(Abort::Recursion) => Err(ConfigError::ExpandRecursionExceeded {
                max: self.max_recursion,
                original: input.to_string(),
            }),
        }
    }

    fn expand_into(&self, output: &mut String, text: &str, depth: u32) -> Result<(), Abort> {
        if depth > self.max_recursion {
            return Err(Abort::Recursion);
        }

        let mut rest = text;
        while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
            output.push_str(&rest[..start]);
            let body = &rest[start + PLACEHOLDER_OPEN.len()..];

            let Some(end) = matching_close(body) else {
                // Unterminated: keep the opener and copy the tail verbatim.
                output.push_str(PLACEHOLDER_OPEN);
                rest = body;
                break;
            };
            rest = &body[end + 1..];

            let mut key = String::new();
            self.expand_into(&mut key, &body[..end], depth + 1)?;
            let key = key.trim();

            let resolved = self
                .resolver
                .resolve(key)
                .ok_or_else(|| Abort::MissingKey(key.to_string()))?;
            self.expand_into(output, &resolved.to_string(), depth + 1)?;
        }
        output.push_str(rest);
        Ok(())
    }
}

/// Byte offset of the `}` closing a placeholder whose `${` precedes `body`.
fn matching_close(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let open = PLACEHOLDER_OPEN.as_bytes();
    let mut level = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(open) {
            level += 1;
            i += open.len();
            continue;
        }
        if bytes[i] == PLACEHOLDER_CLOSE {
            level -= 1;
            if level == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
