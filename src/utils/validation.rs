//! Input validation primitives.
//!
//! Provides ergonomic helpers for configuration values that must be checked
//! before any file is touched. Each helper returns `config.invalid_value`
//! naming the offending key.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, key: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::config_invalid_value(key, None, "cannot be empty"))
    } else {
        Ok(trimmed)
    }
}

/// Require a JavaScript identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn require_identifier<'a>(value: &'a str, key: &str) -> Result<&'a str> {
    let value = require_non_empty(value, key)?;
    let mut chars = value.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if head_ok && tail_ok {
        Ok(value)
    } else {
        Err(Error::config_invalid_value(
            key,
            Some(value.to_string()),
            "must be a JavaScript identifier",
        ))
    }
}

/// Require a forward-slash module path that stays below its base directory.
pub fn require_relative_module<'a>(value: &'a str, key: &str) -> Result<&'a str> {
    let value = require_non_empty(value, key)?;
    let escapes = value
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if value.starts_with('/') || value.contains('\\') || escapes {
        Err(Error::config_invalid_value(
            key,
            Some(value.to_string()),
            "must be a relative module path like components/LocalIcon",
        ))
    } else {
        Ok(value)
    }
}
