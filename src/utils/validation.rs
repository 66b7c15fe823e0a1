//! Input validation primitives.

use crate::error::{Error, Result};

/// Require an Option to contain a value.
pub fn require<T>(opt: Option<T>, message: impl Into<String>) -> Result<T> {
    opt.ok_or_else(|| Error::internal_unexpected(message))
}

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, message: impl Into<String>) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::internal_unexpected(message))
    } else {
        Ok(trimmed)
    }
}
