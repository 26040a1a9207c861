//! Validators derived from the primitives.

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use super::primitives::string;
use super::traits::Validator;

/// A validator accepting RFC 3339 / ISO 8601 date-time strings, producing a
/// parsed [`DateTime<FixedOffset>`].
///
/// # Example
///
/// ```rust
/// use distrust::{iso_date, Validator};
/// use serde_json::json;
///
/// assert!(iso_date().validate(&json!("2024-01-15T10:30:00Z")).is_success());
/// assert!(iso_date().validate(&json!("not a date")).is_failure());
/// ```
pub fn iso_date() -> impl Validator<Output = DateTime<FixedOffset>> {
    string().and_then(|s| {
        DateTime::parse_from_rfc3339(&s).map_err(|err| format!("not a valid ISO 8601 date: {err}"))
    })
}

/// A validator accepting strings matched by `pattern`.
///
/// The pattern is compiled once, up front; an invalid pattern is a
/// construction error, not a validation failure.
///
/// # Example
///
/// ```rust
/// use distrust::{matching, Validator};
/// use serde_json::json;
///
/// let hex = matching(r"^[0-9a-f]+$").unwrap();
/// assert!(hex.validate(&json!("deadbeef")).is_success());
/// assert!(hex.validate(&json!("nope!")).is_failure());
/// ```
pub fn matching(pattern: &str) -> Result<impl Validator<Output = String>, regex::Error> {
    let regex = Regex::new(pattern)?;
    let shown = pattern.to_string();
    Ok(string().and_then(move |s| {
        if regex.is_match(&s) {
            Ok(s)
        } else {
            Err(format!("string does not match pattern {shown}"))
        }
    }))
}
