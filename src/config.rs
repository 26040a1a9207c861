//! Per-call validation policy.
//!
//! A [`Config`] is passed unchanged down the whole recursive walk. Its only
//! knob today is an object-key transformation, letting a camelCase schema
//! validate snake_case wire data without duplicating field names.

use std::borrow::Cow;
use std::sync::Arc;

/// A key-remapping function applied before object property lookup.
pub type KeyTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options for a single validation call.
///
/// # Example
///
/// ```rust
/// use distrust::{number, object, snake_case_transformation, Config, Validator};
/// use serde_json::json;
///
/// let schema = object().field("maxRetries", number());
/// let config = Config::new().transform_object_keys(snake_case_transformation);
///
/// let result = schema.validate_with(&json!({"max_retries": 3}), &config);
/// assert!(result.is_success());
/// ```
#[derive(Clone, Default)]
pub struct Config {
    /// Optional remapping applied to declared property names before lookup.
    /// Validated values are still stored under the original declared name.
    pub transform_object_keys: Option<KeyTransform>,
}

impl Config {
    /// A config with no key transformation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the object-key transformation.
    pub fn transform_object_keys(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transform_object_keys = Some(Arc::new(transform));
        self
    }

    /// Applies the key transformation, if any, to a declared property name.
    pub(crate) fn lookup_key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match &self.transform_object_keys {
            Some(transform) => Cow::Owned(transform(key)),
            None => Cow::Borrowed(key),
        }
    }
}

/// Converts a camelCase identifier to snake_case.
///
/// Runs of capitals are treated as acronyms (`HTTPServer` becomes
/// `http_server`), and a letter following a digit starts a new word
/// (`field1Name` becomes `field1_name`).
///
/// # Example
///
/// ```rust
/// use distrust::snake_case_transformation;
///
/// assert_eq!(snake_case_transformation("maxRetries"), "max_retries");
/// assert_eq!(snake_case_transformation("HTTPServer"), "http_server");
/// ```
pub fn snake_case_transformation(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let boundary = match i.checked_sub(1).map(|p| chars[p]) {
                None => false,
                Some(prev) => {
                    prev.is_lowercase()
                        || prev.is_ascii_digit()
                        || (prev.is_uppercase()
                            && chars.get(i + 1).is_some_and(|n| n.is_lowercase()))
                }
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_camel_case() {
        assert_eq!(snake_case_transformation("maxRetries"), "max_retries");
        assert_eq!(snake_case_transformation("aVeryLongName"), "a_very_long_name");
    }

    #[test]
    fn already_snake_case_is_untouched() {
        assert_eq!(snake_case_transformation("max_retries"), "max_retries");
        assert_eq!(snake_case_transformation("plain"), "plain");
    }

    #[test]
    fn acronym_runs() {
        assert_eq!(snake_case_transformation("HTTPServer"), "http_server");
        assert_eq!(snake_case_transformation("parseURL"), "parse_url");
        assert_eq!(snake_case_transformation("XMLHttpRequest"), "xml_http_request");
    }

    #[test]
    fn digit_letter_boundaries() {
        assert_eq!(snake_case_transformation("field1Name"), "field1_name");
        assert_eq!(snake_case_transformation("sha256Hash"), "sha256_hash");
    }

    #[test]
    fn leading_capital() {
        assert_eq!(snake_case_transformation("Server"), "server");
    }

    #[test]
    fn lookup_key_defaults_to_identity() {
        let config = Config::new();
        assert_eq!(config.lookup_key("someKey"), "someKey");

        let config = Config::new().transform_object_keys(snake_case_transformation);
        assert_eq!(config.lookup_key("someKey"), "some_key");
    }
}
