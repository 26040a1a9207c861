//! Leaf validators for the primitive kinds.
//!
//! Each checks the input against exactly one kind (`null`, missing, string,
//! number, boolean) or accepts anything (`unknown`). No coercion happens
//! here: a string is never parsed into a number.

use serde_json::Value;
use stillwater::Validation;

use crate::config::Config;
use crate::path::JsonPath;
use crate::ValidationResult;

use super::traits::Validator;
use super::type_error;

/// Matches exactly `null`. See [`null`].
pub struct NullValidator;

/// Matches an absent value (e.g. a missing object field). See [`missing`].
pub struct MissingValidator;

/// Matches any string. See [`string`].
pub struct StringValidator;

/// Matches any number. See [`number`].
pub struct NumberValidator;

/// Matches any boolean. See [`boolean`].
pub struct BooleanValidator;

/// Accepts anything. See [`unknown`].
pub struct UnknownValidator;

/// A validator accepting only `null`.
pub fn null() -> NullValidator {
    NullValidator
}

/// A validator accepting only an absent value.
///
/// This is the building block behind [`Validator::optional`]: an object field
/// validated by `missing()` (alone or in a union) is omitted from the object
/// output rather than stored as `null`.
pub fn missing() -> MissingValidator {
    MissingValidator
}

/// A validator accepting any string, producing a `String`.
///
/// ```rust
/// use distrust::{string, Validator};
/// use serde_json::json;
///
/// assert!(string().validate(&json!("hello")).is_success());
/// assert!(string().validate(&json!(42)).is_failure());
/// ```
pub fn string() -> StringValidator {
    StringValidator
}

/// A validator accepting any number, producing an `f64`.
pub fn number() -> NumberValidator {
    NumberValidator
}

/// A validator accepting any boolean, producing a `bool`.
pub fn boolean() -> BooleanValidator {
    BooleanValidator
}

/// A validator that always succeeds, producing the input `Value` unchanged.
pub fn unknown() -> UnknownValidator {
    UnknownValidator
}

impl Validator for NullValidator {
    type Output = ();

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<()> {
        match value {
            Some(Value::Null) => Validation::Success(()),
            other => Validation::Failure(type_error(path, "null", other)),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path)
            .map(|_| Some(Value::Null))
    }
}

impl Validator for MissingValidator {
    type Output = ();

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<()> {
        match value {
            None => Validation::Success(()),
            other => Validation::Failure(type_error(path, "missing", other)),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path).map(|_| None)
    }
}

impl Validator for StringValidator {
    type Output = String;

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<String> {
        match value {
            Some(Value::String(s)) => Validation::Success(s.clone()),
            other => Validation::Failure(type_error(path, "string", other)),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path)
            .map(|s| Some(Value::String(s)))
    }
}

impl Validator for NumberValidator {
    type Output = f64;

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<f64> {
        match value.and_then(|v| v.as_f64()) {
            Some(n) if matches!(value, Some(Value::Number(_))) => Validation::Success(n),
            _ => Validation::Failure(type_error(path, "number", value)),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        // Keep the original number representation so integers stay integers.
        match value {
            Some(n @ Value::Number(_)) => Validation::Success(Some(n.clone())),
            other => Validation::Failure(type_error(path, "number", other)),
        }
    }
}

impl Validator for BooleanValidator {
    type Output = bool;

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<bool> {
        match value {
            Some(Value::Bool(b)) => Validation::Success(*b),
            other => Validation::Failure(type_error(path, "boolean", other)),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path)
            .map(|b| Some(Value::Bool(b)))
    }
}

impl Validator for UnknownValidator {
    type Output = Value;

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        _path: &JsonPath,
    ) -> ValidationResult<Value> {
        Validation::Success(value.cloned().unwrap_or(Value::Null))
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        _config: &Config,
        _path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        Validation::Success(value.cloned())
    }
}
