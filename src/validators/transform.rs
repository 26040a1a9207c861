//! The transformation chain.
//!
//! Every adapter here wraps an existing validator and reshapes its result:
//! `map` and `and_then` transform the value, `filter` narrows it, `then`
//! pipes it into a second validator, `with_error` rewrites failures, and
//! `optional`/`nullable`/`default_to` widen what the input may be. All of
//! them normalize user rejections through the same lifting step, [`lift`].

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::config::Config;
use crate::diagnostics::pretty;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::ValidationResult;

use super::traits::Validator;

/// Why a user-supplied transformation rejected a value.
pub enum Rejection {
    /// A plain message, lifted to a single error at the current path.
    Message(String),
    /// Pre-built errors (e.g. from a nested validation), passed through
    /// untouched so richer structure survives.
    Errors(ValidationErrors),
}

impl From<String> for Rejection {
    fn from(message: String) -> Self {
        Rejection::Message(message)
    }
}

impl From<&str> for Rejection {
    fn from(message: &str) -> Self {
        Rejection::Message(message.to_string())
    }
}

impl From<ValidationErrors> for Rejection {
    fn from(errors: ValidationErrors) -> Self {
        Rejection::Errors(errors)
    }
}

/// Normalizes a transformation outcome into a validation result.
///
/// This is the single lifting step beneath `map`, `and_then`, `with_error`
/// and `transform`: a message becomes one error at `path`, an error list is
/// passed through as-is.
pub(crate) fn lift<B>(outcome: Result<B, Rejection>, path: &JsonPath) -> ValidationResult<B> {
    match outcome {
        Ok(value) => Validation::Success(value),
        Err(Rejection::Message(message)) => Validation::Failure(ValidationErrors::single(
            ValidationError::new(path.clone(), message).with_code("custom"),
        )),
        Err(Rejection::Errors(errors)) => Validation::Failure(errors),
    }
}

/// Erases a typed success into a `Value` for container embedding.
pub(crate) fn erase<T: Serialize>(
    result: ValidationResult<T>,
    path: &JsonPath,
) -> ValidationResult<Option<Value>> {
    match result {
        Validation::Success(value) => match serde_json::to_value(value) {
            Ok(json) => Validation::Success(Some(json)),
            Err(err) => Validation::Failure(ValidationErrors::single(
                ValidationError::new(
                    path.clone(),
                    format!("value cannot be represented as JSON: {err}"),
                )
                .with_code("unrepresentable"),
            )),
        },
        Validation::Failure(errors) => Validation::Failure(errors),
    }
}

fn is_null_or_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Infallible value transformation; see [`Validator::map`].
pub struct Map<V, F, B> {
    inner: V,
    f: F,
    _output: PhantomData<fn() -> B>,
}

impl<V, F, B> Map<V, F, B> {
    pub(crate) fn new(inner: V, f: F) -> Self {
        Self {
            inner,
            f,
            _output: PhantomData,
        }
    }
}

impl<V, F, B> Validator for Map<V, F, B>
where
    V: Validator,
    F: Fn(V::Output) -> B + Send + Sync,
    B: Serialize,
{
    type Output = B;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<B> {
        let inner = self.inner.validate_at(value, config, path);
        lift(
            inner.into_result().map(&self.f).map_err(Rejection::Errors),
            path,
        )
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        erase(self.validate_at(value, config, path), path)
    }
}

/// Fallible value transformation; see [`Validator::and_then`].
pub struct AndThen<V, F, B> {
    inner: V,
    f: F,
    _output: PhantomData<fn() -> B>,
}

impl<V, F, B> AndThen<V, F, B> {
    pub(crate) fn new(inner: V, f: F) -> Self {
        Self {
            inner,
            f,
            _output: PhantomData,
        }
    }
}

impl<V, F, B> Validator for AndThen<V, F, B>
where
    V: Validator,
    F: Fn(V::Output) -> Result<B, String> + Send + Sync,
    B: Serialize,
{
    type Output = B;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<B> {
        let outcome = match self.inner.validate_at(value, config, path).into_result() {
            Ok(v) => (self.f)(v).map_err(Rejection::Message),
            Err(errors) => Err(Rejection::Errors(errors)),
        };
        lift(outcome, path)
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        erase(self.validate_at(value, config, path), path)
    }
}

/// Predicate narrowing; see [`Validator::filter`].
pub struct Filter<V, F> {
    inner: V,
    predicate: F,
}

impl<V, F> Filter<V, F> {
    pub(crate) fn new(inner: V, predicate: F) -> Self {
        Self { inner, predicate }
    }
}

impl<V, F> Validator for Filter<V, F>
where
    V: Validator,
    V::Output: Serialize,
    F: Fn(&V::Output) -> bool + Send + Sync,
{
    type Output = V::Output;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        match self.inner.validate_at(value, config, path) {
            Validation::Success(v) if (self.predicate)(&v) => Validation::Success(v),
            Validation::Success(_) => Validation::Failure(ValidationErrors::single(
                ValidationError::new(path.clone(), format!("filter error: {}", pretty(value)))
                    .with_code("filter")
                    .with_got(pretty(value)),
            )),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        erase(self.validate_at(value, config, path), path)
    }
}

/// Sequential composition; see [`Validator::then`].
pub struct Then<V1, V2> {
    first: V1,
    second: V2,
}

impl<V1, V2> Then<V1, V2> {
    pub(crate) fn new(first: V1, second: V2) -> Self {
        Self { first, second }
    }
}

impl<V1, V2> Validator for Then<V1, V2>
where
    V1: Validator<Output = Value>,
    V2: Validator,
{
    type Output = V2::Output;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        match self.first.validate_at(value, config, path) {
            Validation::Success(v) => self.second.validate_at(Some(&v), config, path),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        match self.first.validate_at(value, config, path) {
            Validation::Success(v) => self.second.validate_field(Some(&v), config, path),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }
}

/// Blanket failure replacement; see [`Validator::with_error`].
pub struct WithError<V> {
    inner: V,
    message: String,
}

impl<V> WithError<V> {
    pub(crate) fn new(inner: V, message: impl Into<String>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }

    fn replacement(&self, path: &JsonPath) -> ValidationErrors {
        ValidationErrors::single(
            ValidationError::new(path.clone(), self.message.clone()).with_code("custom"),
        )
    }
}

impl<V: Validator> Validator for WithError<V> {
    type Output = V::Output;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        match self.inner.validate_at(value, config, path) {
            success @ Validation::Success(_) => success,
            Validation::Failure(_) => Validation::Failure(self.replacement(path)),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        match self.inner.validate_field(value, config, path) {
            success @ Validation::Success(_) => success,
            Validation::Failure(_) => Validation::Failure(self.replacement(path)),
        }
    }
}

/// Accepts a missing value; see [`Validator::optional`].
pub struct Optional<V> {
    inner: V,
}

impl<V> Optional<V> {
    pub(crate) fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V: Validator> Validator for Optional<V> {
    type Output = Option<V::Output>;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        match value {
            None => Validation::Success(None),
            present => self.inner.validate_at(present, config, path).map(Some),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        match value {
            None => Validation::Success(None),
            present => self.inner.validate_field(present, config, path),
        }
    }
}

/// Accepts `null` or a missing value; see [`Validator::nullable`].
pub struct Nullable<V> {
    inner: V,
}

impl<V> Nullable<V> {
    pub(crate) fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V: Validator> Validator for Nullable<V> {
    type Output = Option<V::Output>;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        if is_null_or_missing(value) {
            Validation::Success(None)
        } else {
            self.inner.validate_at(value, config, path).map(Some)
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        match value {
            None => Validation::Success(None),
            Some(Value::Null) => Validation::Success(Some(Value::Null)),
            present => self.inner.validate_field(present, config, path),
        }
    }
}

/// Fixed fallback for `null`/missing input; see [`Validator::default_to`].
pub struct DefaultTo<V: Validator> {
    inner: V,
    fallback: V::Output,
}

impl<V: Validator> DefaultTo<V> {
    pub(crate) fn new(inner: V, fallback: V::Output) -> Self {
        Self { inner, fallback }
    }
}

impl<V> Validator for DefaultTo<V>
where
    V: Validator,
    V::Output: Clone + Serialize + Send + Sync,
{
    type Output = V::Output;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        if is_null_or_missing(value) {
            Validation::Success(self.fallback.clone())
        } else {
            self.inner.validate_at(value, config, path)
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        if is_null_or_missing(value) {
            erase(Validation::Success(self.fallback.clone()), path)
        } else {
            self.inner.validate_field(value, config, path)
        }
    }
}

/// The general lifting adapter; see [`Validator::transform`].
pub struct Transform<V, F, B> {
    inner: V,
    f: F,
    _output: PhantomData<fn() -> B>,
}

impl<V, F, B> Transform<V, F, B> {
    pub(crate) fn new(inner: V, f: F) -> Self {
        Self {
            inner,
            f,
            _output: PhantomData,
        }
    }
}

impl<V, F, B> Validator for Transform<V, F, B>
where
    V: Validator,
    F: Fn(ValidationResult<V::Output>, Option<&Value>, &JsonPath) -> Result<B, Rejection>
        + Send
        + Sync,
    B: Serialize,
{
    type Output = B;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<B> {
        let inner = self.inner.validate_at(value, config, path);
        lift((self.f)(inner, value, path), path)
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        erase(self.validate_at(value, config, path), path)
    }
}
