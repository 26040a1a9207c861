//! The validator contract.
//!
//! [`Validator`] is the typed contract every leaf and combinator implements;
//! the whole transformation suite (`map`, `and_then`, `filter`, ...) is
//! provided methods on it, so the capability set is uniform across variants.
//! [`ValueValidator`] is the object-safe, type-erased view used wherever
//! heterogeneous validators live together (object fields, union branches).

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::path::JsonPath;
use crate::ValidationResult;

use super::transform::{
    AndThen, DefaultTo, Filter, Map, Nullable, Optional, Rejection, Then, Transform, WithError,
};

/// A typed validator over untyped input.
///
/// The core operation is [`validate_at`](Validator::validate_at), which checks
/// an optionally-present value (`None` models a missing object field) against
/// this validator, threading the per-call [`Config`] and the current
/// [`JsonPath`] down the walk. Validators are immutable and side-effect-free;
/// once built they can be shared and revalidated freely, including across
/// threads.
///
/// # Example
///
/// ```rust
/// use distrust::{number, object, string, Validator};
/// use serde_json::json;
///
/// let user = object()
///     .field("name", string())
///     .field("age", number());
///
/// assert!(user.validate(&json!({"name": "Ada", "age": 36})).is_success());
/// assert!(user.validate(&json!({"name": "Ada"})).is_failure());
/// ```
pub trait Validator: Send + Sync {
    /// The typed value produced on success.
    type Output;

    /// Validates a possibly-absent value at the given path.
    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output>;

    /// Validates for embedding in a container, erasing the output to a
    /// `Value`.
    ///
    /// A `Success(None)` means "this slot holds no value": object validators
    /// omit such keys from their output entirely, which is how optional
    /// fields disappear instead of appearing as `null`.
    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>>;

    /// The exact literal this validator matches, if it is a literal validator.
    ///
    /// Used by the discriminated union to build its dispatch table without
    /// running any validation.
    fn literal_value(&self) -> Option<&Value> {
        None
    }

    /// Validates a value with the default configuration, starting at the root.
    fn validate(&self, value: &Value) -> ValidationResult<Self::Output> {
        self.validate_at(Some(value), &Config::default(), &JsonPath::root())
    }

    /// Validates a value with an explicit configuration, starting at the root.
    fn validate_with(&self, value: &Value, config: &Config) -> ValidationResult<Self::Output> {
        self.validate_at(Some(value), config, &JsonPath::root())
    }

    /// Transforms the successful value; cannot introduce new errors.
    fn map<B, F>(self, f: F) -> Map<Self, F, B>
    where
        Self: Sized,
        F: Fn(Self::Output) -> B + Send + Sync,
    {
        Map::new(self, f)
    }

    /// Chains a fallible transformation.
    ///
    /// An `Err(message)` becomes a single error at the current path.
    fn and_then<B, F>(self, f: F) -> AndThen<Self, F, B>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<B, String> + Send + Sync,
    {
        AndThen::new(self, f)
    }

    /// Succeeds only if this validator succeeds and the predicate holds.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool + Send + Sync,
    {
        Filter::new(self, predicate)
    }

    /// Sequential composition: feed this validator's output into `next`.
    ///
    /// If this validator fails, `next` never runs.
    fn then<V>(self, next: V) -> Then<Self, V>
    where
        Self: Validator<Output = Value> + Sized,
        V: Validator,
    {
        Then::new(self, next)
    }

    /// Replaces any failure of this validator with a single error bearing
    /// `message` at the current path.
    fn with_error(self, message: impl Into<String>) -> WithError<Self>
    where
        Self: Sized,
    {
        WithError::new(self, message)
    }

    /// Also accepts a missing value, producing `None`.
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    /// Also accepts `null` or a missing value, producing `None`.
    fn nullable(self) -> Nullable<Self>
    where
        Self: Sized,
    {
        Nullable::new(self)
    }

    /// Produces `fallback` when the input is `null` or missing.
    fn default_to(self, fallback: Self::Output) -> DefaultTo<Self>
    where
        Self: Sized,
        Self::Output: Clone + Send + Sync,
    {
        DefaultTo::new(self, fallback)
    }

    /// The general lifting primitive beneath the rest of the suite.
    ///
    /// Runs this validator and hands the raw result, the original value, and
    /// the current path to `f`. A returned [`Rejection::Message`] becomes one
    /// error at the current path; [`Rejection::Errors`] passes through
    /// untouched.
    fn transform<B, F>(self, f: F) -> Transform<Self, F, B>
    where
        Self: Sized,
        F: Fn(ValidationResult<Self::Output>, Option<&Value>, &JsonPath) -> Result<B, Rejection>
            + Send
            + Sync,
    {
        Transform::new(self, f)
    }
}

/// The type-erased, object-safe view of a validator.
///
/// Every [`Validator`] is a `ValueValidator` through a blanket impl, so any
/// validator can be boxed into heterogeneous collections.
pub trait ValueValidator: Send + Sync {
    /// Type-erased validation; see [`Validator::validate_field`].
    fn validate_value(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>>;

    /// See [`Validator::literal_value`].
    fn literal(&self) -> Option<&Value> {
        None
    }
}

impl<V: Validator> ValueValidator for V {
    fn validate_value(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_field(value, config, path)
    }

    fn literal(&self) -> Option<&Value> {
        self.literal_value()
    }
}

/// A boxed, type-erased validator.
pub type BoxedValidator = Box<dyn ValueValidator>;

/// Boxes a validator for use in heterogeneous collections such as
/// [`union`](crate::union) branches.
pub fn boxed<V: Validator + 'static>(validator: V) -> BoxedValidator {
    Box::new(validator)
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    type Output = V::Output;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        (**self).validate_at(value, config, path)
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        (**self).validate_field(value, config, path)
    }

    fn literal_value(&self) -> Option<&Value> {
        (**self).literal_value()
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    type Output = V::Output;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        (**self).validate_at(value, config, path)
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        (**self).validate_field(value, config, path)
    }

    fn literal_value(&self) -> Option<&Value> {
        (**self).literal_value()
    }
}
