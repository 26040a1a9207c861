//! Self-referential schemas.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use stillwater::Validation;

use crate::config::Config;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::ValidationResult;

use super::traits::{ValueValidator, Validator};

type Slot = Arc<RwLock<Option<Arc<dyn ValueValidator>>>>;

/// A forward reference to a validator still being defined. See [`recursion`].
///
/// Cloning is cheap; every clone delegates to the same resolved validator.
#[derive(Clone)]
pub struct RecursiveRef {
    slot: Slot,
}

impl Validator for RecursiveRef {
    type Output = Value;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Value> {
        self.validate_field(value, config, path)
            .map(|v| v.unwrap_or(Value::Null))
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        let resolved = self.slot.read().clone();
        match resolved {
            Some(inner) => inner.validate_value(value, config, path),
            None => Validation::Failure(ValidationErrors::single(
                ValidationError::new(
                    path.clone(),
                    "recursive validator used before its definition completed",
                )
                .with_code("unresolved_recursion"),
            )),
        }
    }
}

/// Ties the knot for a self-referential schema.
///
/// The closure receives a [`RecursiveRef`] standing in for the validator
/// being defined and returns the full definition; the reference is resolved
/// before this function returns, so the placeholder can never be observed
/// unresolved through the returned validator.
///
/// # Example
///
/// ```rust
/// use distrust::{array, number, object, recursion, Validator};
/// use serde_json::json;
///
/// let tree = recursion(|node| {
///     object()
///         .field("value", number())
///         .optional_field("children", array(node))
/// });
///
/// let input = json!({
///     "value": 1,
///     "children": [{"value": 2}, {"value": 3, "children": []}],
/// });
/// assert!(tree.validate(&input).is_success());
/// ```
pub fn recursion<V, F>(define: F) -> Arc<V>
where
    V: Validator + 'static,
    F: FnOnce(RecursiveRef) -> V,
{
    let slot: Slot = Arc::new(RwLock::new(None));
    let placeholder = RecursiveRef { slot: slot.clone() };

    let validator = Arc::new(define(placeholder));
    *slot.write() = Some(validator.clone() as Arc<dyn ValueValidator>);
    validator
}
