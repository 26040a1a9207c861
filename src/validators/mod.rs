//! Validator construction: leaves, containers, combinators, and the
//! transformation chain.

mod array;
mod combinators;
mod derived;
mod object;
mod primitives;
mod recursion;
mod traits;
mod transform;

pub use array::{array, ArrayValidator};
pub use combinators::{
    discriminated_union, intersection, literal, literal_union, union, DefinitionError,
    DiscriminatedUnionValidator, IntersectionValidator, LiteralUnionValidator, LiteralValidator,
    UnionValidator,
};
pub use derived::{iso_date, matching};
pub use object::{dictionary, object, DictValidator, ObjectValidator};
pub use primitives::{
    boolean, missing, null, number, string, unknown, BooleanValidator, MissingValidator,
    NullValidator, NumberValidator, StringValidator, UnknownValidator,
};
pub use recursion::{recursion, RecursiveRef};
pub use traits::{boxed, BoxedValidator, ValueValidator, Validator};
pub use transform::{
    AndThen, DefaultTo, Filter, Map, Nullable, Optional, Rejection, Then, Transform, WithError,
};

use serde_json::Value;

use crate::diagnostics::value_kind;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::{Config, ValidationResult};

/// The shared wrong-kind failure: "expected X, got Y" at `path`.
pub(crate) fn type_error(
    path: &JsonPath,
    expected: &str,
    value: Option<&Value>,
) -> ValidationErrors {
    ValidationErrors::single(
        ValidationError::new(
            path.clone(),
            format!("expected {expected}, got {}", value_kind(value)),
        )
        .with_code("invalid_type")
        .with_expected(expected)
        .with_got(value_kind(value)),
    )
}

/// Whether `value` passes `validator`, discarding the result.
///
/// ```rust
/// use distrust::{is, string};
/// use serde_json::json;
///
/// assert!(is(&json!("yes"), &string()));
/// assert!(!is(&json!(0), &string()));
/// ```
pub fn is<V: Validator>(value: &Value, validator: &V) -> bool {
    validator.validate(value).is_success()
}

/// Validates `value` against `validator`, returning the typed result.
///
/// Identical to [`Validator::validate`] with the argument order flipped; reads
/// better at call sites that lead with the schema.
pub fn validate_as<V: Validator>(validator: &V, value: &Value) -> ValidationResult<V::Output> {
    validator.validate(value)
}
