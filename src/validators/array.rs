//! Sequence validators: homogeneous arrays and fixed-arity tuples.

use serde_json::Value;
use stillwater::Validation;

use crate::config::Config;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::ValidationResult;

use super::traits::Validator;
use super::type_error;

/// A validator over homogeneous arrays. See [`array`].
pub struct ArrayValidator<V> {
    item: V,
}

/// A validator accepting arrays whose every element passes `item`.
///
/// Elements are validated at `path.<index>` and **all** element errors are
/// aggregated; on success the output preserves the input's order and length.
///
/// # Example
///
/// ```rust
/// use distrust::{array, number, Validator};
/// use serde_json::json;
///
/// let schema = array(number());
///
/// let result = schema.validate(&json!([1, 2, 3]));
/// assert_eq!(result.into_result().unwrap(), vec![1.0, 2.0, 3.0]);
///
/// let errors = schema.validate(&json!([1, "x", 3])).into_result().unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "1");
/// ```
pub fn array<V: Validator>(item: V) -> ArrayValidator<V> {
    ArrayValidator { item }
}

impl<V: Validator> Validator for ArrayValidator<V> {
    type Output = Vec<V::Output>;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        let items = match value {
            Some(Value::Array(items)) => items,
            other => return Validation::Failure(type_error(path, "array", other)),
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        let mut validated = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self
                .item
                .validate_at(Some(item), config, &path.push_index(index))
            {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(ValidationErrors::from_vec(errors))
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        let items = match value {
            Some(Value::Array(items)) => items,
            other => return Validation::Failure(type_error(path, "array", other)),
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        let mut validated = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self
                .item
                .validate_field(Some(item), config, &path.push_index(index))
            {
                Validation::Success(v) => validated.push(v.unwrap_or(Value::Null)),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(Some(Value::Array(validated)))
        } else {
            Validation::Failure(ValidationErrors::from_vec(errors))
        }
    }
}

fn arity_error(path: &JsonPath, expected: usize, got: usize) -> ValidationErrors {
    ValidationErrors::single(
        ValidationError::new(
            path.clone(),
            format!("expected tuple of length {expected}, got length {got}"),
        )
        .with_code("arity_mismatch")
        .with_expected(format!("Tuple<{expected}>"))
        .with_got(format!("Tuple<{got}>")),
    )
}

// Tuples of validators are themselves validators: `(string(), number())`
// accepts a two-element array and produces `(String, f64)`. A length mismatch
// is a single error and short-circuits; when lengths match, all positional
// errors are aggregated like `array`.
macro_rules! impl_tuple_validator {
    ($len:expr => $( $validator:ident . $slot:ident @ $idx:tt ),+) => {
        impl<$($validator: Validator),+> Validator for ($($validator,)+) {
            type Output = ($($validator::Output,)+);

            fn validate_at(
                &self,
                value: Option<&Value>,
                config: &Config,
                path: &JsonPath,
            ) -> ValidationResult<Self::Output> {
                let items = match value {
                    Some(Value::Array(items)) => items,
                    other => return Validation::Failure(type_error(path, "tuple", other)),
                };
                if items.len() != $len {
                    return Validation::Failure(arity_error(path, $len, items.len()));
                }

                let mut errors: Vec<ValidationError> = Vec::new();
                $(
                    let $slot = match self
                        .$idx
                        .validate_at(Some(&items[$idx]), config, &path.push_index($idx))
                    {
                        Validation::Success(v) => Some(v),
                        Validation::Failure(e) => {
                            errors.extend(e);
                            None
                        }
                    };
                )+

                if errors.is_empty() {
                    // Every slot is Some when no error was recorded.
                    Validation::Success(($($slot.expect("validated element"),)+))
                } else {
                    Validation::Failure(ValidationErrors::from_vec(errors))
                }
            }

            fn validate_field(
                &self,
                value: Option<&Value>,
                config: &Config,
                path: &JsonPath,
            ) -> ValidationResult<Option<Value>> {
                let items = match value {
                    Some(Value::Array(items)) => items,
                    other => return Validation::Failure(type_error(path, "tuple", other)),
                };
                if items.len() != $len {
                    return Validation::Failure(arity_error(path, $len, items.len()));
                }

                let mut errors: Vec<ValidationError> = Vec::new();
                let mut validated: Vec<Value> = Vec::with_capacity($len);
                $(
                    match self
                        .$idx
                        .validate_field(Some(&items[$idx]), config, &path.push_index($idx))
                    {
                        Validation::Success(v) => validated.push(v.unwrap_or(Value::Null)),
                        Validation::Failure(e) => errors.extend(e),
                    }
                )+

                if errors.is_empty() {
                    Validation::Success(Some(Value::Array(validated)))
                } else {
                    Validation::Failure(ValidationErrors::from_vec(errors))
                }
            }
        }
    };
}

impl_tuple_validator!(1 => V0.o0 @ 0);
impl_tuple_validator!(2 => V0.o0 @ 0, V1.o1 @ 1);
impl_tuple_validator!(3 => V0.o0 @ 0, V1.o1 @ 1, V2.o2 @ 2);
impl_tuple_validator!(4 => V0.o0 @ 0, V1.o1 @ 1, V2.o2 @ 2, V3.o3 @ 3);
impl_tuple_validator!(5 => V0.o0 @ 0, V1.o1 @ 1, V2.o2 @ 2, V3.o3 @ 3, V4.o4 @ 4);
impl_tuple_validator!(6 => V0.o0 @ 0, V1.o1 @ 1, V2.o2 @ 2, V3.o3 @ 3, V4.o4 @ 4, V5.o5 @ 5);
impl_tuple_validator!(7 => V0.o0 @ 0, V1.o1 @ 1, V2.o2 @ 2, V3.o3 @ 3, V4.o4 @ 4, V5.o5 @ 5, V6.o6 @ 6);
impl_tuple_validator!(8 => V0.o0 @ 0, V1.o1 @ 1, V2.o2 @ 2, V3.o3 @ 3, V4.o4 @ 4, V5.o5 @ 5, V6.o6 @ 6, V7.o7 @ 7);
