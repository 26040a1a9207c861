//! Algebraic combinators: literals, unions, and intersections.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::config::Config;
use crate::diagnostics::pretty;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::ValidationResult;

use super::object::ObjectValidator;
use super::traits::{BoxedValidator, Validator};
use super::type_error;

/// A validator matching one exact value. See [`literal`].
pub struct LiteralValidator {
    value: Value,
}

/// A validator succeeding only on strict equality with `value`.
///
/// # Example
///
/// ```rust
/// use distrust::{literal, Validator};
/// use serde_json::json;
///
/// let v = literal("circle");
/// assert!(v.validate(&json!("circle")).is_success());
/// assert!(v.validate(&json!("square")).is_failure());
/// ```
pub fn literal(value: impl Into<Value>) -> LiteralValidator {
    LiteralValidator {
        value: value.into(),
    }
}

impl LiteralValidator {
    /// The exact value this validator matches.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Validator for LiteralValidator {
    type Output = Value;

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Value> {
        if value == Some(&self.value) {
            Validation::Success(self.value.clone())
        } else {
            Validation::Failure(ValidationErrors::single(
                ValidationError::new(
                    path.clone(),
                    format!(
                        "expected literal {}, got {}",
                        pretty(Some(&self.value)),
                        pretty(value)
                    ),
                )
                .with_code("literal_mismatch")
                .with_expected(pretty(Some(&self.value)))
                .with_got(pretty(value)),
            ))
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path).map(Some)
    }

    fn literal_value(&self) -> Option<&Value> {
        Some(&self.value)
    }
}

/// A first-match union over heterogeneous validators. See [`union`].
pub struct UnionValidator {
    branches: Vec<BoxedValidator>,
}

/// A validator trying each branch in declared order and returning the first
/// success.
///
/// On total failure it returns one error whose message embeds every branch's
/// own error list, labeled `Union type #<index>`.
///
/// # Example
///
/// ```rust
/// use distrust::{boxed, number, string, union, Validator};
/// use serde_json::json;
///
/// let id = union(vec![boxed(string()), boxed(number())]);
/// assert!(id.validate(&json!("abc")).is_success());
/// assert!(id.validate(&json!(42)).is_success());
/// assert!(id.validate(&json!(true)).is_failure());
/// ```
pub fn union(branches: Vec<BoxedValidator>) -> UnionValidator {
    UnionValidator { branches }
}

impl Validator for UnionValidator {
    type Output = Value;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Value> {
        let mut branch_failures: Vec<ValidationErrors> = Vec::new();

        for branch in &self.branches {
            match branch.validate_value(value, config, path) {
                Validation::Success(v) => return Validation::Success(v.unwrap_or(Value::Null)),
                Validation::Failure(e) => branch_failures.push(e),
            }
        }

        let mut message = String::from("no union branch matched the value");
        for (index, errors) in branch_failures.iter().enumerate() {
            let _ = write!(message, "\nUnion type #{index}:");
            for error in errors.iter() {
                let _ = write!(message, "\n  {error}");
            }
        }

        Validation::Failure(ValidationErrors::single(
            ValidationError::new(path.clone(), message).with_code("union_exhausted"),
        ))
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path).map(Some)
    }
}

/// A union over plain literal values. See [`literal_union`].
pub struct LiteralUnionValidator {
    values: Vec<Value>,
}

/// A validator accepting any one of the given literal values.
///
/// Equivalent to trying [`literal`] for each value in order, but with a
/// single generic "not part of the union" failure instead of itemized
/// per-branch detail.
///
/// # Example
///
/// ```rust
/// use distrust::{literal_union, Validator};
/// use serde_json::json;
///
/// let level = literal_union(["debug", "info", "warn", "error"]);
/// assert!(level.validate(&json!("info")).is_success());
/// assert!(level.validate(&json!("trace")).is_failure());
/// ```
pub fn literal_union<T, I>(values: I) -> LiteralUnionValidator
where
    T: Into<Value>,
    I: IntoIterator<Item = T>,
{
    LiteralUnionValidator {
        values: values.into_iter().map(Into::into).collect(),
    }
}

impl Validator for LiteralUnionValidator {
    type Output = Value;

    fn validate_at(
        &self,
        value: Option<&Value>,
        _config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Value> {
        match value {
            Some(v) if self.values.contains(v) => Validation::Success(v.clone()),
            other => Validation::Failure(ValidationErrors::single(
                ValidationError::new(
                    path.clone(),
                    format!("{} is not part of the union", pretty(other)),
                )
                .with_code("union_exhausted")
                .with_got(pretty(other)),
            )),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path).map(Some)
    }
}

/// A schema definition error, reported at construction time.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// A discriminated-union member has no literal validator at the
    /// discriminant key.
    #[error("union member #{index} has no literal discriminant for field '{key}'")]
    MissingDiscriminant {
        /// The discriminant field name.
        key: String,
        /// Position of the offending member.
        index: usize,
    },

    /// Two discriminated-union members share the same discriminant value.
    #[error("union members #{first} and #{second} share discriminant value {value}")]
    DuplicateDiscriminant {
        /// Position of the first member with this value.
        first: usize,
        /// Position of the conflicting member.
        second: usize,
        /// The shared discriminant value, rendered as JSON.
        value: String,
    },
}

/// A tagged union dispatching on a literal discriminant field. See
/// [`discriminated_union`].
pub struct DiscriminatedUnionValidator {
    key: String,
    members: Vec<ObjectValidator>,
    // Discriminant value (rendered as JSON) to member index.
    table: HashMap<String, usize>,
}

impl std::fmt::Debug for DiscriminatedUnionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscriminatedUnionValidator")
            .field("key", &self.key)
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

fn dispatch_key(value: &Value) -> String {
    value.to_string()
}

/// A validator dispatching directly to the member whose literal discriminant
/// at `key` matches the input's tag.
///
/// The dispatch table is built once at construction, so validation cost does
/// not grow with the member count. Construction fails if a member lacks a
/// literal at `key` or two members share a discriminant value.
///
/// At validation time, `null` or missing input is rejected immediately; the
/// tag is read off the input before any member validation; an absent or
/// unrecognized tag fails with an error naming the key and value; otherwise
/// the matched member validates the whole value and its errors propagate
/// unchanged.
///
/// # Example
///
/// ```rust
/// use distrust::{discriminated_union, literal, number, object, Validator};
/// use serde_json::json;
///
/// let shape = discriminated_union(
///     "type",
///     vec![
///         object().field("type", literal("circle")).field("radius", number()),
///         object().field("type", literal("square")).field("side", number()),
///     ],
/// )
/// .unwrap();
///
/// assert!(shape.validate(&json!({"type": "square", "side": 2})).is_success());
/// assert!(shape.validate(&json!({"type": "triangle"})).is_failure());
/// ```
pub fn discriminated_union(
    key: impl Into<String>,
    members: Vec<ObjectValidator>,
) -> Result<DiscriminatedUnionValidator, DefinitionError> {
    let key = key.into();
    let mut table = HashMap::with_capacity(members.len());

    for (index, member) in members.iter().enumerate() {
        let discriminant =
            member
                .discriminant_at(&key)
                .ok_or_else(|| DefinitionError::MissingDiscriminant {
                    key: key.clone(),
                    index,
                })?;
        if let Some(first) = table.insert(dispatch_key(discriminant), index) {
            return Err(DefinitionError::DuplicateDiscriminant {
                first,
                second: index,
                value: dispatch_key(discriminant),
            });
        }
    }

    Ok(DiscriminatedUnionValidator {
        key,
        members,
        table,
    })
}

impl Validator for DiscriminatedUnionValidator {
    type Output = Map<String, Value>;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        let present = match value {
            None | Some(Value::Null) => {
                return Validation::Failure(type_error(path, "object", value))
            }
            Some(v) => v,
        };

        let tag = match present.get(&self.key) {
            Some(tag) => tag,
            None => {
                return Validation::Failure(ValidationErrors::single(
                    ValidationError::new(
                        path.clone(),
                        format!("missing discriminant field '{}'", self.key),
                    )
                    .with_code("unknown_discriminant")
                    .with_expected(format!("field '{}'", self.key)),
                ))
            }
        };

        match self.table.get(&dispatch_key(tag)) {
            Some(&index) => self.members[index].validate_at(value, config, path),
            None => Validation::Failure(ValidationErrors::single(
                ValidationError::new(
                    path.clone(),
                    format!(
                        "unexpected discriminant value {} for field '{}'",
                        pretty(Some(tag)),
                        self.key
                    ),
                )
                .with_code("unknown_discriminant")
                .with_got(pretty(Some(tag))),
            )),
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path)
            .map(|obj| Some(Value::Object(obj)))
    }
}

/// An in-order intersection of validators. See [`intersection`].
pub struct IntersectionValidator {
    members: Vec<BoxedValidator>,
}

/// A validator running every member against the same input, in order,
/// shallow-merging object outputs (later members overwrite earlier fields).
///
/// Unlike the other container combinators, intersection **fails fast**: the
/// first failing member's errors are returned verbatim and later members
/// never run. A non-object member output replaces the accumulated result
/// instead of merging.
///
/// # Example
///
/// ```rust
/// use distrust::{boxed, intersection, number, object, string, Validator};
/// use serde_json::json;
///
/// let named = object().field("name", string());
/// let aged = object().field("age", number());
/// let person = intersection(vec![boxed(named), boxed(aged)]);
///
/// assert!(person.validate(&json!({"name": "Ada", "age": 36})).is_success());
/// ```
pub fn intersection(members: Vec<BoxedValidator>) -> IntersectionValidator {
    IntersectionValidator { members }
}

impl Validator for IntersectionValidator {
    type Output = Value;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Value> {
        let mut merged: Option<Value> = None;

        for member in &self.members {
            match member.validate_value(value, config, path) {
                Validation::Success(output) => {
                    merged = match (merged, output) {
                        (Some(Value::Object(mut acc)), Some(Value::Object(next))) => {
                            acc.extend(next);
                            Some(Value::Object(acc))
                        }
                        (_, Some(next)) => Some(next),
                        (acc, None) => acc,
                    };
                }
                failure @ Validation::Failure(_) => {
                    return failure.map(|_| Value::Null);
                }
            }
        }

        Validation::Success(merged.unwrap_or(Value::Null))
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Option<Value>> {
        self.validate_at(value, config, path).map(Some)
    }
}
