//! Object and dictionary validators.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::config::Config;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::JsonPath;
use crate::ValidationResult;

use super::traits::{BoxedValidator, ValueValidator, Validator};
use super::type_error;

struct FieldDef {
    validator: BoxedValidator,
    /// Captured when the field validator is a literal; lets the discriminated
    /// union read a member's tag without validating anything.
    literal: Option<Value>,
}

/// A validator over objects with declared, typed properties.
///
/// The declared props are the source of truth: unknown input keys are
/// silently ignored and never copied to the output. Property lookups can be
/// remapped through [`Config::transform_object_keys`], but validated values
/// are always stored under the original declared name. A property whose
/// validated value is absent (an [`optional`](Validator::optional) field that
/// was not present) is omitted from the output entirely.
///
/// All property errors are aggregated, in declaration order, before
/// returning.
///
/// # Example
///
/// ```rust
/// use distrust::{object, string, Validator};
/// use serde_json::json;
///
/// let user = object()
///     .field("name", string())
///     .optional_field("nickname", string());
///
/// let validated = user
///     .validate(&json!({"name": "Ada", "extra": true}))
///     .into_result()
///     .unwrap();
///
/// assert_eq!(validated.get("name"), Some(&json!("Ada")));
/// assert!(validated.get("extra").is_none());
/// assert!(validated.get("nickname").is_none());
/// ```
pub struct ObjectValidator {
    fields: IndexMap<String, FieldDef>,
}

/// An object validator with no declared properties.
pub fn object() -> ObjectValidator {
    ObjectValidator {
        fields: IndexMap::new(),
    }
}

impl ObjectValidator {
    /// Declares a required property.
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        let literal = validator.literal_value().cloned();
        self.fields.insert(
            name.into(),
            FieldDef {
                validator: Box::new(validator),
                literal,
            },
        );
        self
    }

    /// Declares a property that may be absent.
    ///
    /// Shorthand for `field(name, validator.optional())`; an absent field is
    /// omitted from the output.
    pub fn optional_field<V>(self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        let name = name.into();
        self.field(name, validator.optional())
    }

    /// Iterates over the declared properties and their validators.
    pub fn props(&self) -> impl Iterator<Item = (&str, &dyn ValueValidator)> {
        self.fields
            .iter()
            .map(|(name, def)| (name.as_str(), def.validator.as_ref()))
    }

    /// The literal discriminant declared at `key`, if any.
    pub(crate) fn discriminant_at(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)?.literal.as_ref()
    }
}

impl Validator for ObjectValidator {
    type Output = Map<String, Value>;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        let obj = match value {
            Some(Value::Object(obj)) => obj,
            other => return Validation::Failure(type_error(path, "object", other)),
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        let mut validated = Map::new();

        for (name, def) in &self.fields {
            let field_path = path.push_field(name);
            let lookup = config.lookup_key(name);
            let field_value = obj.get(lookup.as_ref());

            match def.validator.validate_value(field_value, config, &field_path) {
                Validation::Success(Some(v)) => {
                    validated.insert(name.clone(), v);
                }
                Validation::Success(None) => {}
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
        self.validate_at(value, config, path)
            .map(|obj| Some(Value::Object(obj)))
    }
}

/// A validator over objects treated as maps. See [`dictionary`].
pub struct DictValidator {
    domain: BoxedValidator,
    codomain: BoxedValidator,
}

/// A validator accepting objects whose every key passes `domain` and every
/// value passes `codomain`.
///
/// Keys are validated as string values and may be transformed by `domain`
/// (a non-string domain output keeps the original key). Key failures are
/// reported as `key error: ...` and value failures as `value error: ...`,
/// all aggregated into one error set; a failing key does not stop the value
/// check for that entry.
///
/// # Example
///
/// ```rust
/// use distrust::{dictionary, number, string, Validator};
/// use serde_json::json;
///
/// let scores = dictionary(string(), number());
/// assert!(scores.validate(&json!({"ada": 10, "grace": 12})).is_success());
/// ```
pub fn dictionary<D, C>(domain: D, codomain: C) -> DictValidator
where
    D: Validator + 'static,
    C: Validator + 'static,
{
    DictValidator {
        domain: Box::new(domain),
        codomain: Box::new(codomain),
    }
}

fn tag_errors(
    prefix: &'static str,
    errors: ValidationErrors,
) -> impl Iterator<Item = ValidationError> {
    errors.into_iter().map(move |mut error| {
        error.message = format!("{prefix}: {}", error.message);
        error
    })
}

impl Validator for DictValidator {
    type Output = Map<String, Value>;

    fn validate_at(
        &self,
        value: Option<&Value>,
        config: &Config,
        path: &JsonPath,
    ) -> ValidationResult<Self::Output> {
        let obj = match value {
            Some(Value::Object(obj)) => obj,
            other => return Validation::Failure(type_error(path, "object", other)),
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        let mut validated = Map::new();

        for (key, entry) in obj {
            let entry_path = path.push_field(key);

            let key_value = Value::String(key.clone());
            let out_key = match self
                .domain
                .validate_value(Some(&key_value), config, &entry_path)
            {
                Validation::Success(Some(Value::String(s))) => s,
                Validation::Success(_) => key.clone(),
                Validation::Failure(e) => {
                    errors.extend(tag_errors("key error", e));
                    key.clone()
                }
            };

            match self.codomain.validate_value(Some(entry), config, &entry_path) {
                Validation::Success(Some(v)) => {
                    validated.insert(out_key, v);
                }
                Validation::Success(None) => {}
                Validation::Failure(e) => errors.extend(tag_errors("value error", e)),
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
        self.validate_at(value, config, path)
            .map(|obj| Some(Value::Object(obj)))
    }
}
