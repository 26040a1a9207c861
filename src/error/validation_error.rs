//! Validation failure records.
//!
//! [`ValidationError`] is a single path-tagged failure; [`ValidationErrors`]
//! is the non-empty collection accumulated across a validation walk.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single validation error with full context.
///
/// Beyond the path and message, an error carries the actual and expected
/// values (as display strings) and a machine-readable `code` such as
/// `invalid_type` or `literal_mismatch` for programmatic handling.
///
/// # Example
///
/// ```rust
/// use distrust::{JsonPath, ValidationError};
///
/// let error = ValidationError::new(
///     JsonPath::root().push_field("email"),
///     "expected string, got number",
/// )
/// .with_code("invalid_type")
/// .with_got("number")
/// .with_expected("string");
///
/// assert_eq!(error.code, "invalid_type");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Where in the input the failure occurred.
    pub path: JsonPath,
    /// Human-readable description of the failure.
    pub message: String,
    /// The actual value or kind that was received.
    pub got: Option<String>,
    /// What was expected instead.
    pub expected: Option<String>,
    /// Machine-readable error code (e.g. `invalid_type`).
    pub code: String,
}

impl ValidationError {
    /// Creates an error at `path` with the given message and the default
    /// `validation_error` code.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the actual-value description.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the expected-value description.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A non-empty collection of validation errors.
///
/// Wraps a `NonEmptyVec` so a `Validation::Failure` can never carry zero
/// errors. Implements `Semigroup`, letting errors from sibling validations be
/// merged during aggregation:
///
/// ```rust
/// use distrust::{JsonPath, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let a = ValidationErrors::single(ValidationError::new(
///     JsonPath::root().push_field("name"),
///     "required field is missing",
/// ));
/// let b = ValidationErrors::single(ValidationError::new(
///     JsonPath::root().push_field("age"),
///     "expected number, got string",
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Wraps a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps an already non-empty vec of errors.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Callers aggregate into a plain `Vec` and
    /// only convert once at least one error has been recorded.
    pub fn from_vec(errors: Vec<ValidationError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("ValidationErrors requires at least one error"))
    }

    /// Number of errors collected.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the errors in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// The first recorded error.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// All errors at the given path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// All errors carrying the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Unwraps into a plain `Vec`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// All fields are owned types, so both error types are Send + Sync; these
// assertions keep that true if the types change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_builder_sets_context() {
        let error = ValidationError::new(JsonPath::root().push_field("age"), "out of range")
            .with_code("filter")
            .with_got("-5")
            .with_expected("value >= 0");

        assert_eq!(error.code, "filter");
        assert_eq!(error.got, Some("-5".to_string()));
        assert_eq!(error.expected, Some("value >= 0".to_string()));
    }

    #[test]
    fn error_display_includes_path_and_context() {
        let error = ValidationError::new(JsonPath::root().push_field("email"), "invalid format")
            .with_expected("email address")
            .with_got("not-an-email");

        let display = error.to_string();
        assert!(display.contains("email: invalid format"));
        assert!(display.contains("expected: email address"));
        assert!(display.contains("got: not-an-email"));
    }

    #[test]
    fn root_errors_display_as_root() {
        let error = ValidationError::new(JsonPath::root(), "expected object, got null");
        assert!(error.to_string().contains("(root): expected object"));
    }

    #[test]
    fn combine_preserves_order() {
        let a = ValidationErrors::single(ValidationError::new(
            JsonPath::root().push_field("a"),
            "first",
        ));
        let b = ValidationErrors::single(ValidationError::new(
            JsonPath::root().push_field("b"),
            "second",
        ));

        let combined = a.combine(b);
        assert_eq!(combined.len(), 2);
        let messages: Vec<_> = combined.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn filtering_by_path_and_code() {
        let path_a = JsonPath::root().push_field("a");
        let errors = ValidationErrors::from_vec(vec![
            ValidationError::new(path_a.clone(), "one").with_code("invalid_type"),
            ValidationError::new(path_a.clone(), "two").with_code("filter"),
            ValidationError::new(JsonPath::root().push_field("b"), "three")
                .with_code("invalid_type"),
        ]);

        assert_eq!(errors.at_path(&path_a).len(), 2);
        assert_eq!(errors.with_code("invalid_type").len(), 2);
        assert_eq!(errors.first().message, "one");
    }
}
