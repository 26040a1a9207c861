//! Composable, error-accumulating validators for untyped JSON.
//!
//! A [`Validator`] checks a [`serde_json::Value`] against a schema built from
//! small combinators and produces either a typed Rust value or **every**
//! validation error found, each tagged with the [`JsonPath`] where it
//! occurred. Validation never stops at the first problem inside a container:
//! sibling fields and elements are always checked so callers see the full
//! picture in one pass.
//!
//! # Quick start
//!
//! ```rust
//! use distrust::{array, number, object, string, Validator};
//! use serde_json::json;
//!
//! let user = object()
//!     .field("name", string())
//!     .field("age", number())
//!     .optional_field("tags", array(string()));
//!
//! let ok = user.validate(&json!({"name": "Ada", "age": 36}));
//! assert!(ok.is_success());
//!
//! let bad = user.validate(&json!({"name": 1, "age": "old"}));
//! let errors = bad.into_result().unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.first().path.to_string(), "name");
//! ```
//!
//! # Building blocks
//!
//! - Leaves: [`string`], [`number`], [`boolean`], [`null`], [`missing`],
//!   [`unknown`], [`literal`].
//! - Containers: [`object`], [`dictionary`], [`array`], and plain validator
//!   tuples such as `(string(), number())`.
//! - Combinators: [`union`], [`literal_union`], [`discriminated_union`],
//!   [`intersection`], [`recursion`].
//! - The transformation chain on every validator: [`Validator::map`],
//!   [`Validator::and_then`], [`Validator::filter`], [`Validator::then`],
//!   [`Validator::with_error`], [`Validator::optional`],
//!   [`Validator::nullable`], [`Validator::default_to`],
//!   [`Validator::transform`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod path;
pub mod validators;

pub use config::{snake_case_transformation, Config, KeyTransform};
pub use diagnostics::error_debug_string;
pub use error::{ValidationError, ValidationErrors};
pub use path::{JsonPath, PathSegment};
pub use validators::{
    array, boolean, boxed, dictionary, discriminated_union, intersection, is, iso_date, literal,
    literal_union, matching, missing, null, number, object, recursion, string, union, unknown,
    validate_as, AndThen, ArrayValidator, BooleanValidator, BoxedValidator, DefaultTo,
    DefinitionError, DictValidator, DiscriminatedUnionValidator, Filter, IntersectionValidator,
    LiteralUnionValidator, LiteralValidator, Map, MissingValidator, NullValidator, Nullable,
    NumberValidator, ObjectValidator, Optional, RecursiveRef, Rejection, StringValidator, Then,
    Transform, UnionValidator, UnknownValidator, ValueValidator, Validator, WithError,
};

/// The result of running a validator: a typed success or an accumulated,
/// non-empty error set.
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
