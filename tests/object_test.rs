//! Integration tests for object and dictionary validation.

use distrust::{boolean, dictionary, number, object, string, Validator};
use serde_json::json;

fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

#[test]
fn test_object_validates_declared_fields() {
    let schema = object().field("name", string()).field("age", number());

    let validated = unwrap_success(schema.validate(&json!({"name": "Ada", "age": 36})));
    assert_eq!(validated.get("name"), Some(&json!("Ada")));
    assert_eq!(validated.get("age"), Some(&json!(36)));
}

#[test]
fn test_non_object_input_is_one_error() {
    let schema = object().field("name", string());

    let errors = unwrap_failure(schema.validate(&json!([1, 2])));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "expected object, got array");
}

#[test]
fn test_all_field_errors_are_aggregated() {
    let schema = object()
        .field("name", string())
        .field("age", number())
        .field("admin", boolean());

    let errors = unwrap_failure(schema.validate(&json!({"name": 1, "age": "old"})));
    assert_eq!(errors.len(), 3);

    // Declaration order, each at its own field path.
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["name", "age", "admin"]);
}

#[test]
fn test_unknown_keys_are_dropped_from_output() {
    let schema = object().field("name", string());

    let validated = unwrap_success(schema.validate(&json!({"name": "Ada", "extra": true})));
    assert_eq!(validated.len(), 1);
    assert!(validated.get("extra").is_none());
}

#[test]
fn test_optional_field_is_omitted_when_absent() {
    let schema = object()
        .field("name", string())
        .optional_field("nickname", string());

    let validated = unwrap_success(schema.validate(&json!({"name": "Ada"})));
    assert!(!validated.contains_key("nickname"));

    let validated = unwrap_success(schema.validate(&json!({"name": "Ada", "nickname": "ada"})));
    assert_eq!(validated.get("nickname"), Some(&json!("ada")));

    // Present but wrong type still fails.
    let errors = unwrap_failure(schema.validate(&json!({"name": "Ada", "nickname": 1})));
    assert_eq!(errors.first().path.to_string(), "nickname");
}

#[test]
fn test_nested_object_paths() {
    let schema = object().field("user", object().field("email", string()));

    let errors = unwrap_failure(schema.validate(&json!({"user": {"email": 42}})));
    assert_eq!(errors.first().path.to_string(), "user.email");
}

#[test]
fn test_structural_validation_is_idempotent() {
    let schema = object()
        .field("name", string())
        .optional_field("tags", distrust::array(string()));

    let first = unwrap_success(schema.validate(&json!({"name": "Ada", "tags": ["x"], "junk": 1})));
    let second = unwrap_success(schema.validate(&serde_json::Value::Object(first.clone())));
    assert_eq!(first, second);
}

#[test]
fn test_validation_is_pure() {
    let schema = object().field("n", number());
    let input = json!({"n": 1});

    assert!(schema.validate(&input).is_success());
    assert!(schema.validate(&input).is_success());
    assert_eq!(input, json!({"n": 1}));
}

#[test]
fn test_dictionary_validates_all_entries() {
    let schema = dictionary(string(), number());

    let validated = unwrap_success(schema.validate(&json!({"ada": 10, "grace": 12})));
    assert_eq!(validated.get("ada"), Some(&json!(10)));
    assert_eq!(validated.len(), 2);

    let errors = unwrap_failure(schema.validate(&json!({"ada": 10, "grace": "x"})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "value error: expected number, got string");
    assert_eq!(errors.first().path.to_string(), "grace");
}

#[test]
fn test_dictionary_rejects_non_objects() {
    let errors = unwrap_failure(dictionary(string(), number()).validate(&json!(7)));
    assert_eq!(errors.first().code, "invalid_type");
}

#[test]
fn test_dictionary_domain_can_rewrite_keys() {
    let schema = dictionary(string().map(|s| s.to_uppercase()), number());

    let validated = unwrap_success(schema.validate(&json!({"ada": 1})));
    assert_eq!(validated.get("ADA"), Some(&json!(1)));
    assert!(validated.get("ada").is_none());
}

#[test]
fn test_dictionary_key_failure_still_checks_value() {
    // Domain rejects short keys; the value check runs regardless.
    let schema = dictionary(
        string().filter(|s| s.len() >= 3).with_error("key too short"),
        number(),
    );

    let errors = unwrap_failure(schema.validate(&json!({"ab": "nope"})));
    assert_eq!(errors.len(), 2);

    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"key error: key too short"));
    assert!(messages.contains(&"value error: expected number, got string"));
}
