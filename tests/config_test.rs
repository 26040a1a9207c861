//! Integration tests for per-call configuration.

use distrust::{
    array, number, object, snake_case_transformation, string, Config, Validator,
};
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
fn test_snake_case_lookup_keeps_declared_names_in_output() {
    let schema = object().field("maxRetries", number()).field("baseURL", string());
    let config = Config::new().transform_object_keys(snake_case_transformation);

    let input = json!({"max_retries": 3, "base_url": "http://localhost"});
    let validated = unwrap_success(schema.validate_with(&input, &config));

    // Lookup is transformed; output keys are the declared camelCase names.
    assert_eq!(validated.get("maxRetries"), Some(&json!(3)));
    assert_eq!(validated.get("baseURL"), Some(&json!("http://localhost")));
    assert!(validated.get("max_retries").is_none());
}

#[test]
fn test_without_transform_snake_case_input_fails() {
    let schema = object().field("maxRetries", number());

    let errors = unwrap_failure(schema.validate(&json!({"max_retries": 3})));
    assert_eq!(errors.first().path.to_string(), "maxRetries");
    assert_eq!(errors.first().message, "expected number, got missing");
}

#[test]
fn test_config_reaches_nested_validators() {
    let schema = object().field(
        "httpOptions",
        object().field("requestTimeout", number()),
    );
    let config = Config::new().transform_object_keys(snake_case_transformation);

    let input = json!({"http_options": {"request_timeout": 30}});
    assert!(schema.validate_with(&input, &config).is_success());

    let nested = object().field("items", array(object().field("itemId", number())));
    let input = json!({"items": [{"item_id": 1}, {"item_id": 2}]});
    assert!(nested.validate_with(&input, &config).is_success());
}

#[test]
fn test_custom_transform() {
    let schema = object().field("name", string());
    let config = Config::new().transform_object_keys(|key: &str| key.to_uppercase());

    assert!(schema.validate_with(&json!({"NAME": "Ada"}), &config).is_success());
    assert!(schema.validate_with(&json!({"name": "Ada"}), &config).is_failure());
}

#[test]
fn test_config_is_cheap_to_clone_and_share() {
    let config = Config::new().transform_object_keys(snake_case_transformation);
    let schema = object().field("maxRetries", number());

    let cloned = config.clone();
    assert!(schema.validate_with(&json!({"max_retries": 1}), &cloned).is_success());

    let handle = std::thread::spawn(move || {
        schema.validate_with(&json!({"max_retries": 2}), &config).is_success()
    });
    assert!(handle.join().unwrap());
}
