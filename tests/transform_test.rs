//! Integration tests for the transformation chain.

use distrust::{
    array, iso_date, matching, number, object, string, unknown, Rejection, Validator,
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
fn test_map_transforms_the_success_value() {
    let len = string().map(|s| s.len());
    assert_eq!(unwrap_success(len.validate(&json!("hello"))), 5);

    // Upstream failures pass through untouched.
    let errors = unwrap_failure(len.validate(&json!(1)));
    assert_eq!(errors.first().code, "invalid_type");
}

#[test]
fn test_map_composes_inside_containers() {
    let schema = object().field("name", string().map(|s| s.to_uppercase()));
    let validated = unwrap_success(schema.validate(&json!({"name": "ada"})));
    assert_eq!(validated.get("name"), Some(&json!("ADA")));
}

#[test]
fn test_and_then_lifts_err_to_the_current_path() {
    let port = number().and_then(|n| {
        if (1.0..=65535.0).contains(&n) {
            Ok(n as u16)
        } else {
            Err(format!("port out of range: {n}"))
        }
    });

    assert_eq!(unwrap_success(port.validate(&json!(8080))), 8080);

    let schema = object().field("port", port);
    let errors = unwrap_failure(schema.validate(&json!({"port": 99999})));
    assert_eq!(errors.first().code, "custom");
    assert_eq!(errors.first().path.to_string(), "port");
    assert_eq!(errors.first().message, "port out of range: 99999");
}

#[test]
fn test_and_then_skips_on_upstream_failure() {
    let port = number().and_then(|n| Ok::<_, String>(n as u16));
    let errors = unwrap_failure(port.validate(&json!("8080")));
    assert_eq!(errors.first().code, "invalid_type");
}

#[test]
fn test_filter() {
    let positive = number().filter(|n| *n > 0.0);

    assert_eq!(unwrap_success(positive.validate(&json!(3))), 3.0);

    let errors = unwrap_failure(positive.validate(&json!(-3)));
    assert_eq!(errors.first().code, "filter");
    assert_eq!(errors.first().message, "filter error: -3");
}

#[test]
fn test_then_pipes_into_a_second_validator() {
    let schema = unknown().then(number());

    assert_eq!(unwrap_success(schema.validate(&json!(1))), 1.0);
    assert!(schema.validate(&json!("x")).is_failure());
}

#[test]
fn test_with_error_replaces_all_failures() {
    let schema = string().filter(|s| s.contains('@')).with_error("not an email");

    assert!(schema.validate(&json!("a@b")).is_success());

    for bad in [json!(1), json!("nope")] {
        let errors = unwrap_failure(schema.validate(&bad));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "not an email");
        assert_eq!(errors.first().code, "custom");
    }
}

#[test]
fn test_optional_rejects_null() {
    // optional() only widens to missing; null is still a failure at the root.
    let schema = string().optional();
    assert!(schema.validate(&json!(null)).is_failure());
    assert_eq!(
        unwrap_success(schema.validate(&json!("x"))),
        Some("x".to_string())
    );
}

#[test]
fn test_nullable() {
    let schema = string().nullable();

    assert_eq!(unwrap_success(schema.validate(&json!(null))), None);
    assert_eq!(
        unwrap_success(schema.validate(&json!("x"))),
        Some("x".to_string())
    );
    assert!(schema.validate(&json!(1)).is_failure());
}

#[test]
fn test_nullable_field_keeps_null_in_output() {
    let schema = object().field("middle", string().nullable());
    let validated = unwrap_success(schema.validate(&json!({"middle": null})));
    assert_eq!(validated.get("middle"), Some(&json!(null)));
}

#[test]
fn test_default_to() {
    let retries = number().default_to(3.0);

    assert_eq!(unwrap_success(retries.validate(&json!(null))), 3.0);
    assert_eq!(unwrap_success(retries.validate(&json!(7))), 7.0);
    assert!(retries.validate(&json!("x")).is_failure());

    // A missing field picks up the default inside an object.
    let schema = object().field("retries", number().default_to(3.0));
    let validated = unwrap_success(schema.validate(&json!({})));
    assert_eq!(validated.get("retries"), Some(&json!(3.0)));
}

#[test]
fn test_transform_sees_result_value_and_path() {
    // Recover from failure by falling back to the raw input's string form.
    let schema = string().transform(|result, value, _path| match result.into_result() {
        Ok(s) => Ok(s),
        Err(_) => match value {
            Some(v) => Ok(v.to_string()),
            None => Err(Rejection::from("no value present")),
        },
    });

    assert_eq!(unwrap_success(schema.validate(&json!("x"))), "x");
    assert_eq!(unwrap_success(schema.validate(&json!(42))), "42");
}

#[test]
fn test_transform_message_rejection_lands_at_current_path() {
    let schema = object().field(
        "n",
        number().transform(|result, _, _| -> Result<f64, Rejection> {
            result.into_result().map_err(Rejection::Errors)?;
            Err(Rejection::from("always rejected"))
        }),
    );

    let errors = unwrap_failure(schema.validate(&json!({"n": 1})));
    assert_eq!(errors.first().path.to_string(), "n");
    assert_eq!(errors.first().code, "custom");
}

#[test]
fn test_chains_compose() {
    let schema = array(
        string()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .with_error("blank entry"),
    );

    assert_eq!(
        unwrap_success(schema.validate(&json!([" a ", "b"]))),
        vec!["a".to_string(), "b".to_string()]
    );

    let errors = unwrap_failure(schema.validate(&json!(["a", "  "])));
    assert_eq!(errors.first().path.to_string(), "1");
    assert_eq!(errors.first().message, "blank entry");
}

#[test]
fn test_iso_date() {
    let parsed = unwrap_success(iso_date().validate(&json!("2024-01-15T10:30:00Z")));
    assert_eq!(parsed.to_rfc3339(), "2024-01-15T10:30:00+00:00");

    let errors = unwrap_failure(iso_date().validate(&json!("2024-99-99")));
    assert_eq!(errors.first().code, "custom");
    assert!(errors.first().message.starts_with("not a valid ISO 8601 date"));

    assert!(iso_date().validate(&json!(20240115)).is_failure());
}

#[test]
fn test_matching() {
    let hex = matching(r"^[0-9a-f]+$").unwrap();

    assert_eq!(unwrap_success(hex.validate(&json!("deadbeef"))), "deadbeef");

    let errors = unwrap_failure(hex.validate(&json!("XYZ")));
    assert!(errors.first().message.contains("does not match pattern"));

    assert!(matching(r"[unclosed").is_err());
}
