//! Integration tests for self-referential schemas.

use distrust::{array, number, object, recursion, string, union, boxed, Validator};
use serde_json::json;

fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

#[test]
fn test_recursive_tree_schema() {
    let tree = recursion(|node| {
        object()
            .field("value", number())
            .optional_field("children", array(node))
    });

    let input = json!({
        "value": 1,
        "children": [
            {"value": 2},
            {"value": 3, "children": [{"value": 4}]},
        ],
    });
    assert!(tree.validate(&input).is_success());
}

#[test]
fn test_recursive_schema_reports_deep_paths() {
    let tree = recursion(|node| {
        object()
            .field("value", number())
            .optional_field("children", array(node))
    });

    let input = json!({
        "value": 1,
        "children": [{"value": "two"}],
    });

    let errors = unwrap_failure(tree.validate(&input));
    assert_eq!(errors.first().path.to_string(), "children.0.value");
}

#[test]
fn test_recursion_through_a_union() {
    // A JSON-like value: leaf string/number, or an array of itself.
    let value = recursion(|this| {
        union(vec![boxed(string()), boxed(number()), boxed(array(this))])
    });

    assert!(value.validate(&json!("leaf")).is_success());
    assert!(value.validate(&json!([1, ["a", [2]]])).is_success());
    assert!(value.validate(&json!([1, [true]])).is_failure());
}

#[test]
fn test_recursive_validator_is_reusable() {
    let tree = recursion(|node| {
        object()
            .field("value", number())
            .optional_field("children", array(node))
    });

    let input = json!({"value": 0});
    assert!(tree.validate(&input).is_success());
    assert!(tree.validate(&input).is_success());

    // Shared across threads too.
    let shared = tree.clone();
    let handle = std::thread::spawn(move || shared.validate(&json!({"value": 9})).is_success());
    assert!(handle.join().unwrap());
}
