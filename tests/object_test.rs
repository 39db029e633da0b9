//! Integration tests for object and record schemas.

use inquest::{IssueCode, IssueDetails, Origin, Schema, TypedSchema, UnknownKeys, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn user() -> inquest::ObjectSchema {
    Schema::object()
        .field("name", Schema::string().min(2))
        .field("age", Schema::number().gte(18))
        .field("nickname", Schema::string().optional())
}

#[test]
fn test_every_field_is_visited() {
    let err = user().parse(json!({"name": "A", "age": 16})).unwrap_err();
    let paths: Vec<String> = err.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["name", "age"]);
}

#[test]
fn test_missing_required_field_reports_undefined() {
    let err = user().parse(json!({"name": "Alice"})).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.first().path.to_string(), "age");
    assert_eq!(
        err.first().message,
        "Invalid input: expected number, received undefined"
    );
}

#[test]
fn test_absent_optional_key_stays_absent() {
    let out = user().parse(json!({"name": "Alice", "age": 30})).unwrap();
    assert_eq!(out.len(), 2);
    assert!(!out.contains_key("nickname"));

    let out = user()
        .parse(json!({"name": "Alice", "age": 30, "nickname": "Al"}))
        .unwrap();
    assert_eq!(out.get("nickname"), Some(&Value::from("Al")));
}

#[test]
fn test_output_follows_declaration_order() {
    let out = user().parse(json!({"age": 30, "name": "Alice"})).unwrap();
    let keys: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "age"]);
}

#[test]
fn test_unknown_keys_are_stripped_by_default() {
    let out = user()
        .parse(json!({"name": "Alice", "age": 30, "extra": true}))
        .unwrap();
    assert!(!out.contains_key("extra"));
}

#[test]
fn test_strict_reports_all_unknown_keys_once() {
    let err = user()
        .strict()
        .parse(json!({"name": "Alice", "age": 30, "x": 1, "y": 2}))
        .unwrap_err();
    assert_eq!(err.len(), 1);
    let issue = err.first();
    assert_eq!(issue.code(), IssueCode::UnrecognizedKeys);
    assert!(issue.path.is_root());
    assert_eq!(issue.message, "Unrecognized keys: \"x\", \"y\"");
}

#[test]
fn test_passthrough_keeps_unknown_keys() {
    let out = user()
        .passthrough()
        .parse(json!({"name": "Alice", "age": 30, "extra": [1]}))
        .unwrap();
    assert_eq!(out.get("extra"), Some(&Value::Array(vec![Value::Int(1)])));

    // `true` is shorthand for passthrough, `false` for strict
    assert!(user()
        .unknown_keys(false)
        .parse(json!({"name": "Al", "age": 20, "z": 0}))
        .is_err());
}

#[test]
fn test_catchall_validates_unknown_values() {
    let schema = user().catchall(Schema::boolean());
    let out = schema
        .parse(json!({"name": "Alice", "age": 30, "admin": true}))
        .unwrap();
    assert_eq!(out.get("admin"), Some(&Value::Bool(true)));

    let err = schema
        .parse(json!({"name": "Alice", "age": 30, "admin": "yes"}))
        .unwrap_err();
    assert_eq!(err.first().path.to_string(), "admin");
}

#[test]
fn test_unknown_key_policy_enum() {
    let schema = user().unknown_keys(UnknownKeys::Catchall(Schema::number().into_dyn()));
    assert!(schema.parse(json!({"name": "Al", "age": 20, "n": 1})).is_ok());
    assert!(schema.parse(json!({"name": "Al", "age": 20, "n": "1"})).is_err());
}

#[test]
fn test_pick_and_omit() {
    let base = user();
    let picked = base.pick(["name"]);
    assert_eq!(picked.shape().len(), 1);
    assert!(picked.parse(json!({"name": "Alice"})).is_ok());

    let omitted = base.omit(["age", "nickname"]);
    let keys: Vec<&str> = omitted.shape().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name"]);

    // The source schema is untouched
    assert_eq!(base.shape().len(), 3);
}

#[test]
fn test_partial_makes_every_field_optional() {
    let schema = user().partial();
    assert!(schema.parse(json!({})).unwrap().is_empty());

    // Present values are still validated
    let err = schema.parse(json!({"age": 3})).unwrap_err();
    assert_eq!(err.first().path.to_string(), "age");
}

#[test]
fn test_extend_replaces_same_named_fields() {
    let schema = user().extend(Schema::object().field("age", Schema::string()));
    assert!(schema.parse(json!({"name": "Alice", "age": "old"})).is_ok());
}

#[test]
fn test_nested_object_paths() {
    let schema = Schema::object().field(
        "address",
        Schema::object().field("zip", Schema::string().length(5)),
    );
    let err = schema.parse(json!({"address": {"zip": "123"}})).unwrap_err();
    assert_eq!(err.first().path.to_string(), "address.zip");
}

#[test]
fn test_object_level_refinement_runs_after_fields() {
    let schema = Schema::object()
        .field("password", Schema::string())
        .field("confirm", Schema::string())
        .refine(
            |obj| obj.get("password") == obj.get("confirm"),
            inquest::Params::new().error("passwords differ").path(["confirm"]),
        );

    assert!(schema.parse(json!({"password": "a", "confirm": "a"})).is_ok());

    let err = schema.parse(json!({"password": "a", "confirm": "b"})).unwrap_err();
    assert_eq!(err.first().message, "passwords differ");
    assert_eq!(err.first().path.to_string(), "confirm");
}

#[test]
fn test_record_validates_keys_and_values() {
    let schema = Schema::record(Schema::string().min(2), Schema::number().nonnegative());
    let out = schema.parse(json!({"alice": 3, "bob": 0})).unwrap();
    assert_eq!(out.len(), 2);

    let err = schema.parse(json!({"x": 1, "carol": -1})).unwrap_err();
    assert_eq!(err.len(), 2);

    let key_issue = err.first();
    assert_eq!(key_issue.code(), IssueCode::InvalidKey);
    assert_eq!(key_issue.origin, Some(Origin::Record));
    assert_eq!(key_issue.path.to_string(), "x");
    assert_eq!(key_issue.message, "Invalid key in record");
    match &key_issue.details {
        IssueDetails::InvalidKey { issues } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code(), IssueCode::TooSmall);
        }
        other => panic!("unexpected details {other:?}"),
    }

    let value_issue = err.iter().nth(1).unwrap();
    assert_eq!(value_issue.code(), IssueCode::TooSmall);
    assert_eq!(value_issue.path.to_string(), "carol");
}

#[test]
fn test_record_key_transformations_rename_output_keys() {
    let schema = Schema::record(Schema::string().to_upper_case(), Schema::number());
    let out = schema.parse(json!({"a": 1})).unwrap();
    assert_eq!(out.get("A"), Some(&Value::Int(1)));
}
