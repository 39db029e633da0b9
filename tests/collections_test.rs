//! Integration tests for map and set schemas.

use inquest::{IssueCode, IssueDetails, Origin, Schema, TypedSchema, Value};
use pretty_assertions::assert_eq;

fn entries(pairs: Vec<(Value, Value)>) -> Value {
    Value::Map(pairs)
}

#[test]
fn test_map_accepts_matching_entries() {
    let schema = Schema::map(Schema::string(), Schema::number());
    let out = schema
        .parse(entries(vec![
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(2.5)),
        ]))
        .unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[1], (Value::from("b"), Value::Float(2.5)));
}

#[test]
fn test_map_rejects_non_maps() {
    let err = Schema::map(Schema::string(), Schema::number())
        .parse(Value::object([("a", 1)]))
        .unwrap_err();
    assert_eq!(err.first().code(), IssueCode::InvalidType);
}

#[test]
fn test_map_invalid_key_nests_key_issues() {
    let schema = Schema::map(Schema::string(), Schema::number());
    let err = schema
        .parse(entries(vec![(Value::Int(7), Value::from(1))]))
        .unwrap_err();
    let issue = err.first();
    assert_eq!(issue.code(), IssueCode::InvalidKey);
    assert_eq!(issue.origin, Some(Origin::Map));
    assert_eq!(issue.message, "Invalid key in map");
    match &issue.details {
        IssueDetails::InvalidKey { issues } => {
            assert_eq!(issues[0].code(), IssueCode::InvalidType);
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn test_map_value_issues_are_addressed_by_key() {
    let schema = Schema::map(Schema::string(), Schema::number().positive());
    let err = schema
        .parse(entries(vec![(Value::from("width"), Value::from(-1))]))
        .unwrap_err();
    assert_eq!(err.first().code(), IssueCode::TooSmall);
    assert_eq!(err.first().path.to_string(), "width");
}

#[test]
fn test_map_value_issues_under_unaddressable_keys() {
    let schema = Schema::map(Schema::boolean(), Schema::string());
    let err = schema
        .parse(entries(vec![(Value::Bool(true), Value::from(1))]))
        .unwrap_err();
    let issue = err.first();
    assert_eq!(issue.code(), IssueCode::InvalidElement);
    assert_eq!(issue.message, "Invalid value in map");
    match &issue.details {
        IssueDetails::InvalidElement { key, issues } => {
            assert_eq!(key, &Value::Bool(true));
            assert_eq!(issues.len(), 1);
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn test_map_key_and_value_failures_are_both_reported() {
    let schema = Schema::map(Schema::string().min(3), Schema::number());
    let err = schema
        .parse(entries(vec![(Value::from("ab"), Value::from("x"))]))
        .unwrap_err();
    let codes: Vec<IssueCode> = err.iter().map(|i| i.code()).collect();
    assert_eq!(codes, vec![IssueCode::InvalidKey, IssueCode::InvalidType]);
}

#[test]
fn test_map_size_constraints() {
    let schema = Schema::map(Schema::string(), Schema::number()).min(1).max(2);
    let err = schema.parse(entries(vec![])).unwrap_err();
    assert_eq!(err.first().message, "Too small: expected map to have >=1 entries");

    let big = entries(vec![
        (Value::from("a"), Value::from(1)),
        (Value::from("b"), Value::from(2)),
        (Value::from("c"), Value::from(3)),
    ]);
    assert_eq!(schema.parse(big).unwrap_err().first().code(), IssueCode::TooBig);
}

#[test]
fn test_set_members_become_invalid_element() {
    let schema = Schema::set(Schema::number().int());
    let err = schema
        .parse(Value::Set(vec![Value::from(1), Value::from(1.5), Value::from(2)]))
        .unwrap_err();
    assert_eq!(err.len(), 1);
    let issue = err.first();
    assert_eq!(issue.code(), IssueCode::InvalidElement);
    assert_eq!(issue.origin, Some(Origin::Set));
    assert!(issue.path.is_root());
    match &issue.details {
        IssueDetails::InvalidElement { key, .. } => assert_eq!(key, &Value::Float(1.5)),
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn test_set_size_constraints() {
    let schema = Schema::set(Schema::string()).size(2);
    assert!(schema
        .parse(Value::Set(vec![Value::from("a"), Value::from("b")]))
        .is_ok());

    let err = schema.parse(Value::Set(vec![Value::from("a")])).unwrap_err();
    assert_eq!(err.first().code(), IssueCode::TooSmall);
    assert_eq!(err.first().origin, Some(Origin::Set));

    assert!(Schema::set(Schema::string())
        .nonempty()
        .parse(Value::Set(vec![]))
        .is_err());
}

#[test]
fn test_set_rejects_arrays() {
    let err = Schema::set(Schema::string())
        .parse(vec!["a"])
        .unwrap_err();
    assert_eq!(err.first().code(), IssueCode::InvalidType);
}
