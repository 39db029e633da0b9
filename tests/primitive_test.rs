//! Integration tests for boolean, literal, enum, date, file and unknown schemas.

use chrono::{TimeZone, Utc};
use inquest::{FileValue, IssueCode, Origin, ParsedType, Schema, TypedSchema, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_boolean_strict_and_coerced() {
    assert!(Schema::boolean().parse(true).unwrap());
    let err = Schema::boolean().parse("true").unwrap_err();
    assert_eq!(err.first().expected(), Some(ParsedType::Bool));

    let coerced = Schema::boolean().coerce();
    assert!(coerced.parse("false").unwrap());
    assert!(!coerced.parse("").unwrap());
    assert!(!coerced.parse(0).unwrap());
    assert!(coerced.parse(vec![0]).unwrap());
}

#[test]
fn test_literal_matches_exactly() {
    let schema = Schema::literal("admin");
    assert_eq!(schema.value(), &Value::from("admin"));
    assert_eq!(schema.parse("admin").unwrap(), Value::from("admin"));

    let err = schema.parse("Admin").unwrap_err();
    assert_eq!(err.first().code(), IssueCode::InvalidValue);
    assert_eq!(err.first().message, "Invalid input: expected \"admin\"");
}

#[test]
fn test_enumeration_lists_options() {
    let role = Schema::enumeration(["user", "admin", "owner"]);
    assert!(role.parse("owner").is_ok());

    let err = role.parse("root").unwrap_err();
    assert_eq!(
        err.first().message,
        "Invalid option: expected one of \"user\"|\"admin\"|\"owner\""
    );

    let staff = role.extract(["admin", "owner"]);
    assert_eq!(staff.options().len(), 2);
    assert!(staff.parse("user").is_err());

    let members = role.exclude(["owner"]);
    assert_eq!(
        members.options(),
        &[Value::from("user"), Value::from("admin")]
    );
}

#[test]
fn test_date_bounds() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
    let schema = Schema::date().min(start).max(end);

    let mid = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(schema.parse(mid).unwrap(), mid);

    let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let err = schema.parse(late).unwrap_err();
    assert_eq!(err.first().code(), IssueCode::TooBig);
    assert_eq!(err.first().origin, Some(Origin::Date));
}

#[test]
fn test_date_coercion() {
    let strict = Schema::date();
    assert_eq!(
        strict.parse("2024-01-01").unwrap_err().first().expected(),
        Some(ParsedType::Date)
    );

    let schema = Schema::date().coerce();
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(schema.parse("2024-03-01").unwrap(), expected);
    assert_eq!(schema.parse("2024-03-01T00:00:00Z").unwrap(), expected);
    assert_eq!(
        schema.parse(expected.timestamp_millis()).unwrap(),
        expected
    );
    assert!(schema.parse("March 1st").is_err());
}

#[test]
fn test_file_size_and_mime() {
    let schema = Schema::file().min(10).max(100).mime(["text/plain"]);
    assert!(schema.parse(FileValue::new("a.txt", "text/plain", 50)).is_ok());

    let err = schema
        .parse(FileValue::new("a.txt", "text/plain", 500))
        .unwrap_err();
    assert_eq!(err.first().message, "Too big: expected file to have <=100 bytes");

    let err = schema
        .parse(FileValue::new("a.bin", "application/octet-stream", 50))
        .unwrap_err();
    assert_eq!(err.first().code(), IssueCode::InvalidValue);
    assert_eq!(err.first().path.to_string(), "type");
}

#[test]
fn test_unknown_accepts_everything() {
    let schema = Schema::unknown();
    assert_eq!(schema.parse(Value::Undefined).unwrap(), Value::Undefined);
    assert_eq!(schema.parse(Value::Null).unwrap(), Value::Null);
    assert_eq!(schema.parse(3).unwrap(), Value::Int(3));

    // Checks still apply
    let nonnull = Schema::any().refine(|v: &Value| !v.is_nullish(), "required");
    assert!(nonnull.parse(Value::Null).is_err());
}
