//! Tests for sharing schemas across threads.

use inquest::{parse_batch, validate_batch, DynSchema, Schema, TypedSchema, Value};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn user() -> inquest::ObjectSchema {
    Schema::object()
        .field("name", Schema::string().min(1))
        .field("age", Schema::number().int().positive())
}

#[test]
fn test_concurrent_validation() {
    let schema = Arc::new(user());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let result = schema.validate(json!({
                    "name": format!("User{}", i),
                    "age": 20 + i
                }));
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let schema: DynSchema = user().into_dyn();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let schema = schema.clone();
            thread::spawn(move || {
                let input = if i % 2 == 0 {
                    json!({"name": "", "age": i})
                } else {
                    json!({"name": "ok", "age": i + 1})
                };
                (i, schema.parse(input))
            })
        })
        .collect();

    for handle in handles {
        let (i, result) = handle.join().unwrap();
        if i % 2 == 0 {
            let err = result.unwrap_err();
            assert_eq!(err.first().path.to_string(), "name");
            // age 0 is not positive
            let expected = if i == 0 { 2 } else { 1 };
            assert_eq!(err.len(), expected);
        } else {
            assert!(result.is_ok());
        }
    }
}

#[test]
fn test_builders_on_shared_schema_do_not_interfere() {
    let base = Arc::new(Schema::string().min(2).into_dyn());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let base = Arc::clone(&base);
            thread::spawn(move || {
                let narrowed = DynSchema::clone(&base).error(format!("short {i}"));
                let err = narrowed.parse("x").unwrap_err();
                assert_eq!(err.first().message, format!("short {i}"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let err = base.parse("x").unwrap_err();
    assert_eq!(
        err.first().message,
        "Too small: expected string to have >=2 characters"
    );
}

#[test]
fn test_parse_batch_preserves_order() {
    let schema = user();
    let inputs: Vec<Value> = (0..64)
        .map(|i| Value::from(json!({"name": "n", "age": i})))
        .collect();

    let results = parse_batch(&schema, inputs);
    assert_eq!(results.len(), 64);
    assert!(results[0].is_err());
    for (i, result) in results.iter().enumerate().skip(1) {
        let out = result.as_ref().unwrap();
        assert_eq!(out.get("age"), Some(&Value::Int(i as i64)));
    }
}

#[test]
fn test_validate_batch_collects_every_failure() {
    let schema = Schema::string().email();
    let inputs = vec![
        Value::from("a@example.com"),
        Value::from("nope"),
        Value::from("b@example.com"),
        Value::from(3),
    ];

    let err = validate_batch(&schema, inputs).into_result().unwrap_err();
    let paths: Vec<String> = err.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["[1]", "[3]"]);
}
