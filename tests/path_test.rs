//! Integration tests for JsonPath and dot-path rendering.

use inquest::{to_dot_path, JsonPath, PathSegment, Schema, TypedSchema};
use serde_json::json;

#[test]
fn test_path_construction_and_display() {
    // Root path
    assert_eq!(JsonPath::root().to_string(), "");

    // Simple field
    assert_eq!(JsonPath::root().push_field("name").to_string(), "name");

    // Simple index
    assert_eq!(JsonPath::root().push_index(0).to_string(), "[0]");

    // Complex nested path
    let path = JsonPath::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "users[0].address.city");
}

#[test]
fn test_fields_with_special_characters_are_quoted() {
    let path = JsonPath::root()
        .push_field("headers")
        .push_field("content-type");
    assert_eq!(path.to_string(), r#"headers["content-type"]"#);

    let path = JsonPath::from_field("say \"hi\"");
    assert_eq!(path.to_string(), r#"["say \"hi\""]"#);

    // `$` and `_` are word characters
    assert_eq!(JsonPath::from_field("$ref_id").to_string(), "$ref_id");
}

#[test]
fn test_integer_only_paths() {
    let path = JsonPath::root().push_index(0).push_index(1).push_index(2);
    assert_eq!(path.to_string(), "[0][1][2]");
}

#[test]
fn test_free_function_matches_method() {
    let segments = vec![
        PathSegment::field("a"),
        PathSegment::index(3),
        PathSegment::field("b c"),
    ];
    let path: JsonPath = segments.iter().cloned().collect();
    assert_eq!(to_dot_path(&segments), path.to_dot_path());
    assert_eq!(path.to_string(), r#"a[3]["b c"]"#);
}

#[test]
fn test_path_is_immutable() {
    let base = JsonPath::root().push_field("items");

    let path1 = base.push_index(0);
    let path2 = base.push_index(1);
    let path3 = base.push_field("count");

    // Base path unchanged
    assert_eq!(base.to_string(), "items");

    // Each branch is independent
    assert_eq!(path1.to_string(), "items[0]");
    assert_eq!(path2.to_string(), "items[1]");
    assert_eq!(path3.to_string(), "items.count");
}

#[test]
fn test_path_parent_chain() {
    let path = JsonPath::root()
        .push_field("a")
        .push_field("b")
        .push_index(0);

    let parent1 = path.parent().expect("should have parent");
    assert_eq!(parent1.to_string(), "a.b");

    let parent2 = parent1.parent().expect("should have parent");
    assert_eq!(parent2.to_string(), "a");

    let parent3 = parent2.parent().expect("should have parent");
    assert!(parent3.is_root());

    assert!(parent3.parent().is_none());
}

#[test]
fn test_prepend_and_join() {
    let mut path = JsonPath::from_field("email");
    path.prepend(PathSegment::Index(2));
    assert_eq!(path.to_string(), "[2].email");

    let joined = JsonPath::from_field("users").join(&path);
    assert_eq!(joined.to_string(), "users[2].email");
}

#[test]
fn test_issue_paths_address_offending_values() {
    let schema = Schema::object().field(
        "users",
        Schema::array(
            Schema::object()
                .field("email", Schema::string().email())
                .field("tags", Schema::array(Schema::string())),
        ),
    );
    let input = json!({
        "users": [
            {"email": "a@example.com", "tags": []},
            {"email": "nope", "tags": ["ok", 3]}
        ]
    });

    let err = schema.parse(input).unwrap_err();
    let paths: Vec<String> = err.iter().map(|issue| issue.path.to_string()).collect();
    assert_eq!(paths, vec!["users[1].email", "users[1].tags[1]"]);
}

#[test]
fn test_path_hash() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(JsonPath::root().push_field("a"));
    set.insert(JsonPath::root().push_field("b"));
    set.insert(JsonPath::root().push_field("a")); // duplicate

    assert_eq!(set.len(), 2);
}

#[test]
fn test_empty_field_renders_quoted() {
    assert_eq!(JsonPath::from_field("").to_string(), r#"[""]"#);
    assert_eq!(JsonPath::from_field("a").push_field("").to_string(), r#"a[""]"#);

    let schema = Schema::object().field("", Schema::number());
    let err = schema.parse(json!({"": "x"})).unwrap_err();
    assert_eq!(
        err.prettify(),
        "✖ Invalid input: expected number, received string\n  → at [\"\"]"
    );
}
