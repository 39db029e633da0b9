//! Error presentation.
//!
//! Four renderings of a [`ParseError`]:
//! - [`prettify`]: human-readable text
//! - [`format_error`]: a nested record keyed by path segment, `_errors` at each node
//! - [`treeify_error`]: a tree separating string-keyed `properties` from indexed `items`
//! - [`flatten_error`]: form-level errors plus errors grouped by first path segment
//!
//! The nested renderings recurse into `invalid_union`, `invalid_key` and
//! `invalid_element` issues, placing their sub-issues under the issue's own path.

use indexmap::IndexMap;
use serde_json::{json, Map};

use crate::error::issue::{Issue, IssueDetails};
use crate::error::parse_error::ParseError;
use crate::path::{JsonPath, PathSegment};

/// Renders one `✖ <message>` line per issue, followed by `  → at <path>` when
/// the path is non-empty. Issues are stably sorted by path length.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min(2))
///     .field("age", Schema::number().gte(18));
/// let err = schema.parse(serde_json::json!({"name": "A", "age": 16})).unwrap_err();
///
/// let text = err.prettify();
/// assert!(text.contains("→ at name"));
/// assert!(text.contains("→ at age"));
/// ```
pub fn prettify(err: &ParseError) -> String {
    let mut issues: Vec<&Issue> = err.iter().collect();
    issues.sort_by_key(|issue| issue.path.len());

    let mut lines = Vec::with_capacity(issues.len() * 2);
    for issue in issues {
        lines.push(format!("✖ {}", issue.message));
        if !issue.path.is_empty() {
            lines.push(format!("  → at {}", issue.path.to_dot_path()));
        }
    }
    lines.join("\n")
}

const ERRORS_KEY: &str = "_errors";

/// A node of the nested formatted shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedError {
    /// Messages of issues located exactly at this node.
    pub errors: Vec<String>,
    pub fields: IndexMap<String, FormattedError>,
}

impl FormattedError {
    /// Returns the child node for a property name or index.
    pub fn get(&self, key: impl Into<PathSegment>) -> Option<&FormattedError> {
        self.fields.get(&key.into().as_key())
    }

    /// Renders as `{"_errors": [...], "<key>": {...}, ...}`.
    ///
    /// A child keyed `_errors` would collide with the node's own messages, so
    /// it is left out of the JSON; it stays reachable through [`Self::get`].
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = Map::new();
        out.insert(ERRORS_KEY.into(), json!(self.errors));
        for (key, node) in self.fields.iter().filter(|(key, _)| *key != ERRORS_KEY) {
            out.insert(key.clone(), node.to_json());
        }
        serde_json::Value::Object(out)
    }

    fn node_mut(&mut self, path: &JsonPath) -> &mut FormattedError {
        path.segments().fold(self, |node, segment| {
            node.fields.entry(segment.as_key()).or_default()
        })
    }
}

/// Builds the nested formatted shape, mapping each issue to a message.
pub fn format_error<F>(err: &ParseError, mapper: F) -> FormattedError
where
    F: Fn(&Issue) -> String,
{
    let mut root = FormattedError::default();
    for issue in err.iter() {
        format_issue(&mut root, issue, &JsonPath::root(), &mapper);
    }
    root
}

fn format_issue<F>(root: &mut FormattedError, issue: &Issue, base: &JsonPath, mapper: &F)
where
    F: Fn(&Issue) -> String,
{
    let path = base.join(&issue.path);
    match nested_issues(issue) {
        Some(groups) => {
            for group in groups {
                for nested in group {
                    format_issue(root, nested, &path, mapper);
                }
            }
        }
        None => root.node_mut(&path).errors.push(mapper(issue)),
    }
}

/// A node of the tree rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorTree {
    pub errors: Vec<String>,
    pub properties: IndexMap<String, ErrorTree>,
    /// Indexed children; gaps are `None`.
    pub items: Vec<Option<ErrorTree>>,
}

impl ErrorTree {
    pub fn property(&self, name: &str) -> Option<&ErrorTree> {
        self.properties.get(name)
    }

    pub fn item(&self, index: usize) -> Option<&ErrorTree> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Renders as `{"errors": [...], "properties"?: {...}, "items"?: [...]}`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = Map::new();
        out.insert("errors".into(), json!(self.errors));
        if !self.properties.is_empty() {
            let properties: Map<String, serde_json::Value> = self
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect();
            out.insert("properties".into(), serde_json::Value::Object(properties));
        }
        if !self.items.is_empty() {
            let items: Vec<serde_json::Value> = self
                .items
                .iter()
                .map(|item| item.as_ref().map_or(serde_json::Value::Null, ErrorTree::to_json))
                .collect();
            out.insert("items".into(), serde_json::Value::Array(items));
        }
        serde_json::Value::Object(out)
    }

    fn node_mut(&mut self, path: &JsonPath) -> &mut ErrorTree {
        path.segments().fold(self, |node, segment| match segment {
            PathSegment::Field(name) => node.properties.entry(name.clone()).or_default(),
            PathSegment::Index(idx) => {
                if node.items.len() <= *idx {
                    node.items.resize_with(idx + 1, || None);
                }
                node.items[*idx].get_or_insert_with(ErrorTree::default)
            }
        })
    }
}

/// Builds the error tree, mapping each issue to a message.
pub fn treeify_error<F>(err: &ParseError, mapper: F) -> ErrorTree
where
    F: Fn(&Issue) -> String,
{
    let mut root = ErrorTree::default();
    for issue in err.iter() {
        treeify_issue(&mut root, issue, &JsonPath::root(), &mapper);
    }
    root
}

fn treeify_issue<F>(root: &mut ErrorTree, issue: &Issue, base: &JsonPath, mapper: &F)
where
    F: Fn(&Issue) -> String,
{
    let path = base.join(&issue.path);
    match nested_issues(issue) {
        Some(groups) => {
            for group in groups {
                for nested in group {
                    treeify_issue(root, nested, &path, mapper);
                }
            }
        }
        None => root.node_mut(&path).errors.push(mapper(issue)),
    }
}

/// Form-level and per-field messages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlattenedError {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl FlattenedError {
    pub fn to_json(&self) -> serde_json::Value {
        let fields: Map<String, serde_json::Value> = self
            .field_errors
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();
        json!({
            "formErrors": self.form_errors,
            "fieldErrors": fields,
        })
    }
}

/// Splits issues into root-level messages and messages grouped by the first
/// path segment.
pub fn flatten_error<F>(err: &ParseError, mapper: F) -> FlattenedError
where
    F: Fn(&Issue) -> String,
{
    let mut out = FlattenedError::default();
    for issue in err.iter() {
        match issue.path.first() {
            Some(segment) => out
                .field_errors
                .entry(segment.as_key())
                .or_default()
                .push(mapper(issue)),
            None => out.form_errors.push(mapper(issue)),
        }
    }
    out
}

fn nested_issues(issue: &Issue) -> Option<Vec<&[Issue]>> {
    match &issue.details {
        IssueDetails::InvalidUnion { errors } if !errors.is_empty() => {
            Some(errors.iter().map(Vec::as_slice).collect())
        }
        IssueDetails::InvalidKey { issues } | IssueDetails::InvalidElement { issues, .. }
            if !issues.is_empty() =>
        {
            Some(vec![issues.as_slice()])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ParsedType;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn custom(path: JsonPath, message: &str) -> Issue {
        Issue {
            message: message.to_string(),
            path,
            input: None,
            origin: None,
            details: IssueDetails::Custom {
                params: IndexMap::new(),
            },
        }
    }

    fn error(issues: Vec<Issue>) -> ParseError {
        ParseError::from_issues(issues).unwrap()
    }

    #[test]
    fn test_prettify_sorts_by_path_length() {
        let err = error(vec![
            custom(JsonPath::from_field("a").push_index(0), "deep"),
            custom(JsonPath::root(), "root"),
            custom(JsonPath::from_field("b"), "shallow"),
        ]);
        assert_eq!(
            prettify(&err),
            "✖ root\n✖ shallow\n  → at b\n✖ deep\n  → at a[0]"
        );
    }

    #[test]
    fn test_formatted_json_keeps_own_errors_on_key_collision() {
        let err = error(vec![
            custom(JsonPath::root(), "form"),
            custom(JsonPath::from_field("_errors"), "field"),
        ]);
        let formatted = err.format();
        assert_eq!(formatted.get("_errors").unwrap().errors, vec!["field"]);
        assert_eq!(formatted.to_json(), json!({"_errors": ["form"]}));
    }

    #[test]
    fn test_format_nests_by_segment() {
        let err = error(vec![
            custom(JsonPath::root(), "form"),
            custom(JsonPath::from_field("user").push_field("name"), "name bad"),
            custom(JsonPath::from_field("tags").push_index(1), "tag bad"),
        ]);
        let formatted = format_error(&err, |i| i.message.clone());

        assert_eq!(formatted.errors, vec!["form"]);
        let name = formatted.get("user").and_then(|u| u.get("name")).unwrap();
        assert_eq!(name.errors, vec!["name bad"]);
        let tag = formatted.get("tags").and_then(|t| t.get(1usize)).unwrap();
        assert_eq!(tag.errors, vec!["tag bad"]);

        assert_eq!(
            formatted.to_json(),
            json!({
                "_errors": ["form"],
                "user": {"_errors": [], "name": {"_errors": ["name bad"]}},
                "tags": {"_errors": [], "1": {"_errors": ["tag bad"]}},
            })
        );
    }

    #[test]
    fn test_union_branches_merge_at_issue_path() {
        let branch_a = vec![custom(JsonPath::from_field("x"), "a failed")];
        let branch_b = vec![custom(JsonPath::root(), "b failed")];
        let union = Issue {
            message: "Invalid input".into(),
            path: JsonPath::from_field("field"),
            input: None,
            origin: None,
            details: IssueDetails::InvalidUnion {
                errors: vec![branch_a, branch_b],
            },
        };
        let err = error(vec![union]);

        let formatted = format_error(&err, |i| i.message.clone());
        let field = formatted.get("field").unwrap();
        assert_eq!(field.errors, vec!["b failed"]);
        assert_eq!(field.get("x").unwrap().errors, vec!["a failed"]);

        let tree = treeify_error(&err, |i| i.message.clone());
        let field = tree.property("field").unwrap();
        assert_eq!(field.errors, vec!["b failed"]);
        assert_eq!(field.property("x").unwrap().errors, vec!["a failed"]);
    }

    #[test]
    fn test_element_issues_recurse() {
        let nested = Issue {
            message: "bad".into(),
            path: JsonPath::root(),
            input: None,
            origin: None,
            details: IssueDetails::InvalidType {
                expected: ParsedType::String,
                received: ParsedType::Number,
            },
        };
        let element = Issue {
            message: "Invalid value in set".into(),
            path: JsonPath::from_field("tags"),
            input: None,
            origin: None,
            details: IssueDetails::InvalidElement {
                key: Value::Int(3),
                issues: vec![nested],
            },
        };
        let tree = treeify_error(&error(vec![element]), |i| i.message.clone());
        assert_eq!(tree.property("tags").unwrap().errors, vec!["bad"]);
    }

    #[test]
    fn test_treeify_items_and_gaps() {
        let err = error(vec![custom(JsonPath::from_index(2), "third")]);
        let tree = treeify_error(&err, |i| i.message.clone());
        assert_eq!(tree.items.len(), 3);
        assert!(tree.item(0).is_none());
        assert_eq!(tree.item(2).unwrap().errors, vec!["third"]);
        assert_eq!(
            tree.to_json(),
            json!({"errors": [], "items": [null, null, {"errors": ["third"]}]})
        );
    }

    #[test]
    fn test_flatten_groups_by_first_segment() {
        let err = error(vec![
            custom(JsonPath::root(), "form"),
            custom(JsonPath::from_field("a").push_field("b"), "ab"),
            custom(JsonPath::from_field("a"), "a"),
            custom(JsonPath::from_index(0), "zero"),
        ]);
        let flat = flatten_error(&err, |i| i.message.clone());
        assert_eq!(flat.form_errors, vec!["form"]);
        assert_eq!(flat.field_errors["a"], vec!["ab", "a"]);
        assert_eq!(flat.field_errors["0"], vec!["zero"]);
    }

    #[test]
    fn test_mapper_is_applied() {
        let err = error(vec![custom(JsonPath::from_field("a"), "msg")]);
        let flat = flatten_error(&err, |i| format!("{}!", i.code()));
        assert_eq!(flat.field_errors["a"], vec!["custom!"]);
    }
}
