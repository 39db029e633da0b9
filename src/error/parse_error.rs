//! The aggregated parse error.
//!
//! A failed top-level parse yields one [`ParseError`] carrying every finalized
//! issue in the order it was produced, plus the original input when input echo
//! is enabled.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::error::format::{self, ErrorTree, FlattenedError, FormattedError};
use crate::error::issue::{Issue, IssueCode};
use crate::path::JsonPath;
use crate::value::Value;

/// A non-empty collection of finalized issues.
///
/// `ParseError` wraps a `NonEmptyVec<Issue>` so a failure always carries at
/// least one issue. It renders as the prettified form and implements
/// `Semigroup`, so errors from independent parses can be combined:
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
/// use stillwater::prelude::*;
///
/// let name = Schema::string().min(2).parse("A").unwrap_err();
/// let age = Schema::number().gte(18).parse(16).unwrap_err();
///
/// let combined = name.combine(age);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    issues: NonEmptyVec<Issue>,
    input: Option<Value>,
}

impl ParseError {
    pub fn single(issue: Issue) -> Self {
        Self {
            issues: NonEmptyVec::singleton(issue),
            input: None,
        }
    }

    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self {
            issues,
            input: None,
        }
    }

    /// Returns `None` when `issues` is empty.
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self::from_non_empty)
    }

    /// Attaches the original input.
    pub fn with_input(mut self, input: Option<Value>) -> Self {
        self.input = input;
        self
    }

    /// The name tag of this error kind.
    pub fn name(&self) -> &'static str {
        "ParseError"
    }

    /// The original input, when input echo was enabled.
    pub fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always false; a parse error holds at least one issue.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn first(&self) -> &Issue {
        self.issues.head()
    }

    /// Returns all issues at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&Issue> {
        self.issues.iter().filter(|i| &i.path == path).collect()
    }

    /// Returns all issues with the specified code.
    pub fn with_code(&self, code: IssueCode) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.code() == code).collect()
    }

    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Issue> {
        &self.issues
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.issues.into_vec()
    }

    /// One `✖ message` line per issue, shallowest paths first.
    pub fn prettify(&self) -> String {
        format::prettify(self)
    }

    pub fn format(&self) -> FormattedError {
        format::format_error(self, |issue| issue.message.clone())
    }

    pub fn format_with<F>(&self, mapper: F) -> FormattedError
    where
        F: Fn(&Issue) -> String,
    {
        format::format_error(self, mapper)
    }

    pub fn treeify(&self) -> ErrorTree {
        format::treeify_error(self, |issue| issue.message.clone())
    }

    pub fn treeify_with<F>(&self, mapper: F) -> ErrorTree
    where
        F: Fn(&Issue) -> String,
    {
        format::treeify_error(self, mapper)
    }

    pub fn flatten(&self) -> FlattenedError {
        format::flatten_error(self, |issue| issue.message.clone())
    }

    pub fn flatten_with<F>(&self, mapper: F) -> FlattenedError
    where
        F: Fn(&Issue) -> String,
    {
        format::flatten_error(self, mapper)
    }

    /// Renders the issues as a JSON array in their stable output shape.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.iter().map(Issue::to_json).collect())
    }
}

impl Semigroup for ParseError {
    fn combine(self, other: Self) -> Self {
        ParseError {
            issues: self.issues.combine(other.issues),
            input: self.input.or(other.input),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prettify())
    }
}

impl std::error::Error for ParseError {}

impl IntoIterator for ParseError {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseError {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.issues.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ParseError>();
    assert_sync::<ParseError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ParsedType;
    use crate::error::issue::IssueDetails;
    use indexmap::IndexMap;

    fn issue(path: JsonPath, message: &str) -> Issue {
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

    fn type_issue(path: JsonPath) -> Issue {
        Issue {
            message: "wrong type".to_string(),
            path,
            input: None,
            origin: None,
            details: IssueDetails::InvalidType {
                expected: ParsedType::String,
                received: ParsedType::Number,
            },
        }
    }

    #[test]
    fn test_single() {
        let i = issue(JsonPath::root(), "test");
        let err = ParseError::single(i.clone());
        assert_eq!(err.len(), 1);
        assert!(!err.is_empty());
        assert_eq!(err.first(), &i);
        assert_eq!(err.name(), "ParseError");
    }

    #[test]
    fn test_from_issues_rejects_empty() {
        assert!(ParseError::from_issues(vec![]).is_none());
        assert!(ParseError::from_issues(vec![issue(JsonPath::root(), "x")]).is_some());
    }

    #[test]
    fn test_combine_keeps_order() {
        let a = ParseError::single(issue(JsonPath::from_field("a"), "1"));
        let b = ParseError::single(issue(JsonPath::from_field("b"), "2"));
        let combined = a.combine(b);
        let messages: Vec<_> = combined.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["1", "2"]);
    }

    #[test]
    fn test_at_path_and_with_code() {
        let path_a = JsonPath::from_field("a");
        let err = ParseError::single(issue(path_a.clone(), "1"))
            .combine(ParseError::single(type_issue(path_a.clone())))
            .combine(ParseError::single(type_issue(JsonPath::from_field("b"))));

        assert_eq!(err.at_path(&path_a).len(), 2);
        assert_eq!(err.with_code(IssueCode::InvalidType).len(), 2);
        assert_eq!(err.with_code(IssueCode::Custom).len(), 1);
    }

    #[test]
    fn test_input_survives_combine() {
        let a = ParseError::single(issue(JsonPath::root(), "1")).with_input(None);
        let b = ParseError::single(issue(JsonPath::root(), "2")).with_input(Some(Value::Int(1)));
        assert_eq!(a.combine(b).input(), Some(&Value::Int(1)));
    }

    #[test]
    fn test_display_is_prettified() {
        let err = ParseError::single(issue(JsonPath::from_field("name"), "required"));
        assert_eq!(err.to_string(), "✖ required\n  → at name");
    }

    #[test]
    fn test_into_iter() {
        let err = ParseError::single(issue(JsonPath::root(), "1"))
            .combine(ParseError::single(issue(JsonPath::root(), "2")));
        let collected: Vec<Issue> = err.into_iter().collect();
        assert_eq!(collected.len(), 2);
    }
}
