//! Issue paths locating values in nested structures.
//!
//! This module provides [`JsonPath`] and [`PathSegment`]. A path is a sequence of
//! property names and array indices; nothing else is a valid segment. Paths
//! render in dot notation (`users[0].email`), quoting any property name that
//! contains characters outside `[A-Za-z0-9_$]` (`headers["content-type"]`).

use std::fmt::{self, Display};

/// A segment of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A property access (e.g., `user`, `email`)
    Field(String),
    /// An index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns the segment as a property key; indices render as decimal strings.
    pub fn as_key(&self) -> String {
        match self {
            PathSegment::Field(name) => name.clone(),
            PathSegment::Index(idx) => idx.to_string(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// Where an issue sits inside the parsed input. The root value has an empty
/// path.
///
/// # Example
///
/// ```rust
/// use inquest::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(
///     JsonPath::from_field("content-type").to_string(),
///     r#"["content-type"]"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_field(name: impl Into<String>) -> Self {
        JsonPath::from(vec![PathSegment::field(name)])
    }

    pub fn from_index(idx: usize) -> Self {
        JsonPath::from(vec![PathSegment::index(idx)])
    }

    /// `self` extended by a property name. The receiver is left untouched.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::field(name))
    }

    /// `self` extended by an array position. The receiver is left untouched.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::index(index))
    }

    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Inserts a segment at the front, in place.
    ///
    /// Compound schemas call this on their children's issues while unwinding,
    /// so a path grows outward from the offending value.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }

    /// Returns a new path made of this path followed by `other`.
    pub fn join(&self, other: &JsonPath) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Whether the path addresses the parsed value itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The outermost segment; `flatten` groups issues by it.
    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// The enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(JsonPath::from(init.to_vec()))
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path in dot notation. Same as `to_string()`.
    pub fn to_dot_path(&self) -> String {
        to_dot_path(&self.segments)
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_path())
    }
}

/// Renders a segment list in dot notation.
///
/// Indices become `[i]`; property names that are empty or contain anything
/// outside `[A-Za-z0-9_$]` become `["name"]` with JSON escaping; other names
/// are joined with `.`.
pub fn to_dot_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
            PathSegment::Field(name) if needs_quoting(name) => {
                out.push('[');
                out.push_str(&serde_json::Value::String(name.clone()).to_string());
                out.push(']');
            }
            PathSegment::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
        }
    }
    out
}

/// Empty names are quoted too, so every field renders visibly.
fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || name
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_chain() {
        let path: JsonPath = [PathSegment::index(0), PathSegment::index(1)].into_iter().collect();
        assert_eq!(path.to_string(), "[0][1]");
        assert_eq!(path.last(), Some(&PathSegment::Index(1)));
    }

    #[test]
    fn test_quoted_segments() {
        let path = JsonPath::root()
            .push_field("headers")
            .push_field("content-type");
        assert_eq!(path.to_string(), r#"headers["content-type"]"#);

        let path = JsonPath::root().push_field("a b").push_field("c");
        assert_eq!(path.to_string(), r#"["a b"].c"#);

        let path = JsonPath::root().push_field("say \"hi\"");
        assert_eq!(path.to_string(), r#"["say \"hi\""]"#);
    }

    #[test]
    fn test_dollar_and_underscore_are_plain() {
        let path = JsonPath::root().push_field("$ref").push_field("_id");
        assert_eq!(path.to_string(), "$ref._id");
    }

    #[test]
    fn test_prepend_grows_outward() {
        let mut path = JsonPath::from_field("email");
        path.prepend(PathSegment::Index(2));
        path.prepend(PathSegment::field("users"));
        assert_eq!(path.to_string(), "users[2].email");
    }

    #[test]
    fn test_join() {
        let base = JsonPath::from_field("a");
        let tail = JsonPath::from_index(0).push_field("b");
        assert_eq!(base.join(&tail).to_string(), "a[0].b");
        assert_eq!(JsonPath::root().join(&JsonPath::root()), JsonPath::root());
    }

    #[test]
    fn test_parent_drops_last_segment() {
        let path = JsonPath::from_field("items").push_index(4);
        assert_eq!(path.parent(), Some(JsonPath::from_field("items")));
        assert_eq!(JsonPath::root().parent(), None);
    }

    #[test]
    fn test_segment_key() {
        assert_eq!(PathSegment::field("a").as_key(), "a");
        assert_eq!(PathSegment::index(3).as_key(), "3");
    }

    #[test]
    fn test_collect_from_segments() {
        let path: JsonPath = vec![PathSegment::from("a"), PathSegment::from(1usize)]
            .into_iter()
            .collect();
        assert_eq!(path.to_string(), "a[1]");
    }
}
