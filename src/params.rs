//! Schema and check construction options.
//!
//! [`Params`] is the single options record accepted by schema constructors,
//! refinements and free-form checks. [`ErrorMap`] is the error customizer it
//! installs: a function from a raw issue to an optional message.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::RawIssue;
use crate::path::{JsonPath, PathSegment};
use crate::validation::ParsePayload;
use crate::value::Value;

type ErrorFn = dyn Fn(&RawIssue) -> Option<String> + Send + Sync;

/// An error customizer.
///
/// Returning `None` defers to the next customizer in the resolution chain.
///
/// # Example
///
/// ```rust
/// use inquest::{ErrorMap, IssueCode, Schema, TypedSchema};
///
/// let schema = Schema::string().error(ErrorMap::new(|issue| {
///     (issue.code() == IssueCode::InvalidType).then(|| "not a string".to_string())
/// }));
///
/// let err = schema.parse(5).unwrap_err();
/// assert_eq!(err.first().message, "not a string");
/// ```
#[derive(Clone)]
pub struct ErrorMap(Arc<ErrorFn>);

impl ErrorMap {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&RawIssue) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A customizer that always yields the same message.
    pub fn message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Some(message.clone()))
    }

    pub fn resolve(&self, issue: &RawIssue) -> Option<String> {
        (self.0)(issue)
    }
}

impl fmt::Debug for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorMap(..)")
    }
}

impl From<&str> for ErrorMap {
    fn from(message: &str) -> Self {
        ErrorMap::message(message)
    }
}

impl From<String> for ErrorMap {
    fn from(message: String) -> Self {
        ErrorMap::message(message)
    }
}

/// A predicate deciding whether a check runs on a payload.
pub type WhenFn = Arc<dyn Fn(&ParsePayload) -> bool + Send + Sync>;

/// Options for schemas, refinements and checks.
///
/// The recognized fields are closed:
/// - `error`: schema- or check-level error customizer
/// - `abort`: issues produced by checks become non-continuable
/// - `coerce`: enable leaf coercion
/// - `description`: stored in the schema bag
/// - `path`: where a refinement places its issue, relative to the value
/// - `params`: opaque map copied into `custom` issues
/// - `when`: run a check only when the predicate holds
///
/// # Example
///
/// ```rust
/// use inquest::{Params, Schema, TypedSchema};
///
/// let schema = Schema::string().refine(
///     |s: &String| s.contains('@'),
///     Params::new()
///         .error("needs an @")
///         .path(["email"])
///         .param("rule", "at-sign"),
/// );
///
/// let err = schema.parse("nope").unwrap_err();
/// assert_eq!(err.first().path.to_string(), "email");
/// ```
#[derive(Clone, Default)]
pub struct Params {
    pub error: Option<ErrorMap>,
    pub abort: bool,
    pub coerce: bool,
    pub description: Option<String>,
    pub path: JsonPath,
    pub params: IndexMap<String, Value>,
    pub when: Option<WhenFn>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn abort(mut self) -> Self {
        self.abort = true;
        self
    }

    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ParsePayload) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("error", &self.error)
            .field("abort", &self.abort)
            .field("coerce", &self.coerce)
            .field("description", &self.description)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("when", &self.when.as_ref().map(|_| ".."))
            .finish()
    }
}

impl From<&str> for Params {
    fn from(message: &str) -> Self {
        Params::new().error(message)
    }
}

impl From<String> for Params {
    fn from(message: String) -> Self {
        Params::new().error(message)
    }
}

impl From<ErrorMap> for Params {
    fn from(error: ErrorMap) -> Self {
        Params::new().error(error)
    }
}
