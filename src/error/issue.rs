//! Issue records.
//!
//! A [`RawIssue`] is what schemas and checks emit while parsing: it carries the
//! offending input, a path relative to the schema that produced it, the
//! `continues` flag that drives short-circuiting, and an optional back-reference
//! to the error customizer of the check or schema that produced it. Finalization
//! turns raw issues into [`Issue`]s with a resolved message and an absolute path.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{json, Map};

use crate::classify::{classify, ParsedType};
use crate::params::ErrorMap;
use crate::path::{JsonPath, PathSegment};
use crate::value::Value;

/// The closed set of issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    InvalidType,
    InvalidValue,
    TooBig,
    TooSmall,
    NotMultipleOf,
    InvalidFormat,
    InvalidUnion,
    InvalidKey,
    InvalidElement,
    UnrecognizedKeys,
    Custom,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::InvalidValue => "invalid_value",
            IssueCode::TooBig => "too_big",
            IssueCode::TooSmall => "too_small",
            IssueCode::NotMultipleOf => "not_multiple_of",
            IssueCode::InvalidFormat => "invalid_format",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::InvalidKey => "invalid_key",
            IssueCode::InvalidElement => "invalid_element",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::Custom => "custom",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of value a bound or format applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Number,
    Int,
    BigInt,
    String,
    Array,
    Set,
    Map,
    Object,
    Record,
    Date,
    File,
    Custom,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Number => "number",
            Origin::Int => "int",
            Origin::BigInt => "bigint",
            Origin::String => "string",
            Origin::Array => "array",
            Origin::Set => "set",
            Origin::Map => "map",
            Origin::Object => "object",
            Origin::Record => "record",
            Origin::Date => "date",
            Origin::File => "file",
            Origin::Custom => "custom",
        }
    }

    /// Infers the origin of a length- or size-bearing value.
    pub fn of_value(value: &Value) -> Option<Origin> {
        match value {
            Value::String(_) => Some(Origin::String),
            Value::Array(_) => Some(Origin::Array),
            Value::Set(_) => Some(Origin::Set),
            Value::Map(_) => Some(Origin::Map),
            Value::File(_) => Some(Origin::File),
            Value::Date(_) => Some(Origin::Date),
            Value::BigInt(_) => Some(Origin::BigInt),
            Value::Int(_) | Value::Float(_) => Some(Origin::Number),
            Value::Object(_) => Some(Origin::Object),
            _ => None,
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format-specific parameters of an `invalid_format` issue.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormatDetail {
    #[default]
    None,
    Pattern(String),
    Prefix(String),
    Suffix(String),
    Includes {
        includes: String,
        position: Option<usize>,
    },
}

/// Code-specific fields of an issue.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueDetails {
    InvalidType {
        expected: ParsedType,
        received: ParsedType,
    },
    InvalidValue {
        values: Vec<Value>,
    },
    TooBig {
        maximum: Value,
        inclusive: bool,
        exact: bool,
    },
    TooSmall {
        minimum: Value,
        inclusive: bool,
        exact: bool,
    },
    NotMultipleOf {
        divisor: Value,
    },
    InvalidFormat {
        format: String,
        detail: FormatDetail,
    },
    /// One finalized issue list per union branch, in branch order.
    InvalidUnion {
        errors: Vec<Vec<Issue>>,
    },
    InvalidKey {
        issues: Vec<Issue>,
    },
    InvalidElement {
        key: Value,
        issues: Vec<Issue>,
    },
    UnrecognizedKeys {
        keys: Vec<String>,
    },
    Custom {
        params: IndexMap<String, Value>,
    },
}

impl IssueDetails {
    pub fn code(&self) -> IssueCode {
        match self {
            IssueDetails::InvalidType { .. } => IssueCode::InvalidType,
            IssueDetails::InvalidValue { .. } => IssueCode::InvalidValue,
            IssueDetails::TooBig { .. } => IssueCode::TooBig,
            IssueDetails::TooSmall { .. } => IssueCode::TooSmall,
            IssueDetails::NotMultipleOf { .. } => IssueCode::NotMultipleOf,
            IssueDetails::InvalidFormat { .. } => IssueCode::InvalidFormat,
            IssueDetails::InvalidUnion { .. } => IssueCode::InvalidUnion,
            IssueDetails::InvalidKey { .. } => IssueCode::InvalidKey,
            IssueDetails::InvalidElement { .. } => IssueCode::InvalidElement,
            IssueDetails::UnrecognizedKeys { .. } => IssueCode::UnrecognizedKeys,
            IssueDetails::Custom { .. } => IssueCode::Custom,
        }
    }

    fn write_json(&self, out: &mut Map<String, serde_json::Value>) {
        match self {
            IssueDetails::InvalidType { expected, received } => {
                out.insert("expected".into(), json!(expected.as_str()));
                out.insert("received".into(), json!(received.as_str()));
            }
            IssueDetails::InvalidValue { values } => {
                out.insert(
                    "values".into(),
                    values.iter().map(Value::to_json).collect(),
                );
            }
            IssueDetails::TooBig {
                maximum,
                inclusive,
                exact,
            } => {
                out.insert("maximum".into(), maximum.to_json());
                out.insert("inclusive".into(), json!(inclusive));
                if *exact {
                    out.insert("exact".into(), json!(true));
                }
            }
            IssueDetails::TooSmall {
                minimum,
                inclusive,
                exact,
            } => {
                out.insert("minimum".into(), minimum.to_json());
                out.insert("inclusive".into(), json!(inclusive));
                if *exact {
                    out.insert("exact".into(), json!(true));
                }
            }
            IssueDetails::NotMultipleOf { divisor } => {
                out.insert("divisor".into(), divisor.to_json());
            }
            IssueDetails::InvalidFormat { format, detail } => {
                out.insert("format".into(), json!(format));
                match detail {
                    FormatDetail::None => {}
                    FormatDetail::Pattern(p) => {
                        out.insert("pattern".into(), json!(p));
                    }
                    FormatDetail::Prefix(p) => {
                        out.insert("prefix".into(), json!(p));
                    }
                    FormatDetail::Suffix(s) => {
                        out.insert("suffix".into(), json!(s));
                    }
                    FormatDetail::Includes { includes, position } => {
                        out.insert("includes".into(), json!(includes));
                        if let Some(pos) = position {
                            out.insert("position".into(), json!(pos));
                        }
                    }
                }
            }
            IssueDetails::InvalidUnion { errors } => {
                let errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|branch| branch.iter().map(Issue::to_json).collect())
                    .collect();
                out.insert("errors".into(), serde_json::Value::Array(errors));
            }
            IssueDetails::InvalidKey { issues } => {
                out.insert("issues".into(), issues.iter().map(Issue::to_json).collect());
            }
            IssueDetails::InvalidElement { key, issues } => {
                out.insert("key".into(), key.to_json());
                out.insert("issues".into(), issues.iter().map(Issue::to_json).collect());
            }
            IssueDetails::UnrecognizedKeys { keys } => {
                out.insert("keys".into(), json!(keys));
            }
            IssueDetails::Custom { params } => {
                if !params.is_empty() {
                    let params: Map<String, serde_json::Value> = params
                        .iter()
                        .map(|(k, v)| (k.clone(), v.to_json()))
                        .collect();
                    out.insert("params".into(), serde_json::Value::Object(params));
                }
            }
        }
    }
}

/// An issue as emitted during parsing, before its message is resolved.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Origin, RawIssue, Value};
///
/// let issue = RawIssue::too_small(Origin::String, 5, true, Value::from("abc"))
///     .with_message("too short");
/// assert_eq!(issue.code(), IssueCode::TooSmall);
/// assert!(issue.continues);
/// ```
#[derive(Debug, Clone)]
pub struct RawIssue {
    pub details: IssueDetails,
    /// The offending value at this issue's path.
    pub input: Value,
    /// Path relative to the schema that produced the issue.
    pub path: JsonPath,
    pub origin: Option<Origin>,
    /// When false, the check loop of the owning schema stops.
    pub continues: bool,
    /// A message fixed at emission time; wins over every customizer.
    pub message: Option<String>,
    /// Error customizer of the check or schema that produced the issue.
    pub inst: Option<ErrorMap>,
}

impl RawIssue {
    pub fn new(details: IssueDetails, input: Value) -> Self {
        Self {
            details,
            input,
            path: JsonPath::root(),
            origin: None,
            continues: true,
            message: None,
            inst: None,
        }
    }

    /// An `invalid_type` issue. These never continue.
    pub fn invalid_type(expected: ParsedType, input: Value) -> Self {
        let received = classify(&input);
        Self::invalid_type_received(expected, received, input)
    }

    /// An `invalid_type` issue with an explicit received tag.
    pub fn invalid_type_received(expected: ParsedType, received: ParsedType, input: Value) -> Self {
        Self::new(IssueDetails::InvalidType { expected, received }, input).fatal()
    }

    pub fn invalid_value(values: Vec<Value>, input: Value) -> Self {
        Self::new(IssueDetails::InvalidValue { values }, input).fatal()
    }

    pub fn too_big(origin: Origin, maximum: impl Into<Value>, inclusive: bool, input: Value) -> Self {
        Self::new(
            IssueDetails::TooBig {
                maximum: maximum.into(),
                inclusive,
                exact: false,
            },
            input,
        )
        .with_origin(origin)
    }

    pub fn too_small(
        origin: Origin,
        minimum: impl Into<Value>,
        inclusive: bool,
        input: Value,
    ) -> Self {
        Self::new(
            IssueDetails::TooSmall {
                minimum: minimum.into(),
                inclusive,
                exact: false,
            },
            input,
        )
        .with_origin(origin)
    }

    pub fn not_multiple_of(origin: Origin, divisor: impl Into<Value>, input: Value) -> Self {
        Self::new(
            IssueDetails::NotMultipleOf {
                divisor: divisor.into(),
            },
            input,
        )
        .with_origin(origin)
    }

    pub fn invalid_format(
        origin: Origin,
        format: impl Into<String>,
        detail: FormatDetail,
        input: Value,
    ) -> Self {
        Self::new(
            IssueDetails::InvalidFormat {
                format: format.into(),
                detail,
            },
            input,
        )
        .with_origin(origin)
    }

    pub fn custom(params: IndexMap<String, Value>, input: Value) -> Self {
        Self::new(IssueDetails::Custom { params }, input).with_origin(Origin::Custom)
    }

    pub fn code(&self) -> IssueCode {
        self.details.code()
    }

    /// Marks a bound issue as an exact-length violation.
    pub fn exact(mut self) -> Self {
        match &mut self.details {
            IssueDetails::TooBig { exact, .. } | IssueDetails::TooSmall { exact, .. } => {
                *exact = true;
            }
            _ => {}
        }
        self
    }

    /// Sets `continues` to false.
    pub fn fatal(mut self) -> Self {
        self.continues = false;
        self
    }

    pub fn with_continue(mut self, continues: bool) -> Self {
        self.continues = continues;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_path(mut self, path: JsonPath) -> Self {
        self.path = path;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_inst(mut self, inst: ErrorMap) -> Self {
        self.inst = Some(inst);
        self
    }

    /// Prefixes the issue path with a segment.
    pub fn prefixed(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }
}

/// A finalized issue: resolved message and absolute path.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub message: String,
    pub path: JsonPath,
    /// The offending value; absent when input echo is disabled.
    pub input: Option<Value>,
    pub origin: Option<Origin>,
    pub details: IssueDetails,
}

impl Issue {
    pub fn code(&self) -> IssueCode {
        self.details.code()
    }

    pub fn minimum(&self) -> Option<&Value> {
        match &self.details {
            IssueDetails::TooSmall { minimum, .. } => Some(minimum),
            _ => None,
        }
    }

    pub fn maximum(&self) -> Option<&Value> {
        match &self.details {
            IssueDetails::TooBig { maximum, .. } => Some(maximum),
            _ => None,
        }
    }

    pub fn inclusive(&self) -> Option<bool> {
        match &self.details {
            IssueDetails::TooSmall { inclusive, .. } | IssueDetails::TooBig { inclusive, .. } => {
                Some(*inclusive)
            }
            _ => None,
        }
    }

    pub fn expected(&self) -> Option<ParsedType> {
        match &self.details {
            IssueDetails::InvalidType { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    pub fn received(&self) -> Option<ParsedType> {
        match &self.details {
            IssueDetails::InvalidType { received, .. } => Some(*received),
            _ => None,
        }
    }

    pub fn format(&self) -> Option<&str> {
        match &self.details {
            IssueDetails::InvalidFormat { format, .. } => Some(format),
            _ => None,
        }
    }

    /// Renders the issue in its stable output shape:
    /// `{ code, message, path, input?, origin?, ...code-specific fields }`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = Map::new();
        out.insert("code".into(), json!(self.code().as_str()));
        out.insert("message".into(), json!(self.message));
        let path: Vec<serde_json::Value> = self
            .path
            .segments()
            .map(|segment| match segment {
                PathSegment::Field(name) => json!(name),
                PathSegment::Index(idx) => json!(idx),
            })
            .collect();
        out.insert("path".into(), serde_json::Value::Array(path));
        if let Some(input) = &self.input {
            out.insert("input".into(), input.to_json());
        }
        if let Some(origin) = self.origin {
            out.insert("origin".into(), json!(origin.as_str()));
        }
        self.details.write_json(&mut out);
        serde_json::Value::Object(out)
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

// Issues cross thread boundaries inside ParseError; keep them Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
    assert_send::<RawIssue>();
    assert_sync::<RawIssue>();
};
