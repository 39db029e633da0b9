//! Introspectable schema state.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use regex::Regex;

use crate::check::Check;
use crate::classify::ParsedType;
use crate::params::{ErrorMap, Params};
use crate::value::Value;

/// The tag of a schema: one per leaf kind plus one per wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaKind {
    String,
    Number,
    BigInt,
    Boolean,
    Literal,
    Enum,
    Date,
    File,
    #[default]
    Unknown,
    Array,
    Tuple,
    Object,
    Record,
    Map,
    Set,
    Optional,
    Nilable,
    Default,
    Prefault,
    Union,
    Pipe,
    Transform,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::BigInt => "bigint",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Literal => "literal",
            SchemaKind::Enum => "enum",
            SchemaKind::Date => "date",
            SchemaKind::File => "file",
            SchemaKind::Unknown => "unknown",
            SchemaKind::Array => "array",
            SchemaKind::Tuple => "tuple",
            SchemaKind::Object => "object",
            SchemaKind::Record => "record",
            SchemaKind::Map => "map",
            SchemaKind::Set => "set",
            SchemaKind::Optional => "optional",
            SchemaKind::Nilable => "nilable",
            SchemaKind::Default => "default",
            SchemaKind::Prefault => "prefault",
            SchemaKind::Union => "union",
            SchemaKind::Pipe => "pipe",
            SchemaKind::Transform => "transform",
        }
    }

    /// The type tag reported as `expected` when input has the wrong type.
    pub fn expected_type(&self) -> ParsedType {
        match self {
            SchemaKind::String => ParsedType::String,
            SchemaKind::Number => ParsedType::Number,
            SchemaKind::BigInt => ParsedType::BigInt,
            SchemaKind::Boolean => ParsedType::Bool,
            SchemaKind::Date => ParsedType::Date,
            SchemaKind::File => ParsedType::File,
            SchemaKind::Array | SchemaKind::Tuple => ParsedType::Array,
            SchemaKind::Object | SchemaKind::Record => ParsedType::Object,
            SchemaKind::Map => ParsedType::Map,
            SchemaKind::Set => ParsedType::Set,
            _ => ParsedType::Unknown,
        }
    }
}

impl Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared by every schema: its checks, nil handling flags and the
/// introspection bag.
///
/// The bag records what attached checks declare about the schema, e.g.
/// `minimum`, `maximum`, `format`, `multiple_of` or `description`.
#[derive(Debug, Clone, Default)]
pub struct SchemaInternals {
    pub kind: SchemaKind,
    pub checks: Vec<Check>,
    /// Accepts `Undefined` without issues.
    pub optional: bool,
    /// Accepts `Null` without issues.
    pub nilable: bool,
    pub coerce: bool,
    /// Checks attached to this schema produce non-continuable issues.
    pub abort: bool,
    /// Accepted values for literal and enum schemas.
    pub values: Option<Vec<Value>>,
    /// Schema-level error customizer.
    pub error: Option<ErrorMap>,
    pattern: Option<Regex>,
    bag: IndexMap<String, Value>,
}

impl SchemaInternals {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Internals initialized from a construction options record.
    pub fn from_params(kind: SchemaKind, params: &Params) -> Self {
        let mut internals = Self::new(kind);
        internals.error = params.error.clone();
        internals.abort = params.abort;
        internals.coerce = params.coerce;
        if let Some(description) = &params.description {
            internals
                .bag
                .insert("description".to_string(), Value::from(description.as_str()));
        }
        internals
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn bag(&self) -> &IndexMap<String, Value> {
        &self.bag
    }

    pub fn bag_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.bag
    }

    /// The most recent pattern a format check installed.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn set_pattern(&mut self, pattern: Regex) {
        self.pattern = Some(pattern);
    }

    pub fn description(&self) -> Option<&str> {
        self.bag.get("description").and_then(Value::as_str)
    }

    /// Attaches a check, firing its attach callbacks with these internals.
    pub(crate) fn push_check(&mut self, mut check: Check) {
        if self.abort {
            check.set_abort();
        }
        check.attach(self);
        self.checks.push(check);
    }

    /// Copies the introspectable parts of an inner schema into a wrapper.
    pub(crate) fn inherit(&mut self, inner: &SchemaInternals) {
        self.pattern = inner.pattern.clone();
        self.values = inner.values.clone();
        for (key, value) in &inner.bag {
            self.bag.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}
