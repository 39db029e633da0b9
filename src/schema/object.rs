//! Object and record schema validation.
//!
//! [`ObjectSchema`] validates a declared shape of named fields and applies an
//! [`UnknownKeys`] policy to the rest. [`RecordSchema`] validates arbitrary
//! string keys and their values against a key schema and a value schema.

use indexmap::IndexMap;

use crate::check::run_checks;
use crate::error::{finalize_issues, IssueDetails, Origin, RawIssue};
use crate::params::Params;
use crate::path::{JsonPath, PathSegment};
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::{reject_type, settle_nullish};
use crate::schema::modifiers::OptionalSchema;
use crate::schema::traits::{DynSchema, SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// How an object schema treats keys outside its shape.
#[derive(Debug, Clone, Default)]
pub enum UnknownKeys {
    /// Drop unknown keys from the output.
    #[default]
    Strip,
    /// Report unknown keys as one `unrecognized_keys` issue.
    Strict,
    /// Copy unknown keys to the output unvalidated.
    Passthrough,
    /// Validate unknown keys' values against a schema.
    Catchall(DynSchema),
}

impl From<bool> for UnknownKeys {
    fn from(allow: bool) -> Self {
        if allow {
            UnknownKeys::Passthrough
        } else {
            UnknownKeys::Strict
        }
    }
}

/// Parses one property value in a child payload and merges its issues under
/// the property name. Returns the parsed value and whether it was clean.
fn parse_property(
    schema: &dyn SchemaLike,
    key: &str,
    value: Value,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
) -> (Value, bool) {
    let mut child = ParsePayload::new(value);
    schema.parse_payload(&mut child, ctx);
    let clean = !child.has_issues();
    payload.merge_child(child.issues, Some(&PathSegment::field(key)));
    (child.value, clean)
}

/// A schema for validating objects with a declared shape.
///
/// Fields are validated in declaration order and every field is visited even
/// when earlier ones fail. A missing key is validated as `Undefined`; when the
/// field accepts that, the key stays absent from the output.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
/// use serde_json::json;
///
/// let user = Schema::object()
///     .field("name", Schema::string().min(2))
///     .field("age", Schema::number().gte(18))
///     .field("email", Schema::string().email().optional());
///
/// assert!(user.parse(json!({"name": "Alice", "age": 30})).is_ok());
///
/// let err = user.parse(json!({"name": "A", "age": 16})).unwrap_err();
/// let paths: Vec<String> = err.iter().map(|i| i.path.to_string()).collect();
/// assert_eq!(paths, vec!["name", "age"]);
/// assert!(err.to_string().contains("→ at name"));
/// ```
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    internals: SchemaInternals,
    shape: IndexMap<String, DynSchema>,
    unknown_keys: UnknownKeys,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Object, params),
            shape: IndexMap::new(),
            unknown_keys: UnknownKeys::default(),
        }
    }

    /// Adds (or replaces) a field.
    pub fn field<S: TypedSchema>(mut self, name: impl Into<String>, schema: S) -> Self {
        self.shape.insert(name.into(), schema.into_dyn());
        self
    }

    pub fn shape(&self) -> &IndexMap<String, DynSchema> {
        &self.shape
    }

    pub fn unknown_keys(mut self, policy: impl Into<UnknownKeys>) -> Self {
        self.unknown_keys = policy.into();
        self
    }

    /// Rejects keys outside the shape.
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Strict)
    }

    /// Keeps keys outside the shape as they are.
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    /// Drops keys outside the shape (the default).
    pub fn strip(self) -> Self {
        self.unknown_keys(UnknownKeys::Strip)
    }

    /// Validates values of keys outside the shape with `schema`.
    pub fn catchall<S: TypedSchema>(self, schema: S) -> Self {
        self.unknown_keys(UnknownKeys::Catchall(schema.into_dyn()))
    }

    /// Adds the fields of `other`, replacing fields with the same name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    /// use serde_json::json;
    ///
    /// let base = Schema::object().field("id", Schema::number().int());
    /// let user = base.extend(Schema::object().field("name", Schema::string()));
    ///
    /// assert_eq!(user.shape().len(), 2);
    /// assert!(user.parse(json!({"id": 1, "name": "x"})).is_ok());
    /// ```
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        self.shape.extend(other.shape);
        self
    }

    /// A copy with only the named fields.
    pub fn pick<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        let mut next = self.clone();
        next.shape
            .retain(|name, _| keys.iter().any(|k| k.as_ref() == name));
        next
    }

    /// A copy without the named fields.
    pub fn omit<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        let mut next = self.clone();
        next.shape
            .retain(|name, _| !keys.iter().any(|k| k.as_ref() == name));
        next
    }

    /// A copy where every field accepts `Undefined`.
    pub fn partial(&self) -> Self {
        let mut next = self.clone();
        for schema in next.shape.values_mut() {
            if !schema.internals().optional {
                *schema = OptionalSchema::new(schema.clone()).into_dyn();
            }
        }
        next
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        if settle_nullish(&self.internals, payload) {
            return;
        }
        let Value::Object(input) = &mut payload.value else {
            reject_type(&self.internals, payload);
            return;
        };
        let input = std::mem::take(input);
        let mut output = IndexMap::with_capacity(input.len());

        for (key, schema) in &self.shape {
            let present = input.get(key).cloned();
            let absent = present.is_none();
            let (value, clean) =
                parse_property(schema, key, present.unwrap_or_default(), payload, ctx);
            if absent && clean && value.is_undefined() {
                continue;
            }
            output.insert(key.clone(), value);
        }

        let unknown: Vec<&String> = input
            .keys()
            .filter(|key| !self.shape.contains_key(key.as_str()))
            .collect();
        if !unknown.is_empty() {
            match &self.unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    for key in &unknown {
                        output.insert((*key).clone(), input[key.as_str()].clone());
                    }
                }
                UnknownKeys::Strict => {
                    let keys = unknown.iter().map(|key| (*key).clone()).collect();
                    let mut issue = RawIssue::new(
                        IssueDetails::UnrecognizedKeys { keys },
                        Value::Object(input.clone()),
                    );
                    issue.inst = self.internals.error.clone();
                    payload.push_issue(issue);
                }
                UnknownKeys::Catchall(schema) => {
                    for key in &unknown {
                        let value = input[key.as_str()].clone();
                        let (value, _) = parse_property(schema, key, value, payload, ctx);
                        output.insert((*key).clone(), value);
                    }
                }
            }
        }

        payload.value = Value::Object(output);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl TypedSchema for ObjectSchema {
    type Output = IndexMap<String, Value>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(other),
        }
    }
}

/// A schema for objects with arbitrary keys.
///
/// Keys are validated with the key schema; a failing key yields one
/// `invalid_key` issue at that key and its value is not validated. Value
/// issues are reported inline under the key.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema};
/// use serde_json::json;
///
/// let scores = Schema::record(Schema::string().min(2), Schema::number().nonnegative());
///
/// assert!(scores.parse(json!({"alice": 3, "bob": 0})).is_ok());
///
/// let err = scores.parse(json!({"x": 1, "carol": -1})).unwrap_err();
/// let codes: Vec<IssueCode> = err.iter().map(|i| i.code()).collect();
/// assert_eq!(codes, vec![IssueCode::InvalidKey, IssueCode::TooSmall]);
/// assert_eq!(err.iter().nth(1).unwrap().path.to_string(), "carol");
/// ```
#[derive(Debug, Clone)]
pub struct RecordSchema {
    internals: SchemaInternals,
    key: DynSchema,
    value: DynSchema,
}

impl RecordSchema {
    pub fn new<K: TypedSchema, V: TypedSchema>(key: K, value: V) -> Self {
        Self::with_params(key, value, &Params::default())
    }

    pub fn with_params<K: TypedSchema, V: TypedSchema>(key: K, value: V, params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Record, params),
            key: key.into_dyn(),
            value: value.into_dyn(),
        }
    }

    pub fn key_schema(&self) -> &DynSchema {
        &self.key
    }

    pub fn value_schema(&self) -> &DynSchema {
        &self.value
    }
}

impl SchemaLike for RecordSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        if settle_nullish(&self.internals, payload) {
            return;
        }
        let Value::Object(input) = &mut payload.value else {
            reject_type(&self.internals, payload);
            return;
        };
        let input = std::mem::take(input);
        let mut output = IndexMap::with_capacity(input.len());

        for (key, value) in input {
            let mut key_payload = ParsePayload::new(key.as_str());
            self.key.parse_payload(&mut key_payload, ctx);
            if key_payload.has_issues() {
                let issues = finalize_issues(key_payload.issues, &JsonPath::root(), ctx);
                let mut issue = RawIssue::new(IssueDetails::InvalidKey { issues }, Value::from(key.as_str()))
                    .with_origin(Origin::Record)
                    .with_path(JsonPath::from_field(key.as_str()));
                issue.inst = self.internals.error.clone();
                payload.push_issue(issue);
                continue;
            }
            let out_key = match key_payload.value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            let (value, _) = parse_property(&self.value, &key, value, payload, ctx);
            output.insert(out_key, value);
        }

        payload.value = Value::Object(output);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl TypedSchema for RecordSchema {
    type Output = IndexMap<String, Value>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(other),
        }
    }
}
