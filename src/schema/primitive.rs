//! Boolean, literal, enum and unknown schemas.

use std::cmp::Ordering;

use crate::check::run_checks;
use crate::coerce;
use crate::error::RawIssue;
use crate::params::Params;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::parse_leaf;
use crate::schema::traits::{SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// A schema for booleans. With coercion enabled, any value is converted by
/// truthiness.
#[derive(Debug, Clone)]
pub struct BooleanSchema {
    internals: SchemaInternals,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Boolean, params),
        }
    }

    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for BooleanSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        parse_leaf(
            &self.internals,
            payload,
            ctx,
            |v| matches!(v, Value::Bool(_)),
            coerce::to_boolean,
        );
    }
}

impl TypedSchema for BooleanSchema {
    type Output = bool;

    fn narrow(value: Value) -> Result<bool, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

/// Value equality where numbers compare numerically across kinds.
fn same_value(a: &Value, b: &Value) -> bool {
    if a.is_number() || b.is_number() {
        return a.compare(b) == Some(Ordering::Equal);
    }
    a == b
}

/// Shared parse for schemas that accept a closed set of values.
fn parse_values(internals: &SchemaInternals, payload: &mut ParsePayload, ctx: &ParseContext) {
    let values = internals.values.as_deref().unwrap_or_default();
    if values.iter().any(|v| same_value(v, &payload.value)) {
        run_checks(payload, &internals.checks, ctx, internals.error.as_ref());
        return;
    }
    let mut issue = RawIssue::invalid_value(values.to_vec(), payload.value.clone());
    issue.inst = internals.error.clone();
    payload.push_issue(issue);
}

/// A schema accepting exactly one value.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema, Value};
///
/// let schema = Schema::literal("admin");
/// assert_eq!(schema.parse("admin").unwrap(), Value::from("admin"));
///
/// let err = schema.parse("user").unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::InvalidValue);
/// assert_eq!(err.first().message, "Invalid input: expected \"admin\"");
/// ```
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    internals: SchemaInternals,
}

impl LiteralSchema {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_params(value, &Params::default())
    }

    pub fn with_params(value: impl Into<Value>, params: &Params) -> Self {
        let mut internals = SchemaInternals::from_params(SchemaKind::Literal, params);
        internals.values = Some(vec![value.into()]);
        Self { internals }
    }

    pub fn value(&self) -> &Value {
        match self.internals.values.as_deref() {
            Some([value]) => value,
            _ => unreachable!("a literal holds exactly one value"),
        }
    }
}

impl SchemaLike for LiteralSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        parse_values(&self.internals, payload, ctx);
    }
}

impl TypedSchema for LiteralSchema {
    type Output = Value;

    fn narrow(value: Value) -> Result<Value, Value> {
        Ok(value)
    }
}

/// A schema accepting one of a fixed set of values.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
///
/// let role = Schema::enumeration(["admin", "user", "guest"]);
/// assert!(role.parse("user").is_ok());
///
/// let err = role.parse("root").unwrap_err();
/// assert_eq!(
///     err.first().message,
///     "Invalid option: expected one of \"admin\"|\"user\"|\"guest\""
/// );
///
/// let staff = role.exclude(["guest"]);
/// assert!(staff.parse("guest").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EnumSchema {
    internals: SchemaInternals,
}

impl EnumSchema {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_params(values, &Params::default())
    }

    pub fn with_params<I, V>(values: I, params: &Params) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut internals = SchemaInternals::from_params(SchemaKind::Enum, params);
        internals.values = Some(values.into_iter().map(Into::into).collect());
        Self { internals }
    }

    pub fn options(&self) -> &[Value] {
        self.internals.values.as_deref().unwrap_or_default()
    }

    /// A new enum restricted to `keep`.
    pub fn extract<I, V>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let keep: Vec<Value> = keep.into_iter().map(Into::into).collect();
        self.retain(|v| keep.iter().any(|k| same_value(k, v)))
    }

    /// A new enum without `drop`.
    pub fn exclude<I, V>(&self, drop: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let drop: Vec<Value> = drop.into_iter().map(Into::into).collect();
        self.retain(|v| !drop.iter().any(|d| same_value(d, v)))
    }

    fn retain(&self, keep: impl Fn(&Value) -> bool) -> Self {
        let values = self.options().iter().filter(|v| keep(v)).cloned().collect();
        let mut next = self.clone();
        next.internals.values = Some(values);
        next
    }
}

impl SchemaLike for EnumSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        parse_values(&self.internals, payload, ctx);
    }
}

impl TypedSchema for EnumSchema {
    type Output = Value;

    fn narrow(value: Value) -> Result<Value, Value> {
        Ok(value)
    }
}

/// A schema accepting any value, including `Undefined` and `Null`.
#[derive(Debug, Clone)]
pub struct UnknownSchema {
    internals: SchemaInternals,
}

impl UnknownSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        let mut internals = SchemaInternals::from_params(SchemaKind::Unknown, params);
        internals.optional = true;
        internals.nilable = true;
        Self { internals }
    }
}

impl Default for UnknownSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for UnknownSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        run_checks(payload, &self.internals.checks, ctx, self.internals.error.as_ref());
    }
}

impl TypedSchema for UnknownSchema {
    type Output = Value;

    fn narrow(value: Value) -> Result<Value, Value> {
        Ok(value)
    }
}
