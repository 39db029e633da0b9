//! Wrappers that change nil handling or substitute values.
//!
//! - [`OptionalSchema`]: accepts `Undefined` (and `Null` when nullish)
//! - [`NilableSchema`]: accepts `Null`
//! - [`DefaultSchema`]: replaces nullish input before parsing
//! - [`PrefaultSchema`]: replaces input that fails to parse
//!
//! Every wrapper runs its own checks after the inner schema, so a refinement
//! attached to a wrapper sees the substituted value.

use std::fmt;
use std::sync::Arc;

use crate::check::run_checks;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::traits::{SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// A substitute value, fixed or produced on demand.
#[derive(Clone)]
pub enum Fallback {
    Value(Value),
    Thunk(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl Fallback {
    pub fn resolve(&self) -> Value {
        match self {
            Fallback::Value(value) => value.clone(),
            Fallback::Thunk(f) => f(),
        }
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Fallback::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

fn wrapper_internals(kind: SchemaKind, inner: &SchemaInternals) -> SchemaInternals {
    let mut internals = SchemaInternals::new(kind);
    internals.optional = inner.optional;
    internals.nilable = inner.nilable;
    internals.inherit(inner);
    internals
}

fn run_own_checks(internals: &SchemaInternals, payload: &mut ParsePayload, ctx: &ParseContext) {
    run_checks(payload, &internals.checks, ctx, internals.error.as_ref());
}

/// Accepts `Undefined` without consulting the inner schema.
///
/// Checks attached to the wrapper itself (`.optional().refine(..)`) still run
/// on the accepted nil and see `None`.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema, Value};
///
/// let schema = Schema::string().optional();
/// assert_eq!(schema.parse(Value::Undefined).unwrap(), None);
/// assert_eq!(schema.parse("a").unwrap(), Some("a".to_string()));
/// assert!(schema.parse(Value::Null).is_err());
///
/// let either = Schema::string().nullish();
/// assert_eq!(either.parse(Value::Null).unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct OptionalSchema<S> {
    internals: SchemaInternals,
    inner: S,
}

impl<S: TypedSchema> OptionalSchema<S> {
    pub fn new(inner: S) -> Self {
        let mut internals = wrapper_internals(SchemaKind::Optional, inner.internals());
        internals.optional = true;
        Self { internals, inner }
    }

    /// Accepts both `Undefined` and `Null`.
    pub fn nullish(inner: S) -> Self {
        let mut schema = Self::new(inner);
        schema.internals.nilable = true;
        schema
    }

    pub fn unwrap(&self) -> &S {
        &self.inner
    }
}

impl<S: TypedSchema> SchemaLike for OptionalSchema<S> {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        let accepted = match payload.value {
            Value::Undefined => true,
            Value::Null => self.internals.nilable,
            _ => false,
        };
        if !accepted {
            self.inner.parse_payload(payload, ctx);
        }
        run_own_checks(&self.internals, payload, ctx);
    }
}

impl<S: TypedSchema> TypedSchema for OptionalSchema<S> {
    type Output = Option<S::Output>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Undefined | Value::Null => Ok(None),
            other => S::narrow(other).map(Some),
        }
    }
}

/// Accepts `Null` without consulting the inner schema. `Undefined` is still
/// handed to the inner schema.
#[derive(Debug, Clone)]
pub struct NilableSchema<S> {
    internals: SchemaInternals,
    inner: S,
}

impl<S: TypedSchema> NilableSchema<S> {
    pub fn new(inner: S) -> Self {
        let mut internals = wrapper_internals(SchemaKind::Nilable, inner.internals());
        internals.nilable = true;
        Self { internals, inner }
    }

    pub fn unwrap(&self) -> &S {
        &self.inner
    }
}

impl<S: TypedSchema> SchemaLike for NilableSchema<S> {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        if !payload.value.is_null() {
            self.inner.parse_payload(payload, ctx);
        }
        run_own_checks(&self.internals, payload, ctx);
    }
}

impl<S: TypedSchema> TypedSchema for NilableSchema<S> {
    type Output = Option<S::Output>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Null | Value::Undefined => Ok(None),
            other => S::narrow(other).map(Some),
        }
    }
}

/// Substitutes a default for `Undefined` or `Null`, then parses the result
/// with the inner schema.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema, Value};
///
/// let greeting = Schema::string()
///     .default("hi")
///     .refine(|s: &String| s.starts_with('h'), "must start with h");
///
/// assert_eq!(greeting.parse(Value::Null).unwrap(), "hi");
/// assert_eq!(greeting.parse("hello").unwrap(), "hello");
///
/// let err = greeting.parse("bye").unwrap_err();
/// assert_eq!(err.first().message, "must start with h");
/// ```
#[derive(Debug, Clone)]
pub struct DefaultSchema<S> {
    internals: SchemaInternals,
    inner: S,
    fallback: Fallback,
}

impl<S: TypedSchema> DefaultSchema<S> {
    pub fn new(inner: S, fallback: Fallback) -> Self {
        let mut internals = wrapper_internals(SchemaKind::Default, inner.internals());
        internals.optional = true;
        internals.nilable = true;
        Self {
            internals,
            inner,
            fallback,
        }
    }

    pub fn unwrap(&self) -> &S {
        &self.inner
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}

impl<S: TypedSchema> SchemaLike for DefaultSchema<S> {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        if payload.value.is_nullish() {
            payload.value = self.fallback.resolve();
        }
        self.inner.parse_payload(payload, ctx);
        run_own_checks(&self.internals, payload, ctx);
    }
}

impl<S: TypedSchema> TypedSchema for DefaultSchema<S> {
    type Output = S::Output;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        S::narrow(value)
    }
}

/// Substitutes a fallback whenever the inner schema rejects the input.
///
/// The fallback is not validated.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema, Value};
///
/// let port = Schema::number().int().min(1).prefault(8080);
///
/// assert_eq!(port.parse(443).unwrap(), 443.0);
/// assert_eq!(port.parse("not a port").unwrap(), 8080.0);
/// assert_eq!(port.parse(Value::Undefined).unwrap(), 8080.0);
/// ```
#[derive(Debug, Clone)]
pub struct PrefaultSchema<S> {
    internals: SchemaInternals,
    inner: S,
    fallback: Fallback,
}

impl<S: TypedSchema> PrefaultSchema<S> {
    pub fn new(inner: S, fallback: Fallback) -> Self {
        let mut internals = wrapper_internals(SchemaKind::Prefault, inner.internals());
        internals.optional = true;
        Self {
            internals,
            inner,
            fallback,
        }
    }

    pub fn unwrap(&self) -> &S {
        &self.inner
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}

impl<S: TypedSchema> SchemaLike for PrefaultSchema<S> {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        let inner = self.inner.internals();
        let inner_accepts_nil = match payload.value {
            Value::Undefined => inner.optional,
            Value::Null => inner.nilable,
            _ => true,
        };
        payload.value = if inner_accepts_nil {
            let mut attempt = ParsePayload::new(std::mem::take(&mut payload.value));
            self.inner.parse_payload(&mut attempt, ctx);
            if attempt.has_issues() {
                self.fallback.resolve()
            } else {
                attempt.value
            }
        } else {
            self.fallback.resolve()
        };
        run_own_checks(&self.internals, payload, ctx);
    }
}

impl<S: TypedSchema> TypedSchema for PrefaultSchema<S> {
    type Output = S::Output;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        S::narrow(value)
    }
}
