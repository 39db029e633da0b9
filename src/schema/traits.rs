//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is the object-safe core every schema implements: access to
//! its [`SchemaInternals`] and the payload-level parse. [`TypedSchema`] layers
//! the typed entry points and the fluent builders on top, and [`DynSchema`]
//! erases a schema so heterogeneous schemas can be stored together (object
//! shapes, union branches, catchalls).

use std::fmt;
use std::sync::Arc;

use stillwater::Validation;

use crate::check::{self, Check};
use crate::error::{finalize_issues, ParseError, RawIssue, TransformError};
use crate::params::{ErrorMap, Params};
use crate::path::JsonPath;
use crate::schema::combinators::{PipeSchema, TransformSchema, UnionSchema};
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::modifiers::{DefaultSchema, Fallback, NilableSchema, OptionalSchema, PrefaultSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// Clones a schema behind an `Arc<dyn SchemaLike>`.
///
/// Implemented for every `Clone` schema; it lets [`DynSchema`] copy its inner
/// schema on write.
pub trait CloneSchema {
    fn clone_arc(&self) -> Arc<dyn SchemaLike>;
}

impl<T: SchemaLike + Clone + 'static> CloneSchema for T {
    fn clone_arc(&self) -> Arc<dyn SchemaLike> {
        Arc::new(self.clone())
    }
}

/// The parse contract shared by every schema.
///
/// The `Send + Sync` bounds allow schemas to be shared across threads and
/// stored as `Arc<dyn SchemaLike>`.
pub trait SchemaLike: CloneSchema + Send + Sync {
    fn internals(&self) -> &SchemaInternals;

    fn internals_mut(&mut self) -> &mut SchemaInternals;

    /// Parses the payload in place, appending issues relative to its path.
    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext);

    /// Parses a value at the top level, finalizing issues into a
    /// [`ParseError`].
    fn safe_parse(&self, value: Value, ctx: &ParseContext) -> Result<Value, ParseError> {
        let kind = self.internals().kind;
        tracing::trace!(schema = %kind, "parse started");

        let input = ctx.reports_input().then(|| value.clone());
        let mut payload = ParsePayload::new(value);
        self.parse_payload(&mut payload, ctx);

        if payload.issues.is_empty() {
            return Ok(payload.value);
        }
        tracing::debug!(schema = %kind, issues = payload.issues.len(), "parse failed");
        let issues = finalize_issues(payload.issues, &payload.path, ctx);
        match ParseError::from_issues(issues) {
            Some(err) => Err(err.with_input(input)),
            None => Ok(payload.value),
        }
    }

    /// Like [`SchemaLike::safe_parse`], as a `Validation`.
    fn validate_value(&self, value: Value, ctx: &ParseContext) -> Validation<Value, ParseError> {
        match self.safe_parse(value, ctx) {
            Ok(value) => Validation::Success(value),
            Err(err) => Validation::Failure(err),
        }
    }
}

/// A type-erased, cheaply clonable schema.
///
/// Builders on a shared `DynSchema` copy the inner schema first, so the
/// source schema is never mutated.
///
/// # Example
///
/// ```rust
/// use inquest::{DynSchema, Schema, TypedSchema, Value};
///
/// let fields: Vec<DynSchema> = vec![
///     Schema::string().min(1).into_dyn(),
///     Schema::number().positive().into_dyn(),
/// ];
/// assert!(fields[0].parse("a").is_ok());
/// assert_eq!(fields[1].parse(2).unwrap(), Value::Int(2));
/// ```
#[derive(Clone)]
pub struct DynSchema(Arc<dyn SchemaLike>);

impl DynSchema {
    pub fn new<S: SchemaLike + Clone + 'static>(schema: S) -> Self {
        Self(Arc::new(schema))
    }

    pub fn kind(&self) -> SchemaKind {
        self.0.internals().kind
    }
}

impl fmt::Debug for DynSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynSchema({})", self.kind())
    }
}

impl SchemaLike for DynSchema {
    fn internals(&self) -> &SchemaInternals {
        self.0.internals()
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        if Arc::get_mut(&mut self.0).is_none() {
            self.0 = self.0.clone_arc();
        }
        match Arc::get_mut(&mut self.0) {
            Some(schema) => schema.internals_mut(),
            None => unreachable!("freshly cloned schema is uniquely owned"),
        }
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        self.0.parse_payload(payload, ctx)
    }
}

impl TypedSchema for DynSchema {
    type Output = Value;

    fn narrow(value: Value) -> Result<Value, Value> {
        Ok(value)
    }

    fn into_dyn(self) -> DynSchema {
        self
    }
}

/// Typed entry points and fluent builders.
///
/// Builders take `self` by value and return a new schema; the source schema
/// is never mutated.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
///
/// let schema = Schema::string().min(3).error("too short").trim();
///
/// assert_eq!(schema.parse("  abc ").unwrap(), "abc");
/// assert_eq!(schema.parse("ab").unwrap_err().first().message, "too short");
/// ```
pub trait TypedSchema: SchemaLike + Clone + Sized + 'static {
    /// The Rust type a successful parse produces.
    type Output;

    /// Converts a parsed value into the output type, handing the value back
    /// when it has the wrong shape.
    fn narrow(value: Value) -> Result<Self::Output, Value>;

    fn parse(&self, value: impl Into<Value>) -> Result<Self::Output, ParseError> {
        self.parse_with(value, &ParseContext::new())
    }

    fn parse_with(
        &self,
        value: impl Into<Value>,
        ctx: &ParseContext,
    ) -> Result<Self::Output, ParseError> {
        let parsed = self.safe_parse(value.into(), ctx)?;
        Self::narrow(parsed).map_err(|value| {
            let expected = self.internals().kind.expected_type();
            let issue = RawIssue::invalid_type(expected, value);
            let issues = finalize_issues(vec![issue], &JsonPath::root(), ctx);
            match ParseError::from_issues(issues) {
                Some(err) => err,
                None => unreachable!("one issue was finalized"),
            }
        })
    }

    fn validate(&self, value: impl Into<Value>) -> Validation<Self::Output, ParseError> {
        self.validate_with(value, &ParseContext::new())
    }

    fn validate_with(
        &self,
        value: impl Into<Value>,
        ctx: &ParseContext,
    ) -> Validation<Self::Output, ParseError> {
        match self.parse_with(value, ctx) {
            Ok(value) => Validation::Success(value),
            Err(err) => Validation::Failure(err),
        }
    }

    /// Parses or panics with the prettified error.
    fn must_parse(&self, value: impl Into<Value>) -> Self::Output {
        match self.parse(value) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Attaches a check.
    fn with_check(mut self, check: Check) -> Self {
        self.internals_mut().push_check(check);
        self
    }

    /// Adds a predicate over the typed value; failure yields a `custom` issue.
    fn refine<F>(self, predicate: F, params: impl Into<Params>) -> Self
    where
        F: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        let params = params.into();
        let check = check::custom(
            move |value| Self::narrow(value.clone()).is_ok_and(|typed| predicate(&typed)),
            &params,
        );
        self.with_check(check)
    }

    /// Adds a free-form check that appends its own issues.
    fn check<F>(self, f: F, params: impl Into<Params>) -> Self
    where
        F: Fn(&mut ParsePayload) + Send + Sync + 'static,
    {
        let params = params.into();
        self.with_check(check::free_form(f, &params))
    }

    /// Replaces the value in place once earlier checks pass.
    fn overwrite<F>(self, f: F) -> Self
    where
        F: Fn(Self::Output) -> Self::Output + Send + Sync + 'static,
        Self::Output: Into<Value>,
    {
        self.with_check(check::overwrite(move |value| match Self::narrow(value) {
            Ok(typed) => f(typed).into(),
            Err(value) => value,
        }))
    }

    /// Sets the error customizer of the most recent check, or of the schema
    /// when no check is attached yet.
    fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        let error = error.into();
        let internals = self.internals_mut();
        match internals.checks.last_mut() {
            Some(check) => check.set_error(error),
            None => internals.error = Some(error),
        }
        self
    }

    /// Makes the most recent check abort on failure, or every check attached
    /// from now on when none is attached yet.
    fn abort(mut self) -> Self {
        let internals = self.internals_mut();
        match internals.checks.last_mut() {
            Some(check) => check.set_abort(),
            None => internals.abort = true,
        }
        self
    }

    /// Runs the most recent check only when `predicate` holds. Has no effect
    /// without a check.
    fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ParsePayload) -> bool + Send + Sync + 'static,
    {
        if let Some(check) = self.internals_mut().checks.last_mut() {
            check.set_when(Arc::new(predicate));
        }
        self
    }

    fn describe(mut self, description: impl Into<String>) -> Self {
        self.internals_mut()
            .bag_mut()
            .insert("description".to_string(), Value::from(description.into()));
        self
    }

    /// Accepts `Undefined`.
    fn optional(self) -> OptionalSchema<Self> {
        OptionalSchema::new(self)
    }

    /// Accepts `Null`.
    fn nilable(self) -> NilableSchema<Self> {
        NilableSchema::new(self)
    }

    /// Accepts `Undefined` and `Null`.
    fn nullish(self) -> OptionalSchema<Self> {
        OptionalSchema::nullish(self)
    }

    /// Substitutes `value` for nullish input.
    fn default(self, value: impl Into<Value>) -> DefaultSchema<Self> {
        DefaultSchema::new(self, Fallback::Value(value.into()))
    }

    fn default_fn<F>(self, f: F) -> DefaultSchema<Self>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultSchema::new(self, Fallback::Thunk(Arc::new(f)))
    }

    /// Substitutes `value` whenever parsing fails.
    fn prefault(self, value: impl Into<Value>) -> PrefaultSchema<Self> {
        PrefaultSchema::new(self, Fallback::Value(value.into()))
    }

    fn prefault_fn<F>(self, f: F) -> PrefaultSchema<Self>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        PrefaultSchema::new(self, Fallback::Thunk(Arc::new(f)))
    }

    /// Pipes the parsed value through `f`.
    fn transform<F, T>(self, f: F) -> PipeSchema<Self, TransformSchema>
    where
        F: Fn(Self::Output) -> Result<T, TransformError> + Send + Sync + 'static,
        T: Into<Value>,
    {
        let transform = TransformSchema::new(move |value| match Self::narrow(value) {
            Ok(typed) => f(typed).map(Into::into),
            Err(value) => Err(TransformError::new(format!(
                "cannot transform {}",
                crate::classify::classify(&value)
            ))),
        });
        PipeSchema::new(self, transform)
    }

    /// Feeds this schema's output into `next`.
    fn pipe<B: TypedSchema>(self, next: B) -> PipeSchema<Self, B> {
        PipeSchema::new(self, next)
    }

    /// A union of this schema and `other`.
    fn or<B: TypedSchema>(self, other: B) -> UnionSchema {
        UnionSchema::new([self.into_dyn(), other.into_dyn()])
    }

    fn into_dyn(self) -> DynSchema {
        DynSchema::new(self)
    }
}

// Shared schemas are parsed from several threads at once.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DynSchema>();
    assert_sync::<DynSchema>();
};
