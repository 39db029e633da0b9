//! Array and tuple schema validation.
//!
//! [`ArraySchema`] validates every element against one element schema and
//! applies length checks once the elements are done. [`TupleSchema`] validates
//! fixed positions, with optional trailing positions and an optional rest
//! schema for extra elements.

use crate::check::{self, run_checks};
use crate::error::{Origin, RawIssue};
use crate::params::Params;
use crate::path::PathSegment;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::{reject_type, settle_nullish};
use crate::schema::traits::{DynSchema, SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// Parses `value` with `schema` in a child payload and merges its issues at
/// `index`. Returns the parsed value.
fn parse_element(
    schema: &dyn SchemaLike,
    value: Value,
    index: usize,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
) -> Value {
    let mut child = ParsePayload::new(value);
    schema.parse_payload(&mut child, ctx);
    payload.merge_child(child.issues, Some(&PathSegment::Index(index)));
    child.value
}

/// A schema for validating arrays whose elements all match one schema.
///
/// Element issues are reported at the element's index; all elements are
/// visited even when some fail.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema};
///
/// let schema = Schema::array(Schema::string().min(1)).max(5);
///
/// assert_eq!(schema.parse(vec!["a", "b"]).unwrap(), vec!["a", "b"]);
///
/// let err = schema.parse(vec!["ok", "", "also-ok"]).unwrap_err();
/// assert_eq!(err.len(), 1);
/// assert_eq!(err.first().code(), IssueCode::TooSmall);
/// assert_eq!(err.first().path.to_string(), "[1]");
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema<S> {
    internals: SchemaInternals,
    element: S,
}

impl<S: TypedSchema> ArraySchema<S> {
    pub fn new(element: S) -> Self {
        Self::with_params(element, &Params::default())
    }

    pub fn with_params(element: S, params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Array, params),
            element,
        }
    }

    pub fn element(&self) -> &S {
        &self.element
    }

    /// At least `min` elements.
    pub fn min(self, min: usize) -> Self {
        self.with_check(check::min_length(min))
    }

    /// At most `max` elements.
    pub fn max(self, max: usize) -> Self {
        self.with_check(check::max_length(max))
    }

    /// Exactly `len` elements.
    pub fn length(self, len: usize) -> Self {
        self.with_check(check::length_equals(len))
    }

    /// At least one element.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }
}

impl<S: TypedSchema> SchemaLike for ArraySchema<S> {
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
        let Value::Array(items) = &mut payload.value else {
            reject_type(&self.internals, payload);
            return;
        };
        let parsed: Vec<Value> = std::mem::take(items)
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_element(&self.element, item, index, payload, ctx))
            .collect();
        payload.value = Value::Array(parsed);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl<S: TypedSchema> TypedSchema for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Array(items) => items.into_iter().map(S::narrow).collect(),
            other => Err(other),
        }
    }
}

/// A schema for fixed-position arrays.
///
/// Trailing positions whose schema accepts `Undefined` may be omitted. Extra
/// elements are rejected unless a rest schema is set.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema, Value};
///
/// let point = Schema::tuple([
///     Schema::number().into_dyn(),
///     Schema::number().into_dyn(),
///     Schema::string().optional().into_dyn(),
/// ]);
///
/// assert!(point.parse(vec![1, 2]).is_ok());
/// assert!(point.parse(Value::from(vec![Value::from(1), Value::from(2), Value::from("m")])).is_ok());
///
/// let err = point.parse(vec![1]).unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::TooSmall);
///
/// let err = point.parse(vec![1, 2, 3, 4]).unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::TooBig);
/// ```
#[derive(Debug, Clone)]
pub struct TupleSchema {
    internals: SchemaInternals,
    items: Vec<DynSchema>,
    rest: Option<DynSchema>,
}

impl TupleSchema {
    pub fn new(items: impl IntoIterator<Item = DynSchema>) -> Self {
        Self::with_params(items, &Params::default())
    }

    pub fn with_params(items: impl IntoIterator<Item = DynSchema>, params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Tuple, params),
            items: items.into_iter().collect(),
            rest: None,
        }
    }

    /// Validates elements past the fixed positions with `schema`.
    pub fn rest<S: TypedSchema>(mut self, schema: S) -> Self {
        self.rest = Some(schema.into_dyn());
        self
    }

    pub fn items(&self) -> &[DynSchema] {
        &self.items
    }

    /// Index of the first position of the optional tail.
    fn optional_start(&self) -> usize {
        self.items
            .iter()
            .rposition(|item| !item.internals().optional)
            .map_or(0, |last_required| last_required + 1)
    }
}

impl SchemaLike for TupleSchema {
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
        let Value::Array(input) = &payload.value else {
            reject_type(&self.internals, payload);
            return;
        };

        let required = self.optional_start();
        let bound_issue = if input.len() < required {
            Some(RawIssue::too_small(Origin::Array, required, true, payload.value.clone()))
        } else if self.rest.is_none() && input.len() > self.items.len() {
            Some(RawIssue::too_big(
                Origin::Array,
                self.items.len(),
                true,
                payload.value.clone(),
            ))
        } else {
            None
        };
        if let Some(mut issue) = bound_issue {
            issue.inst = self.internals.error.clone();
            payload.push_issue(issue);
            return;
        }

        let input = match &mut payload.value {
            Value::Array(items) => std::mem::take(items),
            _ => Vec::new(),
        };
        let mut parsed = Vec::with_capacity(input.len());
        let mut input = input.into_iter();
        for (index, (schema, item)) in self.items.iter().zip(input.by_ref()).enumerate() {
            parsed.push(parse_element(schema, item, index, payload, ctx));
        }
        if let Some(rest) = &self.rest {
            for (offset, item) in input.enumerate() {
                let index = self.items.len() + offset;
                parsed.push(parse_element(rest, item, index, payload, ctx));
            }
        }
        payload.value = Value::Array(parsed);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl TypedSchema for TupleSchema {
    type Output = Vec<Value>;

    fn narrow(value: Value) -> Result<Vec<Value>, Value> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}
