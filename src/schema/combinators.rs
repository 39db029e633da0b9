//! Schema combinators for composing validation logic.
//!
//! - [`UnionSchema`]: the first branch that parses cleanly wins
//! - [`PipeSchema`]: feeds one schema's output into another
//! - [`TransformSchema`]: maps a value with a fallible function
//!
//! # Example
//!
//! ```rust
//! use inquest::{Schema, TypedSchema, TransformError, Value};
//!
//! // Flexible type - string or integer ID
//! let id = Schema::union([
//!     Schema::string().min(1).into_dyn(),
//!     Schema::number().int().positive().into_dyn(),
//! ]);
//! assert_eq!(id.parse(7).unwrap(), Value::Int(7));
//!
//! // Parse, then convert
//! let length = Schema::string().transform(|s| Ok::<_, TransformError>(s.len() as i64));
//! assert_eq!(length.parse("four").unwrap(), Value::Int(4));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::check::run_checks;
use crate::error::{finalize_issues, IssueDetails, RawIssue, TransformError};
use crate::path::JsonPath;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::traits::{DynSchema, SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// Tries each option in order and keeps the first clean result.
///
/// When every option fails, a single `invalid_union` issue lists each
/// option's issues in option order.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, IssueDetails, Schema, TypedSchema, Value};
///
/// let schema = Schema::number().int().or(Schema::string().min(3));
///
/// assert_eq!(schema.parse("abc").unwrap(), Value::from("abc"));
///
/// let err = schema.parse(3.14).unwrap_err();
/// assert_eq!(err.len(), 1);
/// assert_eq!(err.first().code(), IssueCode::InvalidUnion);
/// let IssueDetails::InvalidUnion { errors } = &err.first().details else {
///     unreachable!()
/// };
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UnionSchema {
    internals: SchemaInternals,
    options: Vec<DynSchema>,
}

impl UnionSchema {
    pub fn new(options: impl IntoIterator<Item = DynSchema>) -> Self {
        let options: Vec<DynSchema> = options.into_iter().collect();
        let mut internals = SchemaInternals::new(SchemaKind::Union);
        internals.optional = options.iter().any(|o| o.internals().optional);
        internals.nilable = options.iter().any(|o| o.internals().nilable);
        internals.values = options
            .iter()
            .map(|o| o.internals().values.clone())
            .collect::<Option<Vec<_>>>()
            .map(|sets| sets.concat());
        Self { internals, options }
    }

    pub fn options(&self) -> &[DynSchema] {
        &self.options
    }
}

impl SchemaLike for UnionSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        let mut errors = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.iter().enumerate() {
            let mut attempt = ParsePayload::new(payload.value.clone());
            option.parse_payload(&mut attempt, ctx);
            if !attempt.has_issues() {
                tracing::trace!(branch = index, schema = %option.kind(), "union branch matched");
                payload.value = attempt.value;
                run_checks(
                    payload,
                    &self.internals.checks,
                    ctx,
                    self.internals.error.as_ref(),
                );
                return;
            }
            errors.push(finalize_issues(attempt.issues, &JsonPath::root(), ctx));
        }

        let mut issue = RawIssue::new(IssueDetails::InvalidUnion { errors }, payload.value.clone())
            .with_continue(false);
        issue.inst = self.internals.error.clone();
        payload.push_issue(issue);
    }
}

impl TypedSchema for UnionSchema {
    type Output = Value;

    fn narrow(value: Value) -> Result<Value, Value> {
        Ok(value)
    }
}

/// Runs `input`, then runs `output` on the result when `input` produced no
/// issues.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
///
/// let schema = Schema::string().trim().pipe(Schema::string().min(3));
///
/// assert_eq!(schema.parse("  abc  ").unwrap(), "abc");
/// assert!(schema.parse("  a  ").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PipeSchema<A, B> {
    internals: SchemaInternals,
    input: A,
    output: B,
}

impl<A: TypedSchema, B: TypedSchema> PipeSchema<A, B> {
    pub fn new(input: A, output: B) -> Self {
        let mut internals = SchemaInternals::new(SchemaKind::Pipe);
        internals.optional = input.internals().optional;
        internals.nilable = input.internals().nilable;
        internals.inherit(input.internals());
        Self {
            internals,
            input,
            output,
        }
    }

    pub fn input(&self) -> &A {
        &self.input
    }

    pub fn output(&self) -> &B {
        &self.output
    }
}

impl<A: TypedSchema, B: TypedSchema> SchemaLike for PipeSchema<A, B> {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        self.input.parse_payload(payload, ctx);
        if payload.has_issues() {
            return;
        }
        self.output.parse_payload(payload, ctx);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl<A: TypedSchema, B: TypedSchema> TypedSchema for PipeSchema<A, B> {
    type Output = B::Output;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        B::narrow(value)
    }
}

type TransformFn = Arc<dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync>;

/// Maps the value with a fallible function. An error becomes a `custom`
/// issue carrying the error's message.
///
/// Transforms do not validate; use them as the output side of a pipe.
#[derive(Clone)]
pub struct TransformSchema {
    internals: SchemaInternals,
    f: TransformFn,
}

impl TransformSchema {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        let mut internals = SchemaInternals::new(SchemaKind::Transform);
        internals.optional = true;
        internals.nilable = true;
        Self {
            internals,
            f: Arc::new(f),
        }
    }
}

impl fmt::Debug for TransformSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformSchema").finish_non_exhaustive()
    }
}

impl SchemaLike for TransformSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        let input = payload.value.clone();
        match (self.f)(std::mem::take(&mut payload.value)) {
            Ok(value) => payload.value = value,
            Err(err) => {
                let mut issue = RawIssue::custom(Default::default(), input.clone())
                    .with_message(err.to_string());
                issue.inst = self.internals.error.clone();
                payload.value = input;
                payload.push_issue(issue);
                return;
            }
        }
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl TypedSchema for TransformSchema {
    type Output = Value;

    fn narrow(value: Value) -> Result<Value, Value> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_union_first_success_wins() {
        let schema = UnionSchema::new([
            Schema::number().into_dyn(),
            Schema::number().coerce().into_dyn(),
        ]);
        assert_eq!(schema.parse(7).unwrap(), Value::Int(7));
        assert_eq!(schema.parse("8").unwrap(), Value::Int(8));
    }

    #[test]
    fn test_union_collects_branch_issues_in_order() {
        let schema = UnionSchema::new([
            Schema::number().int().into_dyn(),
            Schema::string().min(3).into_dyn(),
        ]);
        let err = schema.parse(3.14).unwrap_err();
        let IssueDetails::InvalidUnion { errors } = &err.first().details else {
            panic!("expected invalid_union");
        };
        assert_eq!(errors[0][0].code(), IssueCode::InvalidType);
        assert_eq!(errors[1][0].code(), IssueCode::InvalidType);
        assert_eq!(err.first().message, "Invalid input");
    }

    #[test]
    fn test_union_flags_follow_options() {
        let schema = UnionSchema::new([
            Schema::string().optional().into_dyn(),
            Schema::number().into_dyn(),
        ]);
        assert!(schema.internals().optional);
        assert!(!schema.internals().nilable);
        assert_eq!(schema.parse(Value::Undefined).unwrap(), Value::Undefined);
    }

    #[test]
    fn test_union_of_literals_exposes_values() {
        let schema = Schema::literal("a").or(Schema::literal("b"));
        assert_eq!(
            schema.internals().values,
            Some(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_pipe_skips_output_after_failure() {
        let schema = PipeSchema::new(Schema::string(), Schema::string().min(3));
        let err = schema.parse(1).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.first().code(), IssueCode::InvalidType);
    }

    #[test]
    fn test_transform_error_becomes_custom_issue() {
        let schema = Schema::string().transform(|s| {
            s.parse::<i64>()
                .map_err(|_| TransformError::new(format!("'{s}' is not an integer")))
        });
        assert_eq!(schema.parse("12").unwrap(), Value::Int(12));
        let err = schema.parse("x").unwrap_err();
        assert_eq!(err.first().code(), IssueCode::Custom);
        assert_eq!(err.first().message, "'x' is not an integer");
    }
}
