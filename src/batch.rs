//! Parallel parsing of independent inputs.
//!
//! Schemas are `Send + Sync`, so one schema can validate many inputs at once
//! on the rayon thread pool. Results always come back in input order.

use rayon::prelude::*;
use stillwater::Validation;

use crate::error::ParseError;
use crate::path::PathSegment;
use crate::schema::TypedSchema;
use crate::validation::ParseContext;
use crate::value::Value;

/// Parses every input with `schema` in parallel.
///
/// # Example
///
/// ```rust
/// use inquest::{parse_batch, Schema, Value};
///
/// let schema = Schema::number().positive();
/// let results = parse_batch(&schema, vec![Value::from(1), Value::from(-1), Value::from(2)]);
///
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// assert_eq!(results[2].as_ref().ok(), Some(&2.0));
/// ```
pub fn parse_batch<S>(schema: &S, inputs: Vec<Value>) -> Vec<Result<S::Output, ParseError>>
where
    S: TypedSchema,
    S::Output: Send,
{
    parse_batch_with(schema, inputs, &ParseContext::new())
}

pub fn parse_batch_with<S>(
    schema: &S,
    inputs: Vec<Value>,
    ctx: &ParseContext,
) -> Vec<Result<S::Output, ParseError>>
where
    S: TypedSchema,
    S::Output: Send,
{
    tracing::debug!(schema = %schema.internals().kind, inputs = inputs.len(), "batch parse");
    inputs
        .into_par_iter()
        .map(|input| schema.parse_with(input, ctx))
        .collect()
}

/// Parses every input and accumulates all failures into one error whose
/// issue paths start with the input's index.
///
/// # Example
///
/// ```rust
/// use inquest::{validate_batch, Schema, Value};
///
/// let schema = Schema::string().min(2);
/// let result = validate_batch(&schema, vec![Value::from("ok"), Value::from("x")]);
///
/// let err = result.into_result().unwrap_err();
/// assert_eq!(err.first().path.to_string(), "[1]");
/// ```
pub fn validate_batch<S>(schema: &S, inputs: Vec<Value>) -> Validation<Vec<S::Output>, ParseError>
where
    S: TypedSchema,
    S::Output: Send,
{
    let mut values = Vec::with_capacity(inputs.len());
    let mut issues = Vec::new();
    for (index, result) in parse_batch(schema, inputs).into_iter().enumerate() {
        match result {
            Ok(value) => values.push(value),
            Err(err) => issues.extend(err.into_vec().into_iter().map(|mut issue| {
                issue.path.prepend(PathSegment::Index(index));
                issue
            })),
        }
    }
    match ParseError::from_issues(issues) {
        Some(err) => Validation::Failure(err),
        None => Validation::Success(values),
    }
}
