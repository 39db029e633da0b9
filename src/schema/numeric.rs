//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for finite numbers (integers and
//! floats) and [`BigIntSchema`] for arbitrary-precision integers. Both support
//! comparison bounds, sign requirements and divisibility; numbers additionally
//! support fixed-width formats such as `int32` or `safeint`.

use std::ops::RangeInclusive;

use num_bigint::BigInt;

use crate::check::{self, BigIntFormat, NumberFormat};
use crate::coerce;
use crate::params::Params;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::parse_leaf;
use crate::schema::traits::{SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// A schema for validating finite numbers.
///
/// `NaN` and the infinities are rejected with an `invalid_type` issue that
/// reports them distinctly.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema};
///
/// let schema = Schema::number().coerce().min(10).max(100);
///
/// assert_eq!(schema.parse("42").unwrap(), 42.0);
///
/// let err = schema.parse(5).unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::TooSmall);
/// assert_eq!(err.first().minimum(), Some(&10.into()));
/// ```
#[derive(Debug, Clone)]
pub struct NumberSchema {
    internals: SchemaInternals,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Number, params),
        }
    }

    /// Enables coercion from numeric strings, booleans and dates.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    /// Greater than `value`.
    pub fn gt(self, value: impl Into<Value>) -> Self {
        self.with_check(check::greater_than(value, false))
    }

    /// Greater than or equal to `value`.
    pub fn gte(self, value: impl Into<Value>) -> Self {
        self.with_check(check::greater_than(value, true))
    }

    /// Less than `value`.
    pub fn lt(self, value: impl Into<Value>) -> Self {
        self.with_check(check::less_than(value, false))
    }

    /// Less than or equal to `value`.
    pub fn lte(self, value: impl Into<Value>) -> Self {
        self.with_check(check::less_than(value, true))
    }

    /// Alias of [`NumberSchema::gte`].
    pub fn min(self, value: impl Into<Value>) -> Self {
        self.gte(value)
    }

    /// Alias of [`NumberSchema::lte`].
    pub fn max(self, value: impl Into<Value>) -> Self {
        self.lte(value)
    }

    /// Inclusive range; equivalent to `.min(start).max(end)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    ///
    /// let schema = Schema::number().range(1..=100);
    /// assert!(schema.parse(50).is_ok());
    /// assert!(schema.parse(150).is_err());
    /// ```
    pub fn range(self, range: RangeInclusive<i64>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    pub fn positive(self) -> Self {
        self.gt(0)
    }

    pub fn negative(self) -> Self {
        self.lt(0)
    }

    pub fn nonpositive(self) -> Self {
        self.lte(0)
    }

    pub fn nonnegative(self) -> Self {
        self.gte(0)
    }

    /// An exact multiple of `step`, using decimal-safe remainder for floats.
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    ///
    /// let schema = Schema::number().multiple_of(0.1);
    /// assert!(schema.parse(0.3).is_ok());
    /// assert!(schema.parse(0.35).is_err());
    /// ```
    pub fn multiple_of(self, step: impl Into<Value>) -> Self {
        self.with_check(check::multiple_of(step))
    }

    /// Alias of [`NumberSchema::multiple_of`].
    pub fn step(self, step: impl Into<Value>) -> Self {
        self.multiple_of(step)
    }

    pub fn format(self, format: NumberFormat) -> Self {
        self.with_check(check::number_format(format))
    }

    /// A safe integer, within ±(2^53 − 1).
    pub fn int(self) -> Self {
        self.format(NumberFormat::SafeInt)
    }

    /// Alias of [`NumberSchema::int`].
    pub fn safe(self) -> Self {
        self.int()
    }

    pub fn int32(self) -> Self {
        self.format(NumberFormat::Int32)
    }

    pub fn uint32(self) -> Self {
        self.format(NumberFormat::Uint32)
    }

    pub fn float32(self) -> Self {
        self.format(NumberFormat::Float32)
    }

    pub fn float64(self) -> Self {
        self.format(NumberFormat::Float64)
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn is_finite_number(value: &Value) -> bool {
    match value {
        Value::Int(_) => true,
        Value::Float(f) => f.is_finite(),
        _ => false,
    }
}

impl SchemaLike for NumberSchema {
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
            is_finite_number,
            coerce::to_number,
        );
    }
}

impl TypedSchema for NumberSchema {
    type Output = f64;

    fn narrow(value: Value) -> Result<f64, Value> {
        match value {
            Value::Int(n) => Ok(n as f64),
            Value::Float(f) => Ok(f),
            other => Err(other),
        }
    }
}

/// A schema for arbitrary-precision integers.
///
/// # Example
///
/// ```rust
/// use inquest::{Schema, TypedSchema};
/// use num_bigint::BigInt;
///
/// let schema = Schema::bigint().coerce().positive().multiple_of(3);
///
/// let big = "300000000000000000000000000000";
/// assert_eq!(schema.parse(big).unwrap(), big.parse::<BigInt>().unwrap());
/// assert!(schema.parse(4).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BigIntSchema {
    internals: SchemaInternals,
}

impl BigIntSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::BigInt, params),
        }
    }

    /// Enables coercion from integer strings, whole numbers and booleans.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    pub fn gt(self, value: impl Into<BigInt>) -> Self {
        self.with_check(check::greater_than(value.into(), false))
    }

    pub fn gte(self, value: impl Into<BigInt>) -> Self {
        self.with_check(check::greater_than(value.into(), true))
    }

    pub fn lt(self, value: impl Into<BigInt>) -> Self {
        self.with_check(check::less_than(value.into(), false))
    }

    pub fn lte(self, value: impl Into<BigInt>) -> Self {
        self.with_check(check::less_than(value.into(), true))
    }

    pub fn min(self, value: impl Into<BigInt>) -> Self {
        self.gte(value)
    }

    pub fn max(self, value: impl Into<BigInt>) -> Self {
        self.lte(value)
    }

    pub fn positive(self) -> Self {
        self.gt(0)
    }

    pub fn negative(self) -> Self {
        self.lt(0)
    }

    pub fn nonpositive(self) -> Self {
        self.lte(0)
    }

    pub fn nonnegative(self) -> Self {
        self.gte(0)
    }

    pub fn multiple_of(self, step: impl Into<BigInt>) -> Self {
        self.with_check(check::multiple_of(step.into()))
    }

    pub fn format(self, format: BigIntFormat) -> Self {
        self.with_check(check::bigint_format(format))
    }

    pub fn int64(self) -> Self {
        self.format(BigIntFormat::Int64)
    }

    pub fn uint64(self) -> Self {
        self.format(BigIntFormat::Uint64)
    }
}

impl Default for BigIntSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for BigIntSchema {
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
            |v| matches!(v, Value::BigInt(_)),
            coerce::to_bigint,
        );
    }
}

impl TypedSchema for BigIntSchema {
    type Output = BigInt;

    fn narrow(value: Value) -> Result<BigInt, Value> {
        match value {
            Value::BigInt(n) => Ok(n),
            other => Err(other),
        }
    }
}
