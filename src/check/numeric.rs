//! Numeric comparison, divisibility and format checks.
//!
//! Comparisons work across `Int`, `Float` and `BigInt` inputs (and `Date`
//! against a date bound). Divisibility uses exact big-integer remainder when
//! either side is a big integer, exact `i64` remainder for two integers, and a
//! decimal-scaled remainder for floats so `0.3` is a multiple of `0.1`.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::check::{Check, CheckKind};
use crate::classify::{classify, classify_numeric, ParsedType};
use crate::error::{Origin, RawIssue};
use crate::value::Value;

/// The largest integer `n` such that `n` and `n + 1` are exactly representable as `f64`.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

fn origin_of_bound(bound: &Value) -> Origin {
    match bound {
        Value::BigInt(_) => Origin::BigInt,
        Value::Date(_) => Origin::Date,
        _ => Origin::Number,
    }
}

/// Keeps the bag bound under `key` at its tightest value.
fn tighten(
    internals: &mut crate::schema::SchemaInternals,
    key: &str,
    bound: &Value,
    tighter: Ordering,
) {
    let replace = internals
        .bag()
        .get(key)
        .is_none_or(|current| bound.compare(current) == Some(tighter));
    if replace {
        internals.bag_mut().insert(key.to_string(), bound.clone());
    }
}

/// `value < bound`, or `value <= bound` when `inclusive`.
pub fn less_than(bound: impl Into<Value>, inclusive: bool) -> Check {
    let bound = bound.into();
    let origin = origin_of_bound(&bound);
    let attached = bound.clone();
    Check::new(CheckKind::LessThan, move |payload, _| {
        let ok = match payload.value.compare(&bound) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => inclusive,
            _ => false,
        };
        if !ok {
            let issue = RawIssue::too_big(origin, bound.clone(), inclusive, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        let key = if inclusive {
            "maximum"
        } else {
            "exclusive_maximum"
        };
        tighten(internals, key, &attached, Ordering::Less);
    })
}

/// `value > bound`, or `value >= bound` when `inclusive`.
pub fn greater_than(bound: impl Into<Value>, inclusive: bool) -> Check {
    let bound = bound.into();
    let origin = origin_of_bound(&bound);
    let attached = bound.clone();
    Check::new(CheckKind::GreaterThan, move |payload, _| {
        let ok = match payload.value.compare(&bound) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => inclusive,
            _ => false,
        };
        if !ok {
            let issue =
                RawIssue::too_small(origin, bound.clone(), inclusive, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        let key = if inclusive {
            "minimum"
        } else {
            "exclusive_minimum"
        };
        tighten(internals, key, &attached, Ordering::Greater);
    })
}

/// `value` is an exact multiple of `divisor`.
pub fn multiple_of(divisor: impl Into<Value>) -> Check {
    let divisor = divisor.into();
    let origin = origin_of_bound(&divisor);
    let attached = divisor.clone();
    Check::new(CheckKind::MultipleOf, move |payload, _| {
        if !is_multiple(&payload.value, &divisor) {
            let issue = RawIssue::not_multiple_of(origin, divisor.clone(), payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        internals
            .bag_mut()
            .insert("multiple_of".to_string(), attached.clone());
    })
}

fn is_multiple(value: &Value, divisor: &Value) -> bool {
    match (value, divisor) {
        (Value::Int(v), Value::Int(d)) => {
            if *d == 0 {
                *v == 0
            } else {
                v.checked_rem(*d).unwrap_or(0) == 0
            }
        }
        (Value::BigInt(_), _) | (_, Value::BigInt(_)) => {
            match (value.as_bigint(), divisor.as_bigint()) {
                (Some(v), Some(d)) if d.is_zero() => v.is_zero(),
                (Some(v), Some(d)) => (v % d).is_zero(),
                _ => false,
            }
        }
        _ => match (value.as_f64(), divisor.as_f64()) {
            (Some(v), Some(d)) => float_safe_remainder(v, d) == 0.0,
            _ => false,
        },
    }
}

fn decimal_places(x: f64) -> i32 {
    let rendered = x.to_string();
    rendered
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as i32)
}

/// Remainder of `value / step` computed on decimal-scaled integers.
///
/// Both operands are scaled by `10^d`, where `d` is the larger number of
/// decimal places of the two, rounded, and divided with exact integer
/// semantics. A zero step yields `NaN`.
pub(crate) fn float_safe_remainder(value: f64, step: f64) -> f64 {
    let decimals = decimal_places(value).max(decimal_places(step));
    let scale = 10f64.powi(decimals);
    let value_int = (value * scale).round();
    let step_int = (step * scale).round();
    if step_int == 0.0 {
        return f64::NAN;
    }
    (value_int % step_int) / scale
}

/// Number formats with fixed inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Int32,
    Uint32,
    Float32,
    Float64,
    /// Integers within ±(2^53 − 1).
    SafeInt,
}

impl NumberFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Int32 => "int32",
            NumberFormat::Uint32 => "uint32",
            NumberFormat::Float32 => "float32",
            NumberFormat::Float64 => "float64",
            NumberFormat::SafeInt => "safeint",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            NumberFormat::Int32 | NumberFormat::Uint32 | NumberFormat::SafeInt
        )
    }

    /// Inclusive `(minimum, maximum)` of the format.
    pub fn bounds(&self) -> (Value, Value) {
        match self {
            NumberFormat::Int32 => (Value::from(i32::MIN), Value::from(i32::MAX)),
            NumberFormat::Uint32 => (Value::Int(0), Value::from(u32::MAX)),
            NumberFormat::Float32 => (
                Value::Float(-f64::from(f32::MAX)),
                Value::Float(f64::from(f32::MAX)),
            ),
            NumberFormat::Float64 => (Value::Float(f64::MIN), Value::Float(f64::MAX)),
            NumberFormat::SafeInt => (Value::Int(-MAX_SAFE_INTEGER), Value::Int(MAX_SAFE_INTEGER)),
        }
    }
}

/// Enforces a number format.
///
/// Integer formats reject fractional and non-finite values with an
/// `invalid_type` issue (expected `int`); float formats reject `NaN` and the
/// infinities. In-range checks produce `too_small`/`too_big` against the
/// format's inclusive bounds.
pub fn number_format(format: NumberFormat) -> Check {
    let (minimum, maximum) = format.bounds();
    let origin = if format.is_integer() {
        Origin::Int
    } else {
        Origin::Number
    };
    let (attached_min, attached_max) = (minimum.clone(), maximum.clone());

    Check::new(CheckKind::NumberFormat, move |payload, _| {
        let value = &payload.value;
        if format.is_integer() && !value.is_whole_number() {
            let issue = RawIssue::invalid_type_received(
                ParsedType::Int,
                classify_numeric(value),
                value.clone(),
            );
            payload.push_issue(issue);
            return;
        }
        if !value.is_finite_number() {
            let issue =
                RawIssue::invalid_type_received(ParsedType::Number, classify(value), value.clone());
            payload.push_issue(issue);
            return;
        }
        if value.compare(&minimum) == Some(Ordering::Less) {
            let issue = RawIssue::too_small(origin, minimum.clone(), true, value.clone());
            payload.push_issue(issue);
        } else if value.compare(&maximum) == Some(Ordering::Greater) {
            let issue = RawIssue::too_big(origin, maximum.clone(), true, value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        let bag = internals.bag_mut();
        bag.insert("format".to_string(), Value::from(format.as_str()));
        bag.insert("minimum".to_string(), attached_min.clone());
        bag.insert("maximum".to_string(), attached_max.clone());
    })
}

/// Big-integer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigIntFormat {
    Int64,
    Uint64,
}

impl BigIntFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            BigIntFormat::Int64 => "int64",
            BigIntFormat::Uint64 => "uint64",
        }
    }

    pub fn bounds(&self) -> (BigInt, BigInt) {
        match self {
            BigIntFormat::Int64 => (BigInt::from(i64::MIN), BigInt::from(i64::MAX)),
            BigIntFormat::Uint64 => (BigInt::zero(), BigInt::from(u64::MAX)),
        }
    }
}

/// Enforces a big-integer format's inclusive bounds.
pub fn bigint_format(format: BigIntFormat) -> Check {
    let (minimum, maximum) = format.bounds();
    Check::new(CheckKind::BigIntFormat, move |payload, _| {
        let Some(n) = payload.value.as_bigint() else {
            let issue = RawIssue::invalid_type(ParsedType::BigInt, payload.value.clone());
            payload.push_issue(issue);
            return;
        };
        if n < minimum {
            let issue = RawIssue::too_small(
                Origin::BigInt,
                minimum.clone(),
                true,
                payload.value.clone(),
            );
            payload.push_issue(issue);
        } else if n > maximum {
            let issue =
                RawIssue::too_big(Origin::BigInt, maximum.clone(), true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        internals
            .bag_mut()
            .insert("format".to_string(), Value::from(format.as_str()));
    })
}
