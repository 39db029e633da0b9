//! Leaf coercions.
//!
//! Each function converts a value of the wrong type into the leaf's expected
//! type, or returns `None`. Coercion never produces issues: a failed coercion
//! leaves the schema to report its usual `invalid_type`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use num_bigint::BigInt;
use num_traits::Zero;

use crate::value::Value;

/// Renders scalars as strings.
///
/// # Example
///
/// ```rust
/// use inquest::{coerce, Value};
///
/// assert_eq!(coerce::to_string(&Value::Int(42)), Some(Value::from("42")));
/// assert_eq!(coerce::to_string(&Value::Array(vec![])), None);
/// ```
pub fn to_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::BigInt(_) | Value::Date(_) => {
            Some(Value::String(value.to_string()))
        }
        _ => None,
    }
}

/// Parses numeric strings and maps booleans to `1`/`0`, dates to epoch
/// milliseconds.
pub fn to_number(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) | Value::Float(_) => Some(value.clone()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(n) = s.parse::<i64>() {
                return Some(Value::Int(n));
            }
            s.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
        }
        Value::Bool(b) => Some(Value::Int(i64::from(*b))),
        Value::BigInt(_) => value
            .as_i64()
            .map(Value::Int)
            .or_else(|| value.as_f64().map(Value::Float)),
        Value::Date(d) => Some(Value::Int(d.timestamp_millis())),
        _ => None,
    }
}

/// Parses integer strings and widens whole numbers and booleans.
pub fn to_bigint(value: &Value) -> Option<Value> {
    match value {
        Value::BigInt(_) => Some(value.clone()),
        Value::String(s) => s.trim().parse::<BigInt>().ok().map(Value::BigInt),
        Value::Bool(b) => Some(Value::BigInt(BigInt::from(u8::from(*b)))),
        Value::Int(_) | Value::Float(_) => value.as_bigint().map(Value::BigInt),
        _ => None,
    }
}

/// Truthiness: everything is true except `false`, zero, `NaN` and the empty
/// string.
pub fn to_boolean(value: &Value) -> Option<Value> {
    let truthy = match value {
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::BigInt(n) => !n.is_zero(),
        Value::String(s) => !s.is_empty(),
        Value::Undefined | Value::Null => false,
        _ => true,
    };
    Some(Value::Bool(truthy))
}

/// Parses RFC 3339 timestamps and `YYYY-MM-DD` dates; numbers are epoch
/// milliseconds.
pub fn to_date(value: &Value) -> Option<Value> {
    match value {
        Value::Date(_) => Some(value.clone()),
        Value::String(s) => parse_date(s.trim()).map(Value::Date),
        Value::Int(millis) => Utc.timestamp_millis_opt(*millis).single().map(Value::Date),
        Value::Float(f) if f.is_finite() => Utc
            .timestamp_millis_opt(*f as i64)
            .single()
            .map(Value::Date),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&Value::from("42")), Some(Value::Int(42)));
        assert_eq!(to_number(&Value::from(" 2.5 ")), Some(Value::Float(2.5)));
        assert_eq!(to_number(&Value::from("abc")), None);
        assert_eq!(to_number(&Value::from("")), None);
        assert_eq!(to_number(&Value::from("inf")), None);
        assert_eq!(to_number(&Value::Bool(true)), Some(Value::Int(1)));
    }

    #[test]
    fn test_to_bigint() {
        let expected = "123456789012345678901234567890".parse::<BigInt>().unwrap();
        assert_eq!(
            to_bigint(&Value::from("123456789012345678901234567890")),
            Some(Value::BigInt(expected))
        );
        assert_eq!(to_bigint(&Value::Float(1.5)), None);
    }

    #[test]
    fn test_to_boolean_truthiness() {
        assert_eq!(to_boolean(&Value::from("")), Some(Value::Bool(false)));
        assert_eq!(to_boolean(&Value::from("false")), Some(Value::Bool(true)));
        assert_eq!(to_boolean(&Value::Int(0)), Some(Value::Bool(false)));
        assert_eq!(to_boolean(&Value::Array(vec![])), Some(Value::Bool(true)));
    }

    #[test]
    fn test_to_date() {
        let date = to_date(&Value::from("2024-03-01")).unwrap();
        assert_eq!(date.to_string(), "2024-03-01T00:00:00.000Z");
        assert!(to_date(&Value::from("2024-03-01T10:00:00+02:00")).is_some());
        assert!(to_date(&Value::from("yesterday")).is_none());
        assert_eq!(
            to_date(&Value::Int(0)).unwrap().to_string(),
            "1970-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&Value::Bool(true)), Some(Value::from("true")));
        assert_eq!(to_string(&Value::Null), None);
    }
}
