//! Coarse type classification of input values.
//!
//! The tag produced here fills the `received` (and `expected`) fields of
//! `invalid_type` issues.

use std::fmt::{self, Display};

use crate::value::Value;

/// A coarse type tag for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedType {
    Undefined,
    Null,
    Bool,
    /// Any finite number when integer-vs-float does not matter.
    Number,
    Int,
    Float,
    NaN,
    Infinity,
    BigInt,
    String,
    Symbol,
    Array,
    Object,
    Map,
    Set,
    File,
    Date,
    Function,
    Unknown,
}

impl ParsedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsedType::Undefined => "undefined",
            ParsedType::Null => "null",
            ParsedType::Bool => "bool",
            ParsedType::Number => "number",
            ParsedType::Int => "int",
            ParsedType::Float => "float",
            ParsedType::NaN => "nan",
            ParsedType::Infinity => "infinity",
            ParsedType::BigInt => "bigint",
            ParsedType::String => "string",
            ParsedType::Symbol => "symbol",
            ParsedType::Array => "array",
            ParsedType::Object => "object",
            ParsedType::Map => "map",
            ParsedType::Set => "set",
            ParsedType::File => "file",
            ParsedType::Date => "date",
            ParsedType::Function => "function",
            ParsedType::Unknown => "unknown",
        }
    }
}

impl Display for ParsedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a value. Finite numbers are reported as `number`; `NaN` and the
/// infinities are always reported distinctly.
///
/// # Example
///
/// ```rust
/// use inquest::{classify, ParsedType, Value};
///
/// assert_eq!(classify(&Value::from("x")), ParsedType::String);
/// assert_eq!(classify(&Value::from(1.5)), ParsedType::Number);
/// assert_eq!(classify(&Value::Float(f64::NAN)), ParsedType::NaN);
/// ```
pub fn classify(value: &Value) -> ParsedType {
    match value {
        Value::Undefined => ParsedType::Undefined,
        Value::Null => ParsedType::Null,
        Value::Bool(_) => ParsedType::Bool,
        Value::Int(_) => ParsedType::Number,
        Value::Float(f) if f.is_nan() => ParsedType::NaN,
        Value::Float(f) if f.is_infinite() => ParsedType::Infinity,
        Value::Float(_) => ParsedType::Number,
        Value::BigInt(_) => ParsedType::BigInt,
        Value::String(_) => ParsedType::String,
        Value::Symbol(_) => ParsedType::Symbol,
        Value::Array(_) => ParsedType::Array,
        Value::Object(_) => ParsedType::Object,
        Value::Map(_) => ParsedType::Map,
        Value::Set(_) => ParsedType::Set,
        Value::Date(_) => ParsedType::Date,
        Value::File(_) => ParsedType::File,
        Value::Function(_) => ParsedType::Function,
    }
}

/// Classifies a value, splitting numbers into exact integers and fractional
/// floats. Used where an integer format is expected.
pub fn classify_numeric(value: &Value) -> ParsedType {
    match value {
        Value::Int(_) => ParsedType::Int,
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => ParsedType::Int,
        Value::Float(f) if f.is_finite() => ParsedType::Float,
        other => classify(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify(&Value::Undefined), ParsedType::Undefined);
        assert_eq!(classify(&Value::Null), ParsedType::Null);
        assert_eq!(classify(&Value::Bool(true)), ParsedType::Bool);
        assert_eq!(classify(&Value::Int(1)), ParsedType::Number);
        assert_eq!(classify(&Value::BigInt(BigInt::from(1))), ParsedType::BigInt);
        assert_eq!(classify(&Value::Symbol("s".into())), ParsedType::Symbol);
    }

    #[test]
    fn test_classify_non_finite_distinctly() {
        assert_eq!(classify(&Value::Float(f64::INFINITY)), ParsedType::Infinity);
        assert_eq!(classify(&Value::Float(f64::NEG_INFINITY)), ParsedType::Infinity);
        assert_eq!(classify(&Value::Float(f64::NAN)), ParsedType::NaN);
    }

    #[test]
    fn test_classify_numeric_splits_int_and_float() {
        assert_eq!(classify_numeric(&Value::Int(3)), ParsedType::Int);
        assert_eq!(classify_numeric(&Value::Float(3.0)), ParsedType::Int);
        assert_eq!(classify_numeric(&Value::Float(2.5)), ParsedType::Float);
        assert_eq!(classify_numeric(&Value::Float(f64::NAN)), ParsedType::NaN);
        assert_eq!(classify_numeric(&Value::from("3")), ParsedType::String);
    }

    #[test]
    fn test_classify_containers() {
        assert_eq!(classify(&Value::Array(vec![])), ParsedType::Array);
        assert_eq!(classify(&Value::Set(vec![])), ParsedType::Set);
        assert_eq!(classify(&Value::Map(vec![])), ParsedType::Map);
        assert_eq!(classify(&Value::object([("a", 1)])), ParsedType::Object);
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(ParsedType::Bool.to_string(), "bool");
        assert_eq!(ParsedType::BigInt.to_string(), "bigint");
    }
}
