//! Dynamic input values.
//!
//! Every schema consumes a [`Value`]. The enum is deliberately richer than JSON:
//! it distinguishes absent (`Undefined`) from explicit `Null`, exact integers from
//! floats, carries arbitrary-precision integers, and models keyed maps, sets,
//! dates, files and callables so the type classifier can report precisely what
//! was received.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use serde_json::json;

/// A file-like input: a name, a content type and a size in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileValue {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileValue {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

type Callable = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// An opaque callable carried as a value.
///
/// Two function values are equal only when they share the same allocation.
#[derive(Clone)]
pub struct FunctionValue(Callable);

impl FunctionValue {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionValue(..)")
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

/// A dynamically typed input value.
///
/// # Example
///
/// ```rust
/// use inquest::Value;
/// use serde_json::json;
///
/// let value: Value = json!({"name": "Alice", "tags": ["a", "b"]}).into();
/// assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
/// assert_eq!(Value::from(3).to_string(), "3");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// An absent value (a missing key, an unset slot).
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(BigInt),
    String(String),
    Symbol(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    /// A keyed collection; entries keep insertion order.
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    Date(DateTime<Utc>),
    File(FileValue),
    Function(FunctionValue),
}

impl Value {
    /// Builds an object value, keeping the given key order.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an `i64` when it is an exact integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                if *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            Value::BigInt(n) => n.to_i64(),
            _ => None,
        }
    }

    /// Returns the value as an `f64` for any numeric kind.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::BigInt(n) => n.to_f64(),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Value::BigInt(n) => Some(n.clone()),
            Value::Int(n) => Some(BigInt::from(*n)),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                num_bigint::ToBigInt::to_bigint(f)
            }
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileValue> {
        match self {
            Value::File(f) => Some(f),
            _ => None,
        }
    }

    /// Looks up a property of an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// True for `Int`, and for `Float` values with no fractional part.
    pub fn is_whole_number(&self) -> bool {
        match self {
            Value::Int(_) | Value::BigInt(_) => true,
            Value::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => false,
        }
    }

    /// True for every numeric value except `NaN` and the infinities.
    pub fn is_finite_number(&self) -> bool {
        match self {
            Value::Int(_) | Value::BigInt(_) => true,
            Value::Float(f) => f.is_finite(),
            _ => false,
        }
    }

    /// Length of length-bearing values: strings (in characters), arrays and sets.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) | Value::Set(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Size of size-bearing values: maps, sets and files (in bytes).
    pub fn size(&self) -> Option<u64> {
        match self {
            Value::Map(entries) => Some(entries.len() as u64),
            Value::Set(items) => Some(items.len() as u64),
            Value::File(file) => Some(file.size),
            _ => None,
        }
    }

    /// Orders two values of comparable kinds.
    ///
    /// Integers, floats and big integers compare numerically with each other;
    /// dates compare chronologically and strings lexicographically. Anything
    /// else (and `NaN`) is unordered.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::BigInt(a), Value::BigInt(b)) => Some(a.cmp(b)),
            (Value::BigInt(a), Value::Int(b)) => Some(a.cmp(&BigInt::from(*b))),
            (Value::Int(a), Value::BigInt(b)) => Some(BigInt::from(*a).cmp(b)),
            (Value::Int(a), Value::Float(b)) => compare_exact(&BigInt::from(*a), *b),
            (Value::Float(a), Value::Int(b)) => {
                compare_exact(&BigInt::from(*b), *a).map(Ordering::reverse)
            }
            (Value::BigInt(a), Value::Float(b)) => compare_exact(a, *b),
            (Value::Float(a), Value::BigInt(b)) => compare_exact(b, *a).map(Ordering::reverse),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Renders the value as JSON for issue output.
    ///
    /// Big integers become decimal strings, dates RFC 3339 strings, maps arrays
    /// of `[key, value]` pairs and sets arrays. Non-finite floats, callables and
    /// `Undefined` become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Undefined | Value::Null | Value::Function(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::BigInt(n) => Json::String(n.to_string()),
            Value::String(s) | Value::Symbol(s) => Json::String(s.clone()),
            Value::Array(items) | Value::Set(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Map(entries) => Json::Array(
                entries
                    .iter()
                    .map(|(k, v)| Json::Array(vec![k.to_json(), v.to_json()]))
                    .collect(),
            ),
            Value::Date(d) => Json::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::File(file) => json!({
                "name": file.name,
                "type": file.mime_type,
                "size": file.size,
            }),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) if x.is_nan() => f.write_str("NaN"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(x) => write!(f, "{}", x),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Symbol(s) => write!(f, "Symbol({})", s),
            Value::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Function(_) => f.write_str("[function]"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// Orders an integer against a float without rounding the integer to `f64`.
///
/// The integer is compared with the float's whole part; the fractional part
/// breaks a tie. `NaN` is unordered.
fn compare_exact(int: &BigInt, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float.is_infinite() {
        return Some(if float > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let whole = float.trunc();
    match int.cmp(&BigInt::from_f64(whole)?) {
        Ordering::Equal => (0.0).partial_cmp(&(float - whole)),
        ord => Some(ord),
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::BigInt(BigInt::from(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_small_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}

from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n)
            .map(Value::Int)
            .unwrap_or_else(|_| Value::BigInt(BigInt::from(n)))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<FileValue> for Value {
    fn from(f: FileValue) -> Self {
        Value::File(f)
    }
}

impl From<FunctionValue> for Value {
    fn from(f: FunctionValue) -> Self {
        Value::Function(f)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// `None` maps to `Undefined`, the absent value.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion_keeps_integers_exact() {
        let value: Value = json!({"a": 1, "b": 1.5, "c": 18446744073709551615u64}).into();
        assert_eq!(value.get("a"), Some(&Value::Int(1)));
        assert_eq!(value.get("b"), Some(&Value::Float(1.5)));
        assert!(matches!(value.get("c"), Some(Value::BigInt(_))));
    }

    #[test]
    fn test_json_object_order_preserved() {
        let value: Value = json!({"z": 1, "a": 2}).into();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_compare_across_numeric_kinds() {
        assert_eq!(Value::Int(3).compare(&Value::Float(3.5)), Some(Ordering::Less));
        assert_eq!(
            Value::BigInt(BigInt::from(10)).compare(&Value::Int(10)),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::Float(f64::NAN).compare(&Value::Int(1)), None);
        assert_eq!(Value::from("a").compare(&Value::Int(1)), None);
    }

    #[test]
    fn test_compare_int_and_float_past_f64_precision() {
        let above = Value::Int(9_007_199_254_740_993);
        let bound = Value::Float(9_007_199_254_740_992.0);
        assert_eq!(above.compare(&bound), Some(Ordering::Greater));
        assert_eq!(bound.compare(&above), Some(Ordering::Less));

        let big = Value::BigInt(BigInt::from(u64::MAX) + 1u32);
        assert_eq!(
            big.compare(&Value::Float(18_446_744_073_709_551_616.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Value::Int(-3).compare(&Value::Float(-3.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Int(-3).compare(&Value::Float(-2.5)), Some(Ordering::Less));
        assert_eq!(
            Value::Int(i64::MAX).compare(&Value::Float(f64::INFINITY)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(f64::NEG_INFINITY).compare(&Value::Int(i64::MIN)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_whole_number_and_finite() {
        assert!(Value::Float(4.0).is_whole_number());
        assert!(!Value::Float(4.5).is_whole_number());
        assert!(!Value::Float(f64::INFINITY).is_finite_number());
        assert!(Value::Int(-1).is_finite_number());
    }

    #[test]
    fn test_length_and_size() {
        assert_eq!(Value::from("日本語").length(), Some(3));
        assert_eq!(Value::from(vec![1, 2]).length(), Some(2));
        assert_eq!(Value::Map(vec![]).size(), Some(0));
        assert_eq!(Value::from(FileValue::new("a.txt", "text/plain", 12)).size(), Some(12));
        assert_eq!(Value::Int(1).length(), None);
    }

    #[test]
    fn test_display_formats_numbers_plainly() {
        assert_eq!(Value::Float(10.0).to_string(), "10");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_option_maps_to_undefined() {
        assert_eq!(Value::from(None::<i64>), Value::Undefined);
        assert_eq!(Value::from(Some(2)), Value::Int(2));
    }

    #[test]
    fn test_function_equality_is_identity() {
        let f = FunctionValue::new(|_| Value::Null);
        let g = f.clone();
        let h = FunctionValue::new(|_| Value::Null);
        assert_eq!(f, g);
        assert_ne!(f, h);
        assert_eq!(f.call(&[]), Value::Null);
    }
}
