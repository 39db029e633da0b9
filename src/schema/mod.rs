//! Schema definitions for validation.
//!
//! Every schema implements [`SchemaLike`] (internals plus the payload-level
//! parse) and [`TypedSchema`] (typed entry points and fluent builders).
//! Compound schemas visit every child and accumulate all issues rather than
//! stopping at the first failure.
//!
//! # Example
//!
//! ```rust
//! use inquest::{Schema, TypedSchema};
//!
//! let schema = Schema::string().min(1).max(100);
//!
//! assert!(schema.validate("hello").is_success());
//! assert!(schema.validate("").is_failure());
//! ```

mod array;
mod collections;
mod combinators;
mod date;
mod internals;
pub(crate) mod leaf;
mod modifiers;
mod numeric;
mod object;
mod primitive;
mod string;
mod traits;

pub use array::{ArraySchema, TupleSchema};
pub use collections::{MapSchema, SetSchema};
pub use combinators::{PipeSchema, TransformSchema, UnionSchema};
pub use date::{DateSchema, FileSchema};
pub use internals::{SchemaInternals, SchemaKind};
pub use modifiers::{DefaultSchema, Fallback, NilableSchema, OptionalSchema, PrefaultSchema};
pub use numeric::{BigIntSchema, NumberSchema};
pub use object::{ObjectSchema, RecordSchema, UnknownKeys};
pub use primitive::{BooleanSchema, EnumSchema, LiteralSchema, UnknownSchema};
pub use string::StringSchema;
pub use traits::{CloneSchema, DynSchema, SchemaLike, TypedSchema};

use crate::params::Params;
use crate::value::Value;

/// Entry point for creating validation schemas.
///
/// Each constructor has a `*_with` variant taking [`Params`] for the
/// schema-level options (`error`, `abort`, `coerce`, `description`).
///
/// # Example
///
/// ```rust
/// use inquest::{Params, Schema, TypedSchema};
///
/// // Create a string schema with length constraints
/// let name = Schema::string().min(1).max(100);
///
/// // Schema-level options
/// let age = Schema::number_with(Params::new().coerce().error("age must be a number"));
///
/// assert!(name.parse("Ada").is_ok());
/// assert_eq!(age.parse("x").unwrap_err().first().message, "age must be a number");
/// ```
pub struct Schema;

impl Schema {
    /// Creates a new string schema.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    ///
    /// let schema = Schema::string().min(5);
    ///
    /// assert!(schema.parse("hello").is_ok());
    /// assert!(schema.parse("hi").is_err());
    /// ```
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    pub fn string_with(params: impl Into<Params>) -> StringSchema {
        StringSchema::with_params(&params.into())
    }

    /// Creates a new number schema accepting finite integers and floats.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    pub fn number_with(params: impl Into<Params>) -> NumberSchema {
        NumberSchema::with_params(&params.into())
    }

    /// Creates a number schema restricted to safe integers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    ///
    /// let schema = Schema::int().min(0).max(100);
    ///
    /// assert!(schema.parse(50).is_ok());
    /// assert!(schema.parse(-5).is_err());
    ///
    /// // Fractional values are rejected
    /// assert!(schema.parse(1.5).is_err());
    /// ```
    pub fn int() -> NumberSchema {
        NumberSchema::new().int()
    }

    pub fn bigint() -> BigIntSchema {
        BigIntSchema::new()
    }

    pub fn bigint_with(params: impl Into<Params>) -> BigIntSchema {
        BigIntSchema::with_params(&params.into())
    }

    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    pub fn boolean_with(params: impl Into<Params>) -> BooleanSchema {
        BooleanSchema::with_params(&params.into())
    }

    pub fn literal(value: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    pub fn literal_with(value: impl Into<Value>, params: impl Into<Params>) -> LiteralSchema {
        LiteralSchema::with_params(value, &params.into())
    }

    pub fn enumeration<I, V>(values: I) -> EnumSchema
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        EnumSchema::new(values)
    }

    pub fn enumeration_with<I, V>(values: I, params: impl Into<Params>) -> EnumSchema
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        EnumSchema::with_params(values, &params.into())
    }

    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    pub fn date_with(params: impl Into<Params>) -> DateSchema {
        DateSchema::with_params(&params.into())
    }

    pub fn file() -> FileSchema {
        FileSchema::new()
    }

    pub fn file_with(params: impl Into<Params>) -> FileSchema {
        FileSchema::with_params(&params.into())
    }

    /// Accepts any value, including `Undefined` and `Null`.
    pub fn unknown() -> UnknownSchema {
        UnknownSchema::new()
    }

    /// Alias of [`Schema::unknown`].
    pub fn any() -> UnknownSchema {
        UnknownSchema::new()
    }

    pub fn array<S: TypedSchema>(element: S) -> ArraySchema<S> {
        ArraySchema::new(element)
    }

    pub fn array_with<S: TypedSchema>(element: S, params: impl Into<Params>) -> ArraySchema<S> {
        ArraySchema::with_params(element, &params.into())
    }

    pub fn tuple(items: impl IntoIterator<Item = DynSchema>) -> TupleSchema {
        TupleSchema::new(items)
    }

    /// Creates a new object schema with no fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string().min(1))
    ///     .field("age", Schema::int().positive())
    ///     .field("email", Schema::string().email().optional());
    ///
    /// assert!(schema.parse(json!({"name": "Alice", "age": 30})).is_ok());
    /// assert!(schema.parse(json!({"name": "", "age": -1})).is_err());
    /// ```
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    pub fn object_with(params: impl Into<Params>) -> ObjectSchema {
        ObjectSchema::with_params(&params.into())
    }

    pub fn record<K: TypedSchema, V: TypedSchema>(key: K, value: V) -> RecordSchema {
        RecordSchema::new(key, value)
    }

    pub fn map<K: TypedSchema, V: TypedSchema>(key: K, value: V) -> MapSchema {
        MapSchema::new(key, value)
    }

    pub fn set<S: TypedSchema>(element: S) -> SetSchema {
        SetSchema::new(element)
    }

    pub fn union(options: impl IntoIterator<Item = DynSchema>) -> UnionSchema {
        UnionSchema::new(options)
    }
}
