//! # Inquest
//!
//! A composable runtime validation engine that reports ALL the ways an input
//! fails its schema, rather than stopping at the first failure.
//!
//! ## Overview
//!
//! A schema accepts an arbitrary [`Value`] and produces either a typed output
//! or a [`ParseError`] carrying every [`Issue`] found. Schemas compose: leaf
//! schemas (strings, numbers, dates, ...) nest inside arrays, tuples, objects,
//! records, maps and sets, and wrap in modifiers (`optional`, `nilable`,
//! `default`, `prefault`) and combinators (`union`, `pipe`, `transform`).
//!
//! ## Core Types
//!
//! - [`Schema`]: Entry point for creating validation schemas
//! - [`TypedSchema`]: Typed `parse`/`validate` entry points and fluent builders
//! - [`Check`]: A composable validator attached to a schema
//! - [`Issue`]: One finalized validation failure with a path and a message
//! - [`ParseError`]: A non-empty collection of issues
//! - [`JsonPath`]: Paths to values in nested structures (e.g., `users[0].email`)
//!
//! ## Example
//!
//! ```rust
//! use inquest::{Schema, TypedSchema};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("name", Schema::string().min(2))
//!     .field("age", Schema::number().gte(18));
//!
//! let err = user.parse(json!({"name": "A", "age": 16})).unwrap_err();
//! assert_eq!(err.len(), 2);
//! assert_eq!(
//!     err.to_string(),
//!     "✖ Too small: expected string to have >=2 characters\n  → at name\n\
//!      ✖ Too small: expected number to be >=18\n  → at age"
//! );
//! ```

mod batch;
pub mod check;
pub mod classify;
pub mod coerce;
pub mod config;
pub mod error;
pub mod params;
pub mod path;
pub mod schema;
pub mod validation;
pub mod value;

pub use batch::{parse_batch, parse_batch_with, validate_batch};
pub use check::{run_checks, BigIntFormat, Check, CheckKind, NumberFormat, StringFormat};
pub use classify::{classify, classify_numeric, ParsedType};
pub use config::{config, configure, reset_config, Config};
pub use error::{
    default_message, finalize_issue, finalize_issues, ErrorTree, FlattenedError, FormatDetail,
    FormattedError, Issue, IssueCode, IssueDetails, Origin, ParseError, RawIssue,
    SchemaBuildError, TransformError,
};
pub use params::{ErrorMap, Params};
pub use path::{to_dot_path, JsonPath, PathSegment};
pub use schema::{
    ArraySchema, BigIntSchema, BooleanSchema, DateSchema, DefaultSchema, DynSchema, EnumSchema,
    Fallback, FileSchema, LiteralSchema, MapSchema, NilableSchema, NumberSchema, ObjectSchema,
    OptionalSchema, PipeSchema, PrefaultSchema, RecordSchema, Schema, SchemaInternals,
    SchemaKind, SchemaLike, SetSchema, StringSchema, TransformSchema, TupleSchema, TypedSchema,
    UnionSchema, UnknownKeys, UnknownSchema,
};
pub use validation::{ParseContext, ParsePayload};
pub use value::{FileValue, FunctionValue, Value};

/// Type alias for validation results using [`ParseError`].
pub type ValidationResult<T> = stillwater::Validation<T, ParseError>;
