//! Date and file schemas.

use chrono::{DateTime, Utc};

use crate::check;
use crate::coerce;
use crate::params::Params;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::{no_coercion, parse_leaf};
use crate::schema::traits::{SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::{FileValue, Value};

/// A schema for points in time.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use inquest::{IssueCode, Origin, Schema, TypedSchema};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let schema = Schema::date().coerce().min(start);
///
/// assert!(schema.parse("2024-06-01").is_ok());
///
/// let err = schema.parse("2023-12-31").unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::TooSmall);
/// assert_eq!(err.first().origin, Some(Origin::Date));
/// ```
#[derive(Debug, Clone)]
pub struct DateSchema {
    internals: SchemaInternals,
}

impl DateSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Date, params),
        }
    }

    /// Enables coercion from RFC 3339 strings, `YYYY-MM-DD` dates and epoch
    /// milliseconds.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    /// Not earlier than `bound`.
    pub fn min(self, bound: DateTime<Utc>) -> Self {
        self.with_check(check::greater_than(bound, true))
    }

    /// Not later than `bound`.
    pub fn max(self, bound: DateTime<Utc>) -> Self {
        self.with_check(check::less_than(bound, true))
    }
}

impl Default for DateSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for DateSchema {
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
            |v| matches!(v, Value::Date(_)),
            coerce::to_date,
        );
    }
}

impl TypedSchema for DateSchema {
    type Output = DateTime<Utc>;

    fn narrow(value: Value) -> Result<DateTime<Utc>, Value> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(other),
        }
    }
}

/// A schema for file-like values: size bounds in bytes and accepted MIME
/// types.
///
/// # Example
///
/// ```rust
/// use inquest::{FileValue, Schema, TypedSchema};
///
/// let avatar = Schema::file().max(1024).mime(["image/png", "image/jpeg"]);
///
/// assert!(avatar.parse(FileValue::new("a.png", "image/png", 512)).is_ok());
///
/// let err = avatar.parse(FileValue::new("a.gif", "image/gif", 4096)).unwrap_err();
/// assert_eq!(err.len(), 2);
/// assert_eq!(err.iter().nth(1).unwrap().path.to_string(), "type");
/// ```
#[derive(Debug, Clone)]
pub struct FileSchema {
    internals: SchemaInternals,
}

impl FileSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::File, params),
        }
    }

    /// At least `bytes` bytes.
    pub fn min(self, bytes: u64) -> Self {
        self.with_check(check::min_size(bytes))
    }

    /// At most `bytes` bytes.
    pub fn max(self, bytes: u64) -> Self {
        self.with_check(check::max_size(bytes))
    }

    /// Exactly `bytes` bytes.
    pub fn size(self, bytes: u64) -> Self {
        self.with_check(check::size_equals(bytes))
    }

    pub fn mime<I, S>(self, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_check(check::mime_type(accepted))
    }
}

impl Default for FileSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for FileSchema {
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
            |v| matches!(v, Value::File(_)),
            no_coercion,
        );
    }
}

impl TypedSchema for FileSchema {
    type Output = FileValue;

    fn narrow(value: Value) -> Result<FileValue, Value> {
        match value {
            Value::File(f) => Ok(f),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ParsedType;
    use chrono::TimeZone;

    #[test]
    fn test_date_requires_coercion_for_strings() {
        let err = DateSchema::new().parse("2024-01-01").unwrap_err();
        assert_eq!(err.first().expected(), Some(ParsedType::Date));
        assert!(DateSchema::new().coerce().parse("2024-01-01").is_ok());
        assert!(DateSchema::new().coerce().parse("not a date").is_err());
    }

    #[test]
    fn test_date_max() {
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(DateSchema::new().max(end).parse(late).is_err());
        assert!(DateSchema::new().max(end).parse(end).is_ok());
    }

    #[test]
    fn test_file_rejects_other_values() {
        let err = FileSchema::new().parse("a.png").unwrap_err();
        assert_eq!(err.first().expected(), Some(ParsedType::File));
    }

    #[test]
    fn test_file_size_bounds_in_bytes() {
        let schema = FileSchema::new().min(10);
        let err = schema.parse(FileValue::new("a", "text/plain", 3)).unwrap_err();
        assert_eq!(err.first().message, "Too small: expected file to have >=10 bytes");
    }
}
