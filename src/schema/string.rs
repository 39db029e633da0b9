//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length bounds, named formats, patterns, substring tests and normalizers.

use regex::Regex;

use crate::check::{self, StringFormat};
use crate::coerce;
use crate::error::SchemaBuildError;
use crate::params::Params;
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::parse_leaf;
use crate::schema::traits::{SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// A schema for validating string values.
///
/// Checks run in the order they were added and all continuable failures are
/// reported together.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema};
///
/// let schema = Schema::string().min(5).email();
///
/// let err = schema.parse("a@b").unwrap_err();
/// let codes: Vec<_> = err.iter().map(|issue| issue.code()).collect();
/// assert_eq!(codes, vec![IssueCode::TooSmall, IssueCode::InvalidFormat]);
///
/// assert_eq!(schema.parse("user@example.com").unwrap(), "user@example.com");
/// ```
#[derive(Debug, Clone)]
pub struct StringSchema {
    internals: SchemaInternals,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::with_params(&Params::default())
    }

    pub fn with_params(params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::String, params),
        }
    }

    /// Enables coercion of scalars to strings.
    pub fn coerce(mut self) -> Self {
        self.internals.coerce = true;
        self
    }

    /// At least `min` characters.
    pub fn min(self, min: usize) -> Self {
        self.with_check(check::min_length(min))
    }

    /// At most `max` characters.
    pub fn max(self, max: usize) -> Self {
        self.with_check(check::max_length(max))
    }

    /// Exactly `len` characters.
    pub fn length(self, len: usize) -> Self {
        self.with_check(check::length_equals(len))
    }

    /// At least one character.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    pub fn format(self, format: StringFormat) -> Self {
        self.with_check(check::string_format(format))
    }

    pub fn email(self) -> Self {
        self.format(StringFormat::Email)
    }

    pub fn uuid(self) -> Self {
        self.format(StringFormat::Uuid)
    }

    pub fn guid(self) -> Self {
        self.format(StringFormat::Guid)
    }

    pub fn ipv4(self) -> Self {
        self.format(StringFormat::Ipv4)
    }

    pub fn ipv6(self) -> Self {
        self.format(StringFormat::Ipv6)
    }

    pub fn base64(self) -> Self {
        self.format(StringFormat::Base64)
    }

    pub fn base64url(self) -> Self {
        self.format(StringFormat::Base64Url)
    }

    pub fn hex(self) -> Self {
        self.format(StringFormat::Hex)
    }

    /// An ISO `YYYY-MM-DD` calendar date.
    pub fn iso_date(self) -> Self {
        self.format(StringFormat::Date)
    }

    pub fn iso_time(self) -> Self {
        self.format(StringFormat::Time)
    }

    /// An ISO datetime in UTC (`Z` suffix).
    pub fn iso_datetime(self) -> Self {
        self.format(StringFormat::DateTime)
    }

    pub fn e164(self) -> Self {
        self.format(StringFormat::E164)
    }

    pub fn cuid(self) -> Self {
        self.format(StringFormat::Cuid)
    }

    pub fn ulid(self) -> Self {
        self.format(StringFormat::Ulid)
    }

    pub fn nanoid(self) -> Self {
        self.format(StringFormat::Nanoid)
    }

    /// A string holding a JSON document.
    pub fn json(self) -> Self {
        self.with_check(check::json_string())
    }

    pub fn lowercase(self) -> Self {
        self.format(StringFormat::Lowercase)
    }

    pub fn uppercase(self) -> Self {
        self.format(StringFormat::Uppercase)
    }

    /// Adds a regex pattern constraint.
    ///
    /// Returns an error if the pattern does not compile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{Schema, TypedSchema};
    ///
    /// let schema = Schema::string().regex(r"^\d+$").unwrap();
    /// assert!(schema.parse("12345").is_ok());
    /// assert!(schema.parse("abc").is_err());
    ///
    /// assert!(Schema::string().regex("(").is_err());
    /// ```
    pub fn regex(self, pattern: &str) -> Result<Self, SchemaBuildError> {
        let regex = Regex::new(pattern).map_err(|e| SchemaBuildError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.pattern(regex))
    }

    /// Adds an already compiled pattern constraint.
    pub fn pattern(self, regex: Regex) -> Self {
        self.with_check(check::regex(regex))
    }

    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.with_check(check::starts_with(prefix))
    }

    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.with_check(check::ends_with(suffix))
    }

    /// Case-sensitive substring test.
    pub fn includes(self, needle: impl Into<String>) -> Self {
        self.with_check(check::includes(needle, None))
    }

    /// Substring test starting at character offset `position`.
    pub fn includes_at(self, needle: impl Into<String>, position: usize) -> Self {
        self.with_check(check::includes(needle, Some(position)))
    }

    /// An ISO date not earlier than `bound`.
    pub fn date_min(self, bound: &str) -> Result<Self, SchemaBuildError> {
        Ok(self.with_check(check::iso_date_min(bound)?))
    }

    /// An ISO date not later than `bound`.
    pub fn date_max(self, bound: &str) -> Result<Self, SchemaBuildError> {
        Ok(self.with_check(check::iso_date_max(bound)?))
    }

    /// Trims surrounding whitespace before later checks run.
    pub fn trim(self) -> Self {
        self.overwrite(|s| s.trim().to_string())
    }

    pub fn to_lower_case(self) -> Self {
        self.overwrite(|s| s.to_lowercase())
    }

    pub fn to_upper_case(self) -> Self {
        self.overwrite(|s| s.to_uppercase())
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
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
            |v| matches!(v, Value::String(_)),
            coerce::to_string,
        );
    }
}

impl TypedSchema for StringSchema {
    type Output = String;

    fn narrow(value: Value) -> Result<String, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}
