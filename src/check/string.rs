//! String format checks.
//!
//! Each named format has a fixed pattern (or a parser where a pattern would be
//! inadequate, such as IP addresses and calendar dates). Substring checks are
//! plain prefix, suffix and substring tests rather than patterns.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::check::{Check, CheckKind};
use crate::classify::ParsedType;
use crate::error::{FormatDetail, Origin, RawIssue, SchemaBuildError};
use crate::validation::ParsePayload;
use crate::value::Value;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-8][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}|00000000-0000-0000-0000-000000000000|ffffffff-ffff-ffff-ffff-ffffffffffff)$",
    )
    .unwrap()
});

static GUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static BASE64_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-zA-Z+/]{4})*(([0-9a-zA-Z+/]{2}==)|([0-9a-zA-Z+/]{3}=))?$").unwrap()
});

static BASE64URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").unwrap());

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]*$").unwrap());

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap());

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?$").unwrap()
});

static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})T([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?Z$").unwrap()
});

static E164_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").unwrap());

static CUID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[cC][^\s-]{8,}$").unwrap());

static ULID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-HJKMNP-TV-Za-hjkmnp-tv-z]{26}$").unwrap());

static NANOID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{21}$").unwrap());

static LOWERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^A-Z]*$").unwrap());

static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^a-z]*$").unwrap());

/// Named string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    Email,
    Uuid,
    Guid,
    Ipv4,
    Ipv6,
    Base64,
    Base64Url,
    Hex,
    /// ISO `YYYY-MM-DD`.
    Date,
    /// ISO `HH:MM[:SS[.fff]]`.
    Time,
    /// ISO date and time in UTC, `Z` suffix required.
    DateTime,
    E164,
    Cuid,
    Ulid,
    Nanoid,
    Json,
    Lowercase,
    Uppercase,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Uuid => "uuid",
            StringFormat::Guid => "guid",
            StringFormat::Ipv4 => "ipv4",
            StringFormat::Ipv6 => "ipv6",
            StringFormat::Base64 => "base64",
            StringFormat::Base64Url => "base64url",
            StringFormat::Hex => "hex",
            StringFormat::Date => "date",
            StringFormat::Time => "time",
            StringFormat::DateTime => "datetime",
            StringFormat::E164 => "e164",
            StringFormat::Cuid => "cuid",
            StringFormat::Ulid => "ulid",
            StringFormat::Nanoid => "nanoid",
            StringFormat::Json => "json",
            StringFormat::Lowercase => "lowercase",
            StringFormat::Uppercase => "uppercase",
        }
    }

    /// The fixed pattern behind the format, when it has one.
    pub fn pattern(&self) -> Option<&'static Regex> {
        let re: &'static LazyLock<Regex> = match self {
            StringFormat::Email => &EMAIL_RE,
            StringFormat::Uuid => &UUID_RE,
            StringFormat::Guid => &GUID_RE,
            StringFormat::Base64 => &BASE64_RE,
            StringFormat::Base64Url => &BASE64URL_RE,
            StringFormat::Hex => &HEX_RE,
            StringFormat::Date => &DATE_RE,
            StringFormat::Time => &TIME_RE,
            StringFormat::DateTime => &DATETIME_RE,
            StringFormat::E164 => &E164_RE,
            StringFormat::Cuid => &CUID_RE,
            StringFormat::Ulid => &ULID_RE,
            StringFormat::Nanoid => &NANOID_RE,
            StringFormat::Lowercase => &LOWERCASE_RE,
            StringFormat::Uppercase => &UPPERCASE_RE,
            StringFormat::Ipv4 | StringFormat::Ipv6 | StringFormat::Json => return None,
        };
        Some(LazyLock::force(re))
    }

    pub fn matches(&self, s: &str) -> bool {
        match self {
            StringFormat::Email => !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s),
            StringFormat::Ipv4 => s.parse::<Ipv4Addr>().is_ok(),
            StringFormat::Ipv6 => s.parse::<Ipv6Addr>().is_ok(),
            StringFormat::Date => is_calendar_date(s),
            StringFormat::DateTime => DATETIME_RE
                .captures(s)
                .and_then(|caps| caps.get(1))
                .is_some_and(|date| is_calendar_date(date.as_str())),
            StringFormat::Json => serde_json::from_str::<serde_json::Value>(s).is_ok(),
            other => other.pattern().is_some_and(|re| re.is_match(s)),
        }
    }
}

fn is_calendar_date(s: &str) -> bool {
    DATE_RE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn not_a_string(payload: &mut ParsePayload) -> bool {
    if payload.value.as_str().is_some() {
        return false;
    }
    let issue = RawIssue::invalid_type(ParsedType::String, payload.value.clone());
    payload.push_issue(issue);
    true
}

fn format_check(
    format: &'static str,
    detail: FormatDetail,
    test: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> Check {
    Check::new(CheckKind::StringFormat, move |payload, _| {
        if not_a_string(payload) {
            return;
        }
        let matched = payload.value.as_str().is_some_and(&test);
        if !matched {
            let issue = RawIssue::invalid_format(
                Origin::String,
                format,
                detail.clone(),
                payload.value.clone(),
            );
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        internals
            .bag_mut()
            .insert("format".to_string(), Value::from(format));
    })
}

/// Validates a named string format.
pub fn string_format(format: StringFormat) -> Check {
    format_check(format.as_str(), FormatDetail::None, move |s| format.matches(s)).on_attach(
        move |internals| {
            if let Some(re) = format.pattern() {
                internals.set_pattern(re.clone());
            }
        },
    )
}

/// Validates a JSON-encoded string.
pub fn json_string() -> Check {
    string_format(StringFormat::Json)
}

/// Validates against a caller-supplied pattern; the issue exposes the pattern.
pub fn regex(pattern: Regex) -> Check {
    let attached = pattern.clone();
    let detail = FormatDetail::Pattern(pattern.as_str().to_string());
    format_check("regex", detail, move |s| pattern.is_match(s)).on_attach(move |internals| {
        internals.set_pattern(attached.clone());
    })
}

pub fn starts_with(prefix: impl Into<String>) -> Check {
    let prefix = prefix.into();
    let detail = FormatDetail::Prefix(prefix.clone());
    format_check("starts_with", detail, move |s| s.starts_with(prefix.as_str()))
}

pub fn ends_with(suffix: impl Into<String>) -> Check {
    let suffix = suffix.into();
    let detail = FormatDetail::Suffix(suffix.clone());
    format_check("ends_with", detail, move |s| s.ends_with(suffix.as_str()))
}

/// Case-sensitive substring test starting at character offset `position`.
pub fn includes(needle: impl Into<String>, position: Option<usize>) -> Check {
    let needle = needle.into();
    let detail = FormatDetail::Includes {
        includes: needle.clone(),
        position,
    };
    format_check("includes", detail, move |s| {
        let start = position.unwrap_or(0);
        let tail = match s.char_indices().nth(start) {
            Some((offset, _)) => &s[offset..],
            None => "",
        };
        tail.contains(needle.as_str())
    })
}

fn date_bound(bound: &str) -> Result<String, SchemaBuildError> {
    if is_calendar_date(bound) {
        Ok(bound.to_string())
    } else {
        Err(SchemaBuildError::InvalidDateBound(bound.to_string()))
    }
}

/// ISO dates not earlier than `bound`, compared lexicographically.
pub fn iso_date_min(bound: &str) -> Result<Check, SchemaBuildError> {
    let bound = date_bound(bound)?;
    let attached = bound.clone();
    Ok(Check::new(CheckKind::DateBound, move |payload, _| {
        if not_a_string(payload) {
            return;
        }
        if payload.value.as_str().is_some_and(|s| s < bound.as_str()) {
            let issue =
                RawIssue::too_small(Origin::Date, bound.clone(), true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        internals
            .bag_mut()
            .insert("minimum".to_string(), Value::from(attached.clone()));
    }))
}

/// ISO dates not later than `bound`, compared lexicographically.
pub fn iso_date_max(bound: &str) -> Result<Check, SchemaBuildError> {
    let bound = date_bound(bound)?;
    let attached = bound.clone();
    Ok(Check::new(CheckKind::DateBound, move |payload, _| {
        if not_a_string(payload) {
            return;
        }
        if payload.value.as_str().is_some_and(|s| s > bound.as_str()) {
            let issue = RawIssue::too_big(Origin::Date, bound.clone(), true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .on_attach(move |internals| {
        internals
            .bag_mut()
            .insert("maximum".to_string(), Value::from(attached.clone()));
    }))
}
