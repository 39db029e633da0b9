//! Built-in English messages.

use crate::error::issue::{FormatDetail, IssueDetails, Origin, RawIssue};
use crate::value::Value;

struct Sizing {
    noun: &'static str,
    unit: &'static str,
}

fn sizing(origin: Option<Origin>) -> Option<Sizing> {
    let (noun, unit) = match origin? {
        Origin::String => ("string", "characters"),
        Origin::File => ("file", "bytes"),
        Origin::Array => ("array", "items"),
        Origin::Set => ("set", "items"),
        Origin::Map => ("map", "entries"),
        _ => return None,
    };
    Some(Sizing { noun, unit })
}

fn format_noun(format: &str) -> Option<&'static str> {
    Some(match format {
        "email" => "email address",
        "url" => "URL",
        "uuid" => "UUID",
        "guid" => "GUID",
        "cuid" => "cuid",
        "ulid" => "ULID",
        "nanoid" => "nanoid",
        "datetime" => "ISO datetime",
        "date" => "ISO date",
        "time" => "ISO time",
        "ipv4" => "IPv4 address",
        "ipv6" => "IPv6 address",
        "base64" => "base64-encoded string",
        "base64url" => "base64url-encoded string",
        "hex" => "hexadecimal string",
        "json" => "JSON string",
        "e164" => "E.164 number",
        "lowercase" => "lowercase string",
        "uppercase" => "uppercase string",
        _ => return None,
    })
}

/// Renders a value the way messages quote it: strings in JSON quotes,
/// everything else in display form.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
        other => other.to_string(),
    }
}

fn join_values(values: &[Value], sep: &str) -> String {
    values.iter().map(stringify).collect::<Vec<_>>().join(sep)
}

/// The deterministic, code-dependent default message for an issue.
///
/// # Example
///
/// ```rust
/// use inquest::{default_message, Origin, RawIssue, Value};
///
/// let issue = RawIssue::too_small(Origin::String, 5, true, Value::from("abc"));
/// assert_eq!(
///     default_message(&issue),
///     "Too small: expected string to have >=5 characters"
/// );
/// ```
pub fn default_message(issue: &RawIssue) -> String {
    match &issue.details {
        IssueDetails::InvalidType { expected, received } => {
            format!("Invalid input: expected {expected}, received {received}")
        }
        IssueDetails::InvalidValue { values } => match values.as_slice() {
            [single] => format!("Invalid input: expected {}", stringify(single)),
            _ => format!("Invalid option: expected one of {}", join_values(values, "|")),
        },
        IssueDetails::TooBig {
            maximum, inclusive, ..
        } => {
            let adj = if *inclusive { "<=" } else { "<" };
            match sizing(issue.origin) {
                Some(s) => format!("Too big: expected {} to have {adj}{maximum} {}", s.noun, s.unit),
                None => format!("Too big: expected {} to be {adj}{maximum}", origin_noun(issue)),
            }
        }
        IssueDetails::TooSmall {
            minimum, inclusive, ..
        } => {
            let adj = if *inclusive { ">=" } else { ">" };
            match sizing(issue.origin) {
                Some(s) => format!("Too small: expected {} to have {adj}{minimum} {}", s.noun, s.unit),
                None => format!("Too small: expected {} to be {adj}{minimum}", origin_noun(issue)),
            }
        }
        IssueDetails::NotMultipleOf { divisor } => {
            format!("Invalid number: must be a multiple of {divisor}")
        }
        IssueDetails::InvalidFormat { format, detail } => match detail {
            FormatDetail::Prefix(prefix) => {
                format!("Invalid string: must start with \"{prefix}\"")
            }
            FormatDetail::Suffix(suffix) => format!("Invalid string: must end with \"{suffix}\""),
            FormatDetail::Includes { includes, .. } => {
                format!("Invalid string: must include \"{includes}\"")
            }
            FormatDetail::Pattern(pattern) => {
                format!("Invalid string: must match pattern /{pattern}/")
            }
            FormatDetail::None => match format_noun(format) {
                Some(noun) => format!("Invalid {noun}"),
                None => format!("Invalid {format}"),
            },
        },
        IssueDetails::InvalidUnion { .. } => "Invalid input".to_string(),
        IssueDetails::InvalidKey { .. } => format!("Invalid key in {}", origin_noun(issue)),
        IssueDetails::InvalidElement { .. } => {
            format!("Invalid value in {}", origin_noun(issue))
        }
        IssueDetails::UnrecognizedKeys { keys } => {
            let quoted: Vec<String> = keys
                .iter()
                .map(|k| serde_json::Value::String(k.clone()).to_string())
                .collect();
            let plural = if keys.len() > 1 { "s" } else { "" };
            format!("Unrecognized key{plural}: {}", quoted.join(", "))
        }
        IssueDetails::Custom { .. } => "Invalid input".to_string(),
    }
}

fn origin_noun(issue: &RawIssue) -> &'static str {
    issue.origin.map_or("value", |origin| origin.as_str())
}
