//! The parse skeleton shared by leaf schemas.

use crate::check::run_checks;
use crate::error::RawIssue;
use crate::schema::internals::SchemaInternals;
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// Handles nullish input against the schema's nil flags.
///
/// Returns true when the payload is settled: either the nil value was
/// accepted, or an `invalid_type` issue was recorded.
pub(crate) fn settle_nullish(internals: &SchemaInternals, payload: &mut ParsePayload) -> bool {
    match payload.value {
        Value::Undefined if internals.optional => true,
        Value::Null if internals.nilable => true,
        Value::Undefined | Value::Null => {
            reject_type(internals, payload);
            true
        }
        _ => false,
    }
}

/// Records an `invalid_type` issue for the schema's expected type.
pub(crate) fn reject_type(internals: &SchemaInternals, payload: &mut ParsePayload) {
    let mut issue = RawIssue::invalid_type(internals.kind.expected_type(), payload.value.clone());
    issue.inst = internals.error.clone();
    payload.push_issue(issue);
}

/// Runs the leaf skeleton: nil gate, direct type match, coercion when enabled,
/// then the attached checks.
pub(crate) fn parse_leaf<M, C>(
    internals: &SchemaInternals,
    payload: &mut ParsePayload,
    ctx: &ParseContext,
    matches: M,
    coerce: C,
) where
    M: Fn(&Value) -> bool,
    C: Fn(&Value) -> Option<Value>,
{
    if settle_nullish(internals, payload) {
        return;
    }
    if !matches(&payload.value) {
        match internals.coerce.then(|| coerce(&payload.value)).flatten() {
            Some(coerced) if matches(&coerced) => payload.value = coerced,
            _ => {
                reject_type(internals, payload);
                return;
            }
        }
    }
    run_checks(payload, &internals.checks, ctx, internals.error.as_ref());
}

/// A leaf without coercion.
pub(crate) fn no_coercion(_: &Value) -> Option<Value> {
    None
}
