//! User-defined checks: refinements, free-form checks, overwrites and
//! property descent.

use crate::check::{Check, CheckKind};
use crate::error::RawIssue;
use crate::params::Params;
use crate::path::PathSegment;
use crate::schema::{DynSchema, SchemaLike};
use crate::validation::ParsePayload;
use crate::value::Value;

/// A refinement: a predicate over the value.
///
/// A failing predicate produces one `custom` issue placed at `params.path`
/// and carrying `params.params`.
pub fn custom<F>(predicate: F, params: &Params) -> Check
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let path = params.path.clone();
    let extra = params.params.clone();
    Check::new(CheckKind::Custom, move |payload, _| {
        if predicate(&payload.value) {
            return;
        }
        let issue = RawIssue::custom(extra.clone(), payload.value.clone()).with_path(path.clone());
        payload.push_issue(issue);
    })
    .with_params(params)
}

/// A free-form check that inspects the payload and appends its own issues.
pub fn free_form<F>(f: F, params: &Params) -> Check
where
    F: Fn(&mut ParsePayload) + Send + Sync + 'static,
{
    Check::new(CheckKind::Custom, move |payload, _| f(payload)).with_params(params)
}

/// Replaces the value with `f(value)`. Never produces issues.
pub fn overwrite<F>(f: F) -> Check
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Check::new(CheckKind::Overwrite, move |payload, _| {
        let value = std::mem::take(&mut payload.value);
        payload.value = f(value);
    })
}

/// Runs `schema` on the named property of an object value.
///
/// Issues come back prefixed with the property name. The property value
/// itself is left untouched.
pub fn property(name: impl Into<String>, schema: DynSchema) -> Check {
    let name = name.into();
    Check::new(CheckKind::Property, move |payload, ctx| {
        let Some(object) = payload.value.as_object() else {
            return;
        };
        let value = object.get(&name).cloned().unwrap_or_default();
        let mut child = ParsePayload::new(value);
        schema.parse_payload(&mut child, ctx);
        payload.merge_child(child.issues, Some(&PathSegment::field(name.as_str())));
    })
}
