//! Map and set schemas.
//!
//! Keyed collections report structural problems through nesting issues:
//! a rejected key becomes `invalid_key`, and a rejected entry that has no
//! path-addressable key becomes `invalid_element`.

use crate::check::{self, run_checks};
use crate::error::{finalize_issues, IssueDetails, Origin, RawIssue};
use crate::params::Params;
use crate::path::{JsonPath, PathSegment};
use crate::schema::internals::{SchemaInternals, SchemaKind};
use crate::schema::leaf::{reject_type, settle_nullish};
use crate::schema::traits::{DynSchema, SchemaLike, TypedSchema};
use crate::validation::{ParseContext, ParsePayload};
use crate::value::Value;

/// The path segment a map key is addressable by, if any.
fn key_segment(key: &Value) -> Option<PathSegment> {
    match key {
        Value::String(s) => Some(PathSegment::field(s.as_str())),
        Value::Int(n) => usize::try_from(*n).ok().map(PathSegment::Index),
        _ => None,
    }
}

fn nested_issue(
    details: IssueDetails,
    origin: Origin,
    input: Value,
    internals: &SchemaInternals,
) -> RawIssue {
    let mut issue = RawIssue::new(details, input).with_origin(origin);
    issue.inst = internals.error.clone();
    issue
}

/// A schema for maps whose keys and values each match a schema.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema, Value};
///
/// let schema = Schema::map(Schema::string(), Schema::number()).max(2);
/// let input = Value::Map(vec![(Value::from("a"), Value::from(1))]);
/// assert!(schema.parse(input).is_ok());
///
/// let input = Value::Map(vec![(Value::from(true), Value::from(1))]);
/// let err = schema.parse(input).unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::InvalidKey);
/// ```
#[derive(Debug, Clone)]
pub struct MapSchema {
    internals: SchemaInternals,
    key: DynSchema,
    value: DynSchema,
}

impl MapSchema {
    pub fn new<K: TypedSchema, V: TypedSchema>(key: K, value: V) -> Self {
        Self::with_params(key, value, &Params::default())
    }

    pub fn with_params<K: TypedSchema, V: TypedSchema>(key: K, value: V, params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Map, params),
            key: key.into_dyn(),
            value: value.into_dyn(),
        }
    }

    pub fn key_schema(&self) -> &DynSchema {
        &self.key
    }

    pub fn value_schema(&self) -> &DynSchema {
        &self.value
    }

    pub fn min(self, size: usize) -> Self {
        self.with_check(check::min_size(size as u64))
    }

    pub fn max(self, size: usize) -> Self {
        self.with_check(check::max_size(size as u64))
    }

    pub fn size(self, size: usize) -> Self {
        self.with_check(check::size_equals(size as u64))
    }

    pub fn nonempty(self) -> Self {
        self.min(1)
    }
}

impl SchemaLike for MapSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        if settle_nullish(&self.internals, payload) {
            return;
        }
        let Value::Map(entries) = &mut payload.value else {
            reject_type(&self.internals, payload);
            return;
        };
        let entries = std::mem::take(entries);
        let mut parsed = Vec::with_capacity(entries.len());

        for (key, value) in entries {
            let mut key_payload = ParsePayload::new(key.clone());
            self.key.parse_payload(&mut key_payload, ctx);
            let mut value_payload = ParsePayload::new(value);
            self.value.parse_payload(&mut value_payload, ctx);

            if key_payload.has_issues() {
                let issues = finalize_issues(key_payload.issues, &JsonPath::root(), ctx);
                payload.push_issue(nested_issue(
                    IssueDetails::InvalidKey { issues },
                    Origin::Map,
                    key.clone(),
                    &self.internals,
                ));
            }
            if value_payload.has_issues() {
                match key_segment(&key) {
                    Some(segment) => payload.merge_child(value_payload.issues, Some(&segment)),
                    None => {
                        let issues = finalize_issues(value_payload.issues, &JsonPath::root(), ctx);
                        payload.push_issue(nested_issue(
                            IssueDetails::InvalidElement {
                                key: key.clone(),
                                issues,
                            },
                            Origin::Map,
                            value_payload.value.clone(),
                            &self.internals,
                        ));
                    }
                }
            }
            parsed.push((key_payload.value, value_payload.value));
        }

        payload.value = Value::Map(parsed);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl TypedSchema for MapSchema {
    type Output = Vec<(Value, Value)>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Map(entries) => Ok(entries),
            other => Err(other),
        }
    }
}

/// A schema for sets whose members all match one schema.
///
/// # Example
///
/// ```rust
/// use inquest::{IssueCode, Schema, TypedSchema, Value};
///
/// let tags = Schema::set(Schema::string().min(2)).min(1);
/// assert!(tags.parse(Value::Set(vec![Value::from("rust")])).is_ok());
///
/// let err = tags.parse(Value::Set(vec![Value::from("x")])).unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::InvalidElement);
///
/// let err = tags.parse(Value::Set(vec![])).unwrap_err();
/// assert_eq!(err.first().code(), IssueCode::TooSmall);
/// ```
#[derive(Debug, Clone)]
pub struct SetSchema {
    internals: SchemaInternals,
    element: DynSchema,
}

impl SetSchema {
    pub fn new<S: TypedSchema>(element: S) -> Self {
        Self::with_params(element, &Params::default())
    }

    pub fn with_params<S: TypedSchema>(element: S, params: &Params) -> Self {
        Self {
            internals: SchemaInternals::from_params(SchemaKind::Set, params),
            element: element.into_dyn(),
        }
    }

    pub fn element(&self) -> &DynSchema {
        &self.element
    }

    pub fn min(self, size: usize) -> Self {
        self.with_check(check::min_size(size as u64))
    }

    pub fn max(self, size: usize) -> Self {
        self.with_check(check::max_size(size as u64))
    }

    pub fn size(self, size: usize) -> Self {
        self.with_check(check::size_equals(size as u64))
    }

    pub fn nonempty(self) -> Self {
        self.min(1)
    }
}

impl SchemaLike for SetSchema {
    fn internals(&self) -> &SchemaInternals {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut SchemaInternals {
        &mut self.internals
    }

    fn parse_payload(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        if settle_nullish(&self.internals, payload) {
            return;
        }
        let Value::Set(members) = &mut payload.value else {
            reject_type(&self.internals, payload);
            return;
        };
        let members = std::mem::take(members);
        let mut parsed = Vec::with_capacity(members.len());

        for member in members {
            let mut child = ParsePayload::new(member.clone());
            self.element.parse_payload(&mut child, ctx);
            if child.has_issues() {
                let issues = finalize_issues(child.issues, &JsonPath::root(), ctx);
                payload.push_issue(nested_issue(
                    IssueDetails::InvalidElement {
                        key: member.clone(),
                        issues,
                    },
                    Origin::Set,
                    member,
                    &self.internals,
                ));
            }
            parsed.push(child.value);
        }

        payload.value = Value::Set(parsed);
        run_checks(
            payload,
            &self.internals.checks,
            ctx,
            self.internals.error.as_ref(),
        );
    }
}

impl TypedSchema for SetSchema {
    type Output = Vec<Value>;

    fn narrow(value: Value) -> Result<Self::Output, Value> {
        match value {
            Value::Set(members) => Ok(members),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ParsedType;
    use crate::error::IssueCode;
    use crate::schema::Schema;

    fn entries(pairs: Vec<(Value, Value)>) -> Value {
        Value::Map(pairs)
    }

    #[test]
    fn test_map_rejects_objects() {
        let err = MapSchema::new(Schema::string(), Schema::number())
            .parse(serde_json::json!({}))
            .unwrap_err();
        assert_eq!(err.first().expected(), Some(ParsedType::Map));
    }

    #[test]
    fn test_map_value_issues_inline_for_string_keys() {
        let schema = MapSchema::new(Schema::string(), Schema::number());
        let err = schema
            .parse(entries(vec![(Value::from("a"), Value::from("x"))]))
            .unwrap_err();
        assert_eq!(err.first().code(), IssueCode::InvalidType);
        assert_eq!(err.first().path.to_string(), "a");
    }

    #[test]
    fn test_map_value_issues_nest_for_other_keys() {
        let schema = MapSchema::new(Schema::unknown(), Schema::number());
        let err = schema
            .parse(entries(vec![(Value::from(true), Value::from("x"))]))
            .unwrap_err();
        let issue = err.first();
        assert_eq!(issue.code(), IssueCode::InvalidElement);
        assert_eq!(issue.origin, Some(Origin::Map));
        match &issue.details {
            IssueDetails::InvalidElement { key, issues } => {
                assert_eq!(key, &Value::Bool(true));
                assert_eq!(issues.len(), 1);
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn test_map_size_checks() {
        let schema = MapSchema::new(Schema::string(), Schema::number()).size(1);
        let err = schema.parse(entries(vec![])).unwrap_err();
        assert_eq!(err.first().code(), IssueCode::TooSmall);
        assert_eq!(err.first().origin, Some(Origin::Map));
    }

    #[test]
    fn test_set_keeps_parsed_members() {
        let schema = SetSchema::new(Schema::string().trim());
        let out = schema.parse(Value::Set(vec![Value::from(" a ")])).unwrap();
        assert_eq!(out, vec![Value::from("a")]);
    }

    #[test]
    fn test_set_max() {
        let schema = SetSchema::new(Schema::number()).max(1);
        let err = schema
            .parse(Value::Set(vec![Value::from(1), Value::from(2)]))
            .unwrap_err();
        assert_eq!(err.first().code(), IssueCode::TooBig);
        assert_eq!(err.first().origin, Some(Origin::Set));
    }
}
