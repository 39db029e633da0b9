//! The check engine.
//!
//! A [`Check`] is a composable constraint attached to a schema. It carries a
//! kind tag, an optional error customizer, an `abort` flag, an optional `when`
//! predicate, attach callbacks fired once per attachment, and the run action
//! that inspects the payload and appends raw issues.
//!
//! [`run_checks`] executes a schema's checks in attachment order and stops as
//! soon as a check leaves a non-continuable issue behind.

mod custom;
mod file;
mod length;
mod numeric;
mod string;

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::params::{ErrorMap, Params, WhenFn};
use crate::schema::SchemaInternals;
use crate::validation::{ParseContext, ParsePayload};

pub use custom::{custom, free_form, overwrite, property};
pub use file::mime_type;
pub use length::{length_equals, max_length, max_size, min_length, min_size, size_equals};
pub use numeric::{
    bigint_format, greater_than, less_than, multiple_of, number_format, BigIntFormat,
    NumberFormat,
};
pub use string::{
    ends_with, includes, iso_date_max, iso_date_min, json_string, regex, starts_with,
    string_format, StringFormat,
};

/// The kind of a check, for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    LessThan,
    GreaterThan,
    MultipleOf,
    NumberFormat,
    BigIntFormat,
    MaxLength,
    MinLength,
    LengthEquals,
    MaxSize,
    MinSize,
    SizeEquals,
    StringFormat,
    DateBound,
    MimeType,
    Overwrite,
    Property,
    Custom,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::LessThan => "less_than",
            CheckKind::GreaterThan => "greater_than",
            CheckKind::MultipleOf => "multiple_of",
            CheckKind::NumberFormat => "number_format",
            CheckKind::BigIntFormat => "bigint_format",
            CheckKind::MaxLength => "max_length",
            CheckKind::MinLength => "min_length",
            CheckKind::LengthEquals => "length_equals",
            CheckKind::MaxSize => "max_size",
            CheckKind::MinSize => "min_size",
            CheckKind::SizeEquals => "size_equals",
            CheckKind::StringFormat => "string_format",
            CheckKind::DateBound => "date_bound",
            CheckKind::MimeType => "mime_type",
            CheckKind::Overwrite => "overwrite",
            CheckKind::Property => "property",
            CheckKind::Custom => "custom",
        }
    }
}

impl Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type RunFn = Arc<dyn Fn(&mut ParsePayload, &ParseContext) + Send + Sync>;
type AttachFn = Arc<dyn Fn(&mut SchemaInternals) + Send + Sync>;

/// A constraint attached to a schema.
///
/// Checks are decoupled from schema identity: the same check can be attached to
/// several schemas, and each attachment fires the attach callbacks once with
/// the receiving schema's internals.
///
/// # Example
///
/// ```rust
/// use inquest::{Check, CheckKind, RawIssue, Schema, TypedSchema};
///
/// let even = Check::new(CheckKind::Custom, |payload, _ctx| {
///     if payload.value.as_i64().is_some_and(|n| n % 2 != 0) {
///         let issue = RawIssue::custom(Default::default(), payload.value.clone())
///             .with_message("must be even");
///         payload.push_issue(issue);
///     }
/// });
///
/// let schema = Schema::number().with_check(even);
/// assert!(schema.parse(4).is_ok());
/// assert_eq!(schema.parse(3).unwrap_err().first().message, "must be even");
/// ```
#[derive(Clone)]
pub struct Check {
    kind: CheckKind,
    error: Option<ErrorMap>,
    abort: bool,
    when: Option<WhenFn>,
    run: RunFn,
    on_attach: Vec<AttachFn>,
}

impl Check {
    pub fn new<F>(kind: CheckKind, run: F) -> Self
    where
        F: Fn(&mut ParsePayload, &ParseContext) + Send + Sync + 'static,
    {
        Self {
            kind,
            error: None,
            abort: false,
            when: None,
            run: Arc::new(run),
            on_attach: Vec::new(),
        }
    }

    /// Applies the check-relevant fields of an options record.
    pub fn with_params(mut self, params: &Params) -> Self {
        if let Some(error) = &params.error {
            self.error = Some(error.clone());
        }
        if params.abort {
            self.abort = true;
        }
        if let Some(when) = &params.when {
            self.when = Some(Arc::clone(when));
        }
        self
    }

    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn abort(mut self) -> Self {
        self.abort = true;
        self
    }

    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ParsePayload) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Arc::new(predicate));
        self
    }

    pub fn on_attach<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut SchemaInternals) + Send + Sync + 'static,
    {
        self.on_attach.push(Arc::new(callback));
        self
    }

    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    pub fn is_abort(&self) -> bool {
        self.abort
    }

    pub fn error_map(&self) -> Option<&ErrorMap> {
        self.error.as_ref()
    }

    pub(crate) fn set_error(&mut self, error: ErrorMap) {
        self.error = Some(error);
    }

    pub(crate) fn set_abort(&mut self) {
        self.abort = true;
    }

    pub(crate) fn set_when(&mut self, when: WhenFn) {
        self.when = Some(when);
    }

    /// Evaluates the `when` predicate, if any.
    pub fn should_run(&self, payload: &ParsePayload) -> Option<bool> {
        self.when.as_ref().map(|when| when(payload))
    }

    /// Invokes the run action without engine bookkeeping.
    pub fn run(&self, payload: &mut ParsePayload, ctx: &ParseContext) {
        (self.run)(payload, ctx)
    }

    pub(crate) fn attach(&self, internals: &mut SchemaInternals) {
        for callback in &self.on_attach {
            callback(internals);
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("kind", &self.kind)
            .field("abort", &self.abort)
            .field("has_error", &self.error.is_some())
            .field("has_when", &self.when.is_some())
            .finish()
    }
}

/// Runs checks over a payload in order.
///
/// - A check whose `when` predicate returns false is skipped.
/// - When the payload is already aborted on entry, only checks whose `when`
///   predicate returns true run.
/// - Issues a check adds without an `inst` are stamped with the check's error
///   customizer, falling back to `schema_error`; an `abort` check marks them
///   non-continuable.
/// - The loop stops after the first check that leaves a non-continuable issue.
pub fn run_checks(
    payload: &mut ParsePayload,
    checks: &[Check],
    ctx: &ParseContext,
    schema_error: Option<&ErrorMap>,
) {
    let aborted_on_entry = payload.is_aborted();
    for check in checks {
        match check.should_run(payload) {
            Some(false) => continue,
            None if aborted_on_entry => continue,
            _ => {}
        }

        let start = payload.issues.len();
        check.run(payload, ctx);

        let inst = check.error.as_ref().or(schema_error);
        for issue in &mut payload.issues[start..] {
            if issue.inst.is_none() {
                issue.inst = inst.cloned();
            }
            if check.abort {
                issue.continues = false;
            }
        }

        if payload.aborted_since(start) {
            tracing::trace!(check = %check.kind, "check aborted the run");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RawIssue;
    use crate::value::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn failing(message: &'static str) -> Check {
        Check::new(CheckKind::Custom, move |payload, _| {
            payload.push_issue(
                RawIssue::custom(Default::default(), payload.value.clone()).with_message(message),
            );
        })
    }

    fn messages(payload: &ParsePayload) -> Vec<String> {
        payload
            .issues
            .iter()
            .filter_map(|i| i.message.clone())
            .collect()
    }

    #[test]
    fn test_runs_in_order_and_accumulates() {
        let mut payload = ParsePayload::new(1);
        run_checks(
            &mut payload,
            &[failing("a"), failing("b")],
            &ParseContext::new(),
            None,
        );
        assert_eq!(messages(&payload), vec!["a", "b"]);
    }

    #[test]
    fn test_abort_stops_after_failure() {
        let mut payload = ParsePayload::new(1);
        run_checks(
            &mut payload,
            &[failing("a").abort(), failing("b")],
            &ParseContext::new(),
            None,
        );
        assert_eq!(messages(&payload), vec!["a"]);
        assert!(!payload.issues[0].continues);
    }

    #[test]
    fn test_passing_abort_check_lets_others_run() {
        let passing = Check::new(CheckKind::Custom, |_, _| {}).abort();
        let mut payload = ParsePayload::new(1);
        run_checks(
            &mut payload,
            &[passing, failing("b")],
            &ParseContext::new(),
            None,
        );
        assert_eq!(messages(&payload), vec!["b"]);
    }

    #[test]
    fn test_when_false_skips() {
        let mut payload = ParsePayload::new(1);
        run_checks(
            &mut payload,
            &[failing("a").when(|_| false), failing("b")],
            &ParseContext::new(),
            None,
        );
        assert_eq!(messages(&payload), vec!["b"]);
    }

    #[test]
    fn test_aborted_entry_runs_only_when_true() {
        let mut payload = ParsePayload::new(1);
        payload.push_issue(RawIssue::custom(Default::default(), Value::Null).fatal());
        run_checks(
            &mut payload,
            &[failing("skipped"), failing("forced").when(|_| true)],
            &ParseContext::new(),
            None,
        );
        assert_eq!(messages(&payload), vec!["forced"]);
    }

    #[test]
    fn test_stamps_inst_with_check_then_schema_error() {
        let schema_error = ErrorMap::from("schema");
        let mut payload = ParsePayload::new(1);
        run_checks(
            &mut payload,
            &[failing("a").error("check"), failing("b")],
            &ParseContext::new(),
            Some(&schema_error),
        );
        let resolved: Vec<_> = payload
            .issues
            .iter()
            .map(|i| i.inst.as_ref().and_then(|m| m.resolve(i)))
            .collect();
        assert_eq!(
            resolved,
            vec![Some("check".to_string()), Some("schema".to_string())]
        );
    }

    #[test]
    fn test_attach_callbacks_fire_per_attachment() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let check = failing("a").on_attach(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let mut first = SchemaInternals::default();
        let mut second = SchemaInternals::default();
        check.attach(&mut first);
        check.attach(&mut second);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
