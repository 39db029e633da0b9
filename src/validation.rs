//! Per-parse state.
//!
//! [`ParsePayload`] is the mutable carrier threaded through every schema during
//! a parse: the current value, the issues accumulated so far and the payload's
//! base path. [`ParseContext`] holds the immutable per-parse settings.

use crate::config::config;
use crate::error::RawIssue;
use crate::params::ErrorMap;
use crate::path::{JsonPath, PathSegment};
use crate::value::Value;

/// The mutable `(value, issues, path)` carrier of a single parse.
///
/// Issue paths are relative to `path`. Compound schemas parse children in
/// fresh payloads and merge their issues back with a segment prepended.
#[derive(Debug, Clone, Default)]
pub struct ParsePayload {
    pub value: Value,
    pub issues: Vec<RawIssue>,
    pub path: JsonPath,
}

impl ParsePayload {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            issues: Vec::new(),
            path: JsonPath::root(),
        }
    }

    /// True when any accumulated issue is non-continuable.
    pub fn is_aborted(&self) -> bool {
        self.aborted_since(0)
    }

    /// True when any issue at or after `start` is non-continuable.
    pub fn aborted_since(&self, start: usize) -> bool {
        self.issues
            .get(start..)
            .is_some_and(|issues| issues.iter().any(|issue| !issue.continues))
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn push_issue(&mut self, issue: RawIssue) {
        self.issues.push(issue);
    }

    /// Merges a child payload's issues, prefixing each path with `segment`.
    pub fn merge_child(&mut self, child: Vec<RawIssue>, segment: Option<&PathSegment>) {
        match segment {
            Some(segment) => self
                .issues
                .extend(child.into_iter().map(|issue| issue.prefixed(segment.clone()))),
            None => self.issues.extend(child),
        }
    }
}

/// Immutable settings for a single top-level parse.
///
/// # Example
///
/// ```rust
/// use inquest::{ParseContext, Schema, TypedSchema};
///
/// let ctx = ParseContext::new().error("bad input").report_input(false);
/// let err = Schema::string().parse_with(1, &ctx).unwrap_err();
/// assert_eq!(err.first().message, "bad input");
/// assert!(err.first().input.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    error: Option<ErrorMap>,
    report_input: bool,
}

impl ParseContext {
    /// A context with no customizer, echoing inputs per the global config.
    pub fn new() -> Self {
        Self {
            error: None,
            report_input: config().report_input,
        }
    }

    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn report_input(mut self, report: bool) -> Self {
        self.report_input = report;
        self
    }

    pub fn error_map(&self) -> Option<&ErrorMap> {
        self.error.as_ref()
    }

    pub fn reports_input(&self) -> bool {
        self.report_input
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}
