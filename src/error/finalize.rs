//! Raw issue finalization.
//!
//! Message resolution walks a fixed chain and takes the first hit:
//! 1. the message fixed on the raw issue
//! 2. the customizer of the check or schema that produced it (`inst`)
//! 3. the per-parse customizer on the [`ParseContext`]
//! 4. the global customizer, then the global message selector
//! 5. the built-in default

use crate::config::config;
use crate::error::issue::{Issue, RawIssue};
use crate::error::messages::default_message;
use crate::path::JsonPath;
use crate::validation::ParseContext;

/// Resolves the message and absolute path of a raw issue.
///
/// `base` is the path of the payload the issue was collected on.
pub fn finalize_issue(raw: RawIssue, base: &JsonPath, ctx: &ParseContext) -> Issue {
    let message = resolve_message(&raw, ctx);
    let path = if base.is_root() {
        raw.path
    } else {
        base.join(&raw.path)
    };
    Issue {
        message,
        path,
        input: ctx.reports_input().then_some(raw.input),
        origin: raw.origin,
        details: raw.details,
    }
}

/// Finalizes every issue of a payload, preserving order.
pub fn finalize_issues(raw: Vec<RawIssue>, base: &JsonPath, ctx: &ParseContext) -> Vec<Issue> {
    raw.into_iter()
        .map(|issue| finalize_issue(issue, base, ctx))
        .collect()
}

fn resolve_message(raw: &RawIssue, ctx: &ParseContext) -> String {
    if let Some(message) = &raw.message {
        return message.clone();
    }
    if let Some(message) = raw.inst.as_ref().and_then(|inst| inst.resolve(raw)) {
        return message;
    }
    if let Some(message) = ctx.error_map().and_then(|map| map.resolve(raw)) {
        return message;
    }
    let global = config();
    global
        .error_map
        .as_ref()
        .and_then(|map| map.resolve(raw))
        .or_else(|| global.locale.resolve(raw))
        .unwrap_or_else(|| default_message(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ParsedType;
    use crate::params::ErrorMap;
    use crate::value::Value;

    fn raw() -> RawIssue {
        RawIssue::invalid_type(ParsedType::String, Value::Int(1))
    }

    #[test]
    fn test_issue_message_wins() {
        let issue = raw()
            .with_message("own")
            .with_inst(ErrorMap::from("inst"));
        let ctx = ParseContext::new().error("ctx");
        assert_eq!(finalize_issue(issue, &JsonPath::root(), &ctx).message, "own");
    }

    #[test]
    fn test_inst_beats_context() {
        let issue = raw().with_inst(ErrorMap::from("inst"));
        let ctx = ParseContext::new().error("ctx");
        assert_eq!(finalize_issue(issue, &JsonPath::root(), &ctx).message, "inst");
    }

    #[test]
    fn test_inst_returning_none_defers() {
        let issue = raw().with_inst(ErrorMap::new(|_| None));
        let ctx = ParseContext::new().error("ctx");
        assert_eq!(finalize_issue(issue, &JsonPath::root(), &ctx).message, "ctx");
    }

    #[test]
    fn test_default_message_is_last() {
        let ctx = ParseContext::new();
        assert_eq!(
            finalize_issue(raw(), &JsonPath::root(), &ctx).message,
            "Invalid input: expected string, received number"
        );
    }

    #[test]
    fn test_path_joins_base() {
        let issue = raw().with_path(JsonPath::from_field("b"));
        let ctx = ParseContext::new();
        let out = finalize_issue(issue, &JsonPath::from_field("a"), &ctx);
        assert_eq!(out.path.to_string(), "a.b");
    }

    #[test]
    fn test_input_echo_can_be_disabled() {
        let ctx = ParseContext::new().report_input(false);
        assert!(finalize_issue(raw(), &JsonPath::root(), &ctx).input.is_none());

        let ctx = ParseContext::new().report_input(true);
        assert_eq!(
            finalize_issue(raw(), &JsonPath::root(), &ctx).input,
            Some(Value::Int(1))
        );
    }
}
