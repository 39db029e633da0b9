//! Length and size checks.
//!
//! Length checks apply to strings (in characters) and arrays; size checks to
//! maps, sets and files (in bytes). Both only run when the value actually has
//! a length or size, so they stay silent on values another check rejected.

use crate::check::{Check, CheckKind};
use crate::error::{Origin, RawIssue};
use crate::validation::ParsePayload;
use crate::value::Value;

fn has_length(payload: &ParsePayload) -> bool {
    !payload.value.is_nullish() && payload.value.length().is_some()
}

fn has_size(payload: &ParsePayload) -> bool {
    !payload.value.is_nullish() && payload.value.size().is_some()
}

fn origin_of(value: &Value) -> Origin {
    Origin::of_value(value).unwrap_or(Origin::Custom)
}

fn record_bound(check: Check, key: &'static str, bound: usize) -> Check {
    check.on_attach(move |internals| {
        internals
            .bag_mut()
            .insert(key.to_string(), Value::from(bound));
    })
}

pub fn max_length(maximum: usize) -> Check {
    let check = Check::new(CheckKind::MaxLength, move |payload, _| {
        let Some(len) = payload.value.length() else {
            return;
        };
        if len > maximum {
            let origin = origin_of(&payload.value);
            let issue = RawIssue::too_big(origin, maximum, true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .when(has_length);
    record_bound(check, "max_length", maximum)
}

pub fn min_length(minimum: usize) -> Check {
    let check = Check::new(CheckKind::MinLength, move |payload, _| {
        let Some(len) = payload.value.length() else {
            return;
        };
        if len < minimum {
            let origin = origin_of(&payload.value);
            let issue = RawIssue::too_small(origin, minimum, true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .when(has_length);
    record_bound(check, "min_length", minimum)
}

pub fn length_equals(length: usize) -> Check {
    let check = Check::new(CheckKind::LengthEquals, move |payload, _| {
        let Some(len) = payload.value.length() else {
            return;
        };
        let origin = origin_of(&payload.value);
        if len > length {
            let issue = RawIssue::too_big(origin, length, true, payload.value.clone()).exact();
            payload.push_issue(issue);
        } else if len < length {
            let issue = RawIssue::too_small(origin, length, true, payload.value.clone()).exact();
            payload.push_issue(issue);
        }
    })
    .when(has_length);
    record_bound(check, "length", length)
}

pub fn max_size(maximum: u64) -> Check {
    let check = Check::new(CheckKind::MaxSize, move |payload, _| {
        let Some(size) = payload.value.size() else {
            return;
        };
        if size > maximum {
            let origin = origin_of(&payload.value);
            let issue = RawIssue::too_big(origin, maximum, true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .when(has_size);
    record_bound(check, "max_size", maximum as usize)
}

pub fn min_size(minimum: u64) -> Check {
    let check = Check::new(CheckKind::MinSize, move |payload, _| {
        let Some(size) = payload.value.size() else {
            return;
        };
        if size < minimum {
            let origin = origin_of(&payload.value);
            let issue = RawIssue::too_small(origin, minimum, true, payload.value.clone());
            payload.push_issue(issue);
        }
    })
    .when(has_size);
    record_bound(check, "min_size", minimum as usize)
}

pub fn size_equals(size: u64) -> Check {
    let check = Check::new(CheckKind::SizeEquals, move |payload, _| {
        let Some(actual) = payload.value.size() else {
            return;
        };
        let origin = origin_of(&payload.value);
        if actual > size {
            let issue = RawIssue::too_big(origin, size, true, payload.value.clone()).exact();
            payload.push_issue(issue);
        } else if actual < size {
            let issue = RawIssue::too_small(origin, size, true, payload.value.clone()).exact();
            payload.push_issue(issue);
        }
    })
    .when(has_size);
    record_bound(check, "size", size as usize)
}
