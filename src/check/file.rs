use crate::check::{Check, CheckKind};
use crate::error::{Origin, RawIssue};
use crate::path::JsonPath;
use crate::value::Value;

/// Accepts files whose content type is one of `accepted`.
///
/// The issue lands at `["type"]` and carries the content type as its input.
pub fn mime_type<I, S>(accepted: I) -> Check
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let accepted: Vec<String> = accepted.into_iter().map(Into::into).collect();
    let values: Vec<Value> = accepted.iter().cloned().map(Value::from).collect();
    let attached = values.clone();

    Check::new(CheckKind::MimeType, move |payload, _| {
        let Some(file) = payload.value.as_file() else {
            return;
        };
        if accepted.iter().any(|mime| *mime == file.mime_type) {
            return;
        }
        let issue = RawIssue::invalid_value(values.clone(), Value::from(file.mime_type.as_str()))
            .with_continue(true)
            .with_origin(Origin::File)
            .with_path(JsonPath::from_field("type"));
        payload.push_issue(issue);
    })
    .when(|payload| payload.value.as_file().is_some())
    .on_attach(move |internals| {
        internals
            .bag_mut()
            .insert("mime".to_string(), Value::Array(attached.clone()));
    })
}
