//! Issues, aggregated errors and their presentation.
//!
//! Schemas emit [`RawIssue`]s while parsing. At the top-level entry point each
//! raw issue is finalized into an [`Issue`] (resolved message, absolute path)
//! and the issues are collected into a [`ParseError`].

mod finalize;
pub mod format;
mod issue;
pub(crate) mod messages;
mod parse_error;

use thiserror::Error;

pub use finalize::{finalize_issue, finalize_issues};
pub use format::{ErrorTree, FlattenedError, FormattedError};
pub use issue::{FormatDetail, Issue, IssueCode, IssueDetails, Origin, RawIssue};
pub use messages::default_message;
pub use parse_error::ParseError;

/// Errors raised while building a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaBuildError {
    #[error("invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid ISO date bound '{0}', expected YYYY-MM-DD")]
    InvalidDateBound(String),
}

/// The error a transform reports; it becomes a `custom` issue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_messages() {
        let err = SchemaBuildError::InvalidDateBound("2020-13".into());
        assert_eq!(
            err.to_string(),
            "invalid ISO date bound '2020-13', expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_transform_error_displays_message() {
        assert_eq!(TransformError::new("not a number").to_string(), "not a number");
    }
}
