//! Pattern ruleset errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RulesetError {
    #[error("invalid pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("pattern at index {index} is empty")]
    EmptyPattern { index: usize },

    #[error("pattern {pattern} is listed more than once")]
    DuplicatePattern { pattern: String },
}

impl UserFacingError for RulesetError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPattern { .. } => Some("Patterns use Rust regex syntax."),
            Self::EmptyPattern { .. } => Some("Remove the empty rule; it matches every input."),
            Self::DuplicatePattern { .. } => Some("Remove the repeated rule."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidPattern { .. } => "ruleset.invalid_pattern",
            Self::EmptyPattern { .. } => "ruleset.empty_pattern",
            Self::DuplicatePattern { .. } => "ruleset.duplicate_pattern",
        })
    }
}
