//! Errors for content fed in from files or stdin

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum InputError {
    #[error("failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("content is not valid UTF-8: {path}")]
    NotUtf8 { path: String },
}

impl UserFacingError for InputError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ReadFailed { .. } => Some("Check that the path exists and is readable."),
            Self::MalformedLine { .. } => {
                Some(r#"Each line must be a JSON object: {"content": "...", "source": "..."}"#)
            }
            Self::NotUtf8 { .. } => Some("Only UTF-8 text can be verified."),
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::ReadFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ReadFailed { .. } => "input.read_failed",
            Self::MalformedLine { .. } => "input.malformed_line",
            Self::NotUtf8 { .. } => "input.not_utf8",
        })
    }
}
