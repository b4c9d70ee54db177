//! Trusted source registry errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("trusted source registry is empty")]
    Empty,

    #[error("trusted source category name is empty")]
    EmptyCategory,

    #[error("empty identifier in category {category}")]
    EmptyIdentifier { category: String },

    #[error(
        "identifier {identifier} is registered under both {first_category} and {second_category}"
    )]
    DuplicateIdentifier {
        identifier: String,
        first_category: String,
        second_category: String,
    },
}

impl UserFacingError for RegistryError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some("Add at least one identifier under [sources]."),
            Self::EmptyCategory => Some("Give every [sources] entry a non-empty key."),
            Self::EmptyIdentifier { .. } => {
                Some("Remove the empty string; it would trust every source.")
            }
            Self::DuplicateIdentifier { .. } => {
                Some("Keep each identifier under a single category.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Empty => "registry.empty",
            Self::EmptyCategory => "registry.empty_category",
            Self::EmptyIdentifier { .. } => "registry.empty_identifier",
            Self::DuplicateIdentifier { .. } => "registry.duplicate_identifier",
        })
    }
}
