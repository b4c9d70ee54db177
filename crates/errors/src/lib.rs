#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for verigate
//!
//! Errors are split by domain. Everything that can go wrong is a
//! configuration or input problem surfaced at construction or load time;
//! the verification call itself is infallible.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod input;
pub mod registry;
pub mod ruleset;

pub use config::ConfigError;
pub use input::InputError;
pub use registry::RegistryError;
pub use ruleset::RulesetError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("ruleset error: {0}")]
    Ruleset(#[from] RulesetError),

    #[error("input error: {0}")]
    Input(#[from] InputError),
}

/// Result type alias for verigate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(err) => err.user_message(),
            Error::Registry(err) => err.user_message(),
            Error::Ruleset(err) => err.user_message(),
            Error::Input(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_hint(),
            Error::Registry(err) => err.user_hint(),
            Error::Ruleset(err) => err.user_hint(),
            Error::Input(err) => err.user_hint(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Input(err) => err.is_retryable(),
            Error::Config(_) | Error::Registry(_) | Error::Ruleset(_) => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_code(),
            Error::Registry(err) => err.user_code(),
            Error::Ruleset(err) => err.user_code(),
            Error::Input(err) => err.user_code(),
        }
    }
}
