#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content verification engine for verigate
//!
//! A [`VerificationEngine`] checks text against a fixed set of red-flag
//! patterns and its claimed source against a trusted source registry, then
//! appends an immutable [`VerificationRecord`] to its log. Construction
//! validates everything up front; verification itself cannot fail.

mod engine;
pub mod log;
pub mod registry;
pub mod ruleset;

pub use engine::{VerificationEngine, VerificationEngineBuilder};
pub use log::{Appended, VerificationLog};
pub use registry::{MatchDirection, SourceMatch, TrustedSourceRegistry};
pub use ruleset::{PatternRule, PatternRuleset};

pub use verigate_hash::FingerprintAlgorithm;
pub use verigate_types::{LogStats, RetentionPolicy, VerificationRecord};
