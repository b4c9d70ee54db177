#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Content fingerprints for verigate
//!
//! Fingerprints identify submitted content for deduplication and audit.
//! They play no part in trust decisions. BLAKE3 is the default; xxHash3-128
//! is available where throughput matters more than collision resistance.

use serde::{Deserialize, Serialize};
use std::fmt;
use verigate_errors::{ConfigError, Error};

/// Hash algorithm used to fingerprint content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintAlgorithm {
    /// BLAKE3, 256-bit
    Blake3,
    /// xxHash3, 128-bit
    #[serde(rename = "xxh3-128")]
    XxHash128,
}

impl FingerprintAlgorithm {
    /// Identifier used in configuration and environment variables
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blake3 => "blake3",
            Self::XxHash128 => "xxh3-128",
        }
    }
}

impl Default for FingerprintAlgorithm {
    fn default() -> Self {
        Self::Blake3
    }
}

impl fmt::Display for FingerprintAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FingerprintAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blake3" => Ok(Self::Blake3),
            "xxh3-128" | "xxhash128" => Ok(Self::XxHash128),
            other => Err(ConfigError::InvalidValue {
                field: "fingerprint".to_string(),
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// A deterministic content fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Fingerprint a byte slice with the given algorithm
    #[must_use]
    pub fn compute(algorithm: FingerprintAlgorithm, data: &[u8]) -> Self {
        let bytes = match algorithm {
            FingerprintAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
            FingerprintAlgorithm::XxHash128 => {
                xxhash_rust::xxh3::xxh3_128(data).to_be_bytes().to_vec()
            }
        };
        Self { bytes }
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Fingerprint text content and return it hex-encoded
#[must_use]
pub fn fingerprint_hex(algorithm: FingerprintAlgorithm, content: &str) -> String {
    Fingerprint::compute(algorithm, content.as_bytes()).to_hex()
}
