#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for verigate
//!
//! Configuration is resolved in this order, later layers winning:
//! - Default values (the built-in registry and rules)
//! - Configuration file (~/.config/verigate/config.toml or `--config`)
//! - Environment variables
//! - CLI flags
//!
//! Sections that replace built-in tables (`[sources]`, `[patterns]`) replace
//! them wholesale; they are never merged entry by entry.

pub mod constants;
mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use verigate_errors::{ConfigError, Error};
use verigate_hash::FingerprintAlgorithm;
use verigate_types::{ColorChoice, OutputFormat, RetentionPolicy};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    /// Trusted source categories, each an ordered list of identifiers
    #[serde(default = "defaults::trusted_sources")]
    pub sources: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub patterns: PatternConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Verification engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub fingerprint: FingerprintAlgorithm,
    /// Ring buffer size for the verification log. Unset keeps every record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_capacity: Option<usize>,
}

/// Suspicious-content rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Case-insensitive regular expressions, checked in order
    #[serde(default = "defaults::pattern_rules")]
    pub rules: Vec<String>,
}

/// Human-readable verification policy. Displayed, never evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "defaults::source_policy")]
    pub source_verification: Vec<String>,
    #[serde(default = "defaults::content_policy")]
    pub content_verification: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            engine: EngineConfig::default(),
            sources: defaults::trusted_sources(),
            patterns: PatternConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fingerprint: FingerprintAlgorithm::Blake3,
            log_capacity: None,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            rules: defaults::pattern_rules(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            source_verification: defaults::source_policy(),
            content_verification: defaults::content_policy(),
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::APP_DIR)
            .join(constants::CONFIG_FILE))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or does not match the
    /// configuration schema.
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!("no configuration file, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// An explicit path must exist; only the implicit default path falls back.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(output) = std::env::var(constants::ENV_OUTPUT) {
            self.general.default_output =
                output.parse().map_err(|value| ConfigError::InvalidValue {
                    field: constants::ENV_OUTPUT.to_string(),
                    value,
                })?;
        }

        if let Ok(color) = std::env::var(constants::ENV_COLOR) {
            self.general.color = color.parse().map_err(|value| ConfigError::InvalidValue {
                field: constants::ENV_COLOR.to_string(),
                value,
            })?;
        }

        if let Ok(capacity) = std::env::var(constants::ENV_LOG_CAPACITY) {
            self.engine.log_capacity = if capacity == "unbounded" {
                None
            } else {
                Some(capacity.parse().map_err(|_| ConfigError::InvalidValue {
                    field: constants::ENV_LOG_CAPACITY.to_string(),
                    value: capacity,
                })?)
            };
        }

        if let Ok(algorithm) = std::env::var(constants::ENV_FINGERPRINT) {
            self.engine.fingerprint = algorithm.parse()?;
        }

        Ok(())
    }

    /// Resolve the log retention policy
    ///
    /// # Errors
    ///
    /// Returns an error if a bounded log is configured with zero capacity.
    pub fn retention(&self) -> Result<RetentionPolicy, Error> {
        match self.engine.log_capacity {
            None => {
                tracing::warn!("verification log is unbounded; memory grows with every call");
                Ok(RetentionPolicy::Unbounded)
            }
            Some(0) => Err(ConfigError::InvalidValue {
                field: "engine.log_capacity".to_string(),
                value: "0".to_string(),
            }
            .into()),
            Some(capacity) => Ok(RetentionPolicy::Bounded { capacity }),
        }
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError {
                error: e.to_string(),
            })
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_tables() {
        let config = Config::default();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources["official_docs"].len(), 4);
        assert_eq!(config.sources["reputable_repos"].len(), 3);
        assert_eq!(config.patterns.rules[0], "quantum.*consciousness");
        assert_eq!(config.engine.fingerprint, FingerprintAlgorithm::Blake3);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.sources, Config::default().sources);
        assert_eq!(config.patterns.rules.len(), 4);
        assert_eq!(config.policy.content_verification.len(), 4);
    }

    #[test]
    fn test_sources_section_replaces_defaults() {
        let config = Config::from_toml_str(
            r#"
[sources]
internal = ["https://wiki.example.com"]
"#,
        )
        .unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources["internal"], vec!["https://wiki.example.com"]);
    }

    #[test]
    fn test_retention() {
        let mut config = Config::default();
        assert_eq!(config.retention().unwrap(), RetentionPolicy::Unbounded);

        config.engine.log_capacity = Some(0);
        assert!(config.retention().is_err());

        config.engine.log_capacity = Some(16);
        assert_eq!(
            config.retention().unwrap(),
            RetentionPolicy::Bounded { capacity: 16 }
        );
    }

    #[test]
    fn test_engine_section_without_capacity_is_unbounded() {
        let config = Config::from_toml_str("[engine]\nfingerprint = \"blake3\"\n").unwrap();
        assert_eq!(config.engine.log_capacity, None);
        assert_eq!(config.retention().unwrap(), RetentionPolicy::Unbounded);
        assert!(!config.to_toml_string().unwrap().contains("log_capacity"));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = Config::default();
        let rendered = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.sources, config.sources);
        assert_eq!(parsed.patterns.rules, config.patterns.rules);
    }
}
