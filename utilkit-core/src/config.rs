//! Configuration with TOML support
//!
//! This module provides the configuration used by applications embedding
//! utilkit:
//! - Parses TOML documents (reading the file is left to the caller)
//! - Supports environment variable overrides
//! - Validates configuration values

use serde::{Deserialize, Serialize};

use crate::error::{UtilkitError, UtilkitResult};
use crate::promises::DelayOptions;
use crate::text::JoinOptions;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["plain", "json"];

/// Complete configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Text formatting defaults
    pub text: TextConfig,

    /// Default options for delays
    pub delay: DelayOptions,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level, used when `RUST_LOG` is not set
    pub level: String,

    /// Output format: "plain" or "json"
    pub format: String,

    /// Include the event target in output
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
            with_target: true,
        }
    }
}

/// Text formatting defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Separators for English list joining
    pub join: JoinOptions,
}

impl Config {
    /// Parse configuration from a TOML document
    ///
    /// Environment overrides are applied before validation.
    pub fn from_toml_str(contents: &str) -> UtilkitResult<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration back to TOML
    pub fn to_toml_string(&self) -> UtilkitResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("UTILKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("UTILKIT_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(oxford) = std::env::var("UTILKIT_OXFORD_COMMA") {
            if let Ok(oxford) = oxford.parse() {
                self.text.join.oxford_comma = oxford;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> UtilkitResult<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(UtilkitError::configuration(
                "logging.level",
                format!("Invalid log level: {}", self.logging.level),
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(UtilkitError::configuration(
                "logging.format",
                format!("Invalid log format: {}", self.logging.format),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.text.join, JoinOptions::default());
        assert!(!config.delay.allow_process_exit_while_pending);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Configuration);
        assert_eq!(err.message(), "logging.level: Invalid log level: verbose");
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
