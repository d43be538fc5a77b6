//! Projection configuration
//!
//! Limits for the projector and the location of rule resources. Both
//! sections deserialize from JSON with every field optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default ceiling for literal indices in target paths
pub const DEFAULT_MAX_INDEX: usize = 10_000;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration could not be read: {0}")]
    Read(String),

    #[error("Configuration could not be parsed: {0}")]
    Parse(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` when a setting is out of range.
    fn validate(&self) -> ConfigResult<()>;
}

/// Projector limits and failure policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Largest literal index a target path may use
    pub max_index: usize,
    /// Abort on the first failing rule instead of collecting failures
    pub fail_fast: bool,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
            fail_fast: false,
        }
    }
}

impl Validator for ProjectorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_index == 0 {
            return Err(ConfigurationError::InvalidParameter(
                "max_index must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where rule resources live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub root: PathBuf,
    /// File extension, without the dot, that marks a rule resource
    pub extension: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("resources"),
            extension: "json".to_string(),
        }
    }
}

impl ResourceConfig {
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Validator for ResourceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.extension.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "resource extension cannot be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigurationError::InvalidParameter(format!(
                "resource extension '{}' must not start with a dot",
                self.extension
            )));
        }
        Ok(())
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub projector: ProjectorConfig,
    pub resources: ResourceConfig,
}

impl Config {
    /// Parse and validate a JSON configuration document
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON and `InvalidParameter` when validation fails.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(text).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns `Read` when the file cannot be read, otherwise as [`Config::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Read(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        self.projector.validate()?;
        self.resources.validate()?;
        Ok(())
    }
}
