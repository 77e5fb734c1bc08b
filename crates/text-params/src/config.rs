// crates/text-params/src/config.rs
// ============================================================================
// Module: Text Params Configuration
// Description: Configuration loading and validation for the parameter processor.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every field has a default, so an empty file is a valid configuration.
//! Missing or invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "text-params.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "TEXT_PARAMS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum size of a single processor input, in bytes.
pub(crate) const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Maximum allowed value for `max_input_bytes`.
pub(crate) const MAX_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;
/// Maximum length of a configured map key.
pub(crate) const MAX_KEY_LENGTH: usize = 256;
/// Default key wrapping top-level JSON arrays.
const DEFAULT_ARRAY_KEY: &str = "response";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Text parameter processor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Maximum size of any single string input, in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Nested key holding script parameters.
    #[serde(default = "default_parameters_key")]
    pub parameters_key: String,
    /// Key used to wrap top-level JSON arrays.
    #[serde(default = "default_array_key")]
    pub default_array_key: String,
    /// Omit model identifiers from error messages.
    #[serde(default)]
    pub hide_model_id: bool,
    /// Prepend the default `escape` helper to templates that need it.
    #[serde(default = "default_true")]
    pub inject_escape_helper: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            parameters_key: default_parameters_key(),
            default_array_key: default_array_key(),
            hide_model_id: false,
            inject_escape_helper: true,
        }
    }
}

impl ProcessorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Invalid("max_input_bytes must be greater than zero".to_string()));
        }
        if self.max_input_bytes > MAX_MAX_INPUT_BYTES {
            return Err(ConfigError::Invalid("max_input_bytes exceeds max limit".to_string()));
        }
        validate_key("parameters_key", &self.parameters_key)?;
        validate_key("default_array_key", &self.default_array_key)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `max_input_bytes`.
const fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

/// Default for `parameters_key`.
fn default_parameters_key() -> String {
    crate::params::DEFAULT_PARAMETERS_KEY.to_string()
}

/// Default for `default_array_key`.
fn default_array_key() -> String {
    DEFAULT_ARRAY_KEY.to_string()
}

/// Serde default helper returning `true`.
const fn default_true() -> bool {
    true
}

/// Resolves the config path from caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured map key.
fn validate_key(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_KEY_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
