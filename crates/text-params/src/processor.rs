// crates/text-params/src/processor.rs
// ============================================================================
// Module: Text Parameter Processor
// Description: Configured entry point over the text parameter utilities.
// Purpose: Apply size limits and configured keys before delegating to helpers.
// Dependencies: serde_json, tracing
// ============================================================================

//! ## Overview
//! [`TextParameterProcessor`] binds a validated [`ProcessorConfig`] to the
//! stateless helpers in this crate. Every string input is checked against
//! `max_input_bytes` before parsing. The processor holds no mutable state and
//! is safe to share across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::config::ConfigError;
use crate::config::ProcessorConfig;
use crate::error::TextParamError;
use crate::json;
use crate::jsonpath::select_json_path;
use crate::params::ParameterMap;
use crate::params::nested_parameter_map;
use crate::params::parse_parameters;
use crate::schema;
use crate::script::add_default_method;

// ============================================================================
// SECTION: Error Messages
// ============================================================================

/// Appends the model identifier to `error_message` unless `is_hidden` is set.
#[must_use]
pub fn get_error_message(error_message: &str, model_id: &str, is_hidden: bool) -> String {
    if is_hidden {
        error_message.to_string()
    } else {
        format!("{error_message} Model ID: {model_id}")
    }
}

// ============================================================================
// SECTION: Processor
// ============================================================================

/// Configured text parameter processor.
#[derive(Debug, Clone, Default)]
pub struct TextParameterProcessor {
    /// Validated processor configuration.
    config: ProcessorConfig,
}

impl TextParameterProcessor {
    /// Creates a processor after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn new(config: ProcessorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Returns true when `text` is a complete JSON object or array within the size limit.
    #[must_use]
    pub fn is_json(&self, text: &str) -> bool {
        self.check_size("json", text).is_ok() && json::is_json(text)
    }

    /// Parses `text` into a map, wrapping arrays under `default_key`.
    ///
    /// Falls back to the configured `default_array_key` when `default_key` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TextParamError`] on oversized, malformed, or scalar input.
    pub fn from_json(
        &self,
        text: &str,
        default_key: Option<&str>,
    ) -> Result<Map<String, Value>, TextParamError> {
        self.check_size("json", text)?;
        json::from_json(text, default_key.unwrap_or(&self.config.default_array_key))
    }

    /// Builds the render-ready parameter map for a script request.
    ///
    /// Reads the nested object under the configured `parameters_key`,
    /// stringifies its values, and adds escaped `<name>.toString()` entries.
    ///
    /// # Errors
    ///
    /// Returns [`TextParamError`] when the nested entry is not an object or a
    /// value cannot be serialized.
    pub fn prepare_parameters(
        &self,
        input: &Map<String, Value>,
    ) -> Result<ParameterMap, TextParamError> {
        let params = nested_parameter_map(input, &self.config.parameters_key)?;
        parse_parameters(&params)
    }

    /// Returns `template` with the default `escape` helper injected when enabled.
    ///
    /// # Errors
    ///
    /// Returns [`TextParamError::InputTooLarge`] when the template exceeds the limit.
    pub fn prepare_script(&self, template: &str) -> Result<String, TextParamError> {
        self.check_size("script", template)?;
        if !self.config.inject_escape_helper {
            return Ok(template.to_string());
        }
        Ok(add_default_method(template))
    }

    /// Validates `instance` against `schema` after enforcing size limits.
    ///
    /// # Errors
    ///
    /// Returns [`TextParamError`] as described by [`schema::validate_schema`].
    pub fn validate_schema(&self, schema: &str, instance: &str) -> Result<(), TextParamError> {
        self.check_size("schema", schema)?;
        self.check_size("instance", instance)?;
        schema::validate_schema(schema, instance)
    }

    /// Parses `document` and selects values with a `JSONPath` expression.
    ///
    /// # Errors
    ///
    /// Returns [`TextParamError`] on oversized or malformed documents and
    /// invalid expressions.
    pub fn select(&self, document: &str, path: &str) -> Result<Option<Value>, TextParamError> {
        self.check_size("json", document)?;
        let value: Value =
            serde_json::from_str(document).map_err(|err| TextParamError::Parse(err.to_string()))?;
        select_json_path(&value, path)
    }

    /// Formats an error message, honoring the `hide_model_id` setting.
    #[must_use]
    pub fn error_message(&self, error_message: &str, model_id: &str) -> String {
        get_error_message(error_message, model_id, self.config.hide_model_id)
    }

    /// Rejects inputs larger than `max_input_bytes`.
    fn check_size(&self, field: &'static str, text: &str) -> Result<(), TextParamError> {
        let limit = self.config.max_input_bytes;
        if text.len() > limit {
            debug!(field, limit, actual = text.len(), "rejecting oversized input");
            return Err(TextParamError::InputTooLarge {
                field,
                limit,
                actual: text.len(),
            });
        }
        Ok(())
    }
}
