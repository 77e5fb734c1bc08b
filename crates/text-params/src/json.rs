// crates/text-params/src/json.rs
// ============================================================================
// Module: JSON Shape Utilities
// Description: JSON-ness detection and object/array normalization.
// Purpose: Classify and normalize untrusted JSON text before downstream use.
// Dependencies: serde_json, tracing
// ============================================================================

//! ## Overview
//! Shape classification accepts only objects and arrays at the top level.
//! [`is_valid_json_string`] is lenient: it inspects the leading JSON value and
//! ignores anything after it. [`is_json`] additionally requires the whole input
//! to parse as a single JSON document, which rejects inputs such as `[]"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Deserializer;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::error::TextParamError;

// ============================================================================
// SECTION: Shape Classification
// ============================================================================

/// Returns true when the leading JSON value of `json` is an object or array.
///
/// Blank input is never valid. Trailing content after the leading value is not
/// inspected; use [`is_json`] for a full-document check.
#[must_use]
pub fn is_valid_json_string(json: &str) -> bool {
    if json.trim().is_empty() {
        return false;
    }
    let mut stream = Deserializer::from_str(json).into_iter::<Value>();
    matches!(stream.next(), Some(Ok(Value::Object(_) | Value::Array(_))))
}

/// Returns true when `json` is a complete JSON object or array document.
#[must_use]
pub fn is_json(json: &str) -> bool {
    if !is_valid_json_string(json) {
        return false;
    }
    serde_json::from_str::<Value>(json).is_ok()
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Parses `json_str` into a string-keyed map.
///
/// Objects are returned as-is; arrays are wrapped as `{default_key: [...]}`.
///
/// # Errors
///
/// Returns [`TextParamError::Parse`] for malformed JSON and
/// [`TextParamError::UnsupportedResponseType`] for scalar top-level values.
pub fn from_json(json_str: &str, default_key: &str) -> Result<Map<String, Value>, TextParamError> {
    let value: Value =
        serde_json::from_str(json_str).map_err(|err| TextParamError::Parse(err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) => {
            let mut map = Map::new();
            map.insert(default_key.to_string(), Value::Array(items));
            Ok(map)
        }
        other => {
            let kind = value_kind(&other);
            debug!(kind, "rejecting unsupported top-level json value");
            Err(TextParamError::UnsupportedResponseType(kind.to_string()))
        }
    }
}

/// Returns string values unchanged and JSON-serializes everything else.
///
/// # Errors
///
/// Returns [`TextParamError::Serialization`] when serialization fails.
pub fn to_json(value: &Value) -> Result<String, TextParamError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        other => serde_json::to_string(other)
            .map_err(|err| TextParamError::Serialization(err.to_string())),
    }
}

/// Parses `json_string` and requires the top-level value to be an object.
///
/// # Errors
///
/// Returns [`TextParamError::InvalidInput`] for blank input and
/// [`TextParamError::Parse`] for malformed JSON or a non-object document.
pub fn get_json_object_from_string(json_string: &str) -> Result<Map<String, Value>, TextParamError> {
    if json_string.trim().is_empty() {
        return Err(TextParamError::InvalidInput("Json cannot be null or empty".to_string()));
    }
    let value: Value =
        serde_json::from_str(json_string).map_err(|err| TextParamError::Parse(err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(TextParamError::Parse(format!(
            "expected json object, found {}",
            value_kind(&other)
        ))),
    }
}

/// Re-encodes raw bytes as UTF-8, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn to_utf8(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Names the JSON kind of a value for diagnostics.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
