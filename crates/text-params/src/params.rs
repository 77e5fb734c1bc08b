// crates/text-params/src/params.rs
// ============================================================================
// Module: Parameter Maps
// Description: Parameter filtering, stringification, and toString() expansion.
// Purpose: Turn JSON-valued parameters into string maps for template rendering.
// Dependencies: serde_json, regex, tracing
// ============================================================================

//! ## Overview
//! Parameter maps arrive as JSON objects whose values may be strings or any
//! other JSON value. Rendering needs plain strings, so string values pass
//! through unchanged and every other value is serialized to JSON text.
//!
//! Templates can also reference `${parameters.<name>.toString()}`. For those,
//! [`parse_parameters`] derives an escaped copy of `<name>` under the key
//! `<name>.toString()`. Derived maps are returned as new values; inputs are
//! never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::error::TextParamError;
use crate::json::to_json;
use crate::json::value_kind;
use crate::script::cached_regex;
use crate::text::process_text_doc;

// ============================================================================
// SECTION: Types and Constants
// ============================================================================

/// String-keyed, string-valued parameter map with deterministic ordering.
pub type ParameterMap = BTreeMap<String, String>;

/// Suffix appended to a parameter name to form its derived toString() key.
pub const TO_STRING_FUNCTION_NAME: &str = ".toString()";

/// Nested key holding script parameters.
pub(crate) const DEFAULT_PARAMETERS_KEY: &str = "parameters";

/// Matches `${parameters.<name>.toString()}` and captures `<name>`.
const TO_STRING_PATTERN: &str = r"\$\{parameters\.(.+?)\.toString\(\)\}";

/// Compiled [`TO_STRING_PATTERN`].
static TO_STRING_REFERENCE: OnceLock<Regex> = OnceLock::new();

// ============================================================================
// SECTION: Stringification
// ============================================================================

/// Returns only the entries of `params` whose key appears in `allowed_keys`.
///
/// String values pass through unchanged; other values are JSON-serialized.
/// Allowed keys without a matching parameter are ignored.
///
/// # Errors
///
/// Returns [`TextParamError::Serialization`] when a value cannot be serialized.
pub fn filtered_parameter_map<I, K>(
    params: &Map<String, Value>,
    allowed_keys: I,
) -> Result<ParameterMap, TextParamError>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut filtered = ParameterMap::new();
    for key in allowed_keys {
        let key = key.as_ref();
        if let Some(value) = params.get(key) {
            filtered.insert(key.to_string(), to_json(value)?);
        }
    }
    Ok(filtered)
}

/// Stringifies every value of `params`.
///
/// # Errors
///
/// Returns [`TextParamError::Serialization`] when a value cannot be serialized.
pub fn get_parameter_map(params: &Map<String, Value>) -> Result<ParameterMap, TextParamError> {
    params.iter().map(|(key, value)| Ok((key.clone(), to_json(value)?))).collect()
}

/// Stringifies the nested `"parameters"` object of `input`.
///
/// A missing or `null` entry yields an empty map.
///
/// # Errors
///
/// Returns [`TextParamError::InvalidInput`] when the entry is not an object and
/// [`TextParamError::Serialization`] when a value cannot be serialized.
pub fn convert_script_string_to_json_string(
    input: &Map<String, Value>,
) -> Result<ParameterMap, TextParamError> {
    nested_parameter_map(input, DEFAULT_PARAMETERS_KEY)
}

/// Stringifies the nested object stored under `key` in `input`.
pub(crate) fn nested_parameter_map(
    input: &Map<String, Value>,
    key: &str,
) -> Result<ParameterMap, TextParamError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(ParameterMap::new()),
        Some(Value::Object(params)) => get_parameter_map(params),
        Some(other) => {
            let kind = value_kind(other);
            warn!(key, kind, "nested parameters entry is not an object");
            Err(TextParamError::InvalidInput(format!("{key} must be an object, found {kind}")))
        }
    }
}

// ============================================================================
// SECTION: toString() Expansion
// ============================================================================

/// Collects `<name>` from every `${parameters.<name>.toString()}` reference.
///
/// Values are scanned in key order and matches left to right; duplicates are kept.
#[must_use]
pub fn collect_to_string_prefixes(params: &ParameterMap) -> Vec<String> {
    let Ok(reference) = cached_regex(&TO_STRING_REFERENCE, TO_STRING_PATTERN) else {
        return Vec::new();
    };
    params
        .values()
        .flat_map(|value| reference.captures_iter(value))
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Returns a copy of `params` with escaped `<name>.toString()` entries added.
///
/// Each referenced `<name>` present in `params` gets a derived entry holding
/// [`process_text_doc`] of its value. References to absent names are skipped.
///
/// # Errors
///
/// Returns [`TextParamError::Serialization`] when escaping a value fails.
pub fn parse_parameters(params: &ParameterMap) -> Result<ParameterMap, TextParamError> {
    let mut parsed = params.clone();
    for prefix in collect_to_string_prefixes(params) {
        let Some(value) = params.get(&prefix) else {
            debug!(prefix = %prefix, "skipping toString reference without parameter");
            continue;
        };
        let derived_key = format!("{prefix}{TO_STRING_FUNCTION_NAME}");
        parsed.insert(derived_key, process_text_doc(value)?);
    }
    Ok(parsed)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn to_string_pattern_compiles() {
        assert!(cached_regex(&TO_STRING_REFERENCE, TO_STRING_PATTERN).is_ok());
    }

    #[test]
    fn nested_parameter_map_honors_custom_key() {
        let input = json!({"args": {"k": 1}, "parameters": {"other": "x"}});
        let map = nested_parameter_map(input.as_object().unwrap(), "args").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["k"], "1");
    }

    #[test]
    fn nested_parameter_map_treats_null_as_empty() {
        let input = json!({"parameters": null});
        let map = nested_parameter_map(input.as_object().unwrap(), "parameters").unwrap();
        assert!(map.is_empty());
    }
}
