// crates/text-params/src/schema.rs
// ============================================================================
// Module: Schema Validation
// Description: JSON Schema (draft 2020-12) validation of JSON instances.
// Purpose: Reject instances that violate a caller-supplied schema.
// Dependencies: jsonschema, serde_json, tracing
// ============================================================================

//! ## Overview
//! [`validate_schema`] parses a schema and an instance, compiles the schema
//! under draft 2020-12, and reports every violation in one aggregated error.
//! Malformed JSON is reported as [`TextParamError::InvalidJsonFormat`]; schema
//! compilation failures as [`TextParamError::SchemaValidation`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use tracing::warn;

use crate::error::TextParamError;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates `instance_string` against the schema in `schema_string`.
///
/// # Errors
///
/// Returns [`TextParamError::InvalidJsonFormat`] when either input is not JSON,
/// [`TextParamError::SchemaValidation`] when the schema does not compile, and
/// [`TextParamError::ValidationFailed`] listing every violation otherwise.
pub fn validate_schema(schema_string: &str, instance_string: &str) -> Result<(), TextParamError> {
    let schema = parse_json(schema_string)?;
    let validator = compile_schema(&schema)?;
    let instance = parse_json(instance_string)?;

    let messages: Vec<String> =
        validator.iter_errors(&instance).map(|error| error.to_string()).collect();
    if messages.is_empty() {
        return Ok(());
    }
    warn!(violations = messages.len(), "json instance failed schema validation");
    Err(TextParamError::ValidationFailed {
        messages,
        instance: instance_string.to_string(),
        schema: schema_string.to_string(),
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses JSON text, mapping failures to [`TextParamError::InvalidJsonFormat`].
fn parse_json(text: &str) -> Result<Value, TextParamError> {
    serde_json::from_str(text).map_err(|err| TextParamError::InvalidJsonFormat(err.to_string()))
}

/// Compiles a draft 2020-12 validator for `schema`.
fn compile_schema(schema: &Value) -> Result<Validator, TextParamError> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| TextParamError::SchemaValidation(err.to_string()))
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
    fn compile_schema_rejects_invalid_keyword_values() {
        let schema = json!({"type": "not-a-type"});
        let err = compile_schema(&schema).err().unwrap();
        assert!(matches!(err, TextParamError::SchemaValidation(_)));
    }

    #[test]
    fn parse_json_reports_invalid_format() {
        let err = parse_json("{oops").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON format: "));
    }
}
