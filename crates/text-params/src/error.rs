// crates/text-params/src/error.rs
// ============================================================================
// Module: Text Params Errors
// Description: Error taxonomy for parameter, JSON, and schema utilities.
// Purpose: Provide one typed failure surface for every value-producing call.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! All value-producing functions in this crate fail with [`TextParamError`].
//! Predicate-style functions keep a `bool` surface and never construct errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by text parameter utilities.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - [`TextParamError::InvalidJsonFormat`] is only produced by schema validation;
///   other call sites report malformed JSON as [`TextParamError::Parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextParamError {
    /// A required argument was missing, blank, or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// JSON text could not be parsed or had the wrong top-level shape.
    #[error("json parse error: {0}")]
    Parse(String),
    /// JSON top-level value was neither an object nor an array.
    #[error("Unsupported response type: {0}")]
    UnsupportedResponseType(String),
    /// A value could not be serialized to JSON text.
    #[error("json serialization error: {0}")]
    Serialization(String),
    /// Schema or instance text was not valid JSON.
    #[error("Invalid JSON format: {0}")]
    InvalidJsonFormat(String),
    /// The instance violated one or more schema rules.
    #[error(
        "Validation failed: {} for instance: {instance} with schema: {schema}",
        .messages.join(", ")
    )]
    ValidationFailed {
        /// Individual violation messages in validator order.
        messages: Vec<String>,
        /// Original instance text.
        instance: String,
        /// Original schema text.
        schema: String,
    },
    /// Schema compilation or evaluation failed for a reason other than violations.
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),
    /// An input exceeded the configured byte limit.
    #[error("{field} exceeds size limit ({actual} > {limit} bytes)")]
    InputTooLarge {
        /// Name of the oversized argument.
        field: &'static str,
        /// Configured limit in bytes.
        limit: usize,
        /// Actual size in bytes.
        actual: usize,
    },
}
