// crates/text-params/src/text.rs
// ============================================================================
// Module: Text Document Normalization
// Description: JSON string escaping without surrounding quotes.
// Purpose: Prepare raw text for embedding inside JSON string templates.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Text documents are serialized as JSON string literals and the enclosing
//! quote characters are stripped. The result carries JSON escape sequences for
//! quotes, backslashes, and control characters, and can be spliced between
//! quotes in a JSON template.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::TextParamError;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Escapes `doc` per JSON string rules and removes the surrounding quotes.
///
/// HTML-safe escaping is not applied: `<`, `>`, `&`, `'`, `=`, U+2028, and
/// U+2029 are emitted as-is rather than as `\uXXXX` sequences.
///
/// # Errors
///
/// Returns [`TextParamError::Serialization`] when the serializer fails or does
/// not produce a quoted literal.
pub fn process_text_doc(doc: &str) -> Result<String, TextParamError> {
    let literal =
        serde_json::to_string(doc).map_err(|err| TextParamError::Serialization(err.to_string()))?;
    literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| TextParamError::Serialization("expected quoted json string".to_string()))
}

/// Applies [`process_text_doc`] to a possibly absent document.
///
/// # Errors
///
/// Returns [`TextParamError::Serialization`] when escaping a present document fails.
pub fn process_optional_text_doc(doc: Option<&str>) -> Result<Option<String>, TextParamError> {
    doc.map(process_text_doc).transpose()
}

/// Applies [`process_text_doc`] element-wise, preserving order.
///
/// # Errors
///
/// Returns the first [`TextParamError`] produced by any element.
pub fn process_text_docs<S: AsRef<str>>(docs: &[S]) -> Result<Vec<String>, TextParamError> {
    docs.iter().map(|doc| process_text_doc(doc.as_ref())).collect()
}
