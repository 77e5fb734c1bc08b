// crates/text-params/src/jsonpath.rs
// ============================================================================
// Module: JSONPath Helpers
// Description: JSONPath string helpers, validation, and selection.
// Purpose: Inspect and evaluate JSONPath expressions from untrusted templates.
// Dependencies: jsonpath_lib, serde_json
// ============================================================================

//! ## Overview
//! String helpers ([`obtain_field_name_from_json_path`], [`get_json_path`]) are
//! purely lexical and never validate. [`compile_json_path`] and
//! [`is_valid_json_path`] check that an expression parses; [`select_json_path`]
//! evaluates one against a JSON document. Expressions that start with neither
//! `$` nor `@` are read relative to the root, so `"response.text"` is the same
//! path as `"$.response.text"`, and a leading `@` stands for `$`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use jsonpath_lib::select;
use serde_json::Map;
use serde_json::Value;

use crate::error::TextParamError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker for the root of a `JSONPath` expression inside a larger string.
const ROOT_MARKER: &str = "$.";

// ============================================================================
// SECTION: Lexical Helpers
// ============================================================================

/// Returns the last `.`-delimited segment of `json_path`.
///
/// Trailing dots are ignored, so `"$.a.b."` yields `"b"`.
#[must_use]
pub fn obtain_field_name_from_json_path(json_path: &str) -> &str {
    json_path.trim_end_matches('.').rsplit('.').next().unwrap_or_default()
}

/// Returns `json_path_with_source` from the first `$.` onward, or the input if absent.
#[must_use]
pub fn get_json_path(json_path_with_source: &str) -> &str {
    json_path_with_source
        .find(ROOT_MARKER)
        .map_or(json_path_with_source, |start| &json_path_with_source[start..])
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks that `input` compiles as a `JSONPath` expression.
///
/// Bare paths such as `"a[0].b"` are rooted at `$` before compiling. A path
/// ending in `.` is never valid.
///
/// # Errors
///
/// Returns [`TextParamError::InvalidInput`] for blank input or an invalid expression.
pub fn compile_json_path(input: &str) -> Result<(), TextParamError> {
    let empty = Value::Object(Map::new());
    select_matches(&empty, input).map(|_| ())
}

/// Returns true when `input` compiles as a `JSONPath` expression.
#[must_use]
pub fn is_valid_json_path(input: &str) -> bool {
    compile_json_path(input).is_ok()
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Selects values from `document` using a `JSONPath` expression.
///
/// No match yields `None`, a single match yields that value, and multiple
/// matches are collected into a JSON array.
///
/// # Errors
///
/// Returns [`TextParamError::InvalidInput`] when the expression is invalid.
pub fn select_json_path(document: &Value, path: &str) -> Result<Option<Value>, TextParamError> {
    let matches = select_matches(document, path)?;
    match matches.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some((*single).clone())),
        many => Ok(Some(Value::Array(many.iter().map(|value| (*value).clone()).collect()))),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Evaluates `path` against `document`, rejecting blank or invalid expressions.
fn select_matches<'a>(document: &'a Value, path: &str) -> Result<Vec<&'a Value>, TextParamError> {
    let rooted = root_json_path(path)?;
    select(document, &rooted)
        .map_err(|_| TextParamError::InvalidInput("invalid jsonpath".to_string()))
}

/// Roots `path` at `$`: a leading `@` becomes `$` and bare paths gain `$.`.
fn root_json_path(path: &str) -> Result<Cow<'_, str>, TextParamError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(TextParamError::InvalidInput("jsonpath cannot be null or empty".to_string()));
    }
    if trimmed.ends_with('.') {
        return Err(TextParamError::InvalidInput("jsonpath must not end with '.'".to_string()));
    }
    if let Some(rest) = trimmed.strip_prefix('@') {
        return Ok(Cow::Owned(format!("${rest}")));
    }
    if trimmed.starts_with('$') {
        return Ok(Cow::Borrowed(trimmed));
    }
    Ok(Cow::Owned(format!("{ROOT_MARKER}{trimmed}")))
}
