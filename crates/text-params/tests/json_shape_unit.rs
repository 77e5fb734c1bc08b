// crates/text-params/tests/json_shape_unit.rs
// ============================================================================
// Module: JSON Shape Unit Tests
// Description: Tests for JSON-ness detection and object/array normalization.
// Purpose: Ensure only objects and arrays are accepted as top-level documents.
// ============================================================================

//! ## Overview
//! Covers [`is_valid_json_string`], [`is_json`], [`from_json`],
//! [`get_json_object_from_string`], and [`to_json`].

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::Value;
use serde_json::json;
use text_params::TextParamError;
use text_params::from_json;
use text_params::get_json_object_from_string;
use text_params::is_json;
use text_params::is_valid_json_string;
use text_params::to_json;

// ============================================================================
// SECTION: Shape Classification
// ============================================================================

#[test]
fn valid_json_string_accepts_objects_and_arrays() {
    assert!(is_valid_json_string("{}"));
    assert!(is_valid_json_string("{\"a\": {\"b\": [1, 2]}}"));
    assert!(is_valid_json_string("[]"));
    assert!(is_valid_json_string("  [1, \"two\", null]\n"));
}

#[test]
fn valid_json_string_rejects_blank_input() {
    assert!(!is_valid_json_string(""));
    assert!(!is_valid_json_string("   \n\t"));
}

#[test]
fn valid_json_string_rejects_scalars() {
    assert!(!is_valid_json_string("42"));
    assert!(!is_valid_json_string("\"text\""));
    assert!(!is_valid_json_string("true"));
    assert!(!is_valid_json_string("null"));
}

#[test]
fn valid_json_string_rejects_malformed_documents() {
    assert!(!is_valid_json_string("{bad"));
    assert!(!is_valid_json_string("[1,"));
    assert!(!is_valid_json_string("not json"));
}

/// Context: `[]"` starts with a well-formed array but is not one JSON document.
#[test]
fn is_json_rejects_trailing_quote_after_array() {
    assert!(is_valid_json_string("[]\""));
    assert!(!is_json("[]\""));
}

#[test]
fn is_json_accepts_complete_documents() {
    assert!(is_json("{\"a\": 1}"));
    assert!(is_json("[1, 2, 3]"));
    assert!(!is_json(""));
    assert!(!is_json("1"));
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

#[test]
fn from_json_wraps_arrays_under_default_key() {
    let map = from_json("[1,2,3]", "items").unwrap();
    assert_eq!(Value::Object(map), json!({"items": [1, 2, 3]}));
}

#[test]
fn from_json_returns_objects_directly() {
    let map = from_json("{\"a\":1}", "items").unwrap();
    assert_eq!(Value::Object(map), json!({"a": 1}));
}

#[test]
fn from_json_rejects_scalar_documents() {
    let err = from_json("\"x\"", "items").unwrap_err();
    assert_eq!(err, TextParamError::UnsupportedResponseType("string".to_string()));
    assert_eq!(err.to_string(), "Unsupported response type: string");
}

#[test]
fn from_json_reports_parse_errors() {
    let err = from_json("{\"a\":", "items").unwrap_err();
    assert!(matches!(err, TextParamError::Parse(_)));
}

#[test]
fn json_object_from_string_requires_non_blank_input() {
    let err = get_json_object_from_string("  ").unwrap_err();
    assert_eq!(err, TextParamError::InvalidInput("Json cannot be null or empty".to_string()));
}

#[test]
fn json_object_from_string_requires_object() {
    let err = get_json_object_from_string("[1]").unwrap_err();
    assert!(matches!(err, TextParamError::Parse(_)));
    let map = get_json_object_from_string("{\"k\": \"v\"}").unwrap();
    assert_eq!(map.get("k"), Some(&json!("v")));
}

#[test]
fn to_json_passes_strings_through() {
    assert_eq!(to_json(&json!("plain \"text\"")).unwrap(), "plain \"text\"");
}

#[test]
fn to_json_serializes_non_strings() {
    assert_eq!(to_json(&json!(1.5)).unwrap(), "1.5");
    assert_eq!(to_json(&json!(null)).unwrap(), "null");
    assert_eq!(to_json(&json!({"a": [1, true, null]})).unwrap(), "{\"a\":[1,true,null]}");
}
