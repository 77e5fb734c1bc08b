// crates/text-params/src/lib.rs
// ============================================================================
// Module: Text Params
// Description: String and JSON utilities for parameter and template handling.
// Purpose: Normalize loosely-typed external input into validated forms.
// Dependencies: serde_json, jsonschema, jsonpath_lib, regex, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! This crate bridges loosely-typed external input (JSON payloads, script
//! templates, `JSONPath` expressions) into validated, normalized values. Every
//! operation is a stateless transformation over its arguments; the only stateful
//! surface is [`TextParameterProcessor`], which binds a [`ProcessorConfig`] to
//! the free functions.
//! Invariants:
//! - No function mutates caller-owned data; derived maps are returned as new values.
//! - Value-producing functions fail with [`TextParamError`]; predicates return `bool`.
//!
//! Security posture: all inputs are untrusted and are size-checked by the
//! processor before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod json;
pub mod jsonpath;
pub mod params;
pub mod processor;
pub mod schema;
pub mod script;
pub mod text;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ProcessorConfig;
pub use error::TextParamError;
pub use json::from_json;
pub use json::get_json_object_from_string;
pub use json::is_json;
pub use json::is_valid_json_string;
pub use json::to_json;
pub use json::to_utf8;
pub use jsonpath::compile_json_path;
pub use jsonpath::get_json_path;
pub use jsonpath::is_valid_json_path;
pub use jsonpath::obtain_field_name_from_json_path;
pub use jsonpath::select_json_path;
pub use params::ParameterMap;
pub use params::TO_STRING_FUNCTION_NAME;
pub use params::collect_to_string_prefixes;
pub use params::convert_script_string_to_json_string;
pub use params::filtered_parameter_map;
pub use params::get_parameter_map;
pub use params::parse_parameters;
pub use processor::TextParameterProcessor;
pub use processor::get_error_message;
pub use schema::validate_schema;
pub use script::DEFAULT_ESCAPE_FUNCTION;
pub use script::add_default_method;
pub use script::contains_escape_method;
pub use script::is_escape_used;
pub use script::pattern_exist;
pub use text::process_optional_text_doc;
pub use text::process_text_doc;
pub use text::process_text_docs;
