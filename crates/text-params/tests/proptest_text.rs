//! Text parameter property-based tests.
//!
//! ## Purpose
//! These tests fuzz JSON text, templates, and `JSONPath` expressions to ensure
//! the helpers never panic and keep their documented invariants.
//!
//! ## What is covered
//! - Escaped text documents decode back to the original when re-quoted.
//! - Escape helper injection is idempotent for arbitrary templates.
//! - Full-document JSON checks imply the lenient leading-value check.
//! - toString() references are collected and expanded for generated names.
//!
//! ## What is intentionally out of scope
//! - Schema validation semantics (covered by `schema_validation.rs`).
// crates/text-params/tests/proptest_text.rs
// ============================================================================
// Module: Text Params Property-Based Tests
// Description: Fuzz-like checks for escaping, detection, and expansion helpers.
// Purpose: Ensure helpers hold their invariants without panics on adversarial inputs.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use text_params::ParameterMap;
use text_params::add_default_method;
use text_params::collect_to_string_prefixes;
use text_params::from_json;
use text_params::is_json;
use text_params::is_valid_json_path;
use text_params::is_valid_json_string;
use text_params::parse_parameters;
use text_params::process_text_doc;

proptest! {
    #[test]
    fn processed_text_decodes_to_original(doc in any::<String>()) {
        let escaped = process_text_doc(&doc).unwrap();
        let decoded: String = serde_json::from_str(&format!("\"{escaped}\"")).unwrap();
        prop_assert_eq!(decoded, doc);
    }

    #[test]
    fn add_default_method_is_idempotent(template in ".{0,64}") {
        let once = add_default_method(&template);
        prop_assert_eq!(add_default_method(&once), once);
    }

    #[test]
    fn add_default_method_preserves_template_suffix(
        prefix in "[a-z ]{0,16}",
        arg in "[a-z]{1,8}",
    ) {
        let template = format!("{prefix} = escape({arg});");
        let script = add_default_method(&template);
        prop_assert!(script.ends_with(&template));
    }

    #[test]
    fn full_json_check_implies_leading_value_check(text in ".{0,64}") {
        if is_json(&text) {
            prop_assert!(is_valid_json_string(&text));
            prop_assert!(from_json(&text, "items").is_ok());
        }
    }

    #[test]
    fn json_path_validation_handles_random_input(path in ".{0,64}") {
        let _ = is_valid_json_path(&path);
    }

    #[test]
    fn to_string_references_expand_present_names(name in "[a-z]{1,8}", value in ".{0,32}") {
        let mut params = ParameterMap::new();
        params.insert("prompt_template".to_string(), format!("${{parameters.{name}.toString()}}"));
        params.insert(name.clone(), value.clone());
        prop_assert_eq!(collect_to_string_prefixes(&params), vec![name.clone()]);
        let parsed = parse_parameters(&params).unwrap();
        let derived = parsed.get(&format!("{name}.toString()")).cloned();
        prop_assert_eq!(derived, Some(process_text_doc(&value).unwrap()));
    }
}
