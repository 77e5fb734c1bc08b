// crates/text-params/src/script.rs
// ============================================================================
// Module: Script Escape Helper
// Description: Detection and injection of the `escape` helper in script templates.
// Purpose: Let templates call `escape(...)` without declaring it themselves.
// Dependencies: regex, tracing
// ============================================================================

//! ## Overview
//! Script templates may call an `escape(...)` helper that sanitizes values
//! before they are spliced into JSON. When a template uses the helper without
//! declaring it, [`add_default_method`] prepends [`DEFAULT_ESCAPE_FUNCTION`].
//! A template that declares its own helper is never modified.
//!
//! A *use* is any `escape(` call that is not directly preceded by a `String`
//! return-type token. A *declaration* has the header shape
//! `String escape(def|String <param>)` optionally followed by `{`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::TextParamError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default `escape` helper prepended to templates that use but do not declare it.
///
/// Escapes backslash, double quote, carriage return, tab, newline, backspace,
/// and form feed, in that order. Control characters appear as literal characters
/// inside script char literals.
///
/// The tab branch matches a real tab character and rewrites it to `\\t`; the
/// two-character sequence backslash-`t` is left alone, so scripts that relied on
/// that sequence being rewritten see different output.
pub const DEFAULT_ESCAPE_FUNCTION: &str = concat!(
    "\n    String escape(def input) { \n",
    "      if (input.contains(\"\\\\\")) {\n",
    "        input = input.replace(\"\\\\\", \"\\\\\\\\\");\n",
    "      }\n",
    "      if (input.contains(\"\\\"\")) {\n",
    "        input = input.replace(\"\\\"\", \"\\\\\\\"\");\n",
    "      }\n",
    "      if (input.contains('\r')) {\n",
    "        input = input.replace('\r', '\\\\r');\n",
    "      }\n",
    "      if (input.contains('\t')) {\n",
    "        input = input.replace('\t', '\\\\t');\n",
    "      }\n",
    "      if (input.contains('\n')) {\n",
    "        input = input.replace('\n', '\\\\n');\n",
    "      }\n",
    "      if (input.contains('\u{8}')) {\n",
    "        input = input.replace('\u{8}', '\\\\b');\n",
    "      }\n",
    "      if (input.contains('\u{c}')) {\n",
    "        input = input.replace('\u{c}', '\\\\f');\n",
    "      }\n",
    "      return input;\n",
    "    }\n",
);

/// Matches a call-like occurrence of `escape(`.
const ESCAPE_CALL_PATTERN: &str = r"\bescape\s*\(";
/// Matches a `String` type token ending right before a call site.
const STRING_TYPE_SUFFIX_PATTERN: &str = r"\bString\s+$";
/// Matches an `escape` declaration header.
const ESCAPE_DECLARATION_PATTERN: &str = r"String\s+escape\s*\(\s*(def|String)\s+.*?\)\s*\{?";

/// Compiled [`ESCAPE_CALL_PATTERN`].
static ESCAPE_CALL: OnceLock<Regex> = OnceLock::new();
/// Compiled [`STRING_TYPE_SUFFIX_PATTERN`].
static STRING_TYPE_SUFFIX: OnceLock<Regex> = OnceLock::new();
/// Compiled [`ESCAPE_DECLARATION_PATTERN`].
static ESCAPE_DECLARATION: OnceLock<Regex> = OnceLock::new();

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Returns true when `template` calls `escape(...)` outside of a declaration.
#[must_use]
pub fn is_escape_used(template: &str) -> bool {
    find_escape_use(template).unwrap_or(false)
}

/// Returns true when `template` already declares an `escape` helper.
#[must_use]
pub fn contains_escape_method(template: &str) -> bool {
    cached_regex(&ESCAPE_DECLARATION, ESCAPE_DECLARATION_PATTERN)
        .is_ok_and(|declaration| declaration.is_match(template))
}

/// Returns true when the regular expression `pattern` matches anywhere in `input`.
///
/// # Errors
///
/// Returns [`TextParamError::InvalidInput`] when `pattern` does not compile.
pub fn pattern_exist(input: &str, pattern: &str) -> Result<bool, TextParamError> {
    let regex = Regex::new(pattern)
        .map_err(|err| TextParamError::InvalidInput(format!("invalid pattern: {err}")))?;
    Ok(regex.is_match(input))
}

// ============================================================================
// SECTION: Injection
// ============================================================================

/// Prepends [`DEFAULT_ESCAPE_FUNCTION`] when `template` uses but does not declare `escape`.
///
/// Idempotent: the injected helper is itself a declaration, so a second call
/// returns its input unchanged.
#[must_use]
pub fn add_default_method(template: &str) -> String {
    if !contains_escape_method(template) && is_escape_used(template) {
        debug!(template_bytes = template.len(), "injecting default escape helper");
        let mut script = String::with_capacity(DEFAULT_ESCAPE_FUNCTION.len() + template.len());
        script.push_str(DEFAULT_ESCAPE_FUNCTION);
        script.push_str(template);
        return script;
    }
    template.to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Scans `input` for an `escape(` call not preceded by a `String` type token.
fn find_escape_use(input: &str) -> Result<bool, TextParamError> {
    let call = cached_regex(&ESCAPE_CALL, ESCAPE_CALL_PATTERN)?;
    let type_suffix = cached_regex(&STRING_TYPE_SUFFIX, STRING_TYPE_SUFFIX_PATTERN)?;
    Ok(call.find_iter(input).any(|found| !type_suffix.is_match(&input[..found.start()])))
}

/// Returns the compiled regex stored in `cell`, compiling `pattern` on first use.
pub(crate) fn cached_regex(
    cell: &'static OnceLock<Regex>,
    pattern: &str,
) -> Result<&'static Regex, TextParamError> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }
    let regex = Regex::new(pattern)
        .map_err(|err| TextParamError::InvalidInput(format!("invalid pattern: {err}")))?;
    let _ = cell.set(regex);
    cell.get().ok_or_else(|| TextParamError::InvalidInput("pattern cache unavailable".to_string()))
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

    use super::*;

    #[test]
    fn builtin_patterns_compile() {
        assert!(cached_regex(&ESCAPE_CALL, ESCAPE_CALL_PATTERN).is_ok());
        assert!(cached_regex(&STRING_TYPE_SUFFIX, STRING_TYPE_SUFFIX_PATTERN).is_ok());
        assert!(cached_regex(&ESCAPE_DECLARATION, ESCAPE_DECLARATION_PATTERN).is_ok());
    }

    #[test]
    fn default_helper_is_a_declaration() {
        assert!(contains_escape_method(DEFAULT_ESCAPE_FUNCTION));
        assert!(!is_escape_used(DEFAULT_ESCAPE_FUNCTION));
    }

    #[test]
    fn default_helper_escapes_in_order() {
        let backslash = DEFAULT_ESCAPE_FUNCTION.find("input.contains(\"\\\\\")").unwrap();
        let quote = DEFAULT_ESCAPE_FUNCTION.find("input.contains(\"\\\"\")").unwrap();
        let carriage = DEFAULT_ESCAPE_FUNCTION.find("input.contains('\r')").unwrap();
        let form_feed = DEFAULT_ESCAPE_FUNCTION.find("input.contains('\u{c}')").unwrap();
        assert!(backslash < quote);
        assert!(quote < carriage);
        assert!(carriage < form_feed);
    }

    #[test]
    fn default_helper_matches_real_tab_character() {
        assert!(DEFAULT_ESCAPE_FUNCTION.contains("input.contains('\t')"));
        assert!(DEFAULT_ESCAPE_FUNCTION.contains("input.replace('\t', '\\\\t')"));
        assert!(!DEFAULT_ESCAPE_FUNCTION.contains("input.contains(\"\\\\t\")"));
        assert!(!DEFAULT_ESCAPE_FUNCTION.contains("input.contains('\\t')"));
    }

    #[test]
    fn declaration_prefix_ignores_extra_whitespace() {
        assert!(!find_escape_use("String   escape(def x) {}").unwrap());
        assert!(find_escape_use("Stringy escape(x)").unwrap());
    }
}
