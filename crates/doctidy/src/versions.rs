//! Versions file formatting.
//!
//! Versions files arrive with bare `key=` assignments inside an
//! otherwise JSON-like structure. Formatting requotes those keys and
//! parses the result as a structured literal, then writes the value
//! back as compact JSON after reporting it on stdout.

use crate::literal;
use crate::output;
use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex for bare assignment keys: a word directly followed by `=`.
fn key_regex() -> &'static Regex {
    KEY_REGEX.get_or_init(|| Regex::new(r"(\w+)=").expect("Key regex should compile"))
}

/// Rewrite every `key=` occurrence to `"key":`.
///
/// The substitution is textual and does not track string boundaries,
/// so a word followed by `=` inside a quoted value is rewritten too.
/// Such content then fails to parse.
pub fn requote_keys(text: &str) -> String {
    key_regex().replace_all(text, "\"${1}\":").to_string()
}

/// Requote and parse versions content into a structured value.
pub fn reformat(content: &str) -> Result<Value, literal::ParseError> {
    literal::parse(&requote_keys(content))
}

/// Format a versions file in place.
///
/// The parsed value is printed as `format <path>: <value>` before the
/// file is overwritten with its compact JSON serialization.
pub fn format_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value = reformat(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    output::print_line(format!("format {}: {}", path.display(), value))?;

    fs::write(path, serde_json::to_string(&value)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for bare assignment keys
    fn bare_key() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z][a-z0-9_]{0,7}").unwrap()
    }

    /// Strategy for quoted values free of `=`, quotes, and backslashes
    fn quoted_text() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z0-9 .-]{0,10}").unwrap()
    }

    /// Render entries as a bare-key versions mapping
    fn render(entries: &std::collections::BTreeMap<String, String>) -> String {
        let body: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", key, value))
            .collect();
        format!("{{{}}}", body.join(", "))
    }

    proptest! {
        #[test]
        fn prop_bare_key_mappings_round_trip(
            entries in prop::collection::btree_map(bare_key(), quoted_text(), 1..5),
        ) {
            let value = reformat(&render(&entries)).unwrap();
            let expected = Value::Object(
                entries
                    .into_iter()
                    .map(|(key, text)| (key, Value::String(text)))
                    .collect(),
            );
            prop_assert_eq!(value, expected);
        }

        #[test]
        fn prop_trailing_comma_does_not_change_the_value(
            entries in prop::collection::btree_map(bare_key(), quoted_text(), 1..5),
        ) {
            let rendered = render(&entries);
            let with_comma = format!("{},}}", &rendered[..rendered.len() - 1]);
            prop_assert_eq!(reformat(&rendered).unwrap(), reformat(&with_comma).unwrap());
        }

        #[test]
        fn prop_reformat_never_panics(input in "\\PC{0,40}") {
            let _ = reformat(&input);
        }
    }
}
