//! Property-based tests for the literal tokenizer and parser.
//!
//! Parsing serialized JSON must recover the original value, and
//! arbitrary input must never panic the tokenizer.

use super::*;
use proptest::prelude::*;

/// Strategy for string content that needs no escaping
fn safe_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9 ./:-]{0,12}").unwrap()
}

/// Strategy for scalar JSON values
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e9..1.0e9f64).prop_map(|f| serde_json::json!(f)),
        safe_text().prop_map(Value::String),
    ]
}

/// Strategy for JSON value trees a few levels deep
fn value_tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(safe_text(), inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_parse_recovers_serialized_values(value in value_tree()) {
        let rendered = serde_json::to_string(&value).unwrap();
        let parsed = parse(&rendered).unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn prop_quote_style_does_not_change_strings(text in safe_text()) {
        let single = parse(&format!("'{}'", text)).unwrap();
        let double = parse(&format!("\"{}\"", text)).unwrap();
        prop_assert_eq!(single, double);
    }

    #[test]
    fn prop_tokenizer_never_panics(input in "\\PC{0,40}") {
        let _ = tokenize(&input);
    }

    #[test]
    fn prop_parse_never_panics(input in "\\PC{0,40}") {
        let _ = parse(&input);
    }
}
