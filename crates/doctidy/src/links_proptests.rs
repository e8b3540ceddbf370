//! Property-based tests for link rewriting.
//!
//! Targets are generated as extension-free stems plus a known suffix,
//! which mirrors real documentation paths and keeps the properties
//! exact: stripping a suffix from such a target cannot leave another
//! Markdown extension behind.

use super::*;
use proptest::prelude::*;

/// Strategy for link labels without Markdown metacharacters
fn label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 ]{0,12}").unwrap()
}

/// Strategy for dot-free path stems
fn stem() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9/-]{1,12}").unwrap()
}

/// Strategy for the extension part of a target
fn suffix() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(".md"), Just(".mdx"), Just(".html"), Just("")]
}

/// Render links into a document with filler text between them
fn document(links: &[(String, String, &str)]) -> String {
    let rendered: Vec<String> = links
        .iter()
        .map(|(label, stem, suffix)| format!("[{}](./{}{})", label, stem, suffix))
        .collect();
    rendered.join(" and ")
}

proptest! {
    #[test]
    fn prop_rewrite_is_idempotent(links in prop::collection::vec((label(), stem(), suffix()), 1..5)) {
        let content = document(&links);
        let (once, _) = rewrite_content(&content);
        let (twice, rewrites) = rewrite_content(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(rewrites.is_empty());
    }

    #[test]
    fn prop_external_links_are_untouched(label in label(), stem in stem(), suffix in suffix()) {
        let content = format!("[{}](https://example.com/{}{})", label, stem, suffix);
        let (result, rewrites) = rewrite_content(&content);
        prop_assert_eq!(result, content);
        prop_assert!(rewrites.is_empty());
    }

    #[test]
    fn prop_local_markdown_targets_lose_their_extension(
        label in label(),
        stem in stem(),
        suffix in prop_oneof![Just(".md"), Just(".mdx")],
    ) {
        let content = format!("[{}](./{}{})", label, stem, suffix);
        let (result, rewrites) = rewrite_content(&content);
        prop_assert_eq!(result, format!("[{}](./{})", label, stem));
        prop_assert_eq!(rewrites.len(), 1);
        prop_assert!(!rewrites[0].to.contains(".md"));
    }

    #[test]
    fn prop_content_without_links_is_unchanged(text in "[A-Za-z0-9 .\n]{0,60}") {
        let (result, rewrites) = rewrite_content(&text);
        prop_assert_eq!(result, text);
        prop_assert!(rewrites.is_empty());
    }
}
