//! Relative link cleanup for Markdown and MDX trees.
//!
//! Site routers serve `docs/guide.md` at `docs/guide`, so committed
//! links should not carry the source extension. This module strips
//! `.md`/`.mdx` from local link targets across a documentation tree
//! and reports each rewrite as a `convert X to Y` line.

use crate::output;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use walkdir::WalkDir;

static LINK_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex for inline links: `[label](target)`.
///
/// Both groups are lazy, and `.` does not cross newlines, so a link
/// split over two lines is left alone.
fn link_regex() -> &'static Regex {
    LINK_REGEX.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("Link regex should compile"))
}

/// One applied link rewrite, from matched text to replacement text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub from: String,
    pub to: String,
}

/// Whether a link target should have its extension stripped.
///
/// External links are recognized by the `http` prefix, which covers
/// `https` as well. Everything else qualifies as long as the target
/// mentions a Markdown extension anywhere, so anchors and query
/// strings after the extension still count.
fn is_rewritable(target: &str) -> bool {
    !target.starts_with("http") && (target.contains(".md") || target.contains(".mdx"))
}

/// Remove Markdown extensions from a link target.
///
/// `.mdx` goes first so an MDX extension disappears entirely instead
/// of leaving a trailing `x`.
fn strip_extensions(target: &str) -> String {
    target.replace(".mdx", "").replace(".md", "")
}

/// Rewrite every qualifying link in `content`.
///
/// Matches are collected from the original text, and each one is
/// replaced everywhere it occurs, so identical links are rewritten
/// together while still producing one record per occurrence.
pub fn rewrite_content(content: &str) -> (String, Vec<LinkRewrite>) {
    let mut result = content.to_string();
    let mut rewrites = Vec::new();

    for caps in link_regex().captures_iter(content) {
        let matched = &caps[0];
        let label = &caps[1];
        let target = &caps[2];

        if !is_rewritable(target) {
            continue;
        }

        let replacement = format!("[{}]({})", label, strip_extensions(target));
        result = result.replace(matched, &replacement);
        rewrites.push(LinkRewrite {
            from: matched.to_string(),
            to: replacement,
        });
    }

    (result, rewrites)
}

/// Whether a file name marks a Markdown source file.
///
/// The comparison is case sensitive and keyed on the name's ending,
/// so `README.MD` and `notes.markdown` are both passed over.
fn is_markdown_name(name: &str) -> bool {
    name.ends_with(".md") || name.ends_with(".mdx")
}

/// Rewrite links in a single file, reporting each rewrite on stdout.
///
/// The file is written back even when nothing changed.
pub fn rewrite_file(path: &Path) -> Result<Vec<LinkRewrite>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (rewritten, rewrites) = rewrite_content(&content);

    for rewrite in &rewrites {
        output::print_line(format!("convert {} to {}", rewrite.from, rewrite.to))?;
    }

    fs::write(path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(rewrites)
}

/// Rewrite links in every Markdown file under `root`.
///
/// Traversal is depth first with siblings in file-name order, so
/// diagnostics come out in a stable order across runs.
pub fn rewrite_tree(root: &Path) -> Result<Vec<LinkRewrite>> {
    let mut rewrites = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_markdown_name(&name) {
            continue;
        }
        rewrites.extend(rewrite_file(entry.path())?);
    }

    Ok(rewrites)
}


// Include property-based tests
#[cfg(test)]
#[path = "links_proptests.rs"]
mod proptests;
