//! Documentation Maintenance Toolkit
//!
//! Shared logic behind the `clean-links` and `format-docs` binaries:
//! rewriting relative links in Markdown/MDX trees and normalizing
//! versions files to strict JSON.

pub mod cli;
pub mod links;
pub mod literal;
pub mod output;
pub mod versions;

// Re-export commonly used types
pub use links::{rewrite_content, rewrite_file, rewrite_tree, LinkRewrite};
pub use literal::ParseError;
pub use output::ExitCode;
pub use versions::format_file;
