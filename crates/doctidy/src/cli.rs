//! Command-line interface definitions using clap.

use crate::output::ExitCode;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Clean relative links in a documentation tree
///
/// Strips `.md`/`.mdx` extensions from local link targets in every
/// Markdown and MDX file under the root, printing one `convert X to Y`
/// line per rewritten link.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error or usage error
#[derive(Parser, Debug)]
#[command(name = "clean-links")]
#[command(version, about = "Strip Markdown extensions from local links", long_about = None)]
pub struct CleanLinksCli {
    /// Root of the documentation tree
    pub path: PathBuf,
}

/// Format documentation sources
///
/// In `markdown` mode, cleans relative links under the given root the
/// same way `clean-links` does. In `json` mode, reformats a versions
/// file as strict JSON. Any other mode succeeds without doing
/// anything.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error or usage error
#[derive(Parser, Debug)]
#[command(name = "format-docs")]
#[command(version, about = "Format documentation sources", long_about = None)]
pub struct FormatDocsCli {
    /// What to format: markdown or json
    pub mode: String,

    /// Directory root (markdown) or versions file (json)
    pub path: PathBuf,
}

/// Parse arguments, exiting silently with status 1 on wrong usage.
///
/// Help and version requests keep clap's standard output and exit
/// status; every other parse failure prints nothing.
pub fn parse_or_usage_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => std::process::exit(ExitCode::GenericError.code()),
        },
    }
}
