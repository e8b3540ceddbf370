//! Clean relative links in a documentation tree.
//!
//! Strips `.md`/`.mdx` extensions from local link targets in every
//! Markdown and MDX file under the given root, printing one
//! `convert X to Y` line per rewritten link.

use anyhow::Result;
use doctidy::cli::{parse_or_usage_exit, CleanLinksCli};
use doctidy::links;
use doctidy::output::ExitCode;

fn main() {
    let cli = parse_or_usage_exit::<CleanLinksCli>();

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::GenericError
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run(cli: &CleanLinksCli) -> Result<()> {
    links::rewrite_tree(&cli.path)?;
    Ok(())
}
