//! Format documentation sources.
//!
//! `markdown` mode cleans relative links under a root the same way
//! `clean-links` does; `json` mode reformats a versions file as
//! strict JSON.

use anyhow::Result;
use doctidy::cli::{parse_or_usage_exit, FormatDocsCli};
use doctidy::output::ExitCode;
use doctidy::{links, versions};

fn main() {
    let cli = parse_or_usage_exit::<FormatDocsCli>();

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

fn run(cli: &FormatDocsCli) -> Result<()> {
    match cli.mode.as_str() {
        "markdown" => {
            links::rewrite_tree(&cli.path)?;
        }
        "json" => {
            versions::format_file(&cli.path)?;
        }
        // Unrecognized modes match nothing and succeed without output
        _ => {}
    }
    Ok(())
}
