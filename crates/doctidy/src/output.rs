//! Diagnostic output and exit codes.
//!
//! Both binaries report their work as plain lines on standard output and
//! reserve standard error for the fatal `Error:` trace. Writing through
//! this module keeps piped invocations from crashing mid-line.

use std::io::{self, Write};

/// Print a diagnostic line, handling broken pipes gracefully
pub fn print_line(msg: impl std::fmt::Display) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Silently exit on broken pipe (expected when piping to head, etc.)
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

/// Exit statuses shared by the doctidy binaries
///
/// Usage mistakes and fatal failures both terminate with status 1; only a
/// clean run exits 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run succeeded (0)
    Success = 0,

    /// Usage error or fatal failure (1)
    GenericError = 1,
}

impl ExitCode {
    /// Get the numeric exit code value
    pub fn code(self) -> i32 {
        self as i32
    }
}
