//! Output formatting for the CLI.
//!
//! Entries are printed either as `section.key = value` lines or as one JSON
//! document. Syntax errors are printed as `input line:<error>`, in red when
//! colors are enabled.

use std::env;
use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use ingrid::{Collected, Entry, LineError};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Configuration for error output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `INGRID_COLOR`: Set to "0" or "false" to disable colors (default: true)
    ///
    /// Colors are only used when standard error is a terminal.
    #[must_use]
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("INGRID_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true)
            && io::stderr().is_terminal();

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Formats an entry as `section.key = value`, or `key = value` for the
/// empty section.
#[must_use]
pub fn format_entry(entry: &Entry) -> String {
    format!("{} = {}", entry.qualified_key(), entry.value)
}

/// Formats a syntax error as `input line:<error>`.
#[must_use]
pub fn format_error(err: &LineError, config: &OutputConfig) -> String {
    let text = format!("input line:{err}");
    if config.use_colors {
        text.red().to_string()
    } else {
        text
    }
}

/// Print the collected entries in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_collected<W: Write>(
    w: &mut W,
    collected: &Collected,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Text => {
            for entry in collected.entries() {
                writeln!(w, "{}", format_entry(entry))?;
            }
        }
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, collected).map_err(io::Error::from)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

/// Print syntax errors, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_errors<W: Write>(
    w: &mut W,
    errors: &[LineError],
    config: &OutputConfig,
) -> io::Result<()> {
    for err in errors {
        writeln!(w, "{}", format_error(err, config))?;
    }
    Ok(())
}
