//! Ingrid CLI binary.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use ingrid_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the ingrid CLI.
///
/// Exits with status 1 when the input contains syntax errors.
fn main() -> Result<ExitCode> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=ingrid=trace cargo run -- config.ini
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ingrid=warn,ingrid_cli=warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting ingrid CLI");

    let cli = Cli::parse_args();
    let code = cli.execute()?;

    tracing::debug!("Ingrid CLI completed");
    Ok(code)
}
