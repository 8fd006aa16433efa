//! CLI argument parsing and execution.
//!
//! # Example
//!
//! ```bash
//! ingrid config.ini
//! ingrid --json config.ini
//! cat config.ini | ingrid --strict
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ingrid::{Collected, LineMapper, MapSummary};

use crate::output::{self, OutputConfig, OutputMode};

/// Ingrid - a line-oriented INI mapper
///
/// Prints every key/value pair as `section.key = value` and reports malformed
/// lines on standard error. Exits with status 1 if any line is malformed.
#[derive(Parser, Debug)]
#[command(name = "ingrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// INI file to map; reads standard input when omitted or `-`
    pub file: Option<PathBuf>,

    /// Output entries and errors in JSON format
    #[arg(long)]
    pub json: bool,

    /// Stop at the first malformed line
    #[arg(long)]
    pub strict: bool,

    /// Do not report malformed lines on standard error
    #[arg(short, long)]
    pub quiet: bool,

    /// Section for key/value lines before the first header
    #[arg(long, value_name = "NAME")]
    pub section: Option<String>,
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Returns where input is read from, for messages.
    #[must_use]
    pub fn input_name(&self) -> String {
        match self.input_path() {
            Some(path) => path.display().to_string(),
            None => "standard input".to_string(),
        }
    }

    fn input_path(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }

    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    fn open_input(&self) -> Result<Box<dyn BufRead>> {
        match self.input_path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Opening input file");
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }

    /// Maps the input into a [`Collected`].
    ///
    /// # Errors
    ///
    /// Fails if the input cannot be read, or on the first malformed line
    /// when `--strict` is given.
    pub fn collect(&self, reader: impl BufRead) -> Result<Collected> {
        let mut mapper = match &self.section {
            Some(section) => LineMapper::with_section(section.as_str()),
            None => LineMapper::new(),
        };
        let mut collected = Collected::new();

        let summary: MapSummary = if self.strict {
            mapper
                .try_map(reader, |record| {
                    collected.push(record);
                    Ok::<(), anyhow::Error>(())
                })
                .with_context(|| format!("failed to map {}", self.input_name()))?
        } else {
            mapper
                .map(reader, |record| collected.push(record))
                .with_context(|| format!("failed to read {}", self.input_name()))?
        };

        tracing::debug!(
            lines = summary.lines,
            entries = collected.entries().len(),
            errors = summary.errors,
            "Mapped input"
        );
        Ok(collected)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Fails if the input cannot be opened or read, if output cannot be
    /// written, or on the first malformed line when `--strict` is given.
    pub fn execute(&self) -> Result<ExitCode> {
        let reader = self.open_input()?;
        let collected = self.collect(reader)?;

        let mut stdout = io::stdout().lock();
        output::print_collected(&mut stdout, &collected, self.output_mode())
            .context("failed to write output")?;

        // JSON output already carries the errors.
        if !self.quiet && !self.json {
            let config = OutputConfig::from_env();
            output::print_errors(&mut io::stderr().lock(), collected.errors(), &config)
                .context("failed to write errors")?;
        }

        Ok(if collected.is_clean() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
