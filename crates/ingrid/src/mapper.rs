//! Mapping of every line of a reader to a callback.
//!
//! [`LineMapper`] reads lines from a [`BufRead`], parses them and hands one
//! [`Record`] per non-empty line to a callback. The mapper owns the current
//! section so that key/value lines are reported under the most recent
//! `[section]` header.
//!
//! Two failure policies are offered:
//!
//! - [`LineMapper::map`] reports syntax errors through [`Record::error`] and
//!   always continues with the next line.
//! - [`LineMapper::try_map`] stops at the first syntax error, or at the first
//!   error returned by the callback, and returns it.

use std::io::BufRead;

use tracing::{debug, trace, warn};

use crate::error::{Error, LineError, Result};
use crate::parser::parse;

/// One mapped line, as handed to the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// The 1-based line number.
    pub line_number: usize,
    /// The current section; empty before the first header.
    pub section: &'a str,
    /// Key of a key/value line, empty otherwise.
    pub key: &'a str,
    /// Unquoted value of a key/value line, empty otherwise.
    pub value: &'a str,
    /// The whole line if it is a comment, empty otherwise.
    pub comment: &'a str,
    /// The syntax error found on this line, if any.
    pub error: Option<LineError>,
}

impl Record<'_> {
    /// Returns `true` if the record carries a key/value pair.
    #[must_use]
    pub fn is_key_value(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Counts gathered while mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapSummary {
    /// Lines read, including empty ones.
    pub lines: usize,
    /// Records handed to the callback.
    pub records: usize,
    /// Lines with a syntax error.
    pub errors: usize,
}

/// Maps lines to a callback while tracking the current section.
///
/// A mapper may be reused; the current section carries over between calls.
///
/// # Examples
///
/// ```
/// use ingrid::LineMapper;
///
/// let input = "debug = false\n[example]\nhostname = \"example.com\"\n";
/// let mut keys = Vec::new();
///
/// let mut mapper = LineMapper::new();
/// mapper
///     .map(input.as_bytes(), |record| {
///         if record.is_key_value() {
///             keys.push(format!("{}.{}={}", record.section, record.key, record.value));
///         }
///     })
///     .unwrap();
///
/// assert_eq!(keys, [".debug=false", "example.hostname=example.com"]);
/// assert_eq!(mapper.current(), "example");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMapper {
    /// The section opened by the most recent header.
    current: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailurePolicy {
    Continue,
    Abort,
}

impl LineMapper {
    /// Creates a mapper with no current section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapper that reports lines before the first header under
    /// `section`.
    #[must_use]
    pub fn with_section(section: impl Into<String>) -> Self {
        Self {
            current: section.into(),
        }
    }

    /// Returns the current section.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Maps every non-empty line of `reader` to `f`.
    ///
    /// Syntax errors are passed to `f` in [`Record::error`] and never stop
    /// the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading from `reader` fails.
    pub fn map<R, F>(&mut self, reader: R, mut f: F) -> Result<MapSummary>
    where
        R: BufRead,
        F: FnMut(Record<'_>),
    {
        self.run(
            reader,
            |record| {
                f(record);
                Ok::<(), Error>(())
            },
            FailurePolicy::Continue,
        )
    }

    /// Maps every non-empty line of `reader` to `f`, stopping at the first
    /// failure.
    ///
    /// A line with a syntax error is not passed to `f`; mapping stops with
    /// [`Error::Syntax`] converted into `E`. An error returned by `f` stops
    /// the mapping and is returned as is.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, the first error of `f`, or
    /// [`Error::Io`] if reading from `reader` fails.
    pub fn try_map<R, F, E>(&mut self, reader: R, f: F) -> std::result::Result<MapSummary, E>
    where
        R: BufRead,
        F: FnMut(Record<'_>) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        self.run(reader, f, FailurePolicy::Abort)
    }

    fn run<R, F, E>(
        &mut self,
        mut reader: R,
        mut f: F,
        policy: FailurePolicy,
    ) -> std::result::Result<MapSummary, E>
    where
        R: BufRead,
        F: FnMut(Record<'_>) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let mut summary = MapSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).map_err(Error::from)? == 0 {
                break;
            }
            summary.lines += 1;

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim();
            if line.is_empty() {
                continue;
            }

            let parsed = parse(line);
            trace!(line_number = summary.lines, line, "Parsed line");

            if let Some(section) = parsed.section {
                if section != self.current {
                    debug!(line_number = summary.lines, section, "Entering section");
                    section.clone_into(&mut self.current);
                }
            }

            let error = parsed
                .error
                .map(|kind| LineError::new(summary.lines, line, kind));
            if let Some(err) = error.as_ref() {
                summary.errors += 1;
                debug!(line_number = summary.lines, error = %err.kind(), "Syntax error");
            }
            if policy == FailurePolicy::Abort {
                if let Some(err) = error {
                    warn!(error = %err, "Aborting mapping on syntax error");
                    return Err(Error::Syntax(err).into());
                }
            }

            f(Record {
                line_number: summary.lines,
                section: &self.current,
                key: parsed.key,
                value: &parsed.value,
                comment: parsed.comment,
                error,
            })?;
            summary.records += 1;
        }

        debug!(
            lines = summary.lines,
            records = summary.records,
            errors = summary.errors,
            "Mapping complete"
        );
        Ok(summary)
    }
}

/// Maps every non-empty line of `reader` to `f` using a fresh [`LineMapper`].
///
/// # Errors
///
/// Returns [`Error::Io`] if reading from `reader` fails.
pub fn map<R, F>(reader: R, f: F) -> Result<MapSummary>
where
    R: BufRead,
    F: FnMut(Record<'_>),
{
    LineMapper::new().map(reader, f)
}

/// Maps lines to `f` using a fresh [`LineMapper`], stopping at the first
/// failure. See [`LineMapper::try_map`].
///
/// # Errors
///
/// Returns the first syntax error, the first error of `f`, or [`Error::Io`]
/// if reading from `reader` fails.
pub fn try_map<R, F, E>(reader: R, f: F) -> std::result::Result<MapSummary, E>
where
    R: BufRead,
    F: FnMut(Record<'_>) -> std::result::Result<(), E>,
    E: From<Error>,
{
    LineMapper::new().try_map(reader, f)
}
