//! Parsing of a single line.
//!
//! A line is one of a section header (`[name]`), a whole-line comment
//! (starting with `#` or `;`) or a key/value pair (`key = value`). The parser
//! does not know the current section; it reports a new section name only when
//! the line is a header, and [`ParsedLine::section_or`] resolves it against
//! the section that was active before the line.

use std::borrow::Cow;

use crate::error::SyntaxError;
use crate::unquote::{unquote, unquote_raw};

/// The parts found on one line.
///
/// At most one of [`section`](Self::section), [`comment`](Self::comment) or a
/// key/value pair is set. [`error`](Self::error) may accompany partially
/// extracted parts, e.g. a key containing a space still yields its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Name of the section this line opens, if it is a header.
    pub section: Option<&'a str>,
    /// Key of a key/value line, trimmed.
    pub key: &'a str,
    /// Value of a key/value line, trimmed and unquoted.
    pub value: Cow<'a, str>,
    /// The whole line when it is a comment.
    pub comment: &'a str,
    /// What was wrong with the line, if anything.
    pub error: Option<SyntaxError>,
}

impl<'a> ParsedLine<'a> {
    /// Returns the section this line opens, or `current` if it opens none.
    #[must_use]
    pub fn section_or<'b>(&self, current: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.section.unwrap_or(current)
    }

    /// Returns `true` if the line is a key/value pair.
    #[must_use]
    pub fn is_key_value(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Positions of the first `[`, `]`, `=` and comment marker.
///
/// Scanning stops at the comment marker, so brackets and equal signs inside a
/// comment are never recorded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Markers {
    lbrack: Option<usize>,
    rbrack: Option<usize>,
    equal: Option<usize>,
    comment: Option<usize>,
}

impl Markers {
    fn scan(line: &str) -> Self {
        let mut markers = Self::default();
        for (i, b) in line.bytes().enumerate() {
            let slot = match b {
                b'#' | b';' => {
                    markers.comment = Some(i);
                    break;
                }
                b'[' => &mut markers.lbrack,
                b']' => &mut markers.rbrack,
                b'=' => &mut markers.equal,
                _ => continue,
            };
            slot.get_or_insert(i);
        }
        markers
    }
}

/// Parses one line.
///
/// Surrounding whitespace is ignored. An empty line parses to an empty
/// [`ParsedLine`] reporting [`SyntaxError::MissingEqualSign`]; the mapper
/// never passes empty lines here.
///
/// # Examples
///
/// ```
/// use ingrid::parser::parse;
///
/// let parsed = parse(r#"hostname = "example.com""#);
/// assert_eq!(parsed.key, "hostname");
/// assert_eq!(parsed.value, "example.com");
///
/// let header = parse("[ example ]");
/// assert_eq!(header.section, Some("example"));
/// ```
#[must_use]
pub fn parse(line: &str) -> ParsedLine<'_> {
    let line = line.trim();
    let markers = Markers::scan(line);
    let mut parsed = ParsedLine::default();

    if markers.lbrack == Some(0) {
        parse_section(&mut parsed, line, markers);
    } else if markers.comment == Some(0) {
        parsed.comment = line;
    } else {
        parse_key_value(&mut parsed, line, markers);
    }

    parsed
}

fn parse_section<'a>(parsed: &mut ParsedLine<'a>, line: &'a str, markers: Markers) {
    let Some(rbrack) = markers.rbrack else {
        parsed.error = Some(SyntaxError::MissingRightBracket);
        return;
    };
    let name = line[1..rbrack].trim();
    if !name.is_empty() {
        parsed.section = Some(name);
    }
}

fn parse_key_value<'a>(parsed: &mut ParsedLine<'a>, line: &'a str, markers: Markers) {
    let Some(equal) = markers.equal else {
        parsed.error = Some(SyntaxError::MissingEqualSign);
        return;
    };

    parsed.key = line[..equal].trim();
    if parsed.key.contains(' ') {
        parsed.error = Some(SyntaxError::SpaceInKey);
    }

    let value = line[equal + 1..].trim();
    if !is_quoted(value) {
        parsed.value = Cow::Borrowed(value);
        return;
    }
    match unquote_value(value) {
        Some(unquoted) => parsed.value = unquoted,
        None => parsed.error = Some(SyntaxError::MissingEndQuote),
    }
}

fn is_quoted(value: &str) -> bool {
    value.starts_with(['"', '\'', '`'])
}

/// Unquotes a value. `'...'` is read like a backtick quoted value, so
/// double quotes and backslashes inside single ticks are kept as written.
fn unquote_value(value: &str) -> Option<Cow<'_, str>> {
    let single_ticked = value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''));
    match single_ticked {
        Some(body) => unquote_raw(body).ok(),
        None => unquote(value).ok(),
    }
}
