//! Collecting mapped lines into entries and errors.
//!
//! [`Collected`] is a ready-made callback target for
//! [`LineMapper::map`](crate::LineMapper::map): it keeps every key/value pair
//! in input order together with the syntax errors reported along the way, so
//! callers that only want the result of a whole file do not need to write
//! their own callback.
//!
//! # Examples
//!
//! ```
//! use ingrid::collect;
//!
//! let input = "debug = false\n[example]\nhostname = \"example.com\"\ncolor\n";
//! let collected = collect(input.as_bytes()).unwrap();
//!
//! assert_eq!(collected.get("", "debug"), Some("false"));
//! assert_eq!(collected.get("example", "hostname"), Some("example.com"));
//! assert_eq!(collected.errors().len(), 1);
//! ```

use std::io::BufRead;

use serde::Serialize;

use crate::error::{LineError, Result};
use crate::mapper::{LineMapper, Record};

/// A key/value pair and the section it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// The section the pair belongs to; empty before the first header.
    pub section: String,
    /// The key.
    pub key: String,
    /// The unquoted value.
    pub value: String,
}

impl Entry {
    /// Returns `section.key`, or just `key` for the empty section.
    #[must_use]
    pub fn qualified_key(&self) -> String {
        if self.section.is_empty() {
            self.key.clone()
        } else {
            format!("{}.{}", self.section, self.key)
        }
    }
}

/// Entries and syntax errors gathered from one or more mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collected {
    entries: Vec<Entry>,
    errors: Vec<LineError>,
}

impl Collected {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapped record.
    ///
    /// Records with an error go to [`errors`](Self::errors), even when part
    /// of the line was extracted. Records without a key, i.e. headers and
    /// comments, are ignored.
    pub fn push(&mut self, record: Record<'_>) {
        if let Some(err) = record.error {
            self.errors.push(err);
            return;
        }
        if record.is_key_value() {
            self.entries.push(Entry {
                section: record.section.to_string(),
                key: record.key.to_string(),
                value: record.value.to_string(),
            });
        }
    }

    /// Returns all entries in input order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns all syntax errors in input order.
    #[must_use]
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    /// Returns `true` if no syntax error was collected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the value of `key` in `section`.
    ///
    /// If the key is assigned more than once, the last assignment wins.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.section == section && entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Returns the sections that hold entries, in order of first appearance.
    #[must_use]
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !sections.contains(&entry.section.as_str()) {
                sections.push(&entry.section);
            }
        }
        sections
    }

    /// Consumes the collection, returning its entries and errors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Entry>, Vec<LineError>) {
        (self.entries, self.errors)
    }
}

impl<'a> Extend<Record<'a>> for Collected {
    fn extend<I: IntoIterator<Item = Record<'a>>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}

/// Maps all lines of `reader` into a [`Collected`].
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if reading from `reader` fails.
/// Syntax errors are collected, not returned.
pub fn collect<R: BufRead>(reader: R) -> Result<Collected> {
    let mut collected = Collected::new();
    LineMapper::new().map(reader, |record| collected.push(record))?;
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxError;

    fn record<'a>(section: &'a str, key: &'a str, value: &'a str) -> Record<'a> {
        Record {
            line_number: 1,
            section,
            key,
            value,
            comment: "",
            error: None,
        }
    }

    mod entry_tests {
        use super::*;

        #[test]
        fn qualified_key_without_section() {
            let entry = Entry {
                section: String::new(),
                key: "debug".to_string(),
                value: "false".to_string(),
            };
            assert_eq!(entry.qualified_key(), "debug");
        }

        #[test]
        fn qualified_key_with_section() {
            let entry = Entry {
                section: "example".to_string(),
                key: "hostname".to_string(),
                value: "example.com".to_string(),
            };
            assert_eq!(entry.qualified_key(), "example.hostname");
        }
    }

    mod collected_tests {
        use super::*;

        #[test]
        fn new_is_empty_and_clean() {
            let collected = Collected::new();
            assert!(collected.entries().is_empty());
            assert!(collected.is_clean());
        }

        #[test]
        fn push_ignores_headers_and_comments() {
            let mut collected = Collected::new();
            collected.push(record("example", "", ""));
            collected.push(Record {
                comment: "# note",
                ..record("example", "", "")
            });
            assert!(collected.entries().is_empty());
        }

        #[test]
        fn push_routes_errors() {
            let mut collected = Collected::new();
            collected.push(Record {
                error: Some(LineError::new(7, "my name = john", SyntaxError::SpaceInKey)),
                ..record("", "my name", "john")
            });

            assert!(collected.entries().is_empty());
            assert!(!collected.is_clean());
            assert_eq!(collected.errors()[0].line_number(), 7);
        }

        #[test]
        fn get_returns_last_assignment() {
            let mut collected = Collected::new();
            collected.extend([
                record("s", "k", "first"),
                record("other", "k", "elsewhere"),
                record("s", "k", "second"),
            ]);

            assert_eq!(collected.get("s", "k"), Some("second"));
            assert_eq!(collected.get("other", "k"), Some("elsewhere"));
            assert_eq!(collected.get("s", "missing"), None);
            assert_eq!(collected.get("missing", "k"), None);
        }

        #[test]
        fn sections_in_order_of_first_appearance() {
            let mut collected = Collected::new();
            collected.extend([
                record("", "debug", "false"),
                record("b", "x", "1"),
                record("a", "y", "2"),
                record("b", "z", "3"),
            ]);

            assert_eq!(collected.sections(), ["", "b", "a"]);
        }

        #[test]
        fn into_parts_preserves_order() {
            let mut collected = Collected::new();
            collected.extend([record("", "a", "1"), record("", "b", "2")]);

            let (entries, errors) = collected.into_parts();
            let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
            assert_eq!(keys, ["a", "b"]);
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn collect_maps_whole_input() {
        let input = "# comment\nname = ingrid\n[server]\nport = 80\n[broken\n";
        let collected = collect(input.as_bytes()).expect("reading a slice should not fail");

        assert_eq!(collected.entries().len(), 2);
        assert_eq!(collected.get("", "name"), Some("ingrid"));
        assert_eq!(collected.get("server", "port"), Some("80"));
        assert_eq!(
            collected.errors()[0].kind(),
            SyntaxError::MissingRightBracket
        );
    }

    #[test]
    fn serializes_to_json() {
        let collected = collect("[s]\nk = v\ncolor\n".as_bytes()).expect("mapping should succeed");
        let json = serde_json::to_value(&collected).expect("collection should serialize");

        assert_eq!(json["entries"][0]["section"], "s");
        assert_eq!(json["entries"][0]["key"], "k");
        assert_eq!(json["entries"][0]["value"], "v");
        assert_eq!(json["errors"][0]["line_number"], 3);
        assert_eq!(json["errors"][0]["kind"], "missing_equal_sign");
    }
}
