//! A line-oriented INI parser.
//!
//! Every non-empty line is parsed on its own and handed to a callback
//! together with the current section. Malformed lines are reported through
//! the callback and mapping continues, leaving it to the caller whether to
//! log, collect or ignore them.
//!
//! ```
//! let input = r#"
//! ## generic things
//! debug = false
//!
//! [example]
//! hostname = "example.com"
//! color
//! "#;
//!
//! let mut lines = Vec::new();
//! ingrid::map(input.as_bytes(), |record| match record.error {
//!     Some(err) => lines.push(format!("input line:{err}")),
//!     None if record.is_key_value() => {
//!         lines.push(format!("{}.{} = {}", record.section, record.key, record.value));
//!     }
//!     None => {}
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     lines,
//!     [
//!         ".debug = false",
//!         "example.hostname = example.com",
//!         "input line:7 color SYNTAX ERROR: missing equal sign",
//!     ]
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collect;
pub mod error;
pub mod mapper;
pub mod parser;
pub mod unquote;

pub use collect::{collect, Collected, Entry};
pub use error::{Error, LineError, Result, SyntaxError};
pub use mapper::{map, try_map, LineMapper, MapSummary, Record};
pub use parser::{parse, ParsedLine};
