//! Unquoting of quoted values.
//!
//! Three quote styles are understood, following the usual string literal
//! conventions:
//!
//! - `` `raw` `` keeps its contents verbatim (carriage returns are dropped).
//! - `"escaped"` interprets backslash escapes such as `\"`, `\n`, `\x41`,
//!   `\101`, `\u00e9` and `\U0001F600`.
//! - `'c'` is a single character, possibly escaped.
//!
//! # Examples
//!
//! ```
//! use ingrid::unquote::unquote;
//!
//! assert_eq!(unquote(r#""escaped \"""#).unwrap(), "escaped \"");
//! assert_eq!(unquote(r"`C:\raw`").unwrap(), r"C:\raw");
//! assert!(unquote(r#""unterminated"#).is_err());
//! ```

use std::borrow::Cow;
use std::str::Chars;
use thiserror::Error;

/// The reason a value could not be unquoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnquoteError {
    /// The value does not start with a quote character.
    #[error("value is not quoted")]
    NotQuoted,

    /// The value does not end with the quote it starts with.
    #[error("value is not terminated by its opening quote")]
    Unterminated,

    /// A backslash is followed by an unknown or incomplete escape.
    #[error("invalid escape sequence")]
    InvalidEscape,

    /// The opening quote or a newline occurs unescaped inside the value.
    #[error("unescaped quote or newline inside value")]
    UnescapedQuote,

    /// A single-tick character literal holds zero or several characters.
    #[error("character literal must hold exactly one character")]
    NotSingleChar,
}

/// Removes the surrounding quotes of `s` and interprets its escapes.
///
/// Values without escapes are returned borrowed.
///
/// # Errors
///
/// Returns an [`UnquoteError`] when `s` is not a complete, well formed quoted
/// literal.
pub fn unquote(s: &str) -> Result<Cow<'_, str>, UnquoteError> {
    let mut chars = s.chars();
    let open = chars.next().ok_or(UnquoteError::NotQuoted)?;
    if !matches!(open, '"' | '\'' | '`') {
        return Err(UnquoteError::NotQuoted);
    }
    if chars.next_back() != Some(open) {
        return Err(UnquoteError::Unterminated);
    }

    let body = chars.as_str();
    match open {
        '`' => unquote_raw(body),
        '"' => unescape(body, Quote::Double),
        _ => {
            let value = unescape(body, Quote::Single)?;
            if value.chars().count() == 1 {
                Ok(value)
            } else {
                Err(UnquoteError::NotSingleChar)
            }
        }
    }
}

/// Returns the body of a raw literal, i.e. the text between two backticks.
pub(crate) fn unquote_raw(body: &str) -> Result<Cow<'_, str>, UnquoteError> {
    if body.contains('`') {
        return Err(UnquoteError::UnescapedQuote);
    }
    if body.contains('\r') {
        return Ok(Cow::Owned(body.replace('\r', "")));
    }
    Ok(Cow::Borrowed(body))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
}

impl Quote {
    fn as_char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }
}

fn unescape(body: &str, quote: Quote) -> Result<Cow<'_, str>, UnquoteError> {
    let delimiter = quote.as_char();
    if !body.contains(['\\', '\n', delimiter]) {
        return Ok(Cow::Borrowed(body));
    }

    // Bytes rather than chars: `\xhh` and octal escapes in double quoted
    // values denote single bytes.
    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescape_one(&mut chars, quote, &mut out)?,
            '\n' => return Err(UnquoteError::UnescapedQuote),
            c if c == delimiter => return Err(UnquoteError::UnescapedQuote),
            c => push_char(&mut out, c),
        }
    }

    Ok(match String::from_utf8(out) {
        Ok(s) => Cow::Owned(s),
        Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
    })
}

fn unescape_one(chars: &mut Chars<'_>, quote: Quote, out: &mut Vec<u8>) -> Result<(), UnquoteError> {
    let c = chars.next().ok_or(UnquoteError::InvalidEscape)?;
    let simple = match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        '\\' => '\\',
        '"' | '\'' if c == quote.as_char() => c,
        'x' => return push_byte_value(out, read_digits(chars, 2, 16)?, quote),
        'u' => return push_scalar(out, read_digits(chars, 4, 16)?),
        'U' => return push_scalar(out, read_digits(chars, 8, 16)?),
        '0'..='7' => {
            let rest = read_digits(chars, 2, 8)?;
            let value = (u32::from(c) - u32::from('0')) * 64 + rest;
            return push_byte_value(out, value, quote);
        }
        _ => return Err(UnquoteError::InvalidEscape),
    };
    push_char(out, simple);
    Ok(())
}

fn read_digits(chars: &mut Chars<'_>, count: usize, radix: u32) -> Result<u32, UnquoteError> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(radix))
            .ok_or(UnquoteError::InvalidEscape)?;
        value = value * radix + digit;
    }
    Ok(value)
}

fn push_byte_value(out: &mut Vec<u8>, value: u32, quote: Quote) -> Result<(), UnquoteError> {
    let byte = u8::try_from(value).map_err(|_| UnquoteError::InvalidEscape)?;
    match quote {
        Quote::Double => out.push(byte),
        Quote::Single => push_char(out, char::from(byte)),
    }
    Ok(())
}

fn push_scalar(out: &mut Vec<u8>, value: u32) -> Result<(), UnquoteError> {
    let c = char::from_u32(value).ok_or(UnquoteError::InvalidEscape)?;
    push_char(out, c);
    Ok(())
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
