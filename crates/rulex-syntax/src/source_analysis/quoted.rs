// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Decoding of quoted string lexemes.

use ecow::EcoString;

use super::error::ParseErrorKind;

/// Removes the first and last character of `text`.
///
/// Returns an empty string if `text` has fewer than two characters.
#[must_use]
pub fn strip_first_last(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Decodes a string lexeme, quotes included.
///
/// Double-quoted strings support the escapes `\"` and `\\`; any other
/// backslash is kept as written. Single-quoted strings are taken verbatim.
#[must_use]
pub fn parse_quoted_text(text: &str) -> EcoString {
    let inner = strip_first_last(text);
    if !text.starts_with('"') {
        return inner.into();
    }

    let mut result = EcoString::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.clone().next() {
            Some(escaped @ ('"' | '\\')) => {
                chars.next();
                result.push(escaped);
            }
            _ => result.push('\\'),
        }
    }
    result
}

/// One endpoint of a character class range, before it is checked to be a
/// single character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringOrChar {
    /// A decoded string literal
    String(EcoString),
    /// A code point literal or a named escape such as `n`
    Char(char),
}

/// Converts a range endpoint to a single character.
///
/// # Errors
///
/// Returns [`ParseErrorKind::EmptyStringInCharSetRange`] for `''` and
/// [`ParseErrorKind::StringTooLongInCharSetRange`] for strings of more than one
/// character.
pub fn string_or_char_to_char(value: &StringOrChar) -> Result<char, ParseErrorKind> {
    match value {
        StringOrChar::Char(c) => Ok(*c),
        StringOrChar::String(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (None, _) => Err(ParseErrorKind::EmptyStringInCharSetRange),
                (Some(c), None) => Ok(c),
                (Some(_), Some(_)) => Err(ParseErrorKind::StringTooLongInCharSetRange),
            }
        }
    }
}
