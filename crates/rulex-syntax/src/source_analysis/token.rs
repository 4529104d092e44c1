// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Token types for rulex lexical analysis.
//!
//! Tokens are flat `(kind, span)` pairs. They carry no text of their own; the
//! lexeme is recovered by slicing the source with the token's [`Span`]. This
//! keeps the token list cheap to copy and reuse across several passes (for
//! example syntax highlighting followed by parsing).

use std::fmt;

use super::Span;

/// Words that lex as [`TokenKind::ReservedName`] rather than
/// [`TokenKind::Identifier`]. Matching is case-sensitive.
pub const RESERVED_WORDS: &[&str] = &[
    "U",
    "let",
    "lazy",
    "greedy",
    "range",
    "base",
    "atomic",
    "enable",
    "disable",
    "if",
    "else",
    "recursion",
    "regex",
    "test",
    "call",
];

/// Returns `true` if `word` is one of the [`RESERVED_WORDS`].
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Assertions ===
    /// `^`
    Caret,
    /// `$`
    Dollar,
    /// `%`
    Percent,
    /// `<`
    AngleLeft,
    /// `>`
    AngleRight,
    /// `>>`
    LookAhead,
    /// `<<`
    LookBehind,

    // === Repetitions ===
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    QuestionMark,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `,`
    Comma,

    // === Combinators ===
    /// `|`
    Pipe,
    /// `&`
    Ampersand,
    /// `!`
    Not,

    // === Groups ===
    /// `:`
    Colon,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,

    // === Character sets ===
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,

    /// `-`
    Dash,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `=`
    Equals,
    /// `::`, introduces a back-reference
    DoubleColon,

    // === Literals ===
    /// A single- or double-quoted string, delimiters included
    String,
    /// A code point literal such as `U+1F600`
    CodePoint,
    /// A run of digits, optionally with `_` separators
    Number,
    /// A name that is not reserved
    Identifier,
    /// A name from [`RESERVED_WORDS`]
    ReservedName,

    // === Errors ===
    /// A character that cannot start any token
    UnknownChar,
    /// A string literal missing its closing quote
    UnclosedString,
}

impl TokenKind {
    /// Returns `true` for the two error kinds.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::UnknownChar | Self::UnclosedString)
    }

    /// Returns the fixed lexeme of an operator token.
    ///
    /// Literal and error kinds have no fixed text and return `None`.
    #[must_use]
    pub const fn as_str(self) -> Option<&'static str> {
        let text = match self {
            Self::Caret => "^",
            Self::Dollar => "$",
            Self::Percent => "%",
            Self::AngleLeft => "<",
            Self::AngleRight => ">",
            Self::LookAhead => ">>",
            Self::LookBehind => "<<",
            Self::Star => "*",
            Self::Plus => "+",
            Self::QuestionMark => "?",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::Comma => ",",
            Self::Pipe => "|",
            Self::Ampersand => "&",
            Self::Not => "!",
            Self::Colon => ":",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Dash => "-",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Equals => "=",
            Self::DoubleColon => "::",
            Self::String
            | Self::CodePoint
            | Self::Number
            | Self::Identifier
            | Self::ReservedName
            | Self::UnknownChar
            | Self::UnclosedString => return None,
        };
        Some(text)
    }

    /// Looks up the kind of a one-character operator.
    pub(super) const fn from_single_char(c: char) -> Option<Self> {
        let kind = match c {
            '$' => Self::Dollar,
            '^' => Self::Caret,
            '%' => Self::Percent,
            '<' => Self::AngleLeft,
            '>' => Self::AngleRight,
            '*' => Self::Star,
            '+' => Self::Plus,
            '?' => Self::QuestionMark,
            '{' => Self::OpenBrace,
            '}' => Self::CloseBrace,
            ',' => Self::Comma,
            '|' => Self::Pipe,
            '&' => Self::Ampersand,
            '!' => Self::Not,
            ':' => Self::Colon,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            '-' => Self::Dash,
            '.' => Self::Dot,
            ';' => Self::Semicolon,
            '=' => Self::Equals,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.as_str() {
            return write!(f, "`{text}`");
        }
        let description = match self {
            Self::String => "string",
            Self::CodePoint => "code point",
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::ReservedName => "reserved name",
            Self::UnknownChar => "unknown character",
            _ => "unclosed string",
        };
        f.write_str(description)
    }
}

/// A token: its kind plus where it sits in the source.
///
/// # Examples
///
/// ```
/// use rulex_syntax::source_analysis::{Span, Token, TokenKind};
///
/// let source = "abc";
/// let token = Token::new(TokenKind::Identifier, Span::new(0, 3));
/// assert_eq!(token.text(source), "abc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub const fn kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub const fn span(self) -> Span {
        self.span
    }

    /// Returns the lexeme of this token within `source`.
    ///
    /// Returns an empty string if the span does not lie on character
    /// boundaries of `source`, which only happens when a token list is paired
    /// with the wrong source text.
    #[must_use]
    pub fn text(self, source: &str) -> &str {
        source.get(self.span.as_range()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::LookAhead.to_string(), "`>>`");
        assert_eq!(TokenKind::CloseParen.to_string(), "`)`");
        assert_eq!(TokenKind::Semicolon.to_string(), "`;`");
        assert_eq!(TokenKind::String.to_string(), "string");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(TokenKind::UnclosedString.to_string(), "unclosed string");
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::UnknownChar.is_error());
        assert!(TokenKind::UnclosedString.is_error());
        assert!(!TokenKind::String.is_error());
    }

    #[test]
    fn single_char_lookup_agrees_with_as_str() {
        for c in "$^%<>*+?{},|&!:()[]-.;=".chars() {
            let kind = TokenKind::from_single_char(c).expect("operator char");
            assert_eq!(kind.as_str(), Some(c.to_string().as_str()));
        }
        assert_eq!(TokenKind::from_single_char('a'), None);
        assert_eq!(TokenKind::from_single_char('#'), None);
    }

    #[test]
    fn reserved_words_are_case_sensitive() {
        assert!(is_reserved("let"));
        assert!(is_reserved("U"));
        assert!(!is_reserved("Let"));
        assert!(!is_reserved("u"));
        assert!(!is_reserved("unicode"));
    }

    #[test]
    fn token_text_slices_source() {
        let token = Token::new(TokenKind::String, Span::new(2, 6));
        assert_eq!(token.text("a \"bc\" d"), "\"bc\"");
        assert_eq!(token.kind(), TokenKind::String);
        assert_eq!(token.span(), Span::new(2, 6));
    }

    #[test]
    fn token_text_with_mismatched_source_is_empty() {
        let token = Token::new(TokenKind::Identifier, Span::new(0, 10));
        assert_eq!(token.text("abc"), "");
    }
}
