// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Error types for the rulex parser.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! They integrate with [`miette`] for error reporting.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fmt;

use ecow::{EcoString, eco_format};
use miette::Diagnostic;
use thiserror::Error;

use super::{Span, Token, TokenKind};

/// An error produced while lexing or parsing.
///
/// Lexer errors are collected from the token stream all at once; any other
/// error aborts the parse on the spot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{}", self.message())]
#[diagnostic()]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
    /// What the parser was looking for, for the two "expected" kinds.
    pub expected: Option<Expected>,
}

impl ParseError {
    /// Creates a new error without an expectation.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            expected: None,
        }
    }

    /// Creates an [`ParseErrorKind::Expected`] error with a free-text description.
    #[must_use]
    pub const fn expected(span: Span, description: &'static str) -> Self {
        Self {
            kind: ParseErrorKind::Expected,
            span,
            expected: Some(Expected::Description(description)),
        }
    }

    /// Creates an [`ParseErrorKind::ExpectedToken`] error for a specific token kind.
    #[must_use]
    pub const fn expected_token(span: Span, kind: TokenKind) -> Self {
        Self {
            kind: ParseErrorKind::ExpectedToken,
            span,
            expected: Some(Expected::Token(kind)),
        }
    }

    /// Translates a lexer error token into a parse error.
    ///
    /// Returns `None` for tokens that are not errors.
    #[must_use]
    pub const fn from_token(token: Token) -> Option<Self> {
        let kind = match token.kind() {
            TokenKind::UnclosedString => ParseErrorKind::UnclosedString,
            TokenKind::UnknownChar => ParseErrorKind::UnknownToken,
            _ => return None,
        };
        Some(Self::new(kind, token.span()))
    }

    /// The expectation if there is one, otherwise the kind's message.
    fn message(&self) -> EcoString {
        match &self.expected {
            Some(expected) => eco_format!("expected {expected}"),
            None => eco_format!("{}", self.kind),
        }
    }
}


/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    // === Lexical ===
    /// A string literal is missing its closing quote.
    #[error("this string is not closed")]
    UnclosedString,
    /// A character that cannot start any token.
    #[error("unknown token")]
    UnknownToken,

    // === Structural ===
    /// Input remains after a complete expression.
    #[error("unexpected input after the end of the expression")]
    LeftoverTokens,
    /// A specific token kind was required.
    #[error("expected a different token")]
    ExpectedToken,
    /// Something described in prose was required.
    #[error("unexpected token")]
    Expected,
    /// The expression nests deeper than the parser allows.
    #[error("the expression is nested too deeply")]
    RecursionLimit,

    // === Numbers ===
    /// A number exceeds the maximum for its position.
    #[error("this number is too large")]
    NumberTooLarge,

    // === Grammar ===
    /// A `|` with no alternative after it.
    #[error("a pipe must be followed by an expression")]
    LonePipe,
    /// Two repetition operators in a row, such as `a+*`.
    #[error("only one repetition is allowed here; wrap the expression in parentheses to repeat it again")]
    MultipleRepetitions,
    /// A repetition `{n,m}` with `n > m`.
    #[error("the lower bound of this repetition is larger than the upper bound")]
    NotAscendingRepetition,
    /// A capture name with characters outside `[A-Za-z0-9]`.
    #[error("group names may only contain ASCII letters and digits")]
    InvalidCharsInGroupName,
    /// A capture name longer than 128 characters.
    #[error("group names may not be longer than 128 characters")]
    GroupNameTooLong,
    /// A code point that is a surrogate or beyond `U+10FFFF`.
    #[error("this code point is outside the allowed range")]
    InvalidCodePoint,
    /// A character class with no items, `[]`.
    #[error("this character class is empty")]
    EmptyCharSet,
    /// A `!` before a character or range inside a character class.
    #[error("`!` is only allowed before a named character class")]
    UnallowedNotInCharSet,
    /// `''` used as a range endpoint.
    #[error("a character range endpoint may not be empty")]
    EmptyStringInCharSetRange,
    /// A string of several characters used as a range endpoint.
    #[error("a character range endpoint must be a single character")]
    StringTooLongInCharSetRange,
    /// A character range whose first character is after its last.
    #[error("the first character of this range is greater than the last")]
    NotAscendingCharRange,
    /// A `range` base outside `2..=36`.
    #[error("the base of a range must be between 2 and 36")]
    InvalidRangeBase,
    /// A `match` test case listing several strings without `in`.
    #[error("a test case may only contain multiple strings when followed by `in`")]
    MultipleStringsInTestCase,
}

/// What a parser production was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// A free-text description such as ``expression or `;` ``.
    Description(&'static str),
    /// A specific token kind.
    Token(TokenKind),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description(description) => f.write_str(description),
            Self::Token(kind) => write!(f, "{kind}"),
        }
    }
}
