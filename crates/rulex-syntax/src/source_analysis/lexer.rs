// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for rulex source code.
//!
//! This module converts source text into a flat stream of [`Token`]s. The
//! lexer is hand-written and never fails: malformed input is turned into
//! [`TokenKind::UnknownChar`] or [`TokenKind::UnclosedString`] tokens and the
//! caller decides whether those are fatal.
//!
//! Whitespace and `#` line comments are skipped and produce no tokens, so the
//! spans of consecutive tokens may have gaps but never overlap.
//!
//! # Example
//!
//! ```
//! use rulex_syntax::source_analysis::{TokenKind, tokenize};
//!
//! let kinds: Vec<_> = tokenize("'a'+ # comment").iter().map(|t| t.kind()).collect();
//! assert_eq!(kinds, [TokenKind::String, TokenKind::Plus]);
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::char::is_combining_mark;

use super::token::is_reserved;
use super::{Span, Token, TokenKind};

/// A lexer that tokenizes rulex source code.
///
/// Implements [`Iterator`]; iteration ends once the input is exhausted.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is same as `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "sources over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if is_space(c) => self.advance_while(is_space),
                Some('#') => self.advance_while(|c| c != '\n'),
                _ => break,
            }
        }
    }

    /// Lexes the next token, or returns `None` at end of input.
    fn lex_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let start = self.current_position();
        let c = self.peek_char()?;
        let kind = self.lex_token_kind(c);
        Some(Token::new(kind, self.span_from(start)))
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char) -> TokenKind {
        // Two-character operators take priority over their one-character prefixes.
        let double = match (c, self.peek_char_n(1)) {
            ('>', Some('>')) => Some(TokenKind::LookAhead),
            ('<', Some('<')) => Some(TokenKind::LookBehind),
            (':', Some(':')) => Some(TokenKind::DoubleColon),
            _ => None,
        };
        if let Some(kind) = double {
            self.advance();
            self.advance();
            return kind;
        }

        if let Some(kind) = TokenKind::from_single_char(c) {
            self.advance();
            return kind;
        }

        match c {
            '\'' => self.lex_single_quoted_string(),
            '"' => self.lex_double_quoted_string(),
            'U' if self.at_code_point() => self.lex_code_point(),
            '0'..='9' => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => self.lex_identifier_or_reserved(),

            // Unknown character - error recovery
            _ => {
                self.advance();
                TokenKind::UnknownChar
            }
        }
    }

    /// Lexes `'...'`. Backslashes have no special meaning here.
    fn lex_single_quoted_string(&mut self) -> TokenKind {
        self.advance(); // opening quote
        self.advance_while(|c| c != '\'');
        if self.advance().is_some() {
            TokenKind::String
        } else {
            TokenKind::UnclosedString
        }
    }

    /// Lexes `"..."`, skipping over backslash-escaped characters.
    fn lex_double_quoted_string(&mut self) -> TokenKind {
        self.advance(); // opening quote
        loop {
            match self.advance() {
                None => return TokenKind::UnclosedString,
                Some('"') => return TokenKind::String,
                Some('\\') => {
                    if self.advance().is_none() {
                        return TokenKind::UnclosedString;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Checks for `U`, optional whitespace, `+`, optional whitespace and at
    /// least one hex digit. Does not consume any characters.
    fn at_code_point(&self) -> bool {
        let mut rest = self.chars.clone().map(|(_, c)| c).skip(1).peekable();
        while rest.next_if(|&c| is_space(c)).is_some() {}
        if rest.next() != Some('+') {
            return false;
        }
        while rest.next_if(|&c| is_space(c)).is_some() {}
        rest.next().is_some_and(|c| c.is_ascii_hexdigit())
    }

    /// Lexes a code point literal; [`Self::at_code_point`] must hold.
    fn lex_code_point(&mut self) -> TokenKind {
        self.advance(); // U
        self.advance_while(is_space);
        self.advance(); // +
        self.advance_while(is_space);
        self.advance_while(|c| c.is_ascii_hexdigit());
        TokenKind::CodePoint
    }

    /// Lexes a run of digits and `_` separators.
    fn lex_number(&mut self) -> TokenKind {
        self.advance_while(|c| c.is_ascii_digit() || c == '_');
        TokenKind::Number
    }

    /// Lexes an identifier, classifying reserved words.
    fn lex_identifier_or_reserved(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(is_word_char);
        if is_reserved(self.text_for(self.span_from(start))) {
            TokenKind::ReservedName
        } else {
            TokenKind::Identifier
        }
    }
}

/// Characters allowed after the first character of an identifier.
///
/// Only decimal digits (`Nd`) count; `²` or `½` end the identifier.
fn is_word_char(c: char) -> bool {
    c.is_alphabetic()
        || is_combining_mark(c)
        || get_general_category(c) == GeneralCategory::DecimalNumber
        || c == '_'
}

/// Whitespace skipped between tokens: Unicode `White_Space` without U+0085
/// (NEXT LINE), plus the byte order mark U+FEFF.
fn is_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.lex_token()
    }
}

/// Lexes `source` into its complete token list.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
