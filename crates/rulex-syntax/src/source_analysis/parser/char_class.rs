// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Character class parsing: `[...]`.

use crate::ast::{CharClass, CharClassItem, Rule};
use crate::source_analysis::quoted::{StringOrChar, parse_quoted_text, string_or_char_to_char};
use crate::source_analysis::{ParseError, ParseErrorKind, TokenKind};

use super::{ParseResult, Parser};

/// Identifiers that stand for a single control character inside `[...]`.
fn special_char(name: &str) -> Option<char> {
    let c = match name {
        "n" => '\n',
        "r" => '\r',
        "t" => '\t',
        "a" => '\u{07}',
        "e" => '\u{1B}',
        "f" => '\u{0C}',
        _ => return None,
    };
    Some(c)
}

impl Parser<'_> {
    /// Parses a bracketed character class.
    pub(super) fn parse_char_set(&mut self) -> ParseResult<Option<Rule>> {
        if !self.match_token(TokenKind::OpenBracket) {
            return Ok(None);
        }
        let start_span = self.last_span();

        let items = self.parse_char_set_inner()?;

        if let Err(error) = self.expect(TokenKind::CloseBracket) {
            return Err(ParseError::expected(
                error.span,
                "character class, string, code point, Unicode property or `]`",
            ));
        }
        let span = start_span.join(self.last_span());

        CharClass::new(items, self.is_unicode_aware, span)
            .map(|class| Some(Rule::CharClass(class)))
            .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyCharSet, span))
    }

    /// Parses items until something that is not an item is found.
    fn parse_char_set_inner(&mut self) -> ParseResult<Vec<CharClassItem>> {
        let mut items = Vec::new();
        loop {
            let not_span = self.span();
            let negative = self.match_token(TokenKind::Not);

            if let Some(chars) = self.parse_chars_or_range()? {
                if negative {
                    return Err(ParseError::new(
                        ParseErrorKind::UnallowedNotInCharSet,
                        not_span,
                    ));
                }
                items.extend(chars);
                continue;
            }

            match self.parse_char_set_ident(negative)? {
                Some(item) => items.push(item),
                None if negative => {
                    return Err(ParseError::expected_token(
                        self.span(),
                        TokenKind::Identifier,
                    ));
                }
                None => break,
            }
        }
        Ok(items)
    }

    /// Parses a character, a string exploded into its characters, or a
    /// range `first-last`.
    fn parse_chars_or_range(&mut self) -> ParseResult<Option<Vec<CharClassItem>>> {
        let first_span = self.span();
        let Some(first) = self.parse_string_or_char()? else {
            return Ok(None);
        };

        if self.match_token(TokenKind::Dash) {
            let last_span = self.span();
            let Some(last) = self.parse_string_or_char()? else {
                return Err(ParseError::expected(self.span(), "code point or character"));
            };

            let first = string_or_char_to_char(&first)
                .map_err(|kind| ParseError::new(kind, first_span))?;
            let last = string_or_char_to_char(&last)
                .map_err(|kind| ParseError::new(kind, last_span))?;
            if first > last {
                return Err(ParseError::new(
                    ParseErrorKind::NotAscendingCharRange,
                    first_span.join(self.last_span()),
                ));
            }
            return Ok(Some(vec![CharClassItem::Range { first, last }]));
        }

        let items = match first {
            StringOrChar::String(content) => content.chars().map(CharClassItem::Char).collect(),
            StringOrChar::Char(c) => vec![CharClassItem::Char(c)],
        };
        Ok(Some(items))
    }

    /// Parses a string, a code point or a special character name.
    fn parse_string_or_char(&mut self) -> ParseResult<Option<StringOrChar>> {
        if let Some(text) = self.match_as(TokenKind::String) {
            return Ok(Some(StringOrChar::String(parse_quoted_text(text))));
        }
        if let Some((c, _)) = self.parse_code_point()? {
            return Ok(Some(StringOrChar::Char(c)));
        }
        let special = self
            .check(TokenKind::Identifier)
            .then(|| special_char(self.current_text()))
            .flatten();
        if special.is_some() {
            self.advance();
        }
        Ok(special.map(StringOrChar::Char))
    }

    /// Parses `name` or `kind:name`. Names are not checked against any
    /// list of known classes.
    fn parse_char_set_ident(&mut self, negative: bool) -> ParseResult<Option<CharClassItem>> {
        let Some(before_colon) = self.match_as(TokenKind::Identifier) else {
            return Ok(None);
        };
        let mut span = self.last_span();

        let after_colon = if self.match_token(TokenKind::Colon) {
            Some(self.expect_as(TokenKind::Identifier)?)
        } else {
            None
        };
        span = span.join(self.last_span());

        let (kind, name) = match after_colon {
            Some(name) => (Some(before_colon.into()), name),
            None => (None, before_colon),
        };
        Ok(Some(CharClassItem::Named {
            name: name.into(),
            kind,
            negative,
            span,
        }))
    }
}
