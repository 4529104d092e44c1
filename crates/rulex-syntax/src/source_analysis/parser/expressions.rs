// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for rulex.
//!
//! This module contains the operator levels of the grammar and the atoms
//! beneath them:
//!
//! - Alternation (`|`) and intersection (`&`)
//! - Sequences, negation (`!`) and lookaround (`>>`, `<<`)
//! - Repetitions (`*`, `+`, `?`, `{n,m}`) with `greedy`/`lazy`
//! - Groups, literals, boundaries, references, code points, ranges,
//!   `regex`, variables, `.` and `recursion`

use crate::ast::{
    BoundaryKind, CharClass, CharClassItem, Group, GroupKind, Literal, LookaroundKind,
    Quantifier, ReferenceTarget, RepetitionKind, Rule,
};
use crate::source_analysis::quoted::{parse_quoted_text, strip_first_last};
use crate::source_analysis::{ParseError, ParseErrorKind, Span, TokenKind};

use super::{MAX_REPETITION, ParseResult, Parser};

/// Longest accepted capture group name.
const MAX_GROUP_NAME_LEN: usize = 128;

impl Parser<'_> {
    // ========================================================================
    // Operators
    // ========================================================================

    /// Parses alternatives separated by `|`.
    ///
    /// An expression with no alternatives at all is the empty literal.
    pub(super) fn parse_or(&mut self) -> ParseResult<Rule> {
        let mut span = self.span();
        let leading_pipe = self.match_token(TokenKind::Pipe);

        let Some(first) = self.parse_and()? else {
            if leading_pipe {
                return Err(ParseError::new(ParseErrorKind::LonePipe, self.last_span()));
            }
            return Ok(Rule::Literal(Literal::empty()));
        };

        let mut rules = vec![first];
        while self.match_token(TokenKind::Pipe) {
            let Some(next) = self.parse_and()? else {
                return Err(ParseError::new(ParseErrorKind::LonePipe, self.last_span()));
            };
            span = span.join(next.span());
            rules.push(next);
        }

        if rules.len() == 1 {
            Ok(rules.remove(0))
        } else {
            Ok(Rule::Alternation { rules, span })
        }
    }

    /// Parses sequences separated by `&`.
    fn parse_and(&mut self) -> ParseResult<Option<Rule>> {
        let span_start = self.span();
        let leading_ampersand = self.match_token(TokenKind::Ampersand);

        let Some(first) = self.parse_sequence()? else {
            if leading_ampersand {
                return Err(ParseError::expected(self.span(), "expression"));
            }
            return Ok(None);
        };
        if !self.check(TokenKind::Ampersand) {
            return Ok(Some(first));
        }

        let mut rules = vec![first];
        while self.match_token(TokenKind::Ampersand) {
            let Some(next) = self.parse_sequence()? else {
                return Err(ParseError::expected(self.span(), "expression"));
            };
            rules.push(next);
        }
        Ok(Some(Rule::Intersection {
            rules,
            span: span_start.join(self.last_span()),
        }))
    }

    /// Parses juxtaposed rules.
    fn parse_sequence(&mut self) -> ParseResult<Option<Rule>> {
        let mut fixes = Vec::new();
        while let Some(fix) = self.parse_fixes()? {
            fixes.push(fix);
        }

        match fixes.len() {
            0 => Ok(None),
            1 => Ok(fixes.pop()),
            _ => {
                let span = match (fixes.first(), fixes.last()) {
                    (Some(first), Some(last)) => first.span().join(last.span()),
                    _ => Span::EMPTY,
                };
                Ok(Some(Rule::Group(Group {
                    rules: fixes,
                    kind: GroupKind::Implicit,
                    span,
                })))
            }
        }
    }

    /// Parses prefix `!`s, a lookaround or atom, then any repetitions.
    ///
    /// Each `!` counts as one nesting level.
    fn parse_fixes(&mut self) -> ParseResult<Option<Rule>> {
        let mut not_span = self.span();
        let mut nots = 0_usize;
        let mut result = Ok(());
        while self.check(TokenKind::Not) {
            result = self.enter_nesting(self.span());
            if result.is_err() {
                break;
            }
            self.advance();
            nots += 1;
            not_span = not_span.join(self.last_span());
        }

        let result = result.and_then(|()| self.parse_negated(nots, not_span));
        for _ in 0..nots {
            self.leave_nesting();
        }
        result
    }

    /// Parses the operand of `nots` prefix `!`s and any repetitions.
    fn parse_negated(&mut self, nots: usize, not_span: Span) -> ParseResult<Option<Rule>> {
        let rule = match self.parse_lookaround()? {
            Some(rule) => Some(rule),
            None => self.parse_atom()?,
        };
        let Some(mut rule) = rule else {
            if nots == 0 {
                return Ok(None);
            }
            return Err(ParseError::expected(self.span(), "expression"));
        };

        for _ in 0..nots {
            let span = rule.span().join(not_span);
            rule = Rule::Negation {
                rule: Box::new(rule),
                not_span,
                span,
            };
        }

        while let Some((kind, quantifier, repetition_span)) = self.parse_repetition()? {
            let span = rule.span().join(repetition_span);
            rule = Rule::Repetition {
                rule: Box::new(rule),
                kind,
                quantifier,
                span,
            };
        }

        Ok(Some(rule))
    }

    /// Parses `>> expr` or `<< expr`.
    fn parse_lookaround(&mut self) -> ParseResult<Option<Rule>> {
        let kind = if self.match_token(TokenKind::LookAhead) {
            LookaroundKind::Ahead
        } else if self.match_token(TokenKind::LookBehind) {
            LookaroundKind::Behind
        } else {
            return Ok(None);
        };
        let start_span = self.last_span();
        let rule = self.parse_modified()?;
        let span = start_span.join(rule.span());
        Ok(Some(Rule::Lookaround {
            rule: Box::new(rule),
            kind,
            span,
        }))
    }

    // ========================================================================
    // Repetitions
    // ========================================================================

    /// Parses one repetition operator with its optional quantifier keyword.
    fn parse_repetition(&mut self) -> ParseResult<Option<(RepetitionKind, Quantifier, Span)>> {
        let start = self.span();

        let Some(kind) = self.parse_repetition_operator()? else {
            return Ok(None);
        };

        let quantifier = if self.match_reserved("greedy") {
            Quantifier::Greedy
        } else if self.match_reserved("lazy") {
            Quantifier::Lazy
        } else if self.is_lazy {
            Quantifier::DefaultLazy
        } else {
            Quantifier::DefaultGreedy
        };

        let multi_span = self.span();
        if self.parse_repetition_operator()?.is_some() {
            return Err(ParseError::new(
                ParseErrorKind::MultipleRepetitions,
                multi_span.join(self.last_span()),
            ));
        }

        Ok(Some((kind, quantifier, start.join(self.last_span()))))
    }

    /// Parses `+`, `*`, `?` or a brace repetition.
    fn parse_repetition_operator(&mut self) -> ParseResult<Option<RepetitionKind>> {
        let kind = if self.match_token(TokenKind::Plus) {
            RepetitionKind {
                lower: 1,
                upper: None,
            }
        } else if self.match_token(TokenKind::Star) {
            RepetitionKind {
                lower: 0,
                upper: None,
            }
        } else if self.match_token(TokenKind::QuestionMark) {
            RepetitionKind {
                lower: 0,
                upper: Some(1),
            }
        } else {
            return self.parse_repetition_braces();
        };
        Ok(Some(kind))
    }

    /// Parses `{n}`, `{n,}`, `{,m}` or `{n,m}`.
    fn parse_repetition_braces(&mut self) -> ParseResult<Option<RepetitionKind>> {
        if !self.match_token(TokenKind::OpenBrace) {
            return Ok(None);
        }
        let num_start = self.span();

        let lower = self.match_number(MAX_REPETITION)?;
        let comma = self.match_token(TokenKind::Comma);
        let upper = self.match_number(MAX_REPETITION)?;

        let num_end = self.last_span();
        let num_span = num_start.join(num_end);

        let kind = match (lower, comma, upper) {
            (lower, true, upper) => {
                let lower = lower.unwrap_or(0);
                if upper.is_some_and(|upper| lower > upper) {
                    return Err(ParseError::new(
                        ParseErrorKind::NotAscendingRepetition,
                        num_span,
                    ));
                }
                RepetitionKind { lower, upper }
            }
            (Some(_), false, Some(_)) => {
                return Err(ParseError::expected(num_end, "`}` or `,`"));
            }
            (Some(lower), false, None) => RepetitionKind {
                lower,
                upper: Some(lower),
            },
            (None, false, _) => return Err(ParseError::expected(self.span(), "number")),
        };

        self.expect(TokenKind::CloseBrace)?;
        Ok(Some(kind))
    }

    // ========================================================================
    // Atoms
    // ========================================================================

    /// Parses the first atom that matches the current token.
    fn parse_atom(&mut self) -> ParseResult<Option<Rule>> {
        if let Some(rule) = self.parse_group()? {
            return Ok(Some(rule));
        }
        if let Some(literal) = self.parse_literal() {
            return Ok(Some(Rule::Literal(literal)));
        }
        if let Some(rule) = self.parse_char_set()? {
            return Ok(Some(rule));
        }
        if let Some(rule) = self.parse_boundary() {
            return Ok(Some(rule));
        }
        if let Some(rule) = self.parse_reference()? {
            return Ok(Some(rule));
        }
        if let Some(rule) = self.parse_code_point_rule()? {
            return Ok(Some(rule));
        }
        if let Some(rule) = self.parse_range()? {
            return Ok(Some(rule));
        }
        if let Some(rule) = self.parse_regex()? {
            return Ok(Some(rule));
        }
        Ok(self
            .parse_variable()
            .or_else(|| self.parse_dot())
            .or_else(|| self.parse_recursion()))
    }

    /// Parses `(...)`, `:(...)`, `:name(...)` or `atomic(...)`.
    fn parse_group(&mut self) -> ParseResult<Option<Rule>> {
        let (kind, start_span) = self.parse_group_kind()?;
        if kind == GroupKind::Normal {
            if !self.match_token(TokenKind::OpenParen) {
                return Ok(None);
            }
        } else {
            self.expect(TokenKind::OpenParen)?;
        }

        let rule = self.parse_modified()?;

        if let Err(error) = self.expect(TokenKind::CloseParen) {
            return Err(ParseError::expected(error.span, "`)` or an expression"));
        }
        Ok(Some(Rule::Group(Group {
            rules: vec![rule],
            kind,
            span: start_span.join(self.last_span()),
        })))
    }

    /// Parses the prefix that determines a group's kind.
    fn parse_group_kind(&mut self) -> ParseResult<(GroupKind, Span)> {
        if self.match_reserved("atomic") {
            return Ok((GroupKind::Atomic, self.last_span()));
        }
        if !self.match_token(TokenKind::Colon) {
            return Ok((GroupKind::Normal, self.span()));
        }

        let span = self.last_span();
        let Some(name) = self.match_as(TokenKind::Identifier) else {
            return Ok((GroupKind::Capturing, span));
        };
        if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidCharsInGroupName,
                self.last_span(),
            ));
        }
        if name.len() > MAX_GROUP_NAME_LEN {
            return Err(ParseError::new(
                ParseErrorKind::GroupNameTooLong,
                self.last_span(),
            ));
        }
        Ok((GroupKind::Named(name.into()), span))
    }

    /// Parses a string literal.
    pub(super) fn parse_literal(&mut self) -> Option<Literal> {
        let text = self.match_as(TokenKind::String)?;
        Some(Literal::new(parse_quoted_text(text), self.last_span()))
    }

    /// Parses `^`, `$`, `%`, `<` or `>`.
    fn parse_boundary(&mut self) -> Option<Rule> {
        let span = self.span();
        let kind = match self.current_token()?.kind() {
            TokenKind::Caret => BoundaryKind::Start,
            TokenKind::Dollar => BoundaryKind::End,
            TokenKind::Percent => BoundaryKind::Word,
            TokenKind::AngleLeft => BoundaryKind::WordStart,
            TokenKind::AngleRight => BoundaryKind::WordEnd,
            _ => return None,
        };
        self.advance();
        Some(Rule::Boundary { kind, span })
    }

    /// Parses `::name`, `::N`, `::+N` or `::-N`.
    fn parse_reference(&mut self) -> ParseResult<Option<Rule>> {
        if !self.match_token(TokenKind::DoubleColon) {
            return Ok(None);
        }
        let start_span = self.last_span();

        let target = if self.match_token(TokenKind::Plus) {
            ReferenceTarget::Relative(self.expect_number()?)
        } else if self.match_token(TokenKind::Dash) {
            let offset: i32 = self.expect_number()?;
            ReferenceTarget::Relative(-offset)
        } else if let Some(number) = self.match_number(MAX_REPETITION)? {
            ReferenceTarget::Number(number)
        } else {
            match self.expect_as(TokenKind::Identifier) {
                Ok(name) => ReferenceTarget::Named(name.into()),
                Err(error) => {
                    return Err(ParseError::expected(error.span, "number or group name"));
                }
            }
        };

        Ok(Some(Rule::Reference {
            target,
            span: start_span.join(self.last_span()),
        }))
    }

    /// Parses a bare code point, which becomes a one-item character class.
    fn parse_code_point_rule(&mut self) -> ParseResult<Option<Rule>> {
        let Some((c, span)) = self.parse_code_point()? else {
            return Ok(None);
        };
        let class = CharClass::new(vec![CharClassItem::Char(c)], self.is_unicode_aware, span);
        Ok(class.map(Rule::CharClass))
    }

    /// Parses a code point literal such as `U+1F600`.
    pub(super) fn parse_code_point(&mut self) -> ParseResult<Option<(char, Span)>> {
        let Some(text) = self.match_as(TokenKind::CodePoint) else {
            return Ok(None);
        };
        let span = self.last_span();
        // Nothing before the digits (`U`, `+`, whitespace) is a hex digit.
        let digits = text.trim_start_matches(|c: char| !c.is_ascii_hexdigit());
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .map(|c| Some((c, span)))
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCodePoint, span))
    }

    /// Parses `range 'a'-'b'` with an optional `base N`.
    fn parse_range(&mut self) -> ParseResult<Option<Rule>> {
        if !self.match_reserved("range") {
            return Ok(None);
        }
        let span_start = self.last_span();
        let first = self.expect_as(TokenKind::String)?;
        self.expect(TokenKind::Dash)?;
        let second = self.expect_as(TokenKind::String)?;

        let mut radix = 10;
        if self.match_reserved("base") {
            let base: u32 = self.expect_number()?;
            radix = u8::try_from(base)
                .ok()
                .filter(|base| (2..=36).contains(base))
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidRangeBase, self.last_span()))?;
        }

        Ok(Some(Rule::Range {
            start: strip_first_last(first).into(),
            end: strip_first_last(second).into(),
            radix,
            span: span_start.join(self.last_span()),
        }))
    }

    /// Parses `regex '...'`.
    fn parse_regex(&mut self) -> ParseResult<Option<Rule>> {
        if !self.match_reserved("regex") {
            return Ok(None);
        }
        let span_start = self.last_span();
        let text = self.expect_as(TokenKind::String)?;
        Ok(Some(Rule::Regex {
            content: parse_quoted_text(text),
            span: span_start.join(self.last_span()),
        }))
    }

    fn parse_variable(&mut self) -> Option<Rule> {
        let name = self.match_as(TokenKind::Identifier)?;
        Some(Rule::Variable {
            name: name.into(),
            span: self.last_span(),
        })
    }

    fn parse_dot(&mut self) -> Option<Rule> {
        self.match_token(TokenKind::Dot).then(|| Rule::Dot {
            span: self.last_span(),
        })
    }

    fn parse_recursion(&mut self) -> Option<Rule> {
        self.match_reserved("recursion").then(|| Rule::Recursion {
            span: self.last_span(),
        })
    }
}
