// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing for rulex.
//!
//! Statements prefix the expression they apply to:
//!
//! - Mode modifiers (`enable lazy;`, `disable unicode;`)
//! - Variable bindings (`let name = expr;`)
//! - Test blocks (`test { match '...'; reject '...'; }`)

use crate::ast::{
    BooleanSetting, CaptureIdent, Let, Literal, Rule, Stmt, Test, TestCapture, TestCase,
    TestCaseMatch, TestCaseMatchAll, TestCaseReject,
};
use crate::source_analysis::{ParseError, ParseErrorKind, Span, TokenKind};

use super::{MAX_REPETITION, ParseResult, Parser};

impl Parser<'_> {
    /// Parses statements followed by an expression.
    ///
    /// This is the recursive entry point for groups and lookarounds. The
    /// ambient flags are restored on return, whether or not parsing succeeded.
    /// Uses `stacker::maybe_grow` to extend the stack on the heap if
    /// remaining stack space falls below 32 KiB.
    pub(super) fn parse_modified(&mut self) -> ParseResult<Rule> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.enter_nesting(self.span())?;
            let was_lazy = self.is_lazy;
            let was_unicode_aware = self.is_unicode_aware;

            let result = self.parse_statements_and_rule();

            self.is_lazy = was_lazy;
            self.is_unicode_aware = was_unicode_aware;
            self.leave_nesting();
            result
        })
    }

    fn parse_statements_and_rule(&mut self) -> ParseResult<Rule> {
        let mut stmts = Vec::new();
        let result = self
            .parse_statements(&mut stmts)
            .and_then(|()| self.parse_or());
        for _ in 0..stmts.len() {
            self.leave_nesting();
        }
        let mut rule = result?;

        let span_end = rule.span();
        for (stmt, span) in stmts.into_iter().rev() {
            rule = Rule::StmtExpr {
                stmt: Box::new(stmt),
                rule: Box::new(rule),
                span: span.join(span_end),
            };
        }
        Ok(rule)
    }

    /// Parses statements into `stmts`, entering one nesting level for each
    /// one pushed.
    fn parse_statements(&mut self, stmts: &mut Vec<(Stmt, Span)>) -> ParseResult<()> {
        while let Some((stmt, span)) = self.parse_stmt()? {
            self.enter_nesting(span)?;
            match stmt {
                Stmt::Enable { setting, .. } => self.apply_setting(setting, true),
                Stmt::Disable { setting, .. } => self.apply_setting(setting, false),
                Stmt::Let(_) | Stmt::Test(_) => {}
            }
            stmts.push((stmt, span));
        }
        Ok(())
    }

    fn apply_setting(&mut self, setting: BooleanSetting, value: bool) {
        match setting {
            BooleanSetting::Lazy => self.is_lazy = value,
            BooleanSetting::Unicode => self.is_unicode_aware = value,
        }
    }

    /// Parses one statement and the span it covers.
    fn parse_stmt(&mut self) -> ParseResult<Option<(Stmt, Span)>> {
        if let Some(stmt) = self.parse_mode_modifier()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.parse_let()? {
            return Ok(Some(stmt));
        }
        self.parse_test()
    }

    /// Parses `enable` or `disable` followed by a setting and `;`.
    fn parse_mode_modifier(&mut self) -> ParseResult<Option<(Stmt, Span)>> {
        let enable = if self.match_reserved("enable") {
            true
        } else if self.match_reserved("disable") {
            false
        } else {
            return Ok(None);
        };
        let span_start = self.last_span();

        let setting = if self.match_reserved("lazy") {
            BooleanSetting::Lazy
        } else if self.match_contextual("unicode") {
            BooleanSetting::Unicode
        } else {
            return Err(ParseError::expected(self.span(), "`lazy` or `unicode`"));
        };
        self.expect(TokenKind::Semicolon)?;

        let span = span_start.join(self.last_span());
        let stmt = if enable {
            Stmt::Enable { setting, span }
        } else {
            Stmt::Disable { setting, span }
        };
        Ok(Some((stmt, span)))
    }

    /// Parses `let name = expr;`.
    fn parse_let(&mut self) -> ParseResult<Option<(Stmt, Span)>> {
        if !self.match_reserved("let") {
            return Ok(None);
        }
        let span_start = self.last_span();
        let name_span = self.span();
        let name = self.expect_as(TokenKind::Identifier)?;

        self.expect(TokenKind::Equals)?;

        let rule = self.parse_or()?;

        if let Err(error) = self.expect(TokenKind::Semicolon) {
            return Err(ParseError::expected(error.span, "expression or `;`"));
        }

        let span = span_start.join(self.last_span());
        let stmt = Stmt::Let(Let {
            name: name.into(),
            name_span,
            rule,
        });
        Ok(Some((stmt, span)))
    }

    // ========================================================================
    // Tests
    // ========================================================================

    /// Parses `test { case* }`.
    fn parse_test(&mut self) -> ParseResult<Option<(Stmt, Span)>> {
        if !self.match_reserved("test") {
            return Ok(None);
        }
        let span_start = self.last_span();
        self.expect(TokenKind::OpenBrace)?;

        let mut cases = Vec::new();
        while let Some(case) = self.parse_test_case()? {
            cases.push(case);
        }

        self.expect(TokenKind::CloseBrace)?;
        let span = span_start.join(self.last_span());
        Ok(Some((Stmt::Test(Test { cases, span }), span)))
    }

    /// Parses a `match` or `reject` case.
    fn parse_test_case(&mut self) -> ParseResult<Option<TestCase>> {
        if self.match_contextual("match") {
            self.parse_test_case_match().map(Some)
        } else if self.match_contextual("reject") {
            self.parse_test_case_reject().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parses the rest of `match 'a' [as { ... }];` or
    /// `match 'a', 'b' in 'a b';`.
    fn parse_test_case_match(&mut self) -> ParseResult<TestCase> {
        let span_start = self.last_span();
        let mut matches = Vec::new();

        if self.current_text() != "in" {
            matches.push(self.parse_test_match()?);
            while self.match_token(TokenKind::Comma) {
                matches.push(self.parse_test_match()?);
            }
        }

        let haystack = if self.match_contextual("in") {
            Some(self.expect_literal()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        if let Some(literal) = haystack {
            return Ok(TestCase::MatchAll(TestCaseMatchAll {
                literal,
                matches,
                span: span_start.join(self.last_span()),
            }));
        }
        if matches.len() > 1 {
            let span = match (matches.first(), matches.last()) {
                (Some(first), Some(last)) => first.span.join(last.span),
                _ => Span::EMPTY,
            };
            return Err(ParseError::new(
                ParseErrorKind::MultipleStringsInTestCase,
                span,
            ));
        }
        matches
            .pop()
            .map(TestCase::Match)
            .ok_or_else(|| ParseError::expected_token(self.span(), TokenKind::String))
    }

    /// Parses the rest of `reject [in] 'a';`.
    fn parse_test_case_reject(&mut self) -> ParseResult<TestCase> {
        let span_start = self.last_span();
        let as_substring = self.match_contextual("in");
        let literal = self.expect_literal()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(TestCase::Reject(TestCaseReject {
            literal,
            as_substring,
            span: span_start.join(self.last_span()),
        }))
    }

    /// Parses a string with an optional `as { captures }` block.
    fn parse_test_match(&mut self) -> ParseResult<TestCaseMatch> {
        let literal = self.expect_literal()?;
        let span_start = literal.span;
        let mut captures = Vec::new();

        if self.match_contextual("as") {
            self.expect(TokenKind::OpenBrace)?;
            while let Some(capture) = self.parse_test_capture()? {
                captures.push(capture);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::CloseBrace)?;
        }

        Ok(TestCaseMatch {
            literal,
            captures,
            span: span_start.join(self.last_span()),
        })
    }

    /// Parses `ident: 'text'` where `ident` is a group number or name.
    fn parse_test_capture(&mut self) -> ParseResult<Option<TestCapture>> {
        let ident = if let Some(number) = self.match_number(MAX_REPETITION)? {
            CaptureIdent::Number(number)
        } else if let Some(name) = self.match_as(TokenKind::Identifier) {
            CaptureIdent::Name(name.into())
        } else {
            return Ok(None);
        };
        let ident_span = self.last_span();

        self.expect(TokenKind::Colon)?;
        let literal = self.expect_literal()?;
        Ok(Some(TestCapture {
            ident,
            ident_span,
            literal,
        }))
    }

    fn expect_literal(&mut self) -> ParseResult<Literal> {
        self.parse_literal()
            .ok_or_else(|| ParseError::expected_token(self.span(), TokenKind::String))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        BooleanSetting, CaptureIdent, Literal, Quantifier, Rule, Stmt, Test, TestCapture,
        TestCase, TestCaseMatch, TestCaseMatchAll, TestCaseReject,
    };
    use crate::source_analysis::parser::tests::{parse_err, parse_ok};
    use crate::source_analysis::{Expected, ParseErrorKind, Span, TokenKind};

    /// Returns the statement and inner rule of a top-level `StmtExpr`.
    fn split_stmt(rule: Rule) -> (Stmt, Rule, Span) {
        match rule {
            Rule::StmtExpr { stmt, rule, span } => (*stmt, *rule, span),
            other => panic!("Expected a statement, got {other:?}"),
        }
    }

    fn test_cases(source: &str) -> Vec<TestCase> {
        match split_stmt(parse_ok(source)).0 {
            Stmt::Test(Test { cases, .. }) => cases,
            other => panic!("Expected a test block, got {other:?}"),
        }
    }

    fn lit(content: &str, start: u32, end: u32) -> Literal {
        Literal::new(content, Span::new(start, end))
    }

    #[test]
    fn mode_modifiers() {
        let (stmt, _, span) = split_stmt(parse_ok("enable lazy; 'a'"));
        assert_eq!(
            stmt,
            Stmt::Enable {
                setting: BooleanSetting::Lazy,
                span: Span::new(0, 12),
            }
        );
        assert_eq!(span, Span::new(0, 16));

        let (stmt, _, _) = split_stmt(parse_ok("disable unicode; 'a'"));
        assert_eq!(
            stmt,
            Stmt::Disable {
                setting: BooleanSetting::Unicode,
                span: Span::new(0, 16),
            }
        );
    }

    #[test]
    fn mode_modifier_errors() {
        let err = parse_err("enable greedy;");
        assert_eq!(err.kind, ParseErrorKind::Expected);
        assert_eq!(err.expected, Some(Expected::Description("`lazy` or `unicode`")));
        assert_eq!(err.span, Span::new(7, 13));

        let err = parse_err("enable lazy 'a'");
        assert_eq!(err.kind, ParseErrorKind::ExpectedToken);
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::Semicolon)));
        assert_eq!(err.span, Span::new(12, 15));
    }

    #[test]
    fn lazy_mode_applies_to_following_repetitions() {
        let (_, rule, _) = split_stmt(parse_ok("enable lazy; 'a'+ 'b'+ greedy"));
        let Rule::Group(group) = rule else {
            panic!("Expected a sequence");
        };
        let quantifiers: Vec<_> = group
            .rules
            .iter()
            .map(|rule| match rule {
                Rule::Repetition { quantifier, .. } => *quantifier,
                other => panic!("Expected a repetition, got {other:?}"),
            })
            .collect();
        assert_eq!(quantifiers, [Quantifier::DefaultLazy, Quantifier::Greedy]);
    }

    #[test]
    fn settings_are_scoped_to_groups() {
        let Rule::Group(sequence) = parse_ok("(enable lazy; 'a'+) 'b'+") else {
            panic!("Expected a sequence");
        };
        let Rule::Group(group) = &sequence.rules[0] else {
            panic!("Expected a group");
        };
        let Rule::StmtExpr { rule: inner, .. } = &group.rules[0] else {
            panic!("Expected a statement");
        };
        assert!(matches!(
            **inner,
            Rule::Repetition {
                quantifier: Quantifier::DefaultLazy,
                ..
            }
        ));
        assert!(matches!(
            sequence.rules[1],
            Rule::Repetition {
                quantifier: Quantifier::DefaultGreedy,
                ..
            }
        ));
    }

    #[test]
    fn settings_are_scoped_to_lookarounds() {
        let Rule::Group(sequence) = parse_ok("(>> disable unicode; [w]) [w]") else {
            panic!("Expected a sequence");
        };
        let Rule::Group(group) = &sequence.rules[0] else {
            panic!("Expected a group");
        };
        let Rule::Lookaround { rule: lookahead, .. } = &group.rules[0] else {
            panic!("Expected a lookahead");
        };
        let Rule::StmtExpr { rule: inner, .. } = &**lookahead else {
            panic!("Expected a statement");
        };
        let Rule::CharClass(inner) = &**inner else {
            panic!("Expected a character class");
        };
        assert!(!inner.is_unicode_aware());

        let Rule::CharClass(outer) = &sequence.rules[1] else {
            panic!("Expected a character class");
        };
        assert!(outer.is_unicode_aware());
    }

    #[test]
    fn let_statement() {
        let (stmt, rule, span) = split_stmt(parse_ok("let a = 'x' | 'y'; a"));
        let Stmt::Let(binding) = stmt else {
            panic!("Expected a let statement");
        };
        assert_eq!(binding.name, "a");
        assert_eq!(binding.name_span, Span::new(4, 5));
        assert!(matches!(binding.rule, Rule::Alternation { .. }));
        assert_eq!(
            rule,
            Rule::Variable {
                name: "a".into(),
                span: Span::new(19, 20),
            }
        );
        assert_eq!(span, Span::new(0, 20));
    }

    #[test]
    fn let_statement_errors() {
        let err = parse_err("let 'a' = 'b';");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::Identifier)));
        assert_eq!(err.span, Span::new(4, 7));

        let err = parse_err("let lazy = 'b';");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::Identifier)));

        let err = parse_err("let a 'b';");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::Equals)));

        let err = parse_err("let a = 'b' ) a");
        assert_eq!(err.kind, ParseErrorKind::Expected);
        assert_eq!(err.expected, Some(Expected::Description("expression or `;`")));
        assert_eq!(err.span, Span::new(12, 13));
    }

    #[test]
    fn statement_without_rule_wraps_empty_literal() {
        let (_, rule, span) = split_stmt(parse_ok("let a = 'b';"));
        assert_eq!(rule, Rule::Literal(Literal::empty()));
        assert_eq!(span, Span::new(0, 12));
    }

    #[test]
    fn test_block_cases() {
        let source = "test { match 'a'; match 'b' as { 1: 'b', name: 'b', }; reject 'c'; reject in 'd'; } 'a'";
        let cases = test_cases(source);
        assert_eq!(
            cases,
            vec![
                TestCase::Match(TestCaseMatch {
                    literal: lit("a", 13, 16),
                    captures: Vec::new(),
                    span: Span::new(13, 16),
                }),
                TestCase::Match(TestCaseMatch {
                    literal: lit("b", 24, 27),
                    captures: vec![
                        TestCapture {
                            ident: CaptureIdent::Number(1),
                            ident_span: Span::new(33, 34),
                            literal: lit("b", 36, 39),
                        },
                        TestCapture {
                            ident: CaptureIdent::Name("name".into()),
                            ident_span: Span::new(41, 45),
                            literal: lit("b", 47, 50),
                        },
                    ],
                    span: Span::new(24, 53),
                }),
                TestCase::Reject(TestCaseReject {
                    literal: lit("c", 62, 65),
                    as_substring: false,
                    span: Span::new(55, 66),
                }),
                TestCase::Reject(TestCaseReject {
                    literal: lit("d", 77, 80),
                    as_substring: true,
                    span: Span::new(67, 81),
                }),
            ]
        );
    }

    #[test]
    fn test_block_match_all() {
        let cases = test_cases("test { match 'a', 'b' in 'a b'; } 'a'");
        assert_eq!(
            cases,
            vec![TestCase::MatchAll(TestCaseMatchAll {
                literal: lit("a b", 25, 30),
                matches: vec![
                    TestCaseMatch {
                        literal: lit("a", 13, 16),
                        captures: Vec::new(),
                        span: Span::new(13, 16),
                    },
                    TestCaseMatch {
                        literal: lit("b", 18, 21),
                        captures: Vec::new(),
                        span: Span::new(18, 21),
                    },
                ],
                span: Span::new(7, 31),
            })]
        );

        let cases = test_cases("test { match in 'abc'; }");
        let [TestCase::MatchAll(all)] = cases.as_slice() else {
            panic!("Expected one match-all case, got {cases:?}");
        };
        assert!(all.matches.is_empty());
        assert_eq!(all.literal.content, "abc");
    }

    #[test]
    fn test_block_errors() {
        let err = parse_err("test { match 'a', 'b'; }");
        assert_eq!(err.kind, ParseErrorKind::MultipleStringsInTestCase);
        assert_eq!(err.span, Span::new(13, 21));

        let err = parse_err("test { match; }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::String)));
        assert_eq!(err.span, Span::new(12, 13));

        let err = parse_err("test { reject in; }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::String)));

        let err = parse_err("test { match 'a' in; }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::String)));
        assert_eq!(err.span, Span::new(19, 20));

        let err = parse_err("test { match 'a' as { 1 'a' }; }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::Colon)));

        let err = parse_err("test { match 'a' as { 1: 'a'; }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::CloseBrace)));

        let err = parse_err("test { match 'a' as { 70000: 'a' }; }");
        assert_eq!(err.kind, ParseErrorKind::NumberTooLarge);

        let err = parse_err("test { match 'a' }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::Semicolon)));

        let err = parse_err("test match 'a';");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::OpenBrace)));

        let err = parse_err("test { foo }");
        assert_eq!(err.expected, Some(Expected::Token(TokenKind::CloseBrace)));
        assert_eq!(err.span, Span::new(7, 10));
    }
}
