// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Tests for the public parsing API.
//!
//! These exercise the crate the way a compiler front end would: tokenize
//! once, parse, and walk the resulting tree or report the errors.

use miette::Diagnostic;
use rulex_syntax::ast::{
    BooleanSetting, CharClassItem, GroupKind, Quantifier, ReferenceTarget, RepetitionKind, Rule,
    Stmt, TestCase,
};
use rulex_syntax::prelude::*;
use rulex_syntax::source_analysis::{ParseOptions, parse_tokens, parse_with_options, tokenize};

/// Unwraps nested statements, returning them in source order with the body.
fn statements(mut rule: Rule) -> (Vec<Stmt>, Rule) {
    let mut stmts = Vec::new();
    while let Rule::StmtExpr { stmt, rule: inner, .. } = rule {
        stmts.push(*stmt);
        rule = *inner;
    }
    (stmts, rule)
}

#[test]
fn parse_realistic_pattern() {
    let source = "\
# An IPv4 octet, then a word boundary
let octet = range '0'-'255';
test {
    match '127.0.0.1';
    reject '256.0.0.1';
}
:ip(octet ('.' octet){3}) %
";
    let rule = parse(source).expect("valid pattern");
    let (stmts, body) = statements(rule);

    assert_eq!(stmts.len(), 2);
    let Stmt::Let(binding) = &stmts[0] else {
        panic!("Expected a let binding, got {:?}", stmts[0]);
    };
    assert_eq!(binding.name.as_str(), "octet");
    assert!(matches!(
        &binding.rule,
        Rule::Range { start, end, radix: 10, .. } if start.as_str() == "0" && end.as_str() == "255"
    ));

    let Stmt::Test(test) = &stmts[1] else {
        panic!("Expected a test block, got {:?}", stmts[1]);
    };
    assert_eq!(test.cases.len(), 2);
    assert!(matches!(
        &test.cases[0],
        TestCase::Match(case) if case.literal.content.as_str() == "127.0.0.1"
    ));
    assert!(matches!(&test.cases[1], TestCase::Reject(case) if !case.as_substring));

    let Rule::Group(sequence) = body else {
        panic!("Expected a sequence, got {body:?}");
    };
    assert_eq!(sequence.kind, GroupKind::Implicit);
    assert_eq!(sequence.rules.len(), 2);
    let Rule::Group(capture) = &sequence.rules[0] else {
        panic!("Expected a named group");
    };
    assert_eq!(capture.kind, GroupKind::Named("ip".into()));
    assert!(matches!(sequence.rules[1], Rule::Boundary { .. }));
    assert_eq!(&source[sequence.span.as_range()], ":ip(octet ('.' octet){3}) %");
}

#[test]
fn tokens_can_be_reused() {
    let source = "['a'-'f' U+30-U+39]+ lazy";
    let tokens = tokenize(source);
    let from_tokens = parse_tokens(source, &tokens).expect("valid pattern");
    assert_eq!(from_tokens, parse(source).expect("valid pattern"));

    let Rule::Repetition {
        rule,
        kind,
        quantifier,
        ..
    } = from_tokens
    else {
        panic!("Expected a repetition");
    };
    assert_eq!(
        kind,
        RepetitionKind {
            lower: 1,
            upper: None,
        }
    );
    assert_eq!(quantifier, Quantifier::Lazy);
    let Rule::CharClass(class) = *rule else {
        panic!("Expected a character class");
    };
    assert_eq!(
        class.items(),
        [
            CharClassItem::Range {
                first: 'a',
                last: 'f',
            },
            CharClassItem::Range {
                first: '0',
                last: '9',
            },
        ]
    );
}

#[test]
fn options_seed_ambient_modes() {
    let options = ParseOptions {
        lazy_by_default: true,
        unicode_aware_by_default: false,
        ..ParseOptions::default()
    };
    let rule = parse_with_options("[w]* (enable unicode; [w])", None, &options)
        .expect("valid pattern");
    let Rule::Group(sequence) = rule else {
        panic!("Expected a sequence");
    };

    let Rule::Repetition {
        rule, quantifier, ..
    } = &sequence.rules[0]
    else {
        panic!("Expected a repetition");
    };
    assert_eq!(*quantifier, Quantifier::DefaultLazy);
    assert!(matches!(&**rule, Rule::CharClass(class) if !class.is_unicode_aware()));

    let Rule::Group(group) = &sequence.rules[1] else {
        panic!("Expected a group");
    };
    let (stmts, inner) = statements(group.rules[0].clone());
    assert!(matches!(
        stmts[..],
        [Stmt::Enable {
            setting: BooleanSetting::Unicode,
            ..
        }]
    ));
    assert!(matches!(inner, Rule::CharClass(class) if class.is_unicode_aware()));
}

#[test]
fn references_keep_their_sign() {
    let rule = parse("::-1 ::+1 ::1 ::name").expect("valid pattern");
    let Rule::Group(sequence) = rule else {
        panic!("Expected a sequence");
    };
    let targets: Vec<_> = sequence
        .rules
        .iter()
        .map(|rule| match rule {
            Rule::Reference { target, .. } => target.clone(),
            other => panic!("Expected a reference, got {other:?}"),
        })
        .collect();
    assert_eq!(
        targets,
        [
            ReferenceTarget::Relative(-1),
            ReferenceTarget::Relative(1),
            ReferenceTarget::Number(1),
            ReferenceTarget::Named("name".into()),
        ]
    );
}

#[test]
fn empty_source_is_the_empty_literal() {
    assert_eq!(parse("").expect("valid"), Rule::Literal(Literal::empty()));
    assert_eq!(
        parse("  # only a comment\n").expect("valid"),
        Rule::Literal(Literal::empty())
    );
}

#[test]
fn all_lexer_errors_are_reported() {
    let errors = parse("~ 'a' 'open").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind, ParseErrorKind::UnknownToken);
    assert_eq!(errors[1].kind, ParseErrorKind::UnclosedString);
}

#[test]
fn errors_render_as_diagnostics() {
    let errors = parse("'a' |").unwrap_err();
    assert_eq!(errors.len(), 1);
    let error = &errors[0];
    assert_eq!(error.kind, ParseErrorKind::LonePipe);
    assert_eq!(error.to_string(), "a pipe must be followed by an expression");

    let labels: Vec<_> = error.labels().expect("labelled").collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 4);
    assert_eq!(labels[0].len(), 1);
    assert_eq!(labels[0].label(), Some("here"));
}

#[test]
fn error_spans_slice_the_source() {
    let source = "'a'{5,2}";
    let errors = parse(source).unwrap_err();
    assert_eq!(errors[0].kind, ParseErrorKind::NotAscendingRepetition);
    assert_eq!(&source[errors[0].span.as_range()], "5,2");
}

#[test]
fn leftover_input_is_an_error() {
    let errors = parse("'a' )").unwrap_err();
    assert_eq!(errors[0].kind, ParseErrorKind::LeftoverTokens);
    assert_eq!(errors[0].span, Span::new(4, 5));
}
