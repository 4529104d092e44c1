// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for rulex source code.
//!
//! The parser turns a token list into a single [`Rule`] tree. It stops at the
//! first grammar error; lexer errors are the exception and are all reported
//! together before parsing starts.
//!
//! # Grammar
//!
//! From loosest to tightest binding:
//!
//! | Production | Form | Node |
//! |------------|------|------|
//! | modified   | `stmt* or` | [`Rule::StmtExpr`] per statement |
//! | or         | `\|? and (\| and)*` | [`Rule::Alternation`] |
//! | and        | `&? seq (& seq)*` | [`Rule::Intersection`] |
//! | sequence   | `fix+` | implicit [`Group`](crate::ast::Group) |
//! | fix        | `!* (lookaround \| atom) repetition*` | [`Rule::Negation`], [`Rule::Repetition`] |
//!
//! # Ambient state
//!
//! `enable lazy;` and `disable unicode;` change how later repetitions and
//! character classes are parsed. Each modified expression saves both flags on
//! entry and restores them on exit, so a group never leaks its settings to the
//! surrounding expression.
//!
//! # Usage
//!
//! ```
//! use rulex_syntax::ast::Rule;
//! use rulex_syntax::source_analysis::parse;
//!
//! let rule = parse("'a' | 'b'").expect("valid input");
//! assert!(matches!(rule, Rule::Alternation { .. }));
//!
//! let errors = parse("'a' |").unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

use std::str::FromStr;

use tracing::{debug, instrument};

use crate::ast::Rule;
use crate::source_analysis::{ParseError, ParseErrorKind, Span, Token, TokenKind, tokenize};

mod char_class;
mod expressions;
mod statements;


/// Result of a single grammar production.
pub(super) type ParseResult<T> = Result<T, ParseError>;

/// Largest number accepted as a repetition bound, group index or capture index.
pub(super) const MAX_REPETITION: u32 = 65_535;

/// Settings that seed the parser's ambient state.
///
/// The defaults match a source file with no `enable`/`disable` statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether repetitions without `greedy`/`lazy` start out lazy.
    pub lazy_by_default: bool,
    /// Whether character classes start out Unicode-aware.
    pub unicode_aware_by_default: bool,
    /// Maximum number of nested groups and lookarounds.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            lazy_by_default: false,
            unicode_aware_by_default: true,
            max_nesting_depth: 127,
        }
    }
}

/// Parses `source` into a [`Rule`] using default options.
///
/// # Errors
///
/// Returns every lexer error in the input, or else the first grammar error.
/// The returned list is never empty.
pub fn parse(source: &str) -> Result<Rule, Vec<ParseError>> {
    parse_with_options(source, None, &ParseOptions::default())
}

/// Parses `source` using a token list produced earlier by
/// [`tokenize`](crate::source_analysis::tokenize).
///
/// # Errors
///
/// See [`parse`].
pub fn parse_tokens(source: &str, tokens: &[Token]) -> Result<Rule, Vec<ParseError>> {
    parse_with_options(source, Some(tokens), &ParseOptions::default())
}

/// Parses `source` with explicit options.
///
/// If `tokens` is `Some`, lexing is skipped and the given tokens are used as
/// is; their spans must refer to `source`.
///
/// # Errors
///
/// See [`parse`].
#[instrument(level = "debug", skip_all, fields(source_len = source.len()))]
pub fn parse_with_options(
    source: &str,
    tokens: Option<&[Token]>,
    options: &ParseOptions,
) -> Result<Rule, Vec<ParseError>> {
    let owned;
    let tokens = if let Some(tokens) = tokens {
        tokens
    } else {
        owned = tokenize(source);
        &owned
    };
    debug!(token_count = tokens.len(), "parsing");

    let errors: Vec<_> = tokens
        .iter()
        .copied()
        .filter_map(ParseError::from_token)
        .collect();
    if !errors.is_empty() {
        debug!(error_count = errors.len(), "lexer errors, skipping parse");
        return Err(errors);
    }

    let mut parser = Parser::new(source, tokens, options);
    let rule = parser.parse_modified().map_err(|error| vec![error])?;
    if !parser.is_at_end() {
        let span = parser.span();
        debug!(offset = span.start(), "leftover tokens");
        return Err(vec![ParseError::new(ParseErrorKind::LeftoverTokens, span)]);
    }
    Ok(rule)
}

/// The parser state.
pub(super) struct Parser<'src> {
    /// The source text the tokens were produced from.
    source: &'src str,
    /// The tokens being parsed.
    tokens: &'src [Token],
    /// Current token index.
    current: usize,
    /// Whether repetitions are lazy unless marked `greedy`.
    pub(super) is_lazy: bool,
    /// Whether character classes are Unicode-aware.
    pub(super) is_unicode_aware: bool,
    /// Current nesting depth of modified expressions.
    nesting_depth: usize,
    /// Depth at which parsing fails with [`ParseErrorKind::RecursionLimit`].
    max_nesting_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given tokens.
    fn new(source: &'src str, tokens: &'src [Token], options: &ParseOptions) -> Self {
        Self {
            source,
            tokens,
            current: 0,
            is_lazy: options.lazy_by_default,
            is_unicode_aware: options.unicode_aware_by_default,
            nesting_depth: 0,
            max_nesting_depth: options.max_nesting_depth,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token, or `None` at the end of input.
    pub(super) fn current_token(&self) -> Option<Token> {
        self.tokens.get(self.current).copied()
    }

    /// Returns the text of the current token, or `""` at the end of input.
    pub(super) fn current_text(&self) -> &'src str {
        self.current_token().map_or("", |token| token.text(self.source))
    }

    /// Checks if all tokens have been consumed.
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Returns the span of the current token.
    ///
    /// At the end of input this is the empty span after the last byte.
    pub(super) fn span(&self) -> Span {
        self.current_token().map_or_else(
            || Span::from(self.source.len()..self.source.len()),
            Token::span,
        )
    }

    /// Returns the span of the most recently consumed token.
    pub(super) fn last_span(&self) -> Span {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or(Span::EMPTY, |token| token.span())
    }

    /// Advances past the current token.
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// Checks if the current token has the given kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current_token().is_some_and(|token| token.kind() == kind)
    }

    /// Consumes the current token if it has the given kind.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it has the given kind, returning its text.
    pub(super) fn match_as(&mut self, kind: TokenKind) -> Option<&'src str> {
        if self.check(kind) {
            let text = self.current_text();
            self.advance();
            Some(text)
        } else {
            None
        }
    }

    /// Consumes the reserved word `word`.
    pub(super) fn match_reserved(&mut self, word: &str) -> bool {
        if self.check(TokenKind::ReservedName) && self.current_text() == word {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the plain identifier `word`, which acts as a keyword only in
    /// some positions (`unicode`, `match`, `in`, ...).
    pub(super) fn match_contextual(&mut self, word: &str) -> bool {
        if self.check(TokenKind::Identifier) && self.current_text() == word {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a number token no larger than `max`.
    ///
    /// A number above `max` is an error, not a mismatch.
    pub(super) fn match_number(&mut self, max: u32) -> ParseResult<Option<u32>> {
        let Some(token) = self.current_token().filter(|t| t.kind() == TokenKind::Number) else {
            return Ok(None);
        };
        match parse_digits::<u32>(token.text(self.source)) {
            Some(value) if value <= max => {
                self.advance();
                Ok(Some(value))
            }
            _ => Err(ParseError::new(ParseErrorKind::NumberTooLarge, token.span())),
        }
    }

    /// Expects the current token to have the given kind and consumes it.
    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        self.expect_as(kind).map(|_| ())
    }

    /// Like [`Self::expect`], returning the token text.
    pub(super) fn expect_as(&mut self, kind: TokenKind) -> ParseResult<&'src str> {
        self.match_as(kind)
            .ok_or_else(|| ParseError::expected_token(self.span(), kind))
    }

    /// Expects a number that fits in `T`.
    pub(super) fn expect_number<T: FromStr>(&mut self) -> ParseResult<T> {
        let span = self.span();
        let text = self.expect_as(TokenKind::Number)?;
        parse_digits(text).ok_or_else(|| ParseError::new(ParseErrorKind::NumberTooLarge, span))
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Increments the nesting depth, failing with an error at `span` once it
    /// exceeds the configured maximum. Call [`Self::leave_nesting`] on every
    /// exit path when this returns `Ok(())`.
    ///
    /// Groups, lookarounds, prefix `!` and statements each add a level, since
    /// each wraps what follows in one more boxed node.
    pub(super) fn enter_nesting(&mut self, span: Span) -> ParseResult<()> {
        if self.nesting_depth >= self.max_nesting_depth {
            debug!(depth = self.nesting_depth, "nesting limit reached");
            return Err(ParseError::new(ParseErrorKind::RecursionLimit, span));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Self::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}

/// Parses a number lexeme, ignoring `_` separators.
fn parse_digits<T: FromStr>(text: &str) -> Option<T> {
    if text.contains('_') {
        text.replace('_', "").parse().ok()
    } else {
        text.parse().ok()
    }
}
