// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing for rulex source code.
//!
//! This module contains the tokenizer, the parser and their error types.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each token
//! carries its source location via [`Span`]. Whitespace and `#` comments are
//! skipped.
//!
//! ```
//! use rulex_syntax::source_analysis::{TokenKind, tokenize};
//!
//! let tokens = tokenize("'a'+ # one or more");
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].kind(), TokenKind::Plus);
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into a [`Rule`](crate::ast::Rule)
//! tree (see the `parser` module docs for the grammar). [`ParseOptions`]
//! seeds the lazy and Unicode modes and bounds nesting depth.
//!
//! # Error Handling
//!
//! The lexer never fails: invalid input becomes error tokens such as
//! [`TokenKind::UnclosedString`]. The parser reports every error token it
//! finds before parsing, then stops at the first grammar error. All errors
//! are [`ParseError`]s with miette integration.

mod error;
mod lexer;
mod parser;
pub(crate) mod quoted;
mod span;
mod token;


pub use error::{Expected, ParseError, ParseErrorKind};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseOptions, parse, parse_tokens, parse_with_options};
pub use span::Span;
pub use token::{RESERVED_WORDS, Token, TokenKind, is_reserved};
