// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! rulex syntax core.
//!
//! This crate contains the front end of the rulex pattern language:
//! - Lexical analysis (tokenization)
//! - Parsing (AST construction)
//! - Structured, span-labelled errors
//!
//! Compiling a [`Rule`](ast::Rule) to a regex flavor is left to consumers;
//! nothing here resolves variables or validates Unicode property names.

pub mod ast;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Literal, Rule, Stmt};
    pub use crate::source_analysis::{ParseError, ParseErrorKind, Span, parse};
}
