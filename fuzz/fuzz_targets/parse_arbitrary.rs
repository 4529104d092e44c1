// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the lexer and parser and
//! asserts that neither panics. Every input must produce either a rule or a
//! non-empty list of errors whose spans lie within the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rulex_syntax::source_analysis::{parse_tokens, tokenize};

fuzz_target!(|data: &[u8]| {
    // The parser takes `&str`; invalid UTF-8 never reaches it.
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let tokens = tokenize(source);
    if let Err(errors) = parse_tokens(source, &tokens) {
        assert!(!errors.is_empty());
        for error in &errors {
            assert!(error.span.end() as usize <= source.len());
        }
    }
});
