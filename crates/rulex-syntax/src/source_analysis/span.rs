// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and every [`Rule`](crate::ast::Rule) carries a `Span` pointing
//! back to the source text it was built from.

use std::ops::Range;

/// A half-open range of byte offsets `[start, end)` into the source text.
///
/// `[0, 0]` doubles as the "absent" sentinel: [`Span::join`] ignores it, so
/// optional sub-spans can be combined without special-casing every call site.
///
/// # Examples
///
/// ```
/// use rulex_syntax::source_analysis::Span;
///
/// let span = Span::new(2, 7);
/// assert_eq!(span.len(), 5);
/// assert_eq!(span.join(Span::new(10, 12)), Span::new(2, 12));
/// assert_eq!(Span::EMPTY.join(span), span);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// The sentinel span, `[0, 0]`.
    pub const EMPTY: Self = Self::new(0, 0);

    /// Creates a new span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span covers no text.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns true if this is the `[0, 0]` sentinel.
    ///
    /// Only the end offset is inspected: a span ending at 0 cannot start
    /// anywhere else.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.end == 0
    }

    /// Returns the tightest span covering both `self` and `other`.
    ///
    /// A sentinel operand is ignored and the other operand is returned
    /// unchanged. Zero-length spans anywhere else in the source still count.
    #[must_use]
    pub const fn join(self, other: Self) -> Self {
        if self.is_sentinel() {
            return other;
        }
        if other.is_sentinel() {
            return self;
        }
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Converts to a `Range<usize>` for indexing into source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Range<usize>> for Span {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "sources over 4GB are not supported"
    )]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}
