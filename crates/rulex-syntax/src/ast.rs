// Copyright 2026 The rulex developers
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for rulex.
//!
//! The AST is the parser's output: a tree of [`Rule`] nodes, each owning its
//! children and carrying the [`Span`] of the source text it was built from.
//! Names are not resolved here; a [`Rule::Variable`] is just a name.
//!
//! # Example
//!
//! ```ignore
//! // Source: 'a' | 'b'+
//! Rule::Alternation {
//!     rules: vec![
//!         Rule::Literal(Literal { content: "a".into(), span: [0, 3] }),
//!         Rule::Repetition {
//!             rule: Box::new(Rule::Literal(Literal { content: "b".into(), span: [6, 9] })),
//!             kind: RepetitionKind { lower: 1, upper: None },
//!             quantifier: Quantifier::DefaultGreedy,
//!             span: [6, 10],
//!         },
//!     ],
//!     span: [0, 10],
//! }
//! ```

use ecow::EcoString;

use crate::source_analysis::Span;

/// A node of the pattern grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A quoted string, matched literally.
    Literal(Literal),

    /// A bracketed character class, `[a-z w]`.
    CharClass(CharClass),

    /// A parenthesized group or an implicit sequence.
    Group(Group),

    /// Alternatives separated by `|`. Always holds at least two rules.
    Alternation {
        /// The alternatives, in source order.
        rules: Vec<Rule>,
        /// Source location.
        span: Span,
    },

    /// Operands joined by `&`. Always holds at least two rules.
    Intersection {
        /// The operands, in source order.
        rules: Vec<Rule>,
        /// Source location.
        span: Span,
    },

    /// A repeated rule: `r*`, `r+`, `r?`, `r{n,m}`.
    Repetition {
        /// The repeated rule.
        rule: Box<Rule>,
        /// The repetition bounds.
        kind: RepetitionKind,
        /// How greedily the repetition matches.
        quantifier: Quantifier,
        /// Source location, rule included.
        span: Span,
    },

    /// An assertion such as `^` or `%`.
    Boundary {
        /// Which boundary.
        kind: BoundaryKind,
        /// Source location.
        span: Span,
    },

    /// `>> rule` or `<< rule`.
    Lookaround {
        /// The asserted rule.
        rule: Box<Rule>,
        /// Direction and polarity.
        kind: LookaroundKind,
        /// Source location.
        span: Span,
    },

    /// A name referring to a `let` binding.
    Variable {
        /// The variable name.
        name: EcoString,
        /// Source location.
        span: Span,
    },

    /// A back-reference: `::name`, `::3`, `::-1`.
    Reference {
        /// The group being referenced.
        target: ReferenceTarget,
        /// Source location.
        span: Span,
    },

    /// A numeric range such as `range '0'-'255' base 10`.
    Range {
        /// Lower bound digits.
        start: EcoString,
        /// Upper bound digits.
        end: EcoString,
        /// The base, in `2..=36`.
        radix: u8,
        /// Source location.
        span: Span,
    },

    /// A statement scoped over the rule that follows it.
    StmtExpr {
        /// The statement.
        stmt: Box<Stmt>,
        /// Everything the statement applies to.
        rule: Box<Rule>,
        /// Source location, statement included.
        span: Span,
    },

    /// `!rule`.
    Negation {
        /// The negated rule.
        rule: Box<Rule>,
        /// Location of the `!` tokens.
        not_span: Span,
        /// Source location.
        span: Span,
    },

    /// `regex '...'`, passed through unchanged.
    Regex {
        /// The raw regex text.
        content: EcoString,
        /// Source location.
        span: Span,
    },

    /// The `recursion` keyword.
    Recursion {
        /// Source location.
        span: Span,
    },

    /// `.`, any character.
    Dot {
        /// Source location.
        span: Span,
    },
}

impl Rule {
    /// Returns the source span of this rule.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal(literal) => literal.span,
            Self::CharClass(class) => class.span,
            Self::Group(group) => group.span,
            Self::Alternation { span, .. }
            | Self::Intersection { span, .. }
            | Self::Repetition { span, .. }
            | Self::Boundary { span, .. }
            | Self::Lookaround { span, .. }
            | Self::Variable { span, .. }
            | Self::Reference { span, .. }
            | Self::Range { span, .. }
            | Self::StmtExpr { span, .. }
            | Self::Negation { span, .. }
            | Self::Regex { span, .. }
            | Self::Recursion { span }
            | Self::Dot { span } => *span,
        }
    }
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// The decoded content, quotes removed.
    pub content: EcoString,
    /// Source location, quotes included.
    pub span: Span,
}

impl Literal {
    /// Creates a new literal.
    #[must_use]
    pub fn new(content: impl Into<EcoString>, span: Span) -> Self {
        Self {
            content: content.into(),
            span,
        }
    }

    /// The literal produced for an entirely empty expression.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            content: EcoString::new(),
            span: Span::EMPTY,
        }
    }
}

/// A character class. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    items: Vec<CharClassItem>,
    unicode_aware: bool,
    span: Span,
}

impl CharClass {
    /// Creates a character class, or returns `None` if `items` is empty.
    #[must_use]
    pub fn new(items: Vec<CharClassItem>, unicode_aware: bool, span: Span) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items,
            unicode_aware,
            span,
        })
    }

    /// Returns the items of this class.
    #[must_use]
    pub fn items(&self) -> &[CharClassItem] {
        &self.items
    }

    /// Returns whether Unicode mode was enabled where the class appeared.
    #[must_use]
    pub const fn is_unicode_aware(&self) -> bool {
        self.unicode_aware
    }

    /// Returns the source span of this class.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}

/// One member of a [`CharClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharClassItem {
    /// A single character.
    Char(char),
    /// An inclusive range, `first <= last`.
    Range {
        /// First character.
        first: char,
        /// Last character.
        last: char,
    },
    /// A named class such as `w`, `!space` or `script:Greek`.
    Named {
        /// The class name.
        name: EcoString,
        /// The prefix before `:`, if any.
        kind: Option<EcoString>,
        /// Whether the class was preceded by `!`.
        negative: bool,
        /// Source location of the name, prefix included.
        span: Span,
    },
}

/// A group of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The grouped rules.
    pub rules: Vec<Rule>,
    /// What kind of group this is.
    pub kind: GroupKind,
    /// Source location.
    pub span: Span,
}

/// The role of a [`Group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// `:(...)`
    Capturing,
    /// `atomic(...)`
    Atomic,
    /// `(...)`
    Normal,
    /// Juxtaposed rules without parentheses.
    Implicit,
    /// `:name(...)`
    Named(EcoString),
}

/// Bounds of a repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepetitionKind {
    /// Minimum number of repetitions.
    pub lower: u32,
    /// Maximum number of repetitions, or `None` for unbounded.
    pub upper: Option<u32>,
}

/// How a repetition chooses between matching more or less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Explicit `greedy`.
    Greedy,
    /// Explicit `lazy`.
    Lazy,
    /// No keyword, greedy mode in effect.
    DefaultGreedy,
    /// No keyword, `enable lazy` in effect.
    DefaultLazy,
}

/// Assertion kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// `^`
    Start,
    /// `$`
    End,
    /// `%`
    Word,
    /// `!%`
    NotWord,
    /// `<`
    WordStart,
    /// `>`
    WordEnd,
}

/// Lookaround kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookaroundKind {
    /// `>>`
    Ahead,
    /// `<<`
    Behind,
    /// `!>>`
    AheadNegative,
    /// `!<<`
    BehindNegative,
}

/// The group a [`Rule::Reference`] points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceTarget {
    /// `::name`
    Named(EcoString),
    /// `::3`
    Number(u32),
    /// `::+1` or `::-1`
    Relative(i32),
}

/// A statement prefixed onto a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `enable lazy;`
    Enable {
        /// The setting being turned on.
        setting: BooleanSetting,
        /// Source location of the statement.
        span: Span,
    },
    /// `disable unicode;`
    Disable {
        /// The setting being turned off.
        setting: BooleanSetting,
        /// Source location of the statement.
        span: Span,
    },
    /// `let name = rule;`
    Let(Let),
    /// `test { ... }`
    Test(Test),
}

/// A mode that can be toggled by `enable`/`disable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanSetting {
    /// Lazy repetitions by default.
    Lazy,
    /// Unicode-aware character classes.
    Unicode,
}

/// A variable binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Let {
    /// The bound name.
    pub name: EcoString,
    /// Source location of the name.
    pub name_span: Span,
    /// The bound rule.
    pub rule: Rule,
}

/// A block of test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test {
    /// The cases, in source order.
    pub cases: Vec<TestCase>,
    /// Source location of the block.
    pub span: Span,
}

/// A single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCase {
    /// `match 'x' as { ... };`
    Match(TestCaseMatch),
    /// `match 'a', 'b' in 'a b';`
    MatchAll(TestCaseMatchAll),
    /// `reject in 'x';`
    Reject(TestCaseReject),
}

/// A string expected to match, optionally with captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseMatch {
    /// The matched string.
    pub literal: Literal,
    /// Expected capture groups.
    pub captures: Vec<TestCapture>,
    /// Source location, captures included.
    pub span: Span,
}

/// Strings expected to be found, in order, within a haystack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseMatchAll {
    /// The haystack after `in`.
    pub literal: Literal,
    /// The expected matches.
    pub matches: Vec<TestCaseMatch>,
    /// Source location of the case.
    pub span: Span,
}

/// A string expected not to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseReject {
    /// The rejected string.
    pub literal: Literal,
    /// Whether `in` was given, i.e. no substring may match either.
    pub as_substring: bool,
    /// Source location of the case.
    pub span: Span,
}

/// An expected capture within a [`TestCaseMatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCapture {
    /// The capture group.
    pub ident: CaptureIdent,
    /// Source location of `ident`.
    pub ident_span: Span,
    /// The expected captured text.
    pub literal: Literal,
}

/// Identifies a capture group in a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureIdent {
    /// By index.
    Number(u32),
    /// By name.
    Name(EcoString),
}
