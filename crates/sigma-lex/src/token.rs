#![forbid(unsafe_code)]

//! Token model shared by every scanner.
//!
//! A run produces four span collections besides the word set:
//!
//! - [`Token`]: a classified span, drives coloring.
//! - [`RangeToken`]: a literal or comment extent, consulted to skip bracket
//!   matching inside it.
//! - [`MultiCommentToken`]: a block comment extent, consulted to decide whether
//!   the caret sits inside a comment.
//! - [`FoldToken`]: a candidate collapsible region.
//!
//! All offsets are byte offsets into the scanned text.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Token kinds
// ---------------------------------------------------------------------------

/// Coarse role of a token kind, shared across languages.
///
/// Hosts that do not care about per-language palettes can style by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Comment,
    String,
    Keyword,
    Identifier,
    Number,
    Operator,
    Brace,
    Macro,
    Markup,
    Text,
}

/// A per-language token kind.
///
/// Ids are dense (`0..COUNT`) and stable so a color palette can be indexed by
/// them. Kinds of an embedded language are remapped into the host's id range
/// through a `From` conversion.
pub trait TokenKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Number of kinds, i.e. the palette size for this language.
    const COUNT: usize;

    /// Palette id of this kind.
    fn id(self) -> u8;

    /// Stable lowercase display name.
    fn name(self) -> &'static str;

    /// Coarse role of this kind.
    fn category(self) -> Category;

    /// Reverse of [`TokenKind::id`].
    fn from_id(id: u8) -> Option<Self>;

    /// Whether this kind is a comment variant.
    fn is_comment(self) -> bool {
        self.category() == Category::Comment
    }

    /// Whether this kind is a string or character literal variant.
    fn is_string(self) -> bool {
        self.category() == Category::String
    }

    /// Whether this kind is a keyword variant.
    fn is_keyword(self) -> bool {
        self.category() == Category::Keyword
    }
}

/// Declare a language's token-kind enum and implement [`TokenKind`] for it.
///
/// Variants must be listed in id order starting at zero.
macro_rules! token_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $id:literal => ($label:literal, $cat:ident),
            )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $id, )+
        }

        impl $name {
            /// Every kind, in id order.
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];
        }

        impl $crate::token::TokenKind for $name {
            const COUNT: usize = $name::ALL.len();

            fn id(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            fn category(self) -> $crate::token::Category {
                match self {
                    $( $name::$variant => $crate::token::Category::$cat, )+
                }
            }

            fn from_id(id: u8) -> Option<Self> {
                match id {
                    $( $id => Some($name::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use token_kinds;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A classified span of source text.
///
/// Tokens of one run are ordered by `range.start` and never overlap. Text
/// between tokens (whitespace, unclassified punctuation) carries no token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub range: Range<usize>,
    /// Set when this span is an occurrence of the caller's highlight word.
    pub highlight: bool,
    /// Literal text, kept for words, operators and tag names.
    pub lexeme: Option<String>,
}

impl<K: TokenKind> Token<K> {
    /// Create a token. Panics in debug builds if the range is inverted.
    pub fn new(kind: K, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "token range must be ordered");
        Self {
            kind,
            range,
            highlight: false,
            lexeme: None,
        }
    }

    /// Create a token with an explicit highlight flag.
    pub fn highlighted(kind: K, range: Range<usize>, highlight: bool) -> Self {
        Self {
            highlight,
            ..Self::new(kind, range)
        }
    }

    /// Attach the literal text.
    #[must_use]
    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }

    /// Offset of the first byte.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Offset one past the last byte.
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Extract the token's text from a source string.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }

    /// Remap the kind into another language's id space.
    pub fn map_kind<J: TokenKind + From<K>>(self) -> Token<J> {
        Token {
            kind: J::from(self.kind),
            range: self.range,
            highlight: self.highlight,
            lexeme: self.lexeme,
        }
    }
}

// ---------------------------------------------------------------------------
// Auxiliary spans
// ---------------------------------------------------------------------------

/// Extent of a string/char literal, macro or comment.
///
/// `end` is inclusive: it is the offset of the construct's last byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RangeToken {
    pub start: usize,
    pub end: usize,
}

impl RangeToken {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range token must be ordered");
        Self { start, end }
    }

    /// Whether `offset` lies within the span (both ends included).
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Extent of a block comment (`/* */`, `/** */`, `/+ +/`).
///
/// `end` is exclusive. Line comments never produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MultiCommentToken {
    pub start: usize,
    pub end: usize,
}

impl MultiCommentToken {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "comment span must be ordered");
        Self { start, end }
    }

    /// Whether `offset` lies inside the comment.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A collapsible region: `start` is the opening brace, `end` the closing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FoldToken {
    pub start: usize,
    pub end: usize,
}

impl FoldToken {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "fold span must be ordered");
        Self { start, end }
    }

    /// Whether `offset` lies between the two braces (inclusive).
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that tokens are non-empty, ordered, non-overlapping, on character
/// boundaries and within `source[start..]`.
pub fn validate_tokens<K: TokenKind>(source: &str, start: usize, tokens: &[Token<K>]) -> bool {
    let len = source.len();
    let mut prev_end = start;
    for token in tokens {
        if token.range.start >= token.range.end {
            return false;
        }
        if token.range.end > len {
            return false;
        }
        if token.range.start < prev_end {
            return false;
        }
        if !source.is_char_boundary(token.range.start) || !source.is_char_boundary(token.range.end)
        {
            return false;
        }
        prev_end = token.range.end;
    }
    true
}
