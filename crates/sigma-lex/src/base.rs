#![forbid(unsafe_code)]

//! Rules shared by the programming-language scanners.
//!
//! [`BaseLexer`] recognizes words (keyword 1, keyword 2 or identifier),
//! numbers, quoted literals and single-character operators in that priority
//! order. Language scanners hold one and call [`BaseLexer::step`] after
//! trying their own constructs.

use std::ops::Range;
use std::sync::Arc;

use crate::config::Keywords;
use crate::cursor::{Cursor, is_line_break};
use crate::scan::{HighlightSplit, Scan};
use crate::token::TokenKind;

// ---------------------------------------------------------------------------
// Word shapes
// ---------------------------------------------------------------------------

/// Which characters start and continue a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordShape {
    /// ASCII letter or `_`, then ASCII alphanumerics or `_`.
    Ascii,
    /// Any alphabetic character or `_`, then alphanumerics or `_`.
    Unicode,
    /// A letter, or `-` followed by a letter; then alphanumerics, `-` or `_`.
    Css,
    /// Alphanumerics only.
    Alnum,
}

impl WordShape {
    /// Whether `c` can start a word (for [`WordShape::Css`], a leading `-`
    /// additionally needs a letter after it; see [`WordShape::starts_at`]).
    pub fn is_start(self, c: char) -> bool {
        match self {
            Self::Ascii => c.is_ascii_alphabetic() || c == '_',
            Self::Unicode => c.is_alphabetic() || c == '_',
            Self::Css => c.is_alphabetic(),
            Self::Alnum => c.is_alphanumeric(),
        }
    }

    /// Whether `c` can continue a word.
    pub fn is_part(self, c: char) -> bool {
        match self {
            Self::Ascii => c.is_ascii_alphanumeric() || c == '_',
            Self::Unicode => c.is_alphanumeric() || c == '_',
            Self::Css => c.is_alphanumeric() || c == '-' || c == '_',
            Self::Alnum => c.is_alphanumeric(),
        }
    }

    /// Whether a word starts at the cursor.
    pub fn starts_at(self, cursor: &Cursor<'_>) -> bool {
        match cursor.peek() {
            None => false,
            Some('-') if self == Self::Css => {
                cursor.peek_nth(1).is_some_and(char::is_alphabetic)
            }
            Some(c) => self.is_start(c),
        }
    }
}

// ---------------------------------------------------------------------------
// Base lexer
// ---------------------------------------------------------------------------

/// Kinds the base rules emit, in a language's own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseKinds<K> {
    pub keyword1: K,
    pub keyword2: K,
    pub identifier: K,
    pub number: K,
    pub string: K,
    pub char: K,
    pub operator: K,
}

/// Words, numbers, quoted literals and operators.
#[derive(Debug, Clone)]
pub struct BaseLexer<K> {
    pub kinds: BaseKinds<K>,
    pub shape: WordShape,
    /// Whether `_` may appear inside numbers (`1_000`).
    pub digit_separator: bool,
    operators: &'static [char],
    keywords: Arc<Keywords>,
}

impl<K: TokenKind> BaseLexer<K> {
    pub fn new(
        kinds: BaseKinds<K>,
        shape: WordShape,
        operators: &'static [char],
        keywords: Arc<Keywords>,
    ) -> Self {
        Self {
            kinds,
            shape,
            digit_separator: false,
            operators,
            keywords,
        }
    }

    #[must_use]
    pub fn with_digit_separator(mut self) -> Self {
        self.digit_separator = true;
        self
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn is_operator(&self, c: char) -> bool {
        self.operators.contains(&c)
    }

    /// Whether a number starts at the cursor: a digit, or `.` then a digit.
    pub fn number_starts_at(cursor: &Cursor<'_>) -> bool {
        match cursor.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => cursor.peek_nth(1).is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        }
    }

    /// Whether `c` continues a number.
    pub fn is_number_part(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '.' || (self.digit_separator && c == '_')
    }

    /// Keyword 1, keyword 2 or identifier.
    pub fn classify(&self, word: &str) -> K {
        if self.keywords.is_primary(word) {
            self.kinds.keyword1
        } else if self.keywords.is_secondary(word) {
            self.kinds.keyword2
        } else {
            self.kinds.identifier
        }
    }

    /// Consume one construct using the shared rules.
    pub fn step(&self, scan: &mut Scan<'_, K>) {
        if self.shape.starts_at(&scan.cursor) {
            self.scan_word(scan);
            return;
        }
        if Self::number_starts_at(&scan.cursor) {
            self.scan_number(scan);
            return;
        }
        match scan.cursor.current() {
            '"' => {
                let start = scan.pos();
                self.scan_quoted(scan, start, self.kinds.string);
            }
            '\'' => {
                let start = scan.pos();
                self.scan_quoted(scan, start, self.kinds.char);
            }
            c if self.is_operator(c) => self.scan_operator(scan),
            _ => scan.cursor.advance(),
        }
    }

    /// Scan a word and classify it against the keyword sets.
    pub fn scan_word(&self, scan: &mut Scan<'_, K>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| self.shape.is_part(c));
        let word = scan.cursor.slice(start, scan.pos());
        scan.add_word(word);
        scan.emit_lexeme(self.classify(word), start..scan.pos());
    }

    /// Scan a number literal, including radix prefixes and suffixes.
    pub fn scan_number(&self, scan: &mut Scan<'_, K>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| self.is_number_part(c));
        scan.emit(self.kinds.number, start..scan.pos());
    }

    /// Scan a literal whose opening quote is at the cursor and whose prefix
    /// (if any) begins at `start`.
    ///
    /// `\` escapes the next character, or a whole line break. An unescaped
    /// line break ends an unterminated literal before the break.
    pub fn scan_quoted(&self, scan: &mut Scan<'_, K>, start: usize, kind: K) {
        let quote = scan.cursor.current();
        scan.cursor.advance();
        while let Some(c) = scan.cursor.peek() {
            if c == quote || is_line_break(c) {
                break;
            }
            scan.cursor.advance();
            if c == '\\' && !scan.cursor.eat_line_break() && !scan.cursor.at_end() {
                scan.cursor.advance();
            }
        }
        if scan.cursor.peek() == Some(quote) {
            scan.cursor.advance();
        }
        scan.emit(kind, start..scan.pos());
        scan.add_range(start, scan.pos());
    }

    /// Emit the operator character at the cursor.
    pub fn scan_operator(&self, scan: &mut Scan<'_, K>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.emit_lexeme(self.kinds.operator, start..scan.pos());
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Scan a comment running to the end of the line. The opener is the
/// `opener_len` characters at the cursor.
pub fn scan_line_comment<K: TokenKind>(
    scan: &mut Scan<'_, K>,
    kind: K,
    opener_len: usize,
    shape: WordShape,
) {
    let start = scan.pos();
    scan.cursor.advance_by(opener_len);
    let mut split = HighlightSplit::new(kind, start);
    split.run_until(scan, shape, |c| c.peek().is_some_and(is_line_break));
    split.finish(scan);
    scan.add_range(start, scan.pos());
}

/// Scan a span from an opener of `opener_len` characters through `closer`,
/// or to the end of the text when unterminated. Returns the span.
pub fn scan_delimited<K: TokenKind>(
    scan: &mut Scan<'_, K>,
    kind: K,
    opener_len: usize,
    closer: &str,
    shape: WordShape,
) -> Range<usize> {
    let start = scan.pos();
    scan.cursor.advance_by(opener_len);
    let mut split = HighlightSplit::new(kind, start);
    split.run_until(scan, shape, |c| c.starts_with(closer));
    if scan.cursor.starts_with(closer) {
        scan.cursor.advance_by(closer.chars().count());
    }
    split.finish(scan);
    scan.add_range(start, scan.pos());
    start..scan.pos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Lexer, Scanner};
    use crate::token::token_kinds;

    token_kinds! {
        enum Plain {
            Keyword1 = 0 => ("keyword1", Keyword),
            Keyword2 = 1 => ("keyword2", Keyword),
            Identifier = 2 => ("identifier", Identifier),
            Number = 3 => ("number", Number),
            String = 4 => ("string", String),
            Char = 5 => ("char", String),
            Operator = 6 => ("operator", Operator),
        }
    }

    #[derive(Debug)]
    struct PlainScanner(BaseLexer<Plain>);

    impl Scanner for PlainScanner {
        type Kind = Plain;

        fn language(&self) -> &'static str {
            "plain"
        }

        fn step(&mut self, scan: &mut Scan<'_, Plain>) {
            self.0.step(scan);
        }
    }

    fn lexer(separator: bool) -> Lexer<PlainScanner> {
        let keywords = Keywords::new(["int"], ["size_t"]).unwrap();
        let mut base = BaseLexer::new(
            BaseKinds {
                keyword1: Plain::Keyword1,
                keyword2: Plain::Keyword2,
                identifier: Plain::Identifier,
                number: Plain::Number,
                string: Plain::String,
                char: Plain::Char,
                operator: Plain::Operator,
            },
            WordShape::Ascii,
            &['+', '=', ';'],
            Arc::new(keywords),
        );
        if separator {
            base = base.with_digit_separator();
        }
        Lexer::new(PlainScanner(base))
    }

    fn kinds(text: &str, separator: bool) -> Vec<(Plain, &str)> {
        let mut lexer = lexer(separator);
        lexer.tokenize(0, text, None).unwrap();
        lexer
            .tokens()
            .iter()
            .map(|t| (t.kind, t.text(text)))
            .collect()
    }

    #[test]
    fn words_are_classified() {
        assert_eq!(
            kinds("int size_t foo_1", false),
            vec![
                (Plain::Keyword1, "int"),
                (Plain::Keyword2, "size_t"),
                (Plain::Identifier, "foo_1"),
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("0x1F .5 3.14f 7", false),
            vec![
                (Plain::Number, "0x1F"),
                (Plain::Number, ".5"),
                (Plain::Number, "3.14f"),
                (Plain::Number, "7"),
            ]
        );
    }

    #[test]
    fn digit_separator_is_opt_in() {
        assert_eq!(kinds("1_000", true), vec![(Plain::Number, "1_000")]);
        assert_eq!(kinds("1_000", false)[0], (Plain::Number, "1"));
    }

    #[test]
    fn quoted_literals_with_escapes() {
        let text = r#""a\"b" 'c'"#;
        assert_eq!(
            kinds(text, false),
            vec![(Plain::String, r#""a\"b""#), (Plain::Char, "'c'")]
        );
    }

    #[test]
    fn escaped_line_break_continues_literal() {
        let text = "\"a\\\r\nb\" x";
        let mut lx = lexer(false);
        lx.tokenize(0, text, None).unwrap();
        assert_eq!(lx.tokens()[0].range, 0..7);
        assert_eq!(lx.range_tokens()[0].end, 6);
    }

    #[test]
    fn unterminated_literal_stops_before_line_break() {
        let text = "\"abc\nint";
        assert_eq!(
            kinds(text, false),
            vec![(Plain::String, "\"abc"), (Plain::Keyword1, "int")]
        );
    }

    #[test]
    fn operators_carry_lexeme() {
        let mut lx = lexer(false);
        lx.tokenize(0, "a+=b;", None).unwrap();
        let ops: Vec<_> = lx
            .tokens()
            .iter()
            .filter(|t| t.kind == Plain::Operator)
            .map(|t| t.lexeme.clone().unwrap_or_default())
            .collect();
        assert_eq!(ops, vec!["+", "=", ";"]);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        assert_eq!(kinds("§ a", false), vec![(Plain::Identifier, "a")]);
    }

    #[test]
    fn css_shape_needs_letter_after_dash() {
        let cur = Cursor::new("-a", 0);
        assert!(WordShape::Css.starts_at(&cur));
        let cur = Cursor::new("-1", 0);
        assert!(!WordShape::Css.starts_at(&cur));
        let cur = Cursor::new("-a", 0);
        assert!(!WordShape::Ascii.starts_at(&cur));
    }
}
