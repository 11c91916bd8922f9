#![forbid(unsafe_code)]

//! Scan driver: the per-run context, the [`Scanner`] trait and [`Lexer`].
//!
//! A language implements [`Scanner::step`], which inspects the cursor and
//! consumes one construct (emitting at most a handful of spans). The driver
//! calls `step` until the cursor reports the end. Embedded regions run a
//! second scanner on the same text through [`Scan::embed`] or [`delegate`],
//! and the sub-run's spans are remapped into the host's kind space.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::{debug, debug_span, trace};

use crate::base::WordShape;
use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{FoldToken, MultiCommentToken, RangeToken, Token, TokenKind};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput<K> {
    tokens: Vec<Token<K>>,
    words: BTreeSet<String>,
    ranges: Vec<RangeToken>,
    block_comments: Vec<MultiCommentToken>,
    folds: Vec<FoldToken>,
}

impl<K> Default for ScanOutput<K> {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            words: BTreeSet::new(),
            ranges: Vec::new(),
            block_comments: Vec::new(),
            folds: Vec::new(),
        }
    }
}

impl<K: TokenKind> ScanOutput<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classified spans, ordered by start.
    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// Distinct identifier-like words seen, for completion.
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// Literal and comment extents, ordered by start.
    pub fn range_tokens(&self) -> &[RangeToken] {
        &self.ranges
    }

    /// Block comment extents, ordered by start.
    pub fn multi_comment_tokens(&self) -> &[MultiCommentToken] {
        &self.block_comments
    }

    /// Brace-delimited regions spanning more than one line, ordered by start.
    pub fn fold_tokens(&self) -> &[FoldToken] {
        &self.folds
    }

    /// Drop everything from a previous run.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.words.clear();
        self.ranges.clear();
        self.block_comments.clear();
        self.folds.clear();
    }

    /// Append a sub-run's output, remapping its kinds into `K`.
    ///
    /// The sub-run must start at or after every span already recorded.
    pub fn merge<J>(&mut self, other: ScanOutput<J>)
    where
        J: TokenKind,
        K: From<J>,
    {
        self.tokens
            .extend(other.tokens.into_iter().map(Token::map_kind));
        self.words.extend(other.words);
        self.ranges.extend(other.ranges);
        self.block_comments.extend(other.block_comments);
        self.folds.extend(other.folds);
    }

    /// Whether `offset` lies inside a literal, macro or comment.
    pub fn in_literal_or_comment(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        idx > 0 && self.ranges[idx - 1].contains(offset)
    }

    /// Whether `offset` lies inside a block comment.
    pub fn in_block_comment(&self, offset: usize) -> bool {
        let idx = self.block_comments.partition_point(|c| c.start <= offset);
        idx > 0 && self.block_comments[idx - 1].contains(offset)
    }

    /// Offset of the bracket matching the one at `offset` in `text`.
    ///
    /// Handles `()`, `[]` and `{}`. Brackets inside literals and comments are
    /// ignored, and a bracket that itself sits inside one has no match.
    pub fn matching_bracket(&self, text: &str, offset: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        let open = *bytes.get(offset)?;
        let (partner, forward) = match open {
            b'(' => (b')', true),
            b'[' => (b']', true),
            b'{' => (b'}', true),
            b')' => (b'(', false),
            b']' => (b'[', false),
            b'}' => (b'{', false),
            _ => return None,
        };
        if self.in_literal_or_comment(offset) {
            return None;
        }

        let mut depth = 0usize;
        let mut visit = |i: usize| -> Option<usize> {
            if bytes[i] != open && bytes[i] != partner {
                return None;
            }
            if self.in_literal_or_comment(i) {
                return None;
            }
            if bytes[i] == open {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            None
        };
        if forward {
            (offset..bytes.len()).find_map(&mut visit)
        } else {
            (0..=offset).rev().find_map(&mut visit)
        }
    }
}

// ---------------------------------------------------------------------------
// Scan context
// ---------------------------------------------------------------------------

/// State of one run: the cursor, the collections being filled, the
/// highlight word and open fold braces.
#[derive(Debug)]
pub struct Scan<'t, K> {
    pub cursor: Cursor<'t>,
    out: ScanOutput<K>,
    highlight: Option<&'t str>,
    open_braces: Vec<usize>,
}

impl<'t, K: TokenKind> Scan<'t, K> {
    pub fn new(cursor: Cursor<'t>, highlight: Option<&'t str>) -> Self {
        Self {
            cursor,
            out: ScanOutput::new(),
            highlight: highlight.filter(|word| !word.is_empty()),
            open_braces: Vec::new(),
        }
    }

    /// The scanned text.
    pub fn text(&self) -> &'t str {
        self.cursor.text()
    }

    /// The cursor offset.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// The caller's highlight word, if any.
    pub fn highlight_word(&self) -> Option<&'t str> {
        self.highlight
    }

    /// Whether `word` is the highlight word.
    pub fn is_highlight(&self, word: &str) -> bool {
        self.highlight == Some(word)
    }

    /// Emit a token unless the range is empty.
    pub fn emit(&mut self, kind: K, range: Range<usize>) {
        self.emit_highlighted(kind, range, false);
    }

    /// Emit a token with an explicit highlight flag unless the range is empty.
    pub fn emit_highlighted(&mut self, kind: K, range: Range<usize>, highlight: bool) {
        if range.start < range.end {
            self.out
                .tokens
                .push(Token::highlighted(kind, range, highlight));
        }
    }

    /// Emit a token carrying its text, flagged when it is the highlight word.
    pub fn emit_lexeme(&mut self, kind: K, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let lexeme = self.cursor.slice(range.start, range.end);
        let highlight = self.is_highlight(lexeme);
        self.out
            .tokens
            .push(Token::highlighted(kind, range, highlight).with_lexeme(lexeme));
    }

    /// Record a word for completion.
    pub fn add_word(&mut self, word: &str) {
        if !word.is_empty() && !self.out.words.contains(word) {
            self.out.words.insert(word.to_owned());
        }
    }

    /// Record a literal/comment extent covering `start..end`.
    pub fn add_range(&mut self, start: usize, end: usize) {
        if start < end {
            self.out.ranges.push(RangeToken::new(start, end - 1));
        }
    }

    /// Record a block comment extent covering `start..end`.
    pub fn add_block_comment(&mut self, start: usize, end: usize) {
        if start < end {
            self.out
                .block_comments
                .push(MultiCommentToken::new(start, end));
        }
    }

    /// Note an opening brace at `offset`.
    pub fn open_fold(&mut self, offset: usize) {
        self.open_braces.push(offset);
    }

    /// Note a closing brace at `offset`, recording a fold when the region
    /// spans a line break. Unbalanced closers are ignored.
    pub fn close_fold(&mut self, offset: usize) {
        let Some(start) = self.open_braces.pop() else {
            return;
        };
        if self
            .cursor
            .slice(start, offset)
            .contains(['\n', '\r'])
        {
            self.out.folds.push(FoldToken::new(start, offset));
        }
    }

    /// Run `scanner` from the cursor up to its sentinel (or the end of the
    /// text), merge its spans and move the cursor to where it stopped.
    pub fn embed<S>(&mut self, scanner: &mut S)
    where
        S: Scanner,
        K: From<S::Kind>,
    {
        let start = self.pos();
        let sentinel = scanner.sentinel();
        let sub = run(scanner, Cursor::new(self.text(), start).with_sentinel(sentinel), self.highlight);
        trace!(
            language = scanner.language(),
            sentinel = sentinel.unwrap_or(""),
            start,
            end = sub.end,
            "embedded region"
        );
        self.out.merge(sub.output);
        self.cursor.set_pos(sub.end);
    }

    /// Finish the run.
    pub fn finish(mut self) -> ScanOutput<K> {
        self.out.folds.sort_unstable();
        self.out
    }
}

// ---------------------------------------------------------------------------
// Highlight split
// ---------------------------------------------------------------------------

/// Builds a long span (comment, macro, target line) that may contain the
/// highlight word.
///
/// The span is emitted as pieces of one kind: every occurrence of the
/// highlight word becomes its own flagged piece. Every word inside the span
/// is recorded for completion.
#[derive(Debug, Clone, Copy)]
pub struct HighlightSplit<K> {
    kind: K,
    start: usize,
}

impl<K: TokenKind> HighlightSplit<K> {
    pub fn new(kind: K, start: usize) -> Self {
        Self { kind, start }
    }

    /// Consume one word or one character.
    pub fn step(&mut self, scan: &mut Scan<'_, K>, shape: WordShape) {
        if !shape.starts_at(&scan.cursor) {
            scan.cursor.advance();
            return;
        }
        let word_start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| shape.is_part(c));
        let word_end = scan.pos();
        let word = scan.cursor.slice(word_start, word_end);
        scan.add_word(word);
        if scan.is_highlight(word) {
            scan.emit(self.kind, self.start..word_start);
            scan.emit_highlighted(self.kind, word_start..word_end, true);
            self.start = word_end;
        }
    }

    /// Step until the end of the text or until `stop` holds at the cursor.
    pub fn run_until(
        &mut self,
        scan: &mut Scan<'_, K>,
        shape: WordShape,
        mut stop: impl FnMut(&Cursor<'_>) -> bool,
    ) {
        while !scan.cursor.at_end() && !stop(&scan.cursor) {
            self.step(scan, shape);
        }
    }

    /// Emit the remainder of the span up to the cursor.
    pub fn finish(self, scan: &mut Scan<'_, K>) {
        let end = scan.pos();
        scan.emit(self.kind, self.start..end);
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// One language's scanning rules.
pub trait Scanner {
    type Kind: TokenKind;

    /// Human-readable language name.
    fn language(&self) -> &'static str;

    /// Text that ends the scan when this scanner runs embedded.
    fn sentinel(&self) -> Option<&'static str> {
        None
    }

    /// Whether the language has block comments.
    fn supports_block_comments(&self) -> bool {
        false
    }

    /// Clear per-run state (open tags, line flags).
    fn reset(&mut self) {}

    /// Consume one construct at the cursor. The cursor is not at its end.
    fn step(&mut self, scan: &mut Scan<'_, Self::Kind>);
}

/// Output of a delegated run and the offset where it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegated<K> {
    pub output: ScanOutput<K>,
    pub end: usize,
}

fn run<'t, S: Scanner>(
    scanner: &mut S,
    cursor: Cursor<'t>,
    highlight: Option<&'t str>,
) -> Delegated<S::Kind> {
    scanner.reset();
    let mut scan = Scan::new(cursor, highlight);
    while !scan.cursor.at_end() {
        let before = scan.pos();
        scanner.step(&mut scan);
        if scan.pos() == before {
            debug_assert!(false, "{} scanner made no progress at {before}", scanner.language());
            scan.cursor.advance();
        }
    }
    let end = scan.pos();
    Delegated {
        output: scan.finish(),
        end,
    }
}

fn check_start(text: &str, start: usize) -> Result<(), LexError> {
    if start > text.len() {
        return Err(LexError::StartOutOfRange {
            start,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(start) {
        return Err(LexError::StartNotCharBoundary { start });
    }
    Ok(())
}

/// Run `scanner` over `text` from `start` until `sentinel` or the end.
///
/// # Errors
///
/// Returns [`LexError`] if `start` is past the end or not on a character
/// boundary.
pub fn delegate<'t, S: Scanner>(
    scanner: &mut S,
    text: &'t str,
    start: usize,
    sentinel: Option<&'static str>,
    highlight: Option<&'t str>,
) -> Result<Delegated<S::Kind>, LexError> {
    check_start(text, start)?;
    Ok(run(
        scanner,
        Cursor::new(text, start).with_sentinel(sentinel),
        highlight,
    ))
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// A scanner plus the collections of its latest run.
#[derive(Debug, Clone)]
pub struct Lexer<S: Scanner> {
    scanner: S,
    output: ScanOutput<S::Kind>,
}

impl<S: Scanner> Lexer<S> {
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            output: ScanOutput::new(),
        }
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    /// Scan `text` from `start` to the end, replacing the collections.
    ///
    /// `highlight` names a word whose occurrences get flagged tokens; `None`
    /// or an empty word disables highlighting.
    ///
    /// # Errors
    ///
    /// Returns [`LexError`] for an invalid start offset; the collections are
    /// left empty.
    pub fn tokenize(
        &mut self,
        start: usize,
        text: &str,
        highlight: Option<&str>,
    ) -> Result<(), LexError> {
        self.output.clear();
        let _span = debug_span!("tokenize", language = self.scanner.language()).entered();
        debug!(start, len = text.len(), "tokenize");
        let run = delegate(&mut self.scanner, text, start, None, highlight)?;
        self.output = run.output;
        trace!(
            tokens = self.output.tokens.len(),
            words = self.output.words.len(),
            ranges = self.output.ranges.len(),
            block_comments = self.output.block_comments.len(),
            folds = self.output.folds.len(),
            "tokenize finished"
        );
        Ok(())
    }

    pub fn output(&self) -> &ScanOutput<S::Kind> {
        &self.output
    }

    pub fn tokens(&self) -> &[Token<S::Kind>] {
        self.output.tokens()
    }

    pub fn words(&self) -> &BTreeSet<String> {
        self.output.words()
    }

    pub fn range_tokens(&self) -> &[RangeToken] {
        self.output.range_tokens()
    }

    pub fn multi_comment_tokens(&self) -> &[MultiCommentToken] {
        self.output.multi_comment_tokens()
    }

    pub fn fold_tokens(&self) -> &[FoldToken] {
        self.output.fold_tokens()
    }

    pub fn supports_block_comments(&self) -> bool {
        self.scanner.supports_block_comments()
    }

    pub fn in_literal_or_comment(&self, offset: usize) -> bool {
        self.output.in_literal_or_comment(offset)
    }

    pub fn in_block_comment(&self, offset: usize) -> bool {
        self.output.in_block_comment(offset)
    }

    pub fn matching_bracket(&self, text: &str, offset: usize) -> Option<usize> {
        self.output.matching_bracket(text, offset)
    }
}
