#![forbid(unsafe_code)]

//! C and C++, plus the brace-and-slash comment rules the other C-like
//! scanners build on.

use std::sync::Arc;

use crate::base::{BaseKinds, BaseLexer, WordShape, scan_delimited, scan_line_comment};
use crate::config::Keywords;
use crate::cursor::is_line_break;
use crate::scan::{HighlightSplit, Scan, Scanner};
use crate::token::{TokenKind, token_kinds};

token_kinds! {
    /// Token kinds of C and C++.
    pub enum CppKind {
        Comment = 0 => ("comment", Comment),
        Operator = 1 => ("operator", Operator),
        String = 2 => ("string", String),
        Char = 3 => ("char", String),
        Number = 4 => ("number", Number),
        Keyword1 = 5 => ("keyword1", Keyword),
        Keyword2 = 6 => ("keyword2", Keyword),
        Identifier = 7 => ("identifier", Identifier),
        Brace = 8 => ("brace", Brace),
        DocComment = 9 => ("doc-comment", Comment),
        RawString = 10 => ("raw-string", String),
        WideString = 11 => ("wide-string", String),
        Macro = 12 => ("macro", Macro),
    }
}

pub(crate) const CPP_OPERATORS: &[char] = &[
    '~', '!', '%', '^', '&', '*', '(', ')', '-', '+', '=', '[', ']', ':', ';', '|', '<', '>',
    '?', '.', ',', '/',
];

// ---------------------------------------------------------------------------
// Shared C-family rules
// ---------------------------------------------------------------------------

/// Kinds for the C-family constructs a language supports. `None` disables
/// the construct.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CFamilyKinds<K> {
    pub comment: K,
    pub doc_comment: Option<K>,
    pub brace: K,
    pub preprocessor: Option<K>,
    pub raw_string: Option<K>,
    pub wide_string: Option<K>,
}

/// Comments, braces, preprocessor lines and prefixed literals, falling back
/// to [`BaseLexer`].
#[derive(Debug, Clone)]
pub(crate) struct CFamily<K> {
    pub base: BaseLexer<K>,
    pub kinds: CFamilyKinds<K>,
    /// Letter that prefixes a raw string literal.
    pub raw_prefix: char,
    /// Comment openers, besides `//` and `/*`, that end a preprocessor line.
    pub extra_comment_openers: &'static [&'static str],
}

impl<K: TokenKind> CFamily<K> {
    pub fn new(base: BaseLexer<K>, kinds: CFamilyKinds<K>) -> Self {
        Self {
            base,
            kinds,
            raw_prefix: 'R',
            extra_comment_openers: &[],
        }
    }

    pub fn step(&self, scan: &mut Scan<'_, K>) {
        let c = scan.cursor.current();
        let next = scan.cursor.peek_nth(1);

        if let Some(kind) = self.kinds.wide_string {
            if matches!(c, 'L' | 'U' | 'u') && matches!(next, Some('"' | '\'')) {
                let start = scan.pos();
                scan.cursor.advance();
                let kind = if next == Some('"') { kind } else { self.base.kinds.char };
                self.base.scan_quoted(scan, start, kind);
                return;
            }
        }
        if let Some(kind) = self.kinds.raw_string {
            if c == self.raw_prefix && next == Some('"') {
                self.scan_raw_string(scan, kind);
                return;
            }
        }
        if let Some(kind) = self.kinds.preprocessor {
            if c == '#' {
                self.scan_preprocessor(scan, kind);
                return;
            }
        }
        if let Some(kind) = self.kinds.doc_comment {
            if scan.cursor.starts_with("/**") && scan.cursor.peek_nth(3) != Some('/') {
                self.scan_block_comment(scan, kind, 3);
                return;
            }
        }
        if scan.cursor.starts_with("//") {
            scan_line_comment(scan, self.kinds.comment, 2, self.base.shape);
            return;
        }
        if scan.cursor.starts_with("/*") {
            self.scan_block_comment(scan, self.kinds.comment, 2);
            return;
        }
        match c {
            '{' => {
                let start = scan.pos();
                scan.open_fold(start);
                scan.cursor.advance();
                scan.emit_lexeme(self.kinds.brace, start..scan.pos());
            }
            '}' => {
                let start = scan.pos();
                scan.close_fold(start);
                scan.cursor.advance();
                scan.emit_lexeme(self.kinds.brace, start..scan.pos());
            }
            _ => self.base.step(scan),
        }
    }

    pub fn scan_block_comment(&self, scan: &mut Scan<'_, K>, kind: K, opener_len: usize) {
        let span = scan_delimited(scan, kind, opener_len, "*/", self.base.shape);
        scan.add_block_comment(span.start, span.end);
    }

    fn scan_raw_string(&self, scan: &mut Scan<'_, K>, kind: K) {
        let start = scan.pos();
        scan.cursor.advance_by(2);
        while let Some(c) = scan.cursor.peek() {
            if c == '"' {
                scan.cursor.advance();
                break;
            }
            scan.cursor.advance();
        }
        scan.emit(kind, start..scan.pos());
        scan.add_range(start, scan.pos());
    }

    /// `#` to the end of the line, joined across escaped line breaks and
    /// stopping before a trailing comment.
    fn scan_preprocessor(&self, scan: &mut Scan<'_, K>, kind: K) {
        let start = scan.pos();
        let mut split = HighlightSplit::new(kind, start);
        loop {
            match scan.cursor.peek() {
                None => break,
                Some(c) if is_line_break(c) => break,
                Some('/') if self.comment_starts(scan) => break,
                Some('\\') => {
                    scan.cursor.advance();
                    scan.cursor.eat_line_break();
                }
                Some(_) => split.step(scan, self.base.shape),
            }
        }
        split.finish(scan);
        scan.add_range(start, scan.pos());
    }

    fn comment_starts(&self, scan: &Scan<'_, K>) -> bool {
        scan.cursor.starts_with("//")
            || scan.cursor.starts_with("/*")
            || self
                .extra_comment_openers
                .iter()
                .any(|opener| scan.cursor.starts_with(opener))
    }
}

// ---------------------------------------------------------------------------
// C / C++
// ---------------------------------------------------------------------------

/// Scanner for C and C++ sources.
#[derive(Debug, Clone)]
pub struct CppScanner {
    family: CFamily<CppKind>,
}

impl CppScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        let base = BaseLexer::new(
            BaseKinds {
                keyword1: CppKind::Keyword1,
                keyword2: CppKind::Keyword2,
                identifier: CppKind::Identifier,
                number: CppKind::Number,
                string: CppKind::String,
                char: CppKind::Char,
                operator: CppKind::Operator,
            },
            WordShape::Ascii,
            CPP_OPERATORS,
            keywords,
        );
        let kinds = CFamilyKinds {
            comment: CppKind::Comment,
            doc_comment: Some(CppKind::DocComment),
            brace: CppKind::Brace,
            preprocessor: Some(CppKind::Macro),
            raw_string: Some(CppKind::RawString),
            wide_string: Some(CppKind::WideString),
        };
        Self {
            family: CFamily::new(base, kinds),
        }
    }
}

impl Scanner for CppScanner {
    type Kind = CppKind;

    fn language(&self) -> &'static str {
        "C++"
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn step(&mut self, scan: &mut Scan<'_, CppKind>) {
        self.family.step(scan);
    }
}
