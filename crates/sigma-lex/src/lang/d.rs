#![forbid(unsafe_code)]

//! D: the Java rules plus nesting `/+ +/` comments, `q"..."` and backtick
//! strings, `#` special token sequences and `..` slices.

use std::sync::Arc;

use crate::base::{BaseKinds, BaseLexer, WordShape};
use crate::config::Keywords;
use crate::lang::cpp::{CFamily, CFamilyKinds};
use crate::scan::{HighlightSplit, Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of D.
    pub enum DKind {
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
        Macro = 10 => ("macro", Macro),
        RawString = 11 => ("raw-string", String),
    }
}

const D_OPERATORS: &[char] = &[
    '~', '!', '%', '^', '&', '*', '(', ')', '-', '+', '=', '[', ']', ':', ';', '|', '<', '>',
    '?', '.', ',', '/', '@', '$',
];

/// Scanner for D sources.
#[derive(Debug, Clone)]
pub struct DScanner {
    family: CFamily<DKind>,
}

impl DScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        let base = BaseLexer::new(
            BaseKinds {
                keyword1: DKind::Keyword1,
                keyword2: DKind::Keyword2,
                identifier: DKind::Identifier,
                number: DKind::Number,
                string: DKind::String,
                char: DKind::Char,
                operator: DKind::Operator,
            },
            WordShape::Unicode,
            D_OPERATORS,
            keywords,
        )
        .with_digit_separator();
        let kinds = CFamilyKinds {
            comment: DKind::Comment,
            doc_comment: Some(DKind::DocComment),
            brace: DKind::Brace,
            preprocessor: Some(DKind::Macro),
            raw_string: Some(DKind::RawString),
            wide_string: None,
        };
        let mut family = CFamily::new(base, kinds);
        family.raw_prefix = 'r';
        family.extra_comment_openers = &["/+"];
        Self { family }
    }

    /// `/+ ... +/`, which nests.
    fn scan_nested_comment(&self, scan: &mut Scan<'_, DKind>) {
        let start = scan.pos();
        scan.cursor.advance_by(2);
        let mut split = HighlightSplit::new(DKind::Comment, start);
        let mut depth = 1usize;
        while !scan.cursor.at_end() {
            if scan.cursor.starts_with("+/") {
                depth -= 1;
                if depth == 0 {
                    scan.cursor.advance_by(2);
                    break;
                }
                scan.cursor.advance_by(2);
            } else if scan.cursor.starts_with("/+") {
                depth += 1;
                scan.cursor.advance_by(2);
            } else {
                split.step(scan, self.family.base.shape);
            }
        }
        split.finish(scan);
        scan.add_block_comment(start, scan.pos());
        scan.add_range(start, scan.pos());
    }

    /// `"..."` or `q"..."`, possibly spanning lines, with an optional
    /// `c`, `w` or `d` suffix.
    fn scan_string(&self, scan: &mut Scan<'_, DKind>) {
        let start = scan.pos();
        if scan.cursor.current() == 'q' {
            scan.cursor.advance();
        }
        scan.cursor.advance();
        while let Some(c) = scan.cursor.peek() {
            if c == '"' {
                break;
            }
            scan.cursor.advance();
            if c == '\\' && !scan.cursor.at_end() {
                scan.cursor.advance();
            }
        }
        if scan.cursor.peek() == Some('"') {
            scan.cursor.advance();
            if matches!(scan.cursor.peek(), Some('c' | 'w' | 'd')) {
                scan.cursor.advance();
            }
        }
        scan.emit(DKind::String, start..scan.pos());
        scan.add_range(start, scan.pos());
    }

    /// `` `...` ``, no escapes.
    fn scan_backtick_string(&self, scan: &mut Scan<'_, DKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| c != '`');
        if scan.cursor.peek() == Some('`') {
            scan.cursor.advance();
        }
        scan.emit(DKind::RawString, start..scan.pos());
        scan.add_range(start, scan.pos());
    }

    /// A number, split before a `..` slice operator.
    fn scan_number(&self, scan: &mut Scan<'_, DKind>) {
        let base = &self.family.base;
        let start = scan.pos();
        scan.cursor.advance();
        while let Some(c) = scan.cursor.peek() {
            if c == '.' && scan.cursor.peek_nth(1) == Some('.') {
                scan.emit(DKind::Number, start..scan.pos());
                base.scan_operator(scan);
                base.scan_operator(scan);
                return;
            }
            if !base.is_number_part(c) {
                break;
            }
            scan.cursor.advance();
        }
        scan.emit(DKind::Number, start..scan.pos());
    }
}

impl Scanner for DScanner {
    type Kind = DKind;

    fn language(&self) -> &'static str {
        "D"
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn step(&mut self, scan: &mut Scan<'_, DKind>) {
        let c = scan.cursor.current();
        if scan.cursor.starts_with("/+") {
            self.scan_nested_comment(scan);
        } else if c == '"' || scan.cursor.starts_with("q\"") {
            self.scan_string(scan);
        } else if c == '`' {
            self.scan_backtick_string(scan);
        } else if BaseLexer::<DKind>::number_starts_at(&scan.cursor) {
            self.scan_number(scan);
        } else {
            self.family.step(scan);
        }
    }
}
