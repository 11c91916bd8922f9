#![forbid(unsafe_code)]

//! Makefiles. The first character of each physical line picks its role:
//! a tab starts a recipe, `#` a comment, anything else a target or
//! variable line.

use crate::base::WordShape;
use crate::cursor::is_line_break;
use crate::scan::{HighlightSplit, Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of Makefiles.
    pub enum MakefileKind {
        Comment = 0 => ("comment", Comment),
        Symbol = 1 => ("symbol", Operator),
        Plain = 2 => ("plain", Text),
        Variable = 3 => ("variable", Identifier),
        Target = 4 => ("target", Keyword),
    }
}

const MAKEFILE_SYMBOLS: &[char] = &[
    '$', '(', ')', '{', '}', '^', '@', '%', '*', '<', '"', '\'', ',', '|', ';',
];

const SHAPE: WordShape = WordShape::Unicode;

/// Scanner for Makefiles.
#[derive(Debug, Clone)]
pub struct MakefileScanner {
    new_line: bool,
}

impl Default for MakefileScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MakefileScanner {
    pub fn new() -> Self {
        Self { new_line: true }
    }

    /// `$+` and `$?` are automatic variables; `+` alone is left to
    /// commands such as `g++`.
    fn scan_symbol(scan: &mut Scan<'_, MakefileKind>) {
        let start = scan.pos();
        let dollar = scan.cursor.current() == '$';
        scan.cursor.advance();
        if dollar && matches!(scan.cursor.peek(), Some('+' | '?')) {
            scan.cursor.advance();
        }
        scan.emit_lexeme(MakefileKind::Symbol, start..scan.pos());
    }

    /// `\` followed by a line break joins the next line to this one.
    fn cross_line_break(scan: &mut Scan<'_, MakefileKind>) {
        scan.cursor.advance();
        scan.cursor.eat_line_break();
    }

    fn scan_word(scan: &mut Scan<'_, MakefileKind>) -> std::ops::Range<usize> {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| SHAPE.is_part(c));
        let word = scan.cursor.slice(start, scan.pos());
        scan.add_word(word);
        start..scan.pos()
    }

    fn scan_recipe(scan: &mut Scan<'_, MakefileKind>) {
        scan.cursor.advance();
        while let Some(c) = scan.cursor.peek() {
            if is_line_break(c) {
                break;
            }
            if SHAPE.is_start(c) {
                let range = Self::scan_word(scan);
                scan.emit_lexeme(MakefileKind::Plain, range);
            } else if c == '\\' {
                Self::cross_line_break(scan);
            } else if MAKEFILE_SYMBOLS.contains(&c) {
                Self::scan_symbol(scan);
            } else {
                scan.cursor.advance();
            }
        }
    }

    fn scan_comment(scan: &mut Scan<'_, MakefileKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        let mut split = HighlightSplit::new(MakefileKind::Comment, start);
        split.run_until(scan, SHAPE, |c| c.peek().is_some_and(is_line_break));
        split.finish(scan);
        scan.add_range(start, scan.pos());
    }

    /// Kind of a target/variable line, judged by the operator that ends
    /// its leading run.
    fn line_kind(scan: &Scan<'_, MakefileKind>) -> MakefileKind {
        let cursor = &scan.cursor;
        if ["::=", "+=", ":=", "?=", "="]
            .iter()
            .any(|op| cursor.starts_with(op))
        {
            MakefileKind::Variable
        } else if cursor.peek() == Some(':') {
            MakefileKind::Target
        } else {
            MakefileKind::Plain
        }
    }

    fn scan_target_or_variable(scan: &mut Scan<'_, MakefileKind>) {
        let start = scan.pos();
        scan.cursor
            .eat_while(|c| !matches!(c, ':' | '=' | '?' | '+') && !is_line_break(c));
        let end = scan.pos();
        let kind = Self::line_kind(scan);

        // Second pass over the run, now that its kind is known.
        scan.cursor.set_pos(start);
        let mut split = HighlightSplit::new(kind, start);
        split.run_until(scan, SHAPE, |c| c.pos() >= end);
        split.finish(scan);

        if scan.pos() == start {
            scan.cursor.advance();
        }
    }
}

impl Scanner for MakefileScanner {
    type Kind = MakefileKind;

    fn language(&self) -> &'static str {
        "Makefile"
    }

    fn reset(&mut self) {
        self.new_line = true;
    }

    fn step(&mut self, scan: &mut Scan<'_, MakefileKind>) {
        let c = scan.cursor.current();
        if is_line_break(c) {
            self.new_line = true;
            scan.cursor.eat_line_break();
            return;
        }
        if std::mem::replace(&mut self.new_line, false) {
            match c {
                '\t' => Self::scan_recipe(scan),
                '#' => Self::scan_comment(scan),
                _ => Self::scan_target_or_variable(scan),
            }
            return;
        }
        if SHAPE.is_start(c) {
            let range = Self::scan_word(scan);
            let word = scan.cursor.slice(range.start, range.end);
            if scan.is_highlight(word) {
                scan.emit_lexeme(MakefileKind::Plain, range);
            }
        } else if MAKEFILE_SYMBOLS.contains(&c) {
            Self::scan_symbol(scan);
        } else if c == '\\' {
            Self::cross_line_break(scan);
        } else {
            scan.cursor.advance();
        }
    }
}
