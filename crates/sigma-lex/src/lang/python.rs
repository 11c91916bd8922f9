#![forbid(unsafe_code)]

//! Python.

use std::sync::Arc;

use crate::base::{BaseKinds, BaseLexer, WordShape, scan_delimited, scan_line_comment};
use crate::config::Keywords;
use crate::cursor::is_line_break;
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of Python.
    pub enum PythonKind {
        Comment = 0 => ("comment", Comment),
        Operator = 1 => ("operator", Operator),
        String = 2 => ("string", String),
        Char = 3 => ("char", String),
        Number = 4 => ("number", Number),
        Keyword1 = 5 => ("keyword1", Keyword),
        Keyword2 = 6 => ("keyword2", Keyword),
        Identifier = 7 => ("identifier", Identifier),
        RawString = 8 => ("raw-string", String),
        LongString = 9 => ("long-string", String),
    }
}

const PYTHON_OPERATORS: &[char] = &[
    '$', '~', '{', '}', '@', '!', '%', '^', '&', '*', '(', ')', '-', '+', '=', '[', ']', ':',
    ';', '|', '<', '>', '?', '.', ',', '/',
];

/// Scanner for Python sources.
#[derive(Debug, Clone)]
pub struct PythonScanner {
    base: BaseLexer<PythonKind>,
}

impl PythonScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        let base = BaseLexer::new(
            BaseKinds {
                keyword1: PythonKind::Keyword1,
                keyword2: PythonKind::Keyword2,
                identifier: PythonKind::Identifier,
                number: PythonKind::Number,
                string: PythonKind::String,
                char: PythonKind::Char,
                operator: PythonKind::Operator,
            },
            WordShape::Unicode,
            PYTHON_OPERATORS,
            keywords,
        )
        .with_digit_separator();
        Self { base }
    }

    /// `r"..."` / `R'...'`: no escapes, ends at the matching quote or the
    /// line end.
    fn scan_raw_string(&self, scan: &mut Scan<'_, PythonKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        let quote = scan.cursor.current();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| c != quote && !is_line_break(c));
        if scan.cursor.peek() == Some(quote) {
            scan.cursor.advance();
        }
        scan.emit(PythonKind::RawString, start..scan.pos());
        scan.add_range(start, scan.pos());
    }
}

fn long_string_opener(scan: &Scan<'_, PythonKind>) -> Option<&'static str> {
    ["\"\"\"", "'''"]
        .into_iter()
        .find(|opener| scan.cursor.starts_with(opener))
}

impl Scanner for PythonScanner {
    type Kind = PythonKind;

    fn language(&self) -> &'static str {
        "Python"
    }

    fn step(&mut self, scan: &mut Scan<'_, PythonKind>) {
        let c = scan.cursor.current();
        let next = scan.cursor.peek_nth(1);
        if c == '#' {
            scan_line_comment(scan, PythonKind::Comment, 1, self.base.shape);
        } else if matches!(c, 'r' | 'R') && matches!(next, Some('"' | '\'')) {
            self.scan_raw_string(scan);
        } else if let Some(opener) = long_string_opener(scan) {
            scan_delimited(scan, PythonKind::LongString, 3, opener, self.base.shape);
        } else {
            self.base.step(scan);
        }
    }
}
