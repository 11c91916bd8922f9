#![forbid(unsafe_code)]

//! JavaScript, standalone or embedded in HTML `<script>` elements.

use std::sync::Arc;

use crate::base::{BaseKinds, BaseLexer, WordShape, scan_line_comment};
use crate::config::Keywords;
use crate::lang::cpp::{CFamily, CFamilyKinds};
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of JavaScript.
    pub enum JsKind {
        Comment = 0 => ("comment", Comment),
        Operator = 1 => ("operator", Operator),
        String = 2 => ("string", String),
        Char = 3 => ("char", String),
        Number = 4 => ("number", Number),
        Keyword1 = 5 => ("keyword1", Keyword),
        Keyword2 = 6 => ("keyword2", Keyword),
        Identifier = 7 => ("identifier", Identifier),
        Brace = 8 => ("brace", Brace),
    }
}

const JS_OPERATORS: &[char] = &[
    '~', '!', '%', '^', '&', '*', '(', ')', '-', '+', '=', '[', ']', ':', ';', '|', '<', '>',
    '?', '.', ',', '/', '@', '$',
];

/// Closing tag that ends an embedded script.
pub const SCRIPT_END: &str = "</script>";

/// Scanner for JavaScript. `<!--` starts a line comment and the scan stops
/// at `</script>`.
#[derive(Debug, Clone)]
pub struct JsScanner {
    family: CFamily<JsKind>,
}

impl JsScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        let base = BaseLexer::new(
            BaseKinds {
                keyword1: JsKind::Keyword1,
                keyword2: JsKind::Keyword2,
                identifier: JsKind::Identifier,
                number: JsKind::Number,
                string: JsKind::String,
                char: JsKind::Char,
                operator: JsKind::Operator,
            },
            WordShape::Unicode,
            JS_OPERATORS,
            keywords,
        )
        .with_digit_separator();
        let kinds = CFamilyKinds {
            comment: JsKind::Comment,
            doc_comment: None,
            brace: JsKind::Brace,
            preprocessor: None,
            raw_string: None,
            wide_string: None,
        };
        Self {
            family: CFamily::new(base, kinds),
        }
    }
}

impl Scanner for JsScanner {
    type Kind = JsKind;

    fn language(&self) -> &'static str {
        "JavaScript"
    }

    fn sentinel(&self) -> Option<&'static str> {
        Some(SCRIPT_END)
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn step(&mut self, scan: &mut Scan<'_, JsKind>) {
        if scan.cursor.starts_with("<!--") {
            scan_line_comment(scan, JsKind::Comment, 4, self.family.base.shape);
        } else {
            self.family.step(scan);
        }
    }
}
