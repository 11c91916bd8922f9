#![forbid(unsafe_code)]

//! Java.

use std::sync::Arc;

use crate::base::{BaseKinds, BaseLexer, WordShape};
use crate::config::Keywords;
use crate::lang::cpp::{CFamily, CFamilyKinds};
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of Java.
    pub enum JavaKind {
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
    }
}

const JAVA_OPERATORS: &[char] = &[
    '~', '!', '%', '^', '&', '*', '(', ')', '-', '+', '=', '[', ']', ':', ';', '|', '<', '>',
    '?', '.', ',', '/', '@',
];

/// Scanner for Java sources: C-style comments and braces, Unicode
/// identifiers, `_` digit separators, no preprocessor.
#[derive(Debug, Clone)]
pub struct JavaScanner {
    family: CFamily<JavaKind>,
}

impl JavaScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        let base = BaseLexer::new(
            BaseKinds {
                keyword1: JavaKind::Keyword1,
                keyword2: JavaKind::Keyword2,
                identifier: JavaKind::Identifier,
                number: JavaKind::Number,
                string: JavaKind::String,
                char: JavaKind::Char,
                operator: JavaKind::Operator,
            },
            WordShape::Unicode,
            JAVA_OPERATORS,
            keywords,
        )
        .with_digit_separator();
        let kinds = CFamilyKinds {
            comment: JavaKind::Comment,
            doc_comment: Some(JavaKind::DocComment),
            brace: JavaKind::Brace,
            preprocessor: None,
            raw_string: None,
            wide_string: None,
        };
        Self {
            family: CFamily::new(base, kinds),
        }
    }
}

impl Scanner for JavaScanner {
    type Kind = JavaKind;

    fn language(&self) -> &'static str {
        "Java"
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn step(&mut self, scan: &mut Scan<'_, JavaKind>) {
        self.family.step(scan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Lexer;

    fn kinds(text: &str) -> Vec<(JavaKind, &str)> {
        let keywords = Keywords::new(["class", "int"], ["String"]).unwrap();
        let mut lx = Lexer::new(JavaScanner::new(Arc::new(keywords)));
        lx.tokenize(0, text, None).unwrap();
        lx.tokens().iter().map(|t| (t.kind, t.text(text))).collect()
    }

    #[test]
    fn annotations_and_unicode_identifiers() {
        assert_eq!(
            kinds("@Override int größe"),
            vec![
                (JavaKind::Operator, "@"),
                (JavaKind::Identifier, "Override"),
                (JavaKind::Keyword1, "int"),
                (JavaKind::Identifier, "größe"),
            ]
        );
    }

    #[test]
    fn no_preprocessor_or_prefixed_strings() {
        assert_eq!(
            kinds("#x L\"s\""),
            vec![
                (JavaKind::Identifier, "x"),
                (JavaKind::Identifier, "L"),
                (JavaKind::String, "\"s\""),
            ]
        );
    }

    #[test]
    fn separators_and_doc_comments() {
        assert_eq!(
            kinds("/** api */ 1_000_000L"),
            vec![
                (JavaKind::DocComment, "/** api */"),
                (JavaKind::Number, "1_000_000L"),
            ]
        );
    }

    #[test]
    fn secondary_keywords() {
        assert_eq!(kinds("String")[0], (JavaKind::Keyword2, "String"));
    }
}
