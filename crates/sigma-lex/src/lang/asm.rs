#![forbid(unsafe_code)]

//! x86 style assembly: `;` comments, `%` macro lines and words classified
//! against a case-insensitive [`AsmVocabulary`].

use std::sync::Arc;

use crate::base::{BaseKinds, BaseLexer, WordShape, scan_line_comment};
use crate::config::{AsmVocabulary, Keywords, fold_case};
use crate::cursor::is_line_break;
use crate::scan::{HighlightSplit, Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of assembly.
    pub enum AsmKind {
        Comment = 0 => ("comment", Comment),
        Operator = 1 => ("operator", Operator),
        String = 2 => ("string", String),
        BaseInstruction = 3 => ("base-instruction", Keyword),
        Number = 4 => ("number", Number),
        SystemInstruction = 5 => ("system-instruction", Keyword),
        MediaInstruction = 6 => ("media-instruction", Keyword),
        Identifier = 7 => ("identifier", Identifier),
        Register1 = 8 => ("register1", Keyword),
        Macro = 9 => ("macro", Macro),
        Directive = 10 => ("directive", Keyword),
        PseudoInstruction = 11 => ("pseudo-instruction", Keyword),
        Register2 = 12 => ("register2", Keyword),
    }
}

const ASM_OPERATORS: &[char] = &[
    '[', ']', ',', '+', '-', '*', '/', '>', '<', '!', '~', '^', '%', '|', '&', '(', ')', '$',
    '.', ':',
];

/// Characters that glue a neighbouring word into a longer symbol
/// (`.text`, `$label`, `@@`), which then never counts as vocabulary.
fn is_symbol_glue(c: char) -> bool {
    matches!(c, '.' | '$' | '#' | '@' | '~')
}

/// Scanner for assembly sources.
#[derive(Debug, Clone)]
pub struct AsmScanner {
    base: BaseLexer<AsmKind>,
    vocabulary: Arc<AsmVocabulary>,
}

impl AsmScanner {
    pub fn new(vocabulary: Arc<AsmVocabulary>) -> Self {
        let base = BaseLexer::new(
            BaseKinds {
                keyword1: AsmKind::Identifier,
                keyword2: AsmKind::Identifier,
                identifier: AsmKind::Identifier,
                number: AsmKind::Number,
                string: AsmKind::String,
                char: AsmKind::String,
                operator: AsmKind::Operator,
            },
            WordShape::Ascii,
            ASM_OPERATORS,
            Arc::new(Keywords::empty()),
        )
        .with_digit_separator();
        Self { base, vocabulary }
    }

    fn classify(&self, word: &str) -> AsmKind {
        let vocab = &self.vocabulary;
        let folded = fold_case(word);
        let word = &*folded;
        if vocab.is_base_instruction(word) {
            AsmKind::BaseInstruction
        } else if vocab.is_system_instruction(word) {
            AsmKind::SystemInstruction
        } else if vocab.is_media_instruction(word) {
            AsmKind::MediaInstruction
        } else if vocab.is_register1(word) {
            AsmKind::Register1
        } else if vocab.is_register2(word) {
            AsmKind::Register2
        } else if vocab.is_directive(word) {
            AsmKind::Directive
        } else if vocab.is_pseudo_instruction(word) {
            AsmKind::PseudoInstruction
        } else {
            AsmKind::Identifier
        }
    }

    fn scan_word(&self, scan: &mut Scan<'_, AsmKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| self.base.shape.is_part(c));
        let end = scan.pos();
        let text = scan.text();
        let word = &text[start..end];
        let glued = text[..start].chars().next_back().is_some_and(is_symbol_glue)
            || text[end..].chars().next().is_some_and(is_symbol_glue);
        let kind = if glued {
            AsmKind::Identifier
        } else {
            self.classify(word)
        };
        scan.add_word(word);
        scan.emit_lexeme(kind, start..end);
    }

    /// `%` to the end of the line or a `;` comment, joined across escaped
    /// line breaks.
    fn scan_macro(&self, scan: &mut Scan<'_, AsmKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        let mut split = HighlightSplit::new(AsmKind::Macro, start);
        loop {
            match scan.cursor.peek() {
                None | Some(';') => break,
                Some(c) if is_line_break(c) => break,
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
}

impl Scanner for AsmScanner {
    type Kind = AsmKind;

    fn language(&self) -> &'static str {
        "Assembly"
    }

    fn step(&mut self, scan: &mut Scan<'_, AsmKind>) {
        match scan.cursor.current() {
            '%' => self.scan_macro(scan),
            ';' => scan_line_comment(scan, AsmKind::Comment, 1, self.base.shape),
            c if self.base.shape.is_start(c) => self.scan_word(scan),
            _ => self.base.step(scan),
        }
    }
}
