#![forbid(unsafe_code)]

//! CSS, standalone or embedded in HTML `<style>` elements.
//!
//! Words are told apart by position: inside a `{}` block a known word is a
//! property before `:` and a value after it. Everything else is a selector.

use std::sync::Arc;

use crate::base::{WordShape, scan_delimited};
use crate::config::Keywords;
use crate::cursor::is_line_break;
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of CSS.
    pub enum CssKind {
        Comment = 0 => ("comment", Comment),
        Symbol = 1 => ("symbol", Operator),
        Property = 2 => ("property", Keyword),
        Value = 3 => ("value", Keyword),
        Number = 4 => ("number", Number),
        Brace = 5 => ("brace", Brace),
        Selector = 6 => ("selector", Identifier),
    }
}

const CSS_SYMBOLS: &[char] = &[
    ':', '@', ';', '*', '.', '>', '#', '%', '-', '+', ',', '(', ')', '\'', '"',
];

/// Closing tag that ends an embedded style sheet.
pub const STYLE_END: &str = "</style>";

/// Scanner for CSS. Known words are those in either keyword partition.
#[derive(Debug, Clone)]
pub struct CssScanner {
    keywords: Arc<Keywords>,
    in_brace: bool,
    pass_colon: bool,
}

impl CssScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        Self {
            keywords,
            in_brace: false,
            pass_colon: false,
        }
    }

    /// A digit directly followed by a letter, `-`, `@` or `:` starts a line
    /// that cannot be valid CSS; it is shown as a comment up to `;`.
    fn illegal_line_starts(scan: &Scan<'_, CssKind>) -> bool {
        let cursor = &scan.cursor;
        cursor.peek().is_some_and(|c| c.is_ascii_digit())
            && cursor
                .peek_nth(1)
                .is_some_and(|d| d.is_alphabetic() || matches!(d, '-' | '@' | ':'))
    }

    fn scan_illegal_line(&self, scan: &mut Scan<'_, CssKind>) {
        let start = scan.pos();
        scan.cursor.advance_by(2);
        scan.cursor.eat_while(|c| c != ';' && !is_line_break(c));
        scan.emit(CssKind::Comment, start..scan.pos());
        scan.add_range(start, scan.pos());
    }

    fn scan_word(&self, scan: &mut Scan<'_, CssKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| WordShape::Css.is_part(c));
        let word = scan.cursor.slice(start, scan.pos());
        let kind = match (self.keywords.contains(word) && self.in_brace, self.pass_colon) {
            (true, false) => CssKind::Property,
            (true, true) => CssKind::Value,
            (false, _) => CssKind::Selector,
        };
        scan.add_word(word);
        scan.emit_lexeme(kind, start..scan.pos());
    }

    fn number_starts(&self, scan: &Scan<'_, CssKind>) -> bool {
        let cursor = &scan.cursor;
        match cursor.peek() {
            Some('#') => true,
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => cursor.peek_nth(1).is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        }
    }

    fn scan_number(&self, scan: &mut Scan<'_, CssKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| c.is_alphanumeric() || c == '.');
        scan.emit(CssKind::Number, start..scan.pos());
    }
}

impl Scanner for CssScanner {
    type Kind = CssKind;

    fn language(&self) -> &'static str {
        "CSS"
    }

    fn sentinel(&self) -> Option<&'static str> {
        Some(STYLE_END)
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.in_brace = false;
        self.pass_colon = false;
    }

    fn step(&mut self, scan: &mut Scan<'_, CssKind>) {
        if scan.cursor.starts_with("<!--") {
            scan_delimited(scan, CssKind::Comment, 4, "-->", WordShape::Css);
            return;
        }
        if scan.cursor.starts_with("/*") {
            let span = scan_delimited(scan, CssKind::Comment, 2, "*/", WordShape::Css);
            scan.add_block_comment(span.start, span.end);
            return;
        }
        if !self.pass_colon && Self::illegal_line_starts(scan) {
            self.scan_illegal_line(scan);
            return;
        }
        if WordShape::Css.starts_at(&scan.cursor) {
            self.scan_word(scan);
            return;
        }
        if self.in_brace && self.number_starts(scan) {
            self.scan_number(scan);
            return;
        }
        let start = scan.pos();
        match scan.cursor.current() {
            c if CSS_SYMBOLS.contains(&c) => {
                match c {
                    ';' => self.pass_colon = false,
                    ':' => self.pass_colon = true,
                    _ => {}
                }
                scan.cursor.advance();
                scan.emit_lexeme(CssKind::Symbol, start..scan.pos());
            }
            '{' => {
                self.in_brace = true;
                self.pass_colon = false;
                scan.open_fold(start);
                scan.cursor.advance();
                scan.emit_lexeme(CssKind::Brace, start..scan.pos());
            }
            '}' => {
                self.in_brace = false;
                scan.close_fold(start);
                scan.cursor.advance();
                scan.emit_lexeme(CssKind::Brace, start..scan.pos());
            }
            c => {
                if is_line_break(c) {
                    self.pass_colon = false;
                }
                scan.cursor.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Lexer, delegate};
    use crate::token::{FoldToken, MultiCommentToken};

    fn scanner() -> CssScanner {
        let keywords = Keywords::new(["color", "margin"], ["red", "auto"]).unwrap();
        CssScanner::new(Arc::new(keywords))
    }

    fn lex(text: &str) -> Lexer<CssScanner> {
        let mut lx = Lexer::new(scanner());
        lx.tokenize(0, text, None).unwrap();
        lx
    }

    fn kinds(text: &str) -> Vec<(CssKind, &str)> {
        lex(text)
            .tokens()
            .iter()
            .map(|t| (t.kind, t.text(text)))
            .collect()
    }

    #[test]
    fn rule_with_property_and_value() {
        assert_eq!(
            kinds("p.note { color: red; margin: 0 auto }"),
            vec![
                (CssKind::Selector, "p"),
                (CssKind::Symbol, "."),
                (CssKind::Selector, "note"),
                (CssKind::Brace, "{"),
                (CssKind::Property, "color"),
                (CssKind::Symbol, ":"),
                (CssKind::Value, "red"),
                (CssKind::Symbol, ";"),
                (CssKind::Property, "margin"),
                (CssKind::Symbol, ":"),
                (CssKind::Number, "0"),
                (CssKind::Value, "auto"),
                (CssKind::Brace, "}"),
            ]
        );
    }

    #[test]
    fn known_words_outside_braces_are_selectors() {
        assert_eq!(kinds("color")[0], (CssKind::Selector, "color"));
    }

    #[test]
    fn hex_colors_and_dashed_words_inside_braces() {
        let toks = kinds("a { -webkit-x: #fff; }");
        assert!(toks.contains(&(CssKind::Selector, "-webkit-x")));
        assert!(toks.contains(&(CssKind::Number, "#fff")));
    }

    #[test]
    fn newline_clears_pass_colon() {
        let toks = kinds("a { color: red\ncolor }");
        assert_eq!(toks[4], (CssKind::Value, "red"));
        assert_eq!(toks[5], (CssKind::Property, "color"));
    }

    #[test]
    fn illegal_line_is_a_comment() {
        let toks = kinds("{\n1px solid;\n}");
        assert_eq!(toks[1], (CssKind::Comment, "1px solid"));
        assert_eq!(toks[2], (CssKind::Symbol, ";"));
    }

    #[test]
    fn comments() {
        let text = "/* a */ <!-- b -->";
        let lx = lex(text);
        let toks: Vec<_> = lx.tokens().iter().map(|t| (t.kind, t.text(text))).collect();
        assert_eq!(
            toks,
            vec![(CssKind::Comment, "/* a */"), (CssKind::Comment, "<!-- b -->")]
        );
        assert_eq!(lx.multi_comment_tokens(), &[MultiCommentToken::new(0, 7)]);
        assert_eq!(lx.range_tokens().len(), 2);
    }

    #[test]
    fn multi_line_block_folds() {
        let text = "a {\n  color: red;\n}";
        assert_eq!(lex(text).fold_tokens(), &[FoldToken::new(2, 18)]);
    }

    #[test]
    fn embedded_run_stops_at_style_end() {
        let text = "b { }</Style>";
        let mut css = scanner();
        let sentinel = css.sentinel();
        let run = delegate(&mut css, text, 0, sentinel, None).unwrap();
        assert_eq!(run.end, 5);
    }
}
