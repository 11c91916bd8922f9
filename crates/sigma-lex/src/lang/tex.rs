#![forbid(unsafe_code)]

//! TeX and LaTeX.

use crate::base::{WordShape, scan_line_comment};
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of TeX.
    pub enum TexKind {
        Comment = 0 => ("comment", Comment),
        Operator = 1 => ("operator", Operator),
        Option = 2 => ("option", Markup),
        Argument = 3 => ("argument", Markup),
        Command = 4 => ("command", Keyword),
        Text = 5 => ("text", Text),
    }
}

const SHAPE: WordShape = WordShape::Alnum;

/// Scanner for TeX sources.
#[derive(Debug, Clone, Default)]
pub struct TexScanner;

impl TexScanner {
    pub fn new() -> Self {
        Self
    }

    fn scan_operator(scan: &mut Scan<'_, TexKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.emit_lexeme(TexKind::Operator, start..scan.pos());
    }

    /// Operator, then the span up to (not including) a closing delimiter.
    fn scan_group(scan: &mut Scan<'_, TexKind>, kind: TexKind, end: fn(char) -> bool) {
        Self::scan_operator(scan);
        let start = scan.pos();
        scan.cursor.eat_while(|c| !end(c));
        scan.emit(kind, start..scan.pos());
    }

    fn scan_command(scan: &mut Scan<'_, TexKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(char::is_alphabetic);
        scan.emit_lexeme(TexKind::Command, start..scan.pos());
    }

    /// Plain text up to the next command, group, option or comment. Only
    /// the highlight word produces tokens.
    fn scan_text(scan: &mut Scan<'_, TexKind>) {
        while let Some(c) = scan.cursor.peek() {
            if matches!(c, '\\' | '[' | '{' | '%') {
                break;
            }
            if !SHAPE.is_start(c) {
                scan.cursor.advance();
                continue;
            }
            let start = scan.pos();
            scan.cursor.eat_while(|c| SHAPE.is_part(c));
            let word = scan.cursor.slice(start, scan.pos());
            scan.add_word(word);
            if scan.is_highlight(word) {
                scan.emit_lexeme(TexKind::Text, start..scan.pos());
            }
        }
    }
}

impl Scanner for TexScanner {
    type Kind = TexKind;

    fn language(&self) -> &'static str {
        "TeX"
    }

    fn step(&mut self, scan: &mut Scan<'_, TexKind>) {
        match scan.cursor.current() {
            '\\' => Self::scan_command(scan),
            '{' => Self::scan_group(scan, TexKind::Argument, |c| matches!(c, '{' | '}')),
            '[' => Self::scan_group(scan, TexKind::Option, |c| c == ']'),
            '}' | ']' | '*' | '$' => Self::scan_operator(scan),
            '%' => scan_line_comment(scan, TexKind::Comment, 1, SHAPE),
            c if c.is_whitespace() => scan.cursor.advance(),
            _ => Self::scan_text(scan),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Lexer;
    use crate::token::validate_tokens;

    fn lex(text: &str, highlight: Option<&str>) -> Lexer<TexScanner> {
        let mut lx = Lexer::new(TexScanner::new());
        lx.tokenize(0, text, highlight).unwrap();
        assert!(validate_tokens(text, 0, lx.tokens()));
        lx
    }

    fn kinds<'a>(text: &'a str, highlight: Option<&str>) -> Vec<(TexKind, &'a str)> {
        lex(text, highlight)
            .tokens()
            .iter()
            .map(|t| (t.kind, t.text(text)))
            .collect()
    }

    #[test]
    fn command_with_option_and_argument() {
        assert_eq!(
            kinds(r"\documentclass[a4paper]{article}", None),
            vec![
                (TexKind::Command, r"\documentclass"),
                (TexKind::Operator, "["),
                (TexKind::Option, "a4paper"),
                (TexKind::Operator, "]"),
                (TexKind::Operator, "{"),
                (TexKind::Argument, "article"),
                (TexKind::Operator, "}"),
            ]
        );
    }

    #[test]
    fn nested_group_splits_argument() {
        let toks = kinds(r"{a{b}}", None);
        assert_eq!(
            toks,
            vec![
                (TexKind::Operator, "{"),
                (TexKind::Argument, "a"),
                (TexKind::Operator, "{"),
                (TexKind::Argument, "b"),
                (TexKind::Operator, "}"),
                (TexKind::Operator, "}"),
            ]
        );
    }

    #[test]
    fn empty_group_has_no_argument() {
        assert_eq!(
            kinds("{}", None),
            vec![(TexKind::Operator, "{"), (TexKind::Operator, "}")]
        );
    }

    #[test]
    fn comment_runs_to_line_end() {
        let toks = kinds("% note\n$x$", None);
        assert_eq!(toks[0], (TexKind::Comment, "% note"));
        assert_eq!(toks[1], (TexKind::Operator, "$"));
    }

    #[test]
    fn text_emits_only_the_highlight_word() {
        assert!(kinds("some plain text", None).is_empty());
        assert_eq!(
            kinds("some plain text", Some("plain")),
            vec![(TexKind::Text, "plain")]
        );
        let lx = lex("some plain text", None);
        assert_eq!(lx.words().len(), 3);
    }

    #[test]
    fn command_name_is_letters_only() {
        let toks = kinds(r"\\ \a1", None);
        assert_eq!(toks[0], (TexKind::Command, r"\"));
        assert_eq!(toks[1], (TexKind::Command, r"\"));
        assert_eq!(toks[2], (TexKind::Command, r"\a"));
    }
}
