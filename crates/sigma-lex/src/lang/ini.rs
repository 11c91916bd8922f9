#![forbid(unsafe_code)]

//! INI files: `[section]` heads and `;` comments, both only on the left of
//! the first `=` of a line.

use crate::base::{WordShape, scan_line_comment};
use crate::cursor::is_line_break;
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of INI files.
    pub enum IniKind {
        Comment = 0 => ("comment", Comment),
        Symbol = 1 => ("symbol", Operator),
        SectionHead = 2 => ("section-head", Keyword),
        Plain = 3 => ("plain", Text),
    }
}

const INI_SYMBOLS: &[char] = &['=', '"', '\'', '{', '}', '(', ')', '<', '>'];

/// Scanner for INI files.
#[derive(Debug, Clone)]
pub struct IniScanner {
    equ_left: bool,
}

impl Default for IniScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl IniScanner {
    pub fn new() -> Self {
        Self { equ_left: true }
    }

    fn scan_section_head(scan: &mut Scan<'_, IniKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(|c| c != ']' && !is_line_break(c));
        if scan.cursor.peek() == Some(']') {
            scan.cursor.advance();
        }
        scan.emit_lexeme(IniKind::SectionHead, start..scan.pos());
    }
}

impl Scanner for IniScanner {
    type Kind = IniKind;

    fn language(&self) -> &'static str {
        "INI"
    }

    fn reset(&mut self) {
        self.equ_left = true;
    }

    fn step(&mut self, scan: &mut Scan<'_, IniKind>) {
        let start = scan.pos();
        match scan.cursor.current() {
            c if is_line_break(c) => {
                self.equ_left = true;
                scan.cursor.advance();
            }
            '[' if self.equ_left => Self::scan_section_head(scan),
            ';' if self.equ_left => {
                scan_line_comment(scan, IniKind::Comment, 1, WordShape::Unicode);
            }
            c if INI_SYMBOLS.contains(&c) => {
                self.equ_left = false;
                scan.cursor.advance();
                scan.emit_lexeme(IniKind::Symbol, start..scan.pos());
            }
            c if WordShape::Unicode.is_start(c) => {
                scan.cursor.advance();
                scan.cursor.eat_while(|c| WordShape::Unicode.is_part(c));
                let word = scan.cursor.slice(start, scan.pos());
                scan.add_word(word);
                if scan.is_highlight(word) {
                    scan.emit_lexeme(IniKind::Plain, start..scan.pos());
                }
            }
            _ => scan.cursor.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Lexer;
    use crate::token::RangeToken;

    fn lex(text: &str, highlight: Option<&str>) -> Lexer<IniScanner> {
        let mut lx = Lexer::new(IniScanner::new());
        lx.tokenize(0, text, highlight).unwrap();
        lx
    }

    fn kinds<'a>(text: &'a str, highlight: Option<&str>) -> Vec<(IniKind, &'a str)> {
        lex(text, highlight)
            .tokens()
            .iter()
            .map(|t| (t.kind, t.text(text)))
            .collect()
    }

    #[test]
    fn sections_keys_and_comments() {
        assert_eq!(
            kinds("[core]\n; note\nname = \"x\"", None),
            vec![
                (IniKind::SectionHead, "[core]"),
                (IniKind::Comment, "; note"),
                (IniKind::Symbol, "="),
                (IniKind::Symbol, "\""),
                (IniKind::Symbol, "\""),
            ]
        );
    }

    #[test]
    fn right_of_equals_is_not_structure() {
        let toks = kinds("a = [b] ; c", None);
        assert_eq!(toks, vec![(IniKind::Symbol, "=")]);
    }

    #[test]
    fn unterminated_section_head_stops_at_line_end() {
        let toks = kinds("[open\nx", None);
        assert_eq!(toks, vec![(IniKind::SectionHead, "[open")]);
    }

    #[test]
    fn comment_records_a_range() {
        let lx = lex("; hi", None);
        assert_eq!(lx.range_tokens(), &[RangeToken::new(0, 3)]);
    }

    #[test]
    fn highlighted_words_and_word_set() {
        let text = "path = home\nhome = 1";
        let lx = lex(text, Some("home"));
        let flagged: Vec<_> = lx
            .tokens()
            .iter()
            .filter(|t| t.highlight)
            .map(|t| (t.kind, t.start()))
            .collect();
        assert_eq!(flagged, vec![(IniKind::Plain, 7), (IniKind::Plain, 12)]);
        let words: Vec<_> = lx.words().iter().map(String::as_str).collect();
        assert_eq!(words, vec!["home", "path"]);
    }
}
