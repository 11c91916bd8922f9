#![forbid(unsafe_code)]

//! HTML with embedded `<script>` and `<style>` content.
//!
//! The host tracks whether it is inside a tag (expecting attribute names)
//! and whether the tag just closed was `script` or `style`. Content after
//! such a tag is handed to a [`JsScanner`] or [`CssScanner`], which runs on
//! the same text until its closing tag. Their kinds are remapped into the
//! host palette, which reserves ids 1..=8 for script and 9..=14 for style.

use std::sync::Arc;

use crate::base::{WordShape, scan_delimited};
use crate::config::Keywords;
use crate::lang::css::{CssKind, CssScanner};
use crate::lang::java::JavaKind;
use crate::lang::javascript::{JsKind, JsScanner};
use crate::scan::{Scan, Scanner};
use crate::token::token_kinds;

token_kinds! {
    /// Token kinds of HTML and JSP, including remapped embedded kinds.
    pub enum HtmlKind {
        Comment = 0 => ("comment", Comment),
        JsOperator = 1 => ("js-operator", Operator),
        JsString = 2 => ("js-string", String),
        JsChar = 3 => ("js-char", String),
        JsNumber = 4 => ("js-number", Number),
        JsKeyword1 = 5 => ("js-keyword1", Keyword),
        JsKeyword2 = 6 => ("js-keyword2", Keyword),
        JsIdentifier = 7 => ("js-identifier", Identifier),
        JsBrace = 8 => ("js-brace", Brace),
        CssNumber = 9 => ("css-number", Number),
        CssBrace = 10 => ("css-brace", Brace),
        CssSymbol = 11 => ("css-symbol", Operator),
        CssValue = 12 => ("css-value", Keyword),
        CssProperty = 13 => ("css-property", Keyword),
        CssSelector = 14 => ("css-selector", Identifier),
        KeywordAttr = 15 => ("attr-keyword", Keyword),
        KeywordTag = 16 => ("tag-keyword", Keyword),
        Content = 17 => ("content", Text),
        Symbol = 18 => ("symbol", Operator),
        AttrValue = 19 => ("attr-value", String),
        AttrName = 20 => ("attr-name", Markup),
        TagName = 21 => ("tag-name", Markup),
    }
}

impl From<JsKind> for HtmlKind {
    fn from(kind: JsKind) -> Self {
        match kind {
            JsKind::Comment => Self::Comment,
            JsKind::Operator => Self::JsOperator,
            JsKind::String => Self::JsString,
            JsKind::Char => Self::JsChar,
            JsKind::Number => Self::JsNumber,
            JsKind::Keyword1 => Self::JsKeyword1,
            JsKind::Keyword2 => Self::JsKeyword2,
            JsKind::Identifier => Self::JsIdentifier,
            JsKind::Brace => Self::JsBrace,
        }
    }
}

impl From<CssKind> for HtmlKind {
    fn from(kind: CssKind) -> Self {
        match kind {
            CssKind::Comment => Self::Comment,
            CssKind::Symbol => Self::CssSymbol,
            CssKind::Property => Self::CssProperty,
            CssKind::Value => Self::CssValue,
            CssKind::Number => Self::CssNumber,
            CssKind::Brace => Self::CssBrace,
            CssKind::Selector => Self::CssSelector,
        }
    }
}

/// Java inside JSP regions shares the script slots.
impl From<JavaKind> for HtmlKind {
    fn from(kind: JavaKind) -> Self {
        match kind {
            JavaKind::Comment | JavaKind::DocComment => Self::Comment,
            JavaKind::Operator => Self::JsOperator,
            JavaKind::String => Self::JsString,
            JavaKind::Char => Self::JsChar,
            JavaKind::Number => Self::JsNumber,
            JavaKind::Keyword1 => Self::JsKeyword1,
            JavaKind::Keyword2 => Self::JsKeyword2,
            JavaKind::Identifier => Self::JsIdentifier,
            JavaKind::Brace => Self::JsBrace,
        }
    }
}

fn is_tag_name_part(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':')
}

fn is_attr_name_part(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-')
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

const ENTITIES: &[&str] = &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Scanner for HTML documents.
///
/// Tag names in the primary keyword partition are known tags, attribute
/// names in the secondary partition are known attributes.
#[derive(Debug, Clone)]
pub struct HtmlScanner {
    markup: Arc<Keywords>,
    script: Arc<Keywords>,
    style: Arc<Keywords>,
    in_tag: bool,
    script_tag: bool,
    style_tag: bool,
    in_script: bool,
    in_style: bool,
}

impl HtmlScanner {
    pub fn new(markup: Arc<Keywords>, script: Arc<Keywords>, style: Arc<Keywords>) -> Self {
        Self {
            markup,
            script,
            style,
            in_tag: false,
            script_tag: false,
            style_tag: false,
            in_script: false,
            in_style: false,
        }
    }

    fn symbol(scan: &mut Scan<'_, HtmlKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.emit_lexeme(HtmlKind::Symbol, start..scan.pos());
    }

    /// Tag name at the cursor; returns it.
    fn tag_name<'t>(&self, scan: &mut Scan<'t, HtmlKind>) -> &'t str {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(is_tag_name_part);
        let name = scan.cursor.slice(start, scan.pos());
        let kind = if self.markup.is_primary(name) {
            HtmlKind::KeywordTag
        } else {
            HtmlKind::TagName
        };
        scan.add_word(name);
        scan.emit_lexeme(kind, start..scan.pos());
        name
    }

    fn scan_open_tag(&mut self, scan: &mut Scan<'_, HtmlKind>) {
        self.in_tag = true;
        Self::symbol(scan);
        let name = self.tag_name(scan);
        self.script_tag = name.eq_ignore_ascii_case("script");
        self.style_tag = name.eq_ignore_ascii_case("style");
    }

    fn scan_close_tag(&mut self, scan: &mut Scan<'_, HtmlKind>) {
        Self::symbol(scan);
        Self::symbol(scan);
        let name = self.tag_name(scan);
        if name.eq_ignore_ascii_case("script") {
            self.script_tag = false;
            self.in_script = false;
        } else if name.eq_ignore_ascii_case("style") {
            self.style_tag = false;
            self.in_style = false;
        }
    }

    fn scan_attr_name(&self, scan: &mut Scan<'_, HtmlKind>) {
        let start = scan.pos();
        scan.cursor.advance();
        scan.cursor.eat_while(is_attr_name_part);
        let name = scan.cursor.slice(start, scan.pos());
        let kind = if self.markup.is_secondary(name) {
            HtmlKind::KeywordAttr
        } else {
            HtmlKind::AttrName
        };
        scan.add_word(name);
        scan.emit_lexeme(kind, start..scan.pos());
    }

    /// Quoted attribute value; entity references pass through unchanged.
    fn scan_attr_value(&self, scan: &mut Scan<'_, HtmlKind>) {
        let start = scan.pos();
        let quote = scan.cursor.current();
        scan.cursor.advance();
        while let Some(c) = scan.cursor.peek() {
            if c == quote {
                scan.cursor.advance();
                break;
            }
            match ENTITIES.iter().find(|e| scan.cursor.starts_with(e)) {
                Some(entity) => scan.cursor.advance_by(entity.len()),
                None => scan.cursor.advance(),
            }
        }
        scan.emit(HtmlKind::AttrValue, start..scan.pos());
        scan.add_range(start, scan.pos());
    }

    fn scan_content(&self, scan: &mut Scan<'_, HtmlKind>) {
        if self.in_script {
            let mut js = JsScanner::new(Arc::clone(&self.script));
            scan.embed(&mut js);
        } else if self.in_style {
            let mut css = CssScanner::new(Arc::clone(&self.style));
            scan.embed(&mut css);
        } else {
            while let Some(c) = scan.cursor.peek() {
                if c == '<' {
                    break;
                }
                if is_name_start(c) {
                    let start = scan.pos();
                    scan.cursor.advance();
                    scan.cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
                    let word = scan.cursor.slice(start, scan.pos());
                    scan.add_word(word);
                    let highlight = scan.is_highlight(word);
                    scan.emit_highlighted(HtmlKind::Content, start..scan.pos(), highlight);
                } else {
                    scan.cursor.advance();
                }
            }
        }
    }
}

impl Scanner for HtmlScanner {
    type Kind = HtmlKind;

    fn language(&self) -> &'static str {
        "HTML"
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.in_tag = false;
        self.script_tag = false;
        self.style_tag = false;
        self.in_script = false;
        self.in_style = false;
    }

    fn step(&mut self, scan: &mut Scan<'_, HtmlKind>) {
        let c = scan.cursor.current();
        let next = scan.cursor.peek_nth(1);
        if c == '<' && next.is_some_and(is_name_start) {
            self.scan_open_tag(scan);
        } else if c == '<' && next == Some('/') && scan.cursor.peek_nth(2).is_some_and(is_name_start) {
            self.scan_close_tag(scan);
        } else if self.in_tag && is_name_start(c) {
            self.scan_attr_name(scan);
        } else if c == '/' && next == Some('>') {
            self.in_tag = false;
            self.script_tag = false;
            self.style_tag = false;
            Self::symbol(scan);
            Self::symbol(scan);
        } else if self.in_tag && matches!(c, '"' | '\'') {
            self.scan_attr_value(scan);
        } else if c == '>' {
            self.in_tag = false;
            self.in_script = self.script_tag;
            self.in_style = self.style_tag;
            Self::symbol(scan);
        } else if !self.in_tag && c != '<' {
            self.scan_content(scan);
        } else if c == '=' {
            Self::symbol(scan);
        } else if scan.cursor.starts_with("<!--") {
            scan_delimited(scan, HtmlKind::Comment, 4, "-->", WordShape::Unicode);
        } else {
            scan.cursor.advance();
        }
    }
}
