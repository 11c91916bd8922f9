#![forbid(unsafe_code)]

//! JSP: HTML plus `<% ... %>` Java regions and `<%-- --%>` comments.

use std::sync::Arc;

use crate::base::{WordShape, scan_delimited};
use crate::config::Keywords;
use crate::lang::html::{HtmlKind, HtmlScanner};
use crate::lang::java::{JavaKind, JavaScanner};
use crate::scan::{Scan, Scanner};

/// Closing delimiter of a JSP code region.
pub const SCRIPTLET_END: &str = "%>";

/// Java between `<%` and `%>`. Also accepts HTML and JSP comments, which
/// page authors leave inside code regions.
#[derive(Debug, Clone)]
pub struct ScriptletScanner {
    java: JavaScanner,
}

impl ScriptletScanner {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        Self {
            java: JavaScanner::new(keywords),
        }
    }
}

impl Scanner for ScriptletScanner {
    type Kind = JavaKind;

    fn language(&self) -> &'static str {
        "JSP scriptlet"
    }

    fn sentinel(&self) -> Option<&'static str> {
        Some(SCRIPTLET_END)
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn step(&mut self, scan: &mut Scan<'_, JavaKind>) {
        if scan.cursor.starts_with("<!--") {
            scan_delimited(scan, JavaKind::Comment, 4, "-->", WordShape::Unicode);
        } else if scan.cursor.starts_with("<%--") {
            // `--%>` contains the sentinel, so the closer is matched before it.
            scan_delimited(scan, JavaKind::Comment, 4, "--%>", WordShape::Unicode);
        } else {
            self.java.step(scan);
        }
    }
}

/// Scanner for JSP pages.
#[derive(Debug, Clone)]
pub struct JspScanner {
    html: HtmlScanner,
    java: Arc<Keywords>,
}

impl JspScanner {
    /// `java` holds the keywords of code regions; the rest configure the
    /// surrounding HTML.
    pub fn new(
        markup: Arc<Keywords>,
        script: Arc<Keywords>,
        style: Arc<Keywords>,
        java: Arc<Keywords>,
    ) -> Self {
        Self {
            html: HtmlScanner::new(markup, script, style),
            java,
        }
    }

    fn delimiter(scan: &mut Scan<'_, HtmlKind>) {
        let start = scan.pos();
        scan.cursor.advance_by(2);
        scan.emit_lexeme(HtmlKind::JsOperator, start..scan.pos());
    }
}

impl Scanner for JspScanner {
    type Kind = HtmlKind;

    fn language(&self) -> &'static str {
        "JSP"
    }

    fn supports_block_comments(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.html.reset();
    }

    fn step(&mut self, scan: &mut Scan<'_, HtmlKind>) {
        if scan.cursor.starts_with("<%--") {
            scan_delimited(scan, HtmlKind::Comment, 4, "--%>", WordShape::Unicode);
        } else if scan.cursor.starts_with("<%") {
            Self::delimiter(scan);
            let mut code = ScriptletScanner::new(Arc::clone(&self.java));
            scan.embed(&mut code);
            if scan.cursor.starts_with(SCRIPTLET_END) {
                Self::delimiter(scan);
            }
        } else {
            self.html.step(scan);
        }
    }
}
