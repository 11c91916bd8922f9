#![forbid(unsafe_code)]

//! Rendering of a finished run, as text or JSON.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::Serialize;
use sigma_lex::{DynLexer, ErasedToken, FoldToken, MultiCommentToken, RangeToken};

/// Everything a run produced.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub language: &'static str,
    pub palette_size: usize,
    pub tokens: Vec<ErasedToken>,
    pub words: &'a BTreeSet<String>,
    pub ranges: &'a [RangeToken],
    pub block_comments: &'a [MultiCommentToken],
    pub folds: &'a [FoldToken],
}

impl<'a> Report<'a> {
    pub fn new(lexer: &'a dyn DynLexer) -> Self {
        Self {
            language: lexer.language(),
            palette_size: lexer.palette_size(),
            tokens: lexer.tokens(),
            words: lexer.words(),
            ranges: lexer.range_tokens(),
            block_comments: lexer.multi_comment_tokens(),
            folds: lexer.fold_tokens(),
        }
    }

    /// One line per token (`start..end kind [*] text`), then the other
    /// collections.
    pub fn to_text(&self, source: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {} ({} kinds)", self.language, self.palette_size);
        let _ = writeln!(out, "tokens: {}", self.tokens.len());
        for token in &self.tokens {
            let mark = if token.highlight { " *" } else { "" };
            let text = source.get(token.range.clone()).unwrap_or_default();
            let _ = writeln!(
                out,
                "  {}..{} {}{} {:?}",
                token.range.start, token.range.end, token.kind_name, mark, text
            );
        }
        let words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        let _ = writeln!(out, "words: {}", words.join(" "));
        let _ = writeln!(out, "ranges: {}", join_spans(self.ranges.iter().map(|r| (r.start, r.end))));
        let _ = writeln!(
            out,
            "block comments: {}",
            join_spans(self.block_comments.iter().map(|c| (c.start, c.end)))
        );
        let _ = writeln!(out, "folds: {}", join_spans(self.folds.iter().map(|f| (f.start, f.end))));
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn join_spans(spans: impl Iterator<Item = (usize, usize)>) -> String {
    spans
        .map(|(start, end)| format!("{start}..{end}"))
        .collect::<Vec<_>>()
        .join(" ")
}
