#![forbid(unsafe_code)]

//! Lexical scanners for syntax coloring.
//!
//! Each language scanner classifies source text into typed spans and
//! collects what an editor needs besides colors:
//! - [`Token`] - a classified span, indexed into a palette by its kind id
//! - [`RangeToken`] - a literal or comment, where bracket matching stops
//! - [`MultiCommentToken`] - a block comment
//! - [`FoldToken`] - a braced region spanning lines
//! - the word set, for completion
//!
//! HTML and JSP pages run embedded JavaScript, CSS and Java scanners over
//! their `<script>`, `<style>` and `<% %>` regions and merge the results.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use sigma_lex::{CppKind, CppScanner, Keywords, Lexer};
//!
//! let keywords = Keywords::primary_only(["int"]).unwrap();
//! let mut lexer = Lexer::new(CppScanner::new(Arc::new(keywords)));
//! let text = "int foo_1 = bar;";
//! lexer.tokenize(0, text, None).unwrap();
//!
//! assert_eq!(lexer.tokens()[0].kind, CppKind::Keyword1);
//! let words: Vec<_> = lexer.words().iter().map(String::as_str).collect();
//! assert_eq!(words, ["bar", "foo_1", "int"]);
//! ```
//!
//! When the language is only known at run time, go through the registry:
//! ```
//! use std::path::Path;
//! use sigma_lex::{LexerConfig, LexerRegistry};
//!
//! let registry = LexerRegistry::with_all(LexerConfig::default());
//! let mut lexer = registry.lexer_for_path(Path::new("Makefile")).unwrap();
//! lexer.tokenize(0, "all:\n\tcc main.c\n", None).unwrap();
//! assert_eq!(lexer.tokens()[0].kind_name, "target");
//! ```

pub mod base;
pub mod config;
pub mod cursor;
pub mod error;
pub mod lang;
pub mod registry;
pub mod scan;
pub mod token;

pub use base::{BaseKinds, BaseLexer, WordShape};
pub use config::{AsmVocabulary, AsmWordLists, CONFIG_KEYS, Keywords, LexerConfig, WordLists};
pub use cursor::Cursor;
pub use error::{ConfigError, LexError};
pub use lang::*;
pub use registry::{DynLexer, ErasedToken, Language, LexerRegistry};
pub use scan::{Delegated, HighlightSplit, Lexer, Scan, ScanOutput, Scanner, delegate};
pub use token::{
    Category, FoldToken, MultiCommentToken, RangeToken, Token, TokenKind, validate_tokens,
};
