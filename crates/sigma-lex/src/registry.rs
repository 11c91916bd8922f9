#![forbid(unsafe_code)]

//! Language lookup and type-erased lexers.
//!
//! Each scanner has its own kind enum, so a host that picks the language at
//! run time works through [`DynLexer`], which reports tokens as
//! [`ErasedToken`]s carrying the palette id, name and category of the kind.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::LexerConfig;
use crate::error::LexError;
use crate::lang::{
    AsmScanner, CppScanner, CssScanner, DScanner, HtmlScanner, IniScanner, JavaScanner,
    JsScanner, JspScanner, MakefileScanner, PythonScanner, TexScanner,
};
use crate::scan::{Lexer, Scanner};
use crate::token::{Category, FoldToken, MultiCommentToken, RangeToken, TokenKind};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// The languages this crate scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Language {
    Cpp,
    Java,
    D,
    JavaScript,
    Python,
    Css,
    Html,
    Jsp,
    Assembly,
    Makefile,
    Ini,
    Tex,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Self::Cpp,
        Self::Java,
        Self::D,
        Self::JavaScript,
        Self::Python,
        Self::Css,
        Self::Html,
        Self::Jsp,
        Self::Assembly,
        Self::Makefile,
        Self::Ini,
        Self::Tex,
    ];

    /// Display name, also accepted by [`LexerRegistry::by_name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpp => "C++",
            Self::Java => "Java",
            Self::D => "D",
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::Css => "CSS",
            Self::Html => "HTML",
            Self::Jsp => "JSP",
            Self::Assembly => "Assembly",
            Self::Makefile => "Makefile",
            Self::Ini => "INI",
            Self::Tex => "TeX",
        }
    }

    /// File extensions, without dots.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Cpp => &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"],
            Self::Java => &["java"],
            Self::D => &["d", "di"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::Python => &["py", "pyw", "pyi"],
            Self::Css => &["css"],
            Self::Html => &["html", "htm", "xhtml"],
            Self::Jsp => &["jsp", "jspf"],
            Self::Assembly => &["asm", "s", "inc"],
            Self::Makefile => &["mk", "mak"],
            Self::Ini => &["ini", "cfg", "conf", "properties"],
            Self::Tex => &["tex", "sty", "cls", "ltx"],
        }
    }

    /// Build a fresh lexer for this language from `config`.
    pub fn lexer(self, config: &LexerConfig) -> Box<dyn DynLexer> {
        match self {
            Self::Cpp => boxed(CppScanner::new(Arc::clone(&config.cpp))),
            Self::Java => boxed(JavaScanner::new(Arc::clone(&config.java))),
            Self::D => boxed(DScanner::new(Arc::clone(&config.d))),
            Self::JavaScript => boxed(JsScanner::new(Arc::clone(&config.javascript))),
            Self::Python => boxed(PythonScanner::new(Arc::clone(&config.python))),
            Self::Css => boxed(CssScanner::new(Arc::clone(&config.css))),
            Self::Html => boxed(HtmlScanner::new(
                Arc::clone(&config.html),
                Arc::clone(&config.javascript),
                Arc::clone(&config.css),
            )),
            Self::Jsp => boxed(JspScanner::new(
                Arc::clone(&config.html),
                Arc::clone(&config.javascript),
                Arc::clone(&config.css),
                Arc::clone(&config.jsp),
            )),
            Self::Assembly => boxed(AsmScanner::new(Arc::clone(&config.asm))),
            Self::Makefile => boxed(MakefileScanner::new()),
            Self::Ini => boxed(IniScanner::new()),
            Self::Tex => boxed(TexScanner::new()),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn boxed<S>(scanner: S) -> Box<dyn DynLexer>
where
    S: Scanner + Send + 'static,
{
    Box::new(Lexer::new(scanner))
}

// ---------------------------------------------------------------------------
// Erased lexer
// ---------------------------------------------------------------------------

/// A token with its kind reduced to palette data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErasedToken {
    pub kind_id: u8,
    pub kind_name: &'static str,
    pub category: Category,
    pub range: Range<usize>,
    pub highlight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexeme: Option<String>,
}

/// Object-safe view of a [`Lexer`].
pub trait DynLexer: Send {
    /// Language display name of the underlying scanner.
    fn language(&self) -> &'static str;

    /// See [`Lexer::tokenize`].
    fn tokenize(&mut self, start: usize, text: &str, highlight: Option<&str>)
    -> Result<(), LexError>;

    /// Tokens of the latest run.
    fn tokens(&self) -> Vec<ErasedToken>;

    fn words(&self) -> &BTreeSet<String>;

    fn range_tokens(&self) -> &[RangeToken];

    fn multi_comment_tokens(&self) -> &[MultiCommentToken];

    fn fold_tokens(&self) -> &[FoldToken];

    /// Number of kinds the language reports; palette ids are below this.
    fn palette_size(&self) -> usize;

    /// Name of the kind with palette id `id`.
    fn kind_name(&self, id: u8) -> Option<&'static str>;

    fn supports_block_comments(&self) -> bool;

    fn in_literal_or_comment(&self, offset: usize) -> bool;

    fn in_block_comment(&self, offset: usize) -> bool;

    fn matching_bracket(&self, text: &str, offset: usize) -> Option<usize>;
}

impl<S> DynLexer for Lexer<S>
where
    S: Scanner + Send,
{
    fn language(&self) -> &'static str {
        self.scanner().language()
    }

    fn tokenize(
        &mut self,
        start: usize,
        text: &str,
        highlight: Option<&str>,
    ) -> Result<(), LexError> {
        Lexer::tokenize(self, start, text, highlight)
    }

    fn tokens(&self) -> Vec<ErasedToken> {
        Lexer::tokens(self)
            .iter()
            .map(|token| ErasedToken {
                kind_id: token.kind.id(),
                kind_name: token.kind.name(),
                category: token.kind.category(),
                range: token.range.clone(),
                highlight: token.highlight,
                lexeme: token.lexeme.clone(),
            })
            .collect()
    }

    fn words(&self) -> &BTreeSet<String> {
        Lexer::words(self)
    }

    fn range_tokens(&self) -> &[RangeToken] {
        Lexer::range_tokens(self)
    }

    fn multi_comment_tokens(&self) -> &[MultiCommentToken] {
        Lexer::multi_comment_tokens(self)
    }

    fn fold_tokens(&self) -> &[FoldToken] {
        Lexer::fold_tokens(self)
    }

    fn palette_size(&self) -> usize {
        S::Kind::COUNT
    }

    fn kind_name(&self, id: u8) -> Option<&'static str> {
        S::Kind::from_id(id).map(TokenKind::name)
    }

    fn supports_block_comments(&self) -> bool {
        Lexer::supports_block_comments(self)
    }

    fn in_literal_or_comment(&self, offset: usize) -> bool {
        Lexer::in_literal_or_comment(self, offset)
    }

    fn in_block_comment(&self, offset: usize) -> bool {
        Lexer::in_block_comment(self, offset)
    }

    fn matching_bracket(&self, text: &str, offset: usize) -> Option<usize> {
        Lexer::matching_bracket(self, text, offset)
    }
}

// ---------------------------------------------------------------------------
// LexerRegistry
// ---------------------------------------------------------------------------

/// File names that are Makefiles regardless of extension.
const MAKEFILE_NAMES: &[&str] = &["makefile", "gnumakefile", "bsdmakefile"];

/// Looks languages up by file extension or name and builds their lexers.
#[derive(Debug, Clone, Default)]
pub struct LexerRegistry {
    config: LexerConfig,
    languages: Vec<Language>,
    by_extension: FxHashMap<String, Language>,
    by_name: FxHashMap<String, Language>,
}

impl LexerRegistry {
    /// An empty registry using `config` for the lexers it builds.
    pub fn new(config: LexerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A registry with every language registered.
    pub fn with_all(config: LexerConfig) -> Self {
        let mut registry = Self::new(config);
        for language in Language::ALL {
            registry.register(language);
        }
        registry
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Register a language under its name and extensions. Later
    /// registrations for the same extension or name override earlier ones.
    pub fn register(&mut self, language: Language) {
        if !self.languages.contains(&language) {
            self.languages.push(language);
        }
        self.by_name
            .insert(language.name().to_ascii_lowercase(), language);
        for ext in language.extensions() {
            self.register_extension(ext, language);
        }
    }

    /// Map one more extension to `language`.
    pub fn register_extension(&mut self, ext: &str, language: Language) {
        let key = ext.trim_start_matches('.').to_ascii_lowercase();
        if !key.is_empty() {
            self.by_extension.insert(key, language);
        }
    }

    /// Look up a language by file extension (case-insensitive, dot optional).
    pub fn for_extension(&self, ext: &str) -> Option<Language> {
        let key = ext.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension.get(&key).copied()
    }

    /// Look up a language by name (case-insensitive).
    pub fn by_name(&self, name: &str) -> Option<Language> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    /// Language of a file: Makefile names first, then the extension.
    pub fn for_path(&self, path: &Path) -> Option<Language> {
        let file_name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if MAKEFILE_NAMES.contains(&file_name.as_str())
            && self.languages.contains(&Language::Makefile)
        {
            return Some(Language::Makefile);
        }
        self.for_extension(path.extension()?.to_str()?)
    }

    /// A fresh lexer for the language of `ext`.
    pub fn lexer_for_extension(&self, ext: &str) -> Option<Box<dyn DynLexer>> {
        self.for_extension(ext).map(|language| language.lexer(&self.config))
    }

    /// A fresh lexer for the language named `name`.
    pub fn lexer_by_name(&self, name: &str) -> Option<Box<dyn DynLexer>> {
        self.by_name(name).map(|language| language.lexer(&self.config))
    }

    /// A fresh lexer for the file at `path`.
    pub fn lexer_for_path(&self, path: &Path) -> Option<Box<dyn DynLexer>> {
        self.for_path(path).map(|language| language.lexer(&self.config))
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Registered language names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.languages.iter().map(|language| language.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Keywords;

    // -- Language -----------------------------------------------------------

    #[test]
    fn every_language_builds_a_lexer() {
        let config = LexerConfig::default();
        for language in Language::ALL {
            let mut lexer = language.lexer(&config);
            assert_eq!(lexer.language(), language.name());
            lexer.tokenize(0, "a { b }\n", None).unwrap();
            assert!(lexer.palette_size() > 0);
            assert!(lexer.kind_name(0).is_some());
            assert!(lexer.kind_name(u8::MAX).is_none());
        }
    }

    #[test]
    fn extensions_do_not_collide() {
        let mut seen = BTreeSet::new();
        for language in Language::ALL {
            for ext in language.extensions() {
                assert!(seen.insert(*ext), "{ext} listed twice");
            }
        }
    }

    #[test]
    fn erased_tokens_keep_palette_data() {
        let config = LexerConfig {
            cpp: Arc::new(Keywords::primary_only(["int"]).unwrap()),
            ..LexerConfig::default()
        };
        let mut lexer = Language::Cpp.lexer(&config);
        lexer.tokenize(0, "int x", Some("x")).unwrap();
        let tokens = lexer.tokens();
        assert_eq!(tokens[0].kind_name, "keyword1");
        assert_eq!(tokens[0].category, Category::Keyword);
        assert_eq!(tokens[0].lexeme.as_deref(), Some("int"));
        assert_eq!(tokens[1].range, 4..5);
        assert!(tokens[1].highlight);
    }

    #[test]
    fn erased_lexer_rejects_bad_start() {
        let mut lexer = Language::Python.lexer(&LexerConfig::default());
        let err = lexer.tokenize(9, "abc", None).unwrap_err();
        assert_eq!(err, LexError::StartOutOfRange { start: 9, len: 3 });
        assert!(lexer.tokens().is_empty());
    }

    // -- Registry -----------------------------------------------------------

    #[test]
    fn registry_register_and_lookup() {
        let mut reg = LexerRegistry::new(LexerConfig::default());
        assert!(reg.is_empty());
        reg.register(Language::Python);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.for_extension("py"), Some(Language::Python));
        assert_eq!(reg.for_extension(".PY"), Some(Language::Python));
        assert_eq!(reg.by_name("python"), Some(Language::Python));
        assert_eq!(reg.by_name("PYTHON"), Some(Language::Python));
        assert_eq!(reg.for_extension("rs"), None);
    }

    #[test]
    fn registry_override() {
        let mut reg = LexerRegistry::with_all(LexerConfig::default());
        assert_eq!(reg.for_extension("h"), Some(Language::Cpp));
        reg.register_extension(".h", Language::D);
        assert_eq!(reg.for_extension("h"), Some(Language::D));
        assert_eq!(reg.len(), 12);
    }

    #[test]
    fn registry_paths() {
        let reg = LexerRegistry::with_all(LexerConfig::default());
        assert_eq!(
            reg.for_path(Path::new("src/GNUmakefile")),
            Some(Language::Makefile)
        );
        assert_eq!(reg.for_path(Path::new("a/b/page.JSP")), Some(Language::Jsp));
        assert_eq!(reg.for_path(Path::new("README")), None);
        let lexer = reg.lexer_for_path(Path::new("boot.asm"));
        assert_eq!(lexer.map(|l| l.language()), Some("Assembly"));
    }

    #[test]
    fn makefile_names_need_the_language() {
        let reg = LexerRegistry::new(LexerConfig::default());
        assert_eq!(reg.for_path(Path::new("Makefile")), None);
    }

    #[test]
    fn names_in_registration_order() {
        let reg = LexerRegistry::with_all(LexerConfig::default());
        assert_eq!(reg.names()[0], "C++");
        assert_eq!(reg.names()[11], "TeX");
        assert!(reg.lexer_by_name("tex").is_some());
        assert!(reg.lexer_for_extension("ini").is_some());
    }
}
