#![forbid(unsafe_code)]

//! Keyword and vocabulary configuration.
//!
//! Every scanner receives its word sets at construction. Sets are validated
//! once, wrapped in [`Arc`] and never mutated afterwards, so one configuration
//! can be shared by any number of lexers (including the sub-lexers a host
//! constructs for embedded regions).
//!
//! # JSON documents
//!
//! ```
//! use sigma_lex::config::LexerConfig;
//!
//! let config = LexerConfig::from_json(r#"{
//!     "cpp": { "primary": ["int", "return"], "secondary": ["size_t"] },
//!     "asm": { "base_instructions": ["mov"], "registers1": ["eax"] }
//! }"#).unwrap();
//! assert!(config.cpp.is_primary("int"));
//! assert!(config.asm.is_register1("EAX"));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Two keyword partitions of a language.
///
/// What the partitions mean is up to the scanner: C-like languages color
/// them differently, HTML uses the primary set for tag names and the
/// secondary set for attribute names, CSS treats both as known vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    primary: FxHashSet<String>,
    secondary: FxHashSet<String>,
}

impl Keywords {
    /// Build validated keyword sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any entry is empty or contains whitespace.
    pub fn new<P, S>(primary: P, secondary: S) -> Result<Self, ConfigError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Ok(Self {
            primary: collect_words("primary", primary, false)?,
            secondary: collect_words("secondary", secondary, false)?,
        })
    }

    /// Build keyword sets with an empty secondary partition.
    ///
    /// # Errors
    ///
    /// Same as [`Keywords::new`].
    pub fn primary_only<P>(primary: P) -> Result<Self, ConfigError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::new(primary, std::iter::empty::<String>())
    }

    /// No keywords at all: every word scans as a plain identifier.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_primary(&self, word: &str) -> bool {
        self.primary.contains(word)
    }

    pub fn is_secondary(&self, word: &str) -> bool {
        self.secondary.contains(word)
    }

    /// Whether `word` is in either partition.
    pub fn contains(&self, word: &str) -> bool {
        self.is_primary(word) || self.is_secondary(word)
    }

    /// Total number of keywords.
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

fn collect_words<I>(
    list: &'static str,
    words: I,
    lowercase: bool,
) -> Result<FxHashSet<String>, ConfigError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut set = FxHashSet::default();
    for word in words {
        let word: String = word.into();
        if word.is_empty() {
            return Err(ConfigError::EmptyWord { list });
        }
        if word.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidWord { list, word });
        }
        set.insert(if lowercase { word.to_lowercase() } else { word });
    }
    Ok(set)
}

// ---------------------------------------------------------------------------
// Assembly vocabulary
// ---------------------------------------------------------------------------

/// Raw word lists for [`AsmVocabulary`], as found in a config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsmWordLists {
    pub base_instructions: Vec<String>,
    pub system_instructions: Vec<String>,
    pub media_instructions: Vec<String>,
    pub registers1: Vec<String>,
    pub registers2: Vec<String>,
    pub directives: Vec<String>,
    pub pseudo_instructions: Vec<String>,
}

/// Case-insensitive instruction, register and directive sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsmVocabulary {
    base_instructions: FxHashSet<String>,
    system_instructions: FxHashSet<String>,
    media_instructions: FxHashSet<String>,
    registers1: FxHashSet<String>,
    registers2: FxHashSet<String>,
    directives: FxHashSet<String>,
    pseudo_instructions: FxHashSet<String>,
}

impl AsmVocabulary {
    /// Validate and lowercase the lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any entry is empty or contains whitespace.
    pub fn new(lists: AsmWordLists) -> Result<Self, ConfigError> {
        Ok(Self {
            base_instructions: collect_words("base_instructions", lists.base_instructions, true)?,
            system_instructions: collect_words(
                "system_instructions",
                lists.system_instructions,
                true,
            )?,
            media_instructions: collect_words(
                "media_instructions",
                lists.media_instructions,
                true,
            )?,
            registers1: collect_words("registers1", lists.registers1, true)?,
            registers2: collect_words("registers2", lists.registers2, true)?,
            directives: collect_words("directives", lists.directives, true)?,
            pseudo_instructions: collect_words(
                "pseudo_instructions",
                lists.pseudo_instructions,
                true,
            )?,
        })
    }

    // The predicates fold case themselves; callers testing one word against
    // several sets should pass it through `fold_case` first.

    pub fn is_base_instruction(&self, word: &str) -> bool {
        self.base_instructions.contains(&*fold_case(word))
    }

    pub fn is_system_instruction(&self, word: &str) -> bool {
        self.system_instructions.contains(&*fold_case(word))
    }

    pub fn is_media_instruction(&self, word: &str) -> bool {
        self.media_instructions.contains(&*fold_case(word))
    }

    pub fn is_register1(&self, word: &str) -> bool {
        self.registers1.contains(&*fold_case(word))
    }

    pub fn is_register2(&self, word: &str) -> bool {
        self.registers2.contains(&*fold_case(word))
    }

    pub fn is_directive(&self, word: &str) -> bool {
        self.directives.contains(&*fold_case(word))
    }

    pub fn is_pseudo_instruction(&self, word: &str) -> bool {
        self.pseudo_instructions.contains(&*fold_case(word))
    }
}

/// `word` in lower case, borrowed when folding would not change it.
pub(crate) fn fold_case(word: &str) -> Cow<'_, str> {
    if word.chars().any(|c| c.to_lowercase().ne([c])) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

// ---------------------------------------------------------------------------
// Lexer configuration
// ---------------------------------------------------------------------------

/// Raw keyword lists for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordLists {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl WordLists {
    fn into_keywords(self) -> Result<Arc<Keywords>, ConfigError> {
        Keywords::new(self.primary, self.secondary).map(Arc::new)
    }
}

/// Validated word sets for every language, shared read-only by lexers.
///
/// `jsp` holds the keywords of the Java code inside `<% %>` regions; the
/// surrounding markup, scripts and styles use `html`, `javascript` and `css`.
#[derive(Debug, Clone, Default)]
pub struct LexerConfig {
    pub cpp: Arc<Keywords>,
    pub java: Arc<Keywords>,
    pub d: Arc<Keywords>,
    pub javascript: Arc<Keywords>,
    pub python: Arc<Keywords>,
    pub css: Arc<Keywords>,
    pub html: Arc<Keywords>,
    pub jsp: Arc<Keywords>,
    pub asm: Arc<AsmVocabulary>,
}

/// Languages a config document may carry word lists for.
pub const CONFIG_KEYS: &[&str] = &[
    "cpp",
    "java",
    "d",
    "javascript",
    "python",
    "css",
    "html",
    "jsp",
    "asm",
];

impl LexerConfig {
    /// Parse a JSON document mapping language keys (see [`CONFIG_KEYS`]) to
    /// word lists. Languages not mentioned get empty sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or list shapes,
    /// [`ConfigError::UnknownLanguage`] for an unknown key, and the word
    /// validation errors of [`Keywords::new`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json).inspect_err(|err| warn!(error = %err, "rejected lexer configuration"))
    }

    fn parse(json: &str) -> Result<Self, ConfigError> {
        let document: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut config = Self::default();
        for (key, value) in document {
            match key.as_str() {
                "asm" => {
                    let lists: AsmWordLists = serde_json::from_value(value)?;
                    config.asm = Arc::new(AsmVocabulary::new(lists)?);
                }
                "cpp" | "java" | "d" | "javascript" | "python" | "css" | "html" | "jsp" => {
                    let lists: WordLists = serde_json::from_value(value)?;
                    let keywords = lists.into_keywords()?;
                    match key.as_str() {
                        "cpp" => config.cpp = keywords,
                        "java" => config.java = keywords,
                        "d" => config.d = keywords,
                        "javascript" => config.javascript = keywords,
                        "python" => config.python = keywords,
                        "css" => config.css = keywords,
                        "html" => config.html = keywords,
                        _ => config.jsp = keywords,
                    }
                }
                _ => return Err(ConfigError::UnknownLanguage(key)),
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn keywords_partitions() {
        let kw = Keywords::new(["int", "long"], ["size_t"]).unwrap();
        assert!(kw.is_primary("int"));
        assert!(!kw.is_primary("size_t"));
        assert!(kw.is_secondary("size_t"));
        assert!(kw.contains("long"));
        assert_eq!(kw.len(), 3);
    }

    #[test]
    fn keywords_reject_empty_entry() {
        let err = Keywords::primary_only(["int", ""]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyWord { list: "primary" });
    }

    #[test]
    fn keywords_reject_whitespace() {
        let err = Keywords::new(["int"], ["unsigned int"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWord { list: "secondary", .. }));
    }

    #[test]
    fn asm_vocabulary_is_case_insensitive() {
        let vocab = AsmVocabulary::new(AsmWordLists {
            base_instructions: vec!["MOV".into()],
            registers2: vec!["xmm0".into()],
            ..AsmWordLists::default()
        })
        .unwrap();
        assert!(vocab.is_base_instruction("mov"));
        assert!(vocab.is_base_instruction("Mov"));
        assert!(vocab.is_register2("XMM0"));
        assert!(!vocab.is_directive("mov"));
    }

    #[test]
    fn fold_case_borrows_lower_case_words() {
        assert!(matches!(fold_case("eax"), Cow::Borrowed("eax")));
        assert!(matches!(fold_case("r8d"), Cow::Borrowed(_)));
        assert_eq!(fold_case("EAX"), "eax");
        assert!(matches!(fold_case("Mov"), Cow::Owned(_)));
    }

    #[test]
    fn config_from_json() {
        let config = LexerConfig::from_json(
            r#"{ "python": { "primary": ["def"] }, "html": { "secondary": ["href"] } }"#,
        )
        .unwrap();
        assert!(config.python.is_primary("def"));
        assert!(config.html.is_secondary("href"));
        assert!(config.cpp.is_empty());
    }

    #[test]
    fn config_unknown_language() {
        let err = LexerConfig::from_json(r#"{ "cobol": {} }"#).unwrap_err();
        assert_eq!(err, ConfigError::UnknownLanguage("cobol".into()));
    }

    #[test]
    fn config_rejects_unknown_list() {
        let err = LexerConfig::from_json(r#"{ "cpp": { "tertiary": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    #[traced_test]
    fn config_rejection_is_logged() {
        let err = LexerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(logs_contain("rejected lexer configuration"));
    }

    #[test]
    fn config_keys_all_parse() {
        for key in CONFIG_KEYS {
            let json = format!("{{ \"{key}\": {{}} }}");
            assert!(LexerConfig::from_json(&json).is_ok(), "{key} should be accepted");
        }
    }
}
