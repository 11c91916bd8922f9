//! Property-based invariant tests for every language scanner.
//!
//! For arbitrary input and start offset:
//!
//! 1. Tokens are non-empty, ordered, non-overlapping and lie in `[start, len)`.
//! 2. Range tokens, block comments and folds lie within the scanned text.
//! 3. Two runs with the same arguments produce the same collections.
//! 4. Without a highlight word no token is flagged.
//! 5. With a highlight word only occurrences of that word are flagged.
//! 6. Invalid start offsets are rejected, never panic.

use proptest::prelude::*;
use sigma_lex::{DynLexer, Language, LexError, LexerConfig};

// ── Helpers ─────────────────────────────────────────────────────────────

const CONFIG: &str = r#"{
    "cpp": { "primary": ["int", "if"], "secondary": ["size_t"] },
    "java": { "primary": ["class", "int"] },
    "d": { "primary": ["void"] },
    "javascript": { "primary": ["var"] },
    "python": { "primary": ["def"] },
    "css": { "primary": ["color"], "secondary": ["red"] },
    "html": { "primary": ["p", "script", "style"], "secondary": ["href"] },
    "jsp": { "primary": ["for"] },
    "asm": { "base_instructions": ["mov"], "registers1": ["eax"] }
}"#;

fn config() -> LexerConfig {
    LexerConfig::from_json(CONFIG).expect("test config is valid")
}

fn language_strategy() -> impl Strategy<Value = Language> {
    proptest::sample::select(Language::ALL.to_vec())
}

/// Fragments the scanners treat specially.
const FRAGMENTS: &[&str] = &[
    "<script>", "</script>", "<style>", "</style>", "<%", "%>", "<%--", "--%>", "<!--", "-->",
    "/*", "*/", "/**", "/+", "+/", "//", "\"\"\"", "'''", "R\"x\"", "L'a'", "q\"", "\\\n",
    "\r\n", "\n\t", "\n#", ":=", "+=", "$+", "1..", "0x1F", "1_000",
];

/// Text dense in the characters the scanners react to, mixed with arbitrary
/// Unicode.
fn source_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        proptest::sample::select(FRAGMENTS).prop_map(String::from),
        "[a-z_]{1,6}",
        "[0-9]{1,3}",
        "[ \\t\\n\\r{}()\\[\\]<>/*+#%;:='\"`\\\\.$@!?&-]",
        "\\PC",
    ];
    proptest::collection::vec(fragment, 0..32).prop_map(|parts| parts.concat())
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn check_collections(lexer: &dyn DynLexer, text: &str, start: usize) -> Result<(), TestCaseError> {
    let mut prev_end = start;
    for token in lexer.tokens() {
        let range = token.range.clone();
        prop_assert!(range.start < range.end, "empty token {:?}", token);
        prop_assert!(range.start >= prev_end, "overlap at {:?}", token);
        prop_assert!(range.end <= text.len(), "past end {:?}", token);
        prop_assert!(text.is_char_boundary(range.start) && text.is_char_boundary(range.end));
        prop_assert!((token.kind_id as usize) < lexer.palette_size());
        prev_end = range.end;
    }
    for range in lexer.range_tokens() {
        prop_assert!(range.start >= start && range.start <= range.end);
        prop_assert!(range.end < text.len(), "range {:?} past end", range);
    }
    for comment in lexer.multi_comment_tokens() {
        prop_assert!(comment.start >= start && comment.start < comment.end);
        prop_assert!(comment.end <= text.len());
    }
    for fold in lexer.fold_tokens() {
        prop_assert!(fold.start >= start && fold.start < fold.end);
        prop_assert!(fold.end < text.len());
        prop_assert!(text[fold.start..=fold.end].contains(['\n', '\r']));
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Coverage and containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn collections_stay_in_bounds(
        language in language_strategy(),
        text in source_strategy(),
        start in 0usize..256,
    ) {
        let start = floor_boundary(&text, start);
        let mut lexer = language.lexer(&config());
        lexer.tokenize(start, &text, None).unwrap();
        check_collections(lexer.as_ref(), &text, start)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn runs_are_deterministic(
        language in language_strategy(),
        text in source_strategy(),
        highlight in proptest::option::of("[a-z]{1,3}"),
    ) {
        let mut lexer = language.lexer(&config());
        lexer.tokenize(0, &text, highlight.as_deref()).unwrap();
        let tokens = lexer.tokens();
        let words = lexer.words().clone();
        let ranges = lexer.range_tokens().to_vec();
        let comments = lexer.multi_comment_tokens().to_vec();
        let folds = lexer.fold_tokens().to_vec();

        // Same instance, then a fresh one.
        lexer.tokenize(0, &text, highlight.as_deref()).unwrap();
        prop_assert_eq!(&lexer.tokens(), &tokens);
        prop_assert_eq!(lexer.words(), &words);
        prop_assert_eq!(lexer.range_tokens(), ranges.as_slice());
        prop_assert_eq!(lexer.multi_comment_tokens(), comments.as_slice());
        prop_assert_eq!(lexer.fold_tokens(), folds.as_slice());

        let mut fresh = language.lexer(&config());
        fresh.tokenize(0, &text, highlight.as_deref()).unwrap();
        prop_assert_eq!(fresh.tokens(), tokens);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Highlight flags
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_highlight_word_no_flags(
        language in language_strategy(),
        text in source_strategy(),
        empty in any::<bool>(),
    ) {
        let highlight = if empty { Some("") } else { None };
        let mut lexer = language.lexer(&config());
        lexer.tokenize(0, &text, highlight).unwrap();
        prop_assert!(lexer.tokens().iter().all(|t| !t.highlight));
    }

    #[test]
    fn flags_mark_the_highlight_word(
        language in language_strategy(),
        text in source_strategy(),
        word in "[a-z_]{1,6}",
    ) {
        let mut lexer = language.lexer(&config());
        lexer.tokenize(0, &text, Some(&word)).unwrap();
        for token in lexer.tokens().iter().filter(|t| t.highlight) {
            prop_assert_eq!(&text[token.range.clone()], word.as_str());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Invalid start offsets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn start_past_end_is_rejected(
        language in language_strategy(),
        text in source_strategy(),
        extra in 1usize..16,
    ) {
        let start = text.len() + extra;
        let mut lexer = language.lexer(&config());
        let err = lexer.tokenize(start, &text, None).unwrap_err();
        prop_assert_eq!(err, LexError::StartOutOfRange { start, len: text.len() });
        prop_assert!(lexer.tokens().is_empty());
    }
}
