#![forbid(unsafe_code)]

//! Scan cursor over an immutable text buffer.
//!
//! The cursor moves forward one character at a time. Positions are byte
//! offsets and always sit on a character boundary.
//!
//! An embedded-language scan installs a *sentinel* (for example `</script>`):
//! while the cursor sits on it, every end test reports true and every
//! sentinel-aware read reports nothing, so the scan stops at the embedding
//! boundary without consuming it. Matching is ASCII case-insensitive.

/// Position over a text buffer with optional early-end sentinel.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    text: &'t str,
    pos: usize,
    sentinel: Option<&'static str>,
}

impl<'t> Cursor<'t> {
    /// Create a cursor at `pos`. Panics in debug builds if `pos` is not a
    /// character boundary.
    pub fn new(text: &'t str, pos: usize) -> Self {
        debug_assert!(text.is_char_boundary(pos), "cursor must start on a char boundary");
        Self {
            text,
            pos,
            sentinel: None,
        }
    }

    /// Install an end sentinel.
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: Option<&'static str>) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// The whole text.
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset, e.g. after a sub-lexer returns.
    pub fn set_pos(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos), "cursor must stay on a char boundary");
        self.pos = pos;
    }

    /// Text from the cursor to the end of the buffer.
    pub fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    /// `text[start..end]`.
    pub fn slice(&self, start: usize, end: usize) -> &'t str {
        &self.text[start..end]
    }

    /// Whether the cursor sits on its sentinel.
    pub fn at_sentinel(&self) -> bool {
        let Some(sentinel) = self.sentinel else {
            return false;
        };
        self.rest()
            .as_bytes()
            .get(..sentinel.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(sentinel.as_bytes()))
    }

    /// Whether the scan is over: sentinel reached or no character left.
    pub fn at_end(&self) -> bool {
        self.at_sentinel() || self.pos >= self.text.len()
    }

    /// Whether the character `k` positions ahead is unavailable.
    ///
    /// `at_end_by(0)` is `at_end()`. Guard every `lookahead(k)` with this.
    pub fn at_end_by(&self, k: usize) -> bool {
        self.at_sentinel() || self.rest().chars().nth(k).is_none()
    }

    /// Whether the buffer itself is exhausted, ignoring the sentinel.
    pub fn at_text_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Character at the cursor.
    ///
    /// # Panics
    ///
    /// Panics when the buffer is exhausted; callers test `at_end` first.
    pub fn current(&self) -> char {
        match self.rest().chars().next() {
            Some(c) => c,
            None => panic!("cursor read past end of text at offset {}", self.pos),
        }
    }

    /// Character `k` positions ahead of the cursor.
    ///
    /// # Panics
    ///
    /// Panics when out of bounds; callers test `at_end_by(k)` first.
    pub fn lookahead(&self, k: usize) -> char {
        match self.rest().chars().nth(k) {
            Some(c) => c,
            None => panic!("cursor lookahead {k} past end of text at offset {}", self.pos),
        }
    }

    /// Character at the cursor, or `None` at the end or on the sentinel.
    pub fn peek(&self) -> Option<char> {
        if self.at_sentinel() {
            return None;
        }
        self.rest().chars().next()
    }

    /// Character `k` positions ahead, or `None` past the end or on the sentinel.
    pub fn peek_nth(&self, k: usize) -> Option<char> {
        if self.at_sentinel() {
            return None;
        }
        self.rest().chars().nth(k)
    }

    /// Character at the cursor, ignoring the sentinel.
    pub fn peek_raw(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Whether the text at the cursor starts with `prefix` (sentinel-aware).
    pub fn starts_with(&self, prefix: &str) -> bool {
        !self.at_sentinel() && self.rest().starts_with(prefix)
    }

    /// Advance one character. Does nothing once the buffer is exhausted.
    pub fn advance(&mut self) {
        debug_assert!(!self.at_text_end(), "advance past end of text");
        if let Some(c) = self.rest().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    /// Advance `n` characters.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.at_text_end() {
                break;
            }
            self.advance();
        }
    }

    /// Advance while the sentinel-aware current character satisfies `pred`.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    /// Consume a line break (`\r\n`, `\n` or `\r`) at the cursor, if any.
    pub fn eat_line_break(&mut self) -> bool {
        if self.starts_with("\r\n") {
            self.advance_by(2);
            true
        } else if matches!(self.peek(), Some('\n' | '\r')) {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// Whether `c` ends a physical line.
pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}
