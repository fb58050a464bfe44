//! Buffer search.
//!
//! A [`Query`] compiles a search once (plain text is escaped; regex syntax is opt-in) and can
//! then run any number of times against a [`Buffer`]. All public offsets are **character
//! offsets** into the buffer's codepoint array, never byte offsets; the byte mapping needed by
//! the regex engine is derived internally from each codepoint's UTF-8 width.

use regex::{Regex, RegexBuilder};

use crate::buffer::{Buffer, is_word_char};
use crate::edit::Range;

/// Options that control how a [`Query`] matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    InvalidRegex(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex(err) => write!(f, "Invalid regex: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

/// A compiled search, reusable across buffers and edits.
#[derive(Debug)]
pub struct Query {
    re: Regex,
    whole_word: bool,
}

impl Query {
    /// Compile `query` under `options`. An empty query is valid and never matches.
    pub fn new(query: &str, options: SearchOptions) -> Result<Self, SearchError> {
        let pattern = if query.is_empty() {
            // A pattern that cannot match, so empty queries fall out of every search loop.
            String::from("[^\\s\\S]")
        } else if options.regex {
            query.to_string()
        } else {
            regex::escape(query)
        };
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(!options.case_sensitive)
            .multi_line(true)
            .build()
            .map_err(SearchError::InvalidRegex)?;
        Ok(Self {
            re,
            whole_word: options.whole_word,
        })
    }

    /// Find the first occurrence at or after the character offset `from`.
    pub fn find_next(&self, buffer: &Buffer, from: usize) -> Option<Range> {
        let haystack = Haystack::new(buffer);
        let mut from = from.min(buffer.num_chars());
        loop {
            let m = self.re.find_at(&haystack.text, haystack.byte_of(from))?;
            let candidate = haystack.range_of(m);
            if self.accept(buffer, candidate) {
                return Some(candidate);
            }
            // Empty or rejected match: resume one character further along.
            from = candidate.end.max(candidate.start + 1);
            if from > buffer.num_chars() {
                return None;
            }
        }
    }

    /// Find the last occurrence ending at or before the character offset `from`.
    pub fn find_prev(&self, buffer: &Buffer, from: usize) -> Option<Range> {
        let haystack = Haystack::new(buffer);
        let limit = haystack.byte_of(from.min(buffer.num_chars()));
        let mut last = None;
        for m in self.re.find_iter(&haystack.text[..limit]) {
            let candidate = haystack.range_of(m);
            if self.accept(buffer, candidate) {
                last = Some(candidate);
            }
        }
        last
    }

    /// Find all occurrences, in document order.
    pub fn find_all(&self, buffer: &Buffer) -> Vec<Range> {
        let haystack = Haystack::new(buffer);
        self.re
            .find_iter(&haystack.text)
            .map(|m| haystack.range_of(m))
            .filter(|&candidate| self.accept(buffer, candidate))
            .collect()
    }

    fn accept(&self, buffer: &Buffer, candidate: Range) -> bool {
        if candidate.is_empty() {
            return false;
        }
        if !self.whole_word {
            return true;
        }
        let chars = buffer.chars();
        let before = candidate.start.checked_sub(1).map(|i| chars[i]);
        let after = chars.get(candidate.end).copied();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    }
}

/// The buffer rendered as UTF-8 plus the byte offset of every character boundary.
struct Haystack {
    text: String,
    char_to_byte: Vec<usize>,
}

impl Haystack {
    fn new(buffer: &Buffer) -> Self {
        let mut char_to_byte = Vec::with_capacity(buffer.num_chars() + 1);
        let mut byte = 0;
        for &c in buffer.chars() {
            char_to_byte.push(byte);
            byte += c.len_utf8();
        }
        char_to_byte.push(byte);
        Self {
            text: buffer.get_text(),
            char_to_byte,
        }
    }

    fn byte_of(&self, char_offset: usize) -> usize {
        self.char_to_byte[char_offset]
    }

    fn char_of(&self, byte_offset: usize) -> usize {
        // Every queried offset comes from the regex engine, so it is a character boundary.
        match self.char_to_byte.binary_search(&byte_offset) {
            Ok(idx) | Err(idx) => idx,
        }
    }

    fn range_of(&self, m: regex::Match<'_>) -> Range {
        Range::new(self.char_of(m.start()), self.char_of(m.end()))
    }
}
