//! Per-character color classification.
//!
//! The renderer consumes one [`Color`] per codepoint, indexed identically to the character
//! array. Classes are derived from token tags during [`crate::Buffer::sync_internal_data`];
//! uncovered characters (whitespace) keep the scan's default fill, [`Color::Comment`].

use buffer_core_syntax::Tag;

/// Color class of one codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Fallback class; also used for regions no token claims after an explicit reset.
    Default,
    /// Comments, and the default fill of a fresh scan.
    Comment,
    /// Reserved words.
    Keyword,
    /// Plain identifiers.
    Identifier,
    /// Call-like identifiers (followed by `(`) and builtins.
    Function,
    /// String, multi-line string, and character literals.
    String,
    /// Integer and float literals.
    Number,
    /// Operators and punctuation.
    Punctuation,
    /// Invalid spans.
    Error,
}

impl Color {
    /// The color class for a token tag.
    ///
    /// Identifier reclassification by lookahead (call syntax) is the buffer's job; this mapping
    /// is position-independent.
    pub fn for_token(tag: Tag) -> Color {
        match tag {
            Tag::Identifier => Color::Identifier,
            Tag::Builtin => Color::Function,
            Tag::StringLiteral | Tag::MultilineStringLiteralLine | Tag::CharLiteral => {
                Color::String
            }
            Tag::IntegerLiteral | Tag::FloatLiteral => Color::Number,
            Tag::LineComment | Tag::DocComment | Tag::ContainerDocComment => Color::Comment,
            Tag::Invalid | Tag::InvalidPeriodAsterisks => Color::Error,
            Tag::Eof => Color::Default,
            tag if tag.is_keyword() => Color::Keyword,
            _ => Color::Punctuation,
        }
    }
}
