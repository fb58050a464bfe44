//! The scanner: an explicit state machine over a codepoint slice.
//!
//! [`Tokenizer::next`] produces a finite, monotonically advancing token sequence terminating in a
//! single [`Tag::Eof`]. A fresh tokenizer always restarts at offset 0; there is no mid-buffer
//! resume. Malformed input is reported as [`Tag::Invalid`] tokens, so scanning never fails.
//!
//! There is no backtracking except two controlled rewinds in numeric literals:
//!
//! - a leading `0` followed by a digit, `.`, `e`, `E` or `_` rewinds one position and
//!   reinterprets the literal as plain decimal;
//! - a second `.` directly after the tentative fraction point makes the number an integer
//!   literal and rewinds onto the first `.` (so `0..10` scans as integer, `..`, integer).

use crate::token::{Loc, Tag, Token, get_keyword};

/// Scanner state. One variant per position in a partially recognized token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Identifier,
    Builtin,
    StringLiteral,
    StringLiteralBackslash,
    MultilineStringLiteralLine,
    CharLiteral,
    CharLiteralBackslash,
    CharLiteralHexEscape,
    CharLiteralUnicodeEscapeSawU,
    CharLiteralUnicodeEscape,
    CharLiteralUnicodeInvalid,
    CharLiteralEnd,
    Backslash,
    Equal,
    Bang,
    Pipe,
    Minus,
    MinusPercent,
    MinusPipe,
    Asterisk,
    AsteriskPercent,
    AsteriskPipe,
    Slash,
    LineCommentStart,
    LineComment,
    DocCommentStart,
    DocComment,
    Zero,
    IntLiteralDec,
    IntLiteralDecNoUnderscore,
    IntLiteralBin,
    IntLiteralBinNoUnderscore,
    IntLiteralOct,
    IntLiteralOctNoUnderscore,
    IntLiteralHex,
    IntLiteralHexNoUnderscore,
    NumDotDec,
    NumDotHex,
    FloatFractionDec,
    FloatFractionDecNoUnderscore,
    FloatFractionHex,
    FloatFractionHexNoUnderscore,
    FloatExponentUnsigned,
    FloatExponentNum,
    FloatExponentNumNoUnderscore,
    Ampersand,
    Caret,
    Percent,
    Plus,
    PlusPercent,
    PlusPipe,
    AngleBracketLeft,
    AngleBracketAngleBracketLeft,
    AngleBracketAngleBracketLeftPipe,
    AngleBracketRight,
    AngleBracketAngleBracketRight,
    Period,
    Period2,
    PeriodAsterisk,
    SawAtSign,
}

/// A restartable scanner over a borrowed codepoint slice.
pub struct Tokenizer<'a> {
    buffer: &'a [char],
    index: usize,
    /// Invalid character found inside a literal or comment, surfaced by the next call.
    pending_invalid_token: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at offset 0 of `buffer`.
    pub fn new(buffer: &'a [char]) -> Self {
        Self {
            buffer,
            index: 0,
            pending_invalid_token: None,
        }
    }

    /// Produce the next token.
    ///
    /// Once [`Tag::Eof`] has been returned, every further call returns another `Eof` token
    /// spanning `len..len`.
    pub fn next(&mut self) -> Token {
        if let Some(token) = self.pending_invalid_token.take() {
            return token;
        }

        let mut state = State::Start;
        let mut result = Token {
            tag: Tag::Eof,
            loc: Loc {
                start: self.index,
                end: self.index,
            },
        };
        let mut seen_escape_digits: usize = 0;

        loop {
            if self.index >= self.buffer.len() {
                self.finish_at_end(state, &mut result);
                break;
            }
            let c = self.buffer[self.index];
            match state {
                State::Start => match c {
                    ' ' | '\n' | '\t' | '\r' => {
                        result.loc.start = self.index + 1;
                    }
                    '"' => {
                        state = State::StringLiteral;
                        result.tag = Tag::StringLiteral;
                    }
                    '\'' => {
                        state = State::CharLiteral;
                    }
                    'a'..='z' | 'A'..='Z' | '_' => {
                        state = State::Identifier;
                        result.tag = Tag::Identifier;
                    }
                    '@' => {
                        state = State::SawAtSign;
                    }
                    '=' => {
                        state = State::Equal;
                    }
                    '!' => {
                        state = State::Bang;
                    }
                    '|' => {
                        state = State::Pipe;
                    }
                    '(' => {
                        result.tag = Tag::LParen;
                        self.index += 1;
                        break;
                    }
                    ')' => {
                        result.tag = Tag::RParen;
                        self.index += 1;
                        break;
                    }
                    '[' => {
                        result.tag = Tag::LBracket;
                        self.index += 1;
                        break;
                    }
                    ']' => {
                        result.tag = Tag::RBracket;
                        self.index += 1;
                        break;
                    }
                    ';' => {
                        result.tag = Tag::Semicolon;
                        self.index += 1;
                        break;
                    }
                    ',' => {
                        result.tag = Tag::Comma;
                        self.index += 1;
                        break;
                    }
                    '?' => {
                        result.tag = Tag::QuestionMark;
                        self.index += 1;
                        break;
                    }
                    ':' => {
                        result.tag = Tag::Colon;
                        self.index += 1;
                        break;
                    }
                    '%' => {
                        state = State::Percent;
                    }
                    '*' => {
                        state = State::Asterisk;
                    }
                    '+' => {
                        state = State::Plus;
                    }
                    '<' => {
                        state = State::AngleBracketLeft;
                    }
                    '>' => {
                        state = State::AngleBracketRight;
                    }
                    '^' => {
                        state = State::Caret;
                    }
                    '\\' => {
                        state = State::Backslash;
                        result.tag = Tag::MultilineStringLiteralLine;
                    }
                    '{' => {
                        result.tag = Tag::LBrace;
                        self.index += 1;
                        break;
                    }
                    '}' => {
                        result.tag = Tag::RBrace;
                        self.index += 1;
                        break;
                    }
                    '~' => {
                        result.tag = Tag::Tilde;
                        self.index += 1;
                        break;
                    }
                    '.' => {
                        state = State::Period;
                    }
                    '-' => {
                        state = State::Minus;
                    }
                    '/' => {
                        state = State::Slash;
                    }
                    '&' => {
                        state = State::Ampersand;
                    }
                    '0' => {
                        state = State::Zero;
                        result.tag = Tag::IntegerLiteral;
                    }
                    '1'..='9' => {
                        state = State::IntLiteralDec;
                        result.tag = Tag::IntegerLiteral;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        self.index += 1;
                        break;
                    }
                },

                State::SawAtSign => match c {
                    '"' => {
                        result.tag = Tag::Identifier;
                        state = State::StringLiteral;
                    }
                    'a'..='z' | 'A'..='Z' | '_' => {
                        state = State::Builtin;
                        result.tag = Tag::Builtin;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::Identifier => match c {
                    'a'..='z' | 'A'..='Z' | '_' | '0'..='9' => {}
                    _ => {
                        if let Some(tag) = get_keyword(&self.buffer[result.loc.start..self.index]) {
                            result.tag = tag;
                        }
                        break;
                    }
                },

                State::Builtin => match c {
                    'a'..='z' | 'A'..='Z' | '_' | '0'..='9' => {}
                    _ => break,
                },

                State::StringLiteral => match c {
                    '\\' => {
                        state = State::StringLiteralBackslash;
                    }
                    '"' => {
                        self.index += 1;
                        break;
                    }
                    '\n' => {
                        // Unterminated: the newline is not part of the literal.
                        result.tag = Tag::Invalid;
                        break;
                    }
                    _ => self.check_literal_character(),
                },

                State::StringLiteralBackslash => match c {
                    '\n' => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                    _ => {
                        state = State::StringLiteral;
                    }
                },

                State::CharLiteral => match c {
                    '\\' => {
                        state = State::CharLiteralBackslash;
                    }
                    '\'' | '\n' => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                    _ => {
                        state = State::CharLiteralEnd;
                    }
                },

                State::CharLiteralBackslash => match c {
                    '\n' => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                    'x' => {
                        state = State::CharLiteralHexEscape;
                        seen_escape_digits = 0;
                    }
                    'u' => {
                        state = State::CharLiteralUnicodeEscapeSawU;
                    }
                    _ => {
                        state = State::CharLiteralEnd;
                    }
                },

                State::CharLiteralHexEscape => match c {
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {
                        seen_escape_digits += 1;
                        if seen_escape_digits == 2 {
                            state = State::CharLiteralEnd;
                        }
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::CharLiteralUnicodeEscapeSawU => match c {
                    '{' => {
                        state = State::CharLiteralUnicodeEscape;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        state = State::CharLiteralUnicodeInvalid;
                    }
                },

                State::CharLiteralUnicodeEscape => match c {
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {}
                    '}' => {
                        state = State::CharLiteralEnd;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        state = State::CharLiteralUnicodeInvalid;
                    }
                },

                State::CharLiteralUnicodeInvalid => match c {
                    // Keep consuming characters until an obvious stopping point, so the whole
                    // malformed escape lands in one invalid token.
                    '0'..='9' | 'a'..='z' | 'A'..='Z' | '}' => {}
                    _ => break,
                },

                State::CharLiteralEnd => match c {
                    '\'' => {
                        result.tag = Tag::CharLiteral;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::Backslash => match c {
                    '\\' => {
                        state = State::MultilineStringLiteralLine;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::MultilineStringLiteralLine => match c {
                    '\n' => {
                        self.index += 1;
                        break;
                    }
                    '\t' => {}
                    _ => self.check_literal_character(),
                },

                State::Equal => match c {
                    '=' => {
                        result.tag = Tag::EqualEqual;
                        self.index += 1;
                        break;
                    }
                    '>' => {
                        result.tag = Tag::EqualAngleBracketRight;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Equal;
                        break;
                    }
                },

                State::Bang => match c {
                    '=' => {
                        result.tag = Tag::BangEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Bang;
                        break;
                    }
                },

                State::Pipe => match c {
                    '=' => {
                        result.tag = Tag::PipeEqual;
                        self.index += 1;
                        break;
                    }
                    '|' => {
                        result.tag = Tag::PipePipe;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Pipe;
                        break;
                    }
                },

                State::Minus => match c {
                    '=' => {
                        result.tag = Tag::MinusEqual;
                        self.index += 1;
                        break;
                    }
                    '%' => {
                        state = State::MinusPercent;
                    }
                    '|' => {
                        state = State::MinusPipe;
                    }
                    _ => {
                        result.tag = Tag::Minus;
                        break;
                    }
                },

                State::MinusPercent => match c {
                    '=' => {
                        result.tag = Tag::MinusPercentEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::MinusPercent;
                        break;
                    }
                },

                State::MinusPipe => match c {
                    '=' => {
                        result.tag = Tag::MinusPipeEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::MinusPipe;
                        break;
                    }
                },

                State::Asterisk => match c {
                    '=' => {
                        result.tag = Tag::AsteriskEqual;
                        self.index += 1;
                        break;
                    }
                    '*' => {
                        result.tag = Tag::AsteriskAsterisk;
                        self.index += 1;
                        break;
                    }
                    '%' => {
                        state = State::AsteriskPercent;
                    }
                    '|' => {
                        state = State::AsteriskPipe;
                    }
                    _ => {
                        result.tag = Tag::Asterisk;
                        break;
                    }
                },

                State::AsteriskPercent => match c {
                    '=' => {
                        result.tag = Tag::AsteriskPercentEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::AsteriskPercent;
                        break;
                    }
                },

                State::AsteriskPipe => match c {
                    '=' => {
                        result.tag = Tag::AsteriskPipeEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::AsteriskPipe;
                        break;
                    }
                },

                State::Slash => match c {
                    '/' => {
                        state = State::LineCommentStart;
                    }
                    '=' => {
                        result.tag = Tag::SlashEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Slash;
                        break;
                    }
                },

                State::LineCommentStart => match c {
                    '/' => {
                        state = State::DocCommentStart;
                    }
                    '!' => {
                        result.tag = Tag::ContainerDocComment;
                        state = State::DocComment;
                    }
                    '\n' => {
                        result.tag = Tag::LineComment;
                        break;
                    }
                    '\t' => {
                        result.tag = Tag::LineComment;
                        state = State::LineComment;
                    }
                    _ => {
                        result.tag = Tag::LineComment;
                        state = State::LineComment;
                        self.check_literal_character();
                    }
                },

                State::DocCommentStart => match c {
                    '/' => {
                        // Four or more slashes is an ordinary comment.
                        result.tag = Tag::LineComment;
                        state = State::LineComment;
                    }
                    '\n' => {
                        result.tag = Tag::DocComment;
                        break;
                    }
                    '\t' => {
                        result.tag = Tag::DocComment;
                        state = State::DocComment;
                    }
                    _ => {
                        result.tag = Tag::DocComment;
                        state = State::DocComment;
                        self.check_literal_character();
                    }
                },

                State::LineComment | State::DocComment => match c {
                    '\n' => break,
                    '\t' => {}
                    _ => self.check_literal_character(),
                },

                State::Zero => match c {
                    'b' => {
                        state = State::IntLiteralBinNoUnderscore;
                    }
                    'o' => {
                        state = State::IntLiteralOctNoUnderscore;
                    }
                    'x' => {
                        state = State::IntLiteralHexNoUnderscore;
                    }
                    '0'..='9' | '_' | '.' | 'e' | 'E' => {
                        // Reinterpret as a plain decimal number.
                        self.index -= 1;
                        state = State::IntLiteralDec;
                    }
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::IntLiteralBinNoUnderscore => match c {
                    '0'..='1' => {
                        state = State::IntLiteralBin;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::IntLiteralBin => match c {
                    '_' => {
                        state = State::IntLiteralBinNoUnderscore;
                    }
                    '0'..='1' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::IntLiteralOctNoUnderscore => match c {
                    '0'..='7' => {
                        state = State::IntLiteralOct;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::IntLiteralOct => match c {
                    '_' => {
                        state = State::IntLiteralOctNoUnderscore;
                    }
                    '0'..='7' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::IntLiteralDecNoUnderscore => match c {
                    '0'..='9' => {
                        state = State::IntLiteralDec;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::IntLiteralDec => match c {
                    '_' => {
                        state = State::IntLiteralDecNoUnderscore;
                    }
                    '.' => {
                        state = State::NumDotDec;
                        result.tag = Tag::FloatLiteral;
                    }
                    'e' | 'E' => {
                        state = State::FloatExponentUnsigned;
                        result.tag = Tag::FloatLiteral;
                    }
                    '0'..='9' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::IntLiteralHexNoUnderscore => match c {
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {
                        state = State::IntLiteralHex;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::IntLiteralHex => match c {
                    '_' => {
                        state = State::IntLiteralHexNoUnderscore;
                    }
                    '.' => {
                        state = State::NumDotHex;
                        result.tag = Tag::FloatLiteral;
                    }
                    'p' | 'P' => {
                        state = State::FloatExponentUnsigned;
                        result.tag = Tag::FloatLiteral;
                    }
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::NumDotDec => match c {
                    '.' => {
                        // `N..` is an integer followed by a range: rewind onto the first `.`.
                        result.tag = Tag::IntegerLiteral;
                        self.index -= 1;
                        break;
                    }
                    'e' | 'E' => {
                        state = State::FloatExponentUnsigned;
                    }
                    '0'..='9' => {
                        state = State::FloatFractionDec;
                    }
                    _ => {
                        // No fraction digit: the `.` belongs to the next token.
                        result.tag = Tag::IntegerLiteral;
                        self.index -= 1;
                        break;
                    }
                },

                State::NumDotHex => match c {
                    '.' => {
                        result.tag = Tag::IntegerLiteral;
                        self.index -= 1;
                        break;
                    }
                    'p' | 'P' => {
                        state = State::FloatExponentUnsigned;
                    }
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {
                        state = State::FloatFractionHex;
                    }
                    _ => {
                        result.tag = Tag::IntegerLiteral;
                        self.index -= 1;
                        break;
                    }
                },

                State::FloatFractionDecNoUnderscore => match c {
                    '0'..='9' => {
                        state = State::FloatFractionDec;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::FloatFractionDec => match c {
                    '_' => {
                        state = State::FloatFractionDecNoUnderscore;
                    }
                    'e' | 'E' => {
                        state = State::FloatExponentUnsigned;
                    }
                    '0'..='9' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::FloatFractionHexNoUnderscore => match c {
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {
                        state = State::FloatFractionHex;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::FloatFractionHex => match c {
                    '_' => {
                        state = State::FloatFractionHexNoUnderscore;
                    }
                    'p' | 'P' => {
                        state = State::FloatExponentUnsigned;
                    }
                    '0'..='9' | 'a'..='f' | 'A'..='F' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::FloatExponentUnsigned => match c {
                    '+' | '-' => {
                        state = State::FloatExponentNumNoUnderscore;
                    }
                    _ => {
                        // Reprocess the character under the signed-exponent state.
                        self.index -= 1;
                        state = State::FloatExponentNumNoUnderscore;
                    }
                },

                State::FloatExponentNumNoUnderscore => match c {
                    '0'..='9' => {
                        state = State::FloatExponentNum;
                    }
                    _ => {
                        result.tag = Tag::Invalid;
                        break;
                    }
                },

                State::FloatExponentNum => match c {
                    '_' => {
                        state = State::FloatExponentNumNoUnderscore;
                    }
                    '0'..='9' => {}
                    _ => {
                        if is_identifier_char(c) {
                            result.tag = Tag::Invalid;
                        }
                        break;
                    }
                },

                State::Ampersand => match c {
                    '=' => {
                        result.tag = Tag::AmpersandEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Ampersand;
                        break;
                    }
                },

                State::Caret => match c {
                    '=' => {
                        result.tag = Tag::CaretEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Caret;
                        break;
                    }
                },

                State::Percent => match c {
                    '=' => {
                        result.tag = Tag::PercentEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Percent;
                        break;
                    }
                },

                State::Plus => match c {
                    '=' => {
                        result.tag = Tag::PlusEqual;
                        self.index += 1;
                        break;
                    }
                    '+' => {
                        result.tag = Tag::PlusPlus;
                        self.index += 1;
                        break;
                    }
                    '%' => {
                        state = State::PlusPercent;
                    }
                    '|' => {
                        state = State::PlusPipe;
                    }
                    _ => {
                        result.tag = Tag::Plus;
                        break;
                    }
                },

                State::PlusPercent => match c {
                    '=' => {
                        result.tag = Tag::PlusPercentEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::PlusPercent;
                        break;
                    }
                },

                State::PlusPipe => match c {
                    '=' => {
                        result.tag = Tag::PlusPipeEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::PlusPipe;
                        break;
                    }
                },

                State::AngleBracketLeft => match c {
                    '<' => {
                        state = State::AngleBracketAngleBracketLeft;
                    }
                    '=' => {
                        result.tag = Tag::AngleBracketLeftEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::AngleBracketLeft;
                        break;
                    }
                },

                State::AngleBracketAngleBracketLeft => match c {
                    '=' => {
                        result.tag = Tag::AngleBracketAngleBracketLeftEqual;
                        self.index += 1;
                        break;
                    }
                    '|' => {
                        state = State::AngleBracketAngleBracketLeftPipe;
                    }
                    _ => {
                        result.tag = Tag::AngleBracketAngleBracketLeft;
                        break;
                    }
                },

                State::AngleBracketAngleBracketLeftPipe => match c {
                    '=' => {
                        result.tag = Tag::AngleBracketAngleBracketLeftPipeEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::AngleBracketAngleBracketLeftPipe;
                        break;
                    }
                },

                State::AngleBracketRight => match c {
                    '>' => {
                        state = State::AngleBracketAngleBracketRight;
                    }
                    '=' => {
                        result.tag = Tag::AngleBracketRightEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::AngleBracketRight;
                        break;
                    }
                },

                State::AngleBracketAngleBracketRight => match c {
                    '=' => {
                        result.tag = Tag::AngleBracketAngleBracketRightEqual;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::AngleBracketAngleBracketRight;
                        break;
                    }
                },

                State::Period => match c {
                    '.' => {
                        state = State::Period2;
                    }
                    '*' => {
                        state = State::PeriodAsterisk;
                    }
                    _ => {
                        result.tag = Tag::Period;
                        break;
                    }
                },

                State::Period2 => match c {
                    '.' => {
                        result.tag = Tag::Ellipsis3;
                        self.index += 1;
                        break;
                    }
                    _ => {
                        result.tag = Tag::Ellipsis2;
                        break;
                    }
                },

                State::PeriodAsterisk => match c {
                    '*' => {
                        result.tag = Tag::InvalidPeriodAsterisks;
                        break;
                    }
                    _ => {
                        result.tag = Tag::PeriodAsterisk;
                        break;
                    }
                },
            }
            self.index += 1;
        }

        if result.tag == Tag::Eof {
            if let Some(token) = self.pending_invalid_token.take() {
                return token;
            }
            result.loc.start = self.index;
        }
        result.loc.end = self.index;
        result
    }

    /// Finalize the token when input runs out mid-state.
    fn finish_at_end(&mut self, state: State, result: &mut Token) {
        match state {
            State::Start
            | State::Builtin
            | State::MultilineStringLiteralLine
            | State::LineComment
            | State::DocComment
            | State::Zero
            | State::IntLiteralDec
            | State::IntLiteralBin
            | State::IntLiteralOct
            | State::IntLiteralHex
            | State::FloatFractionDec
            | State::FloatFractionHex
            | State::FloatExponentNum
            | State::CharLiteralUnicodeInvalid => {}

            State::Identifier => {
                if let Some(tag) = get_keyword(&self.buffer[result.loc.start..self.index]) {
                    result.tag = tag;
                }
            }

            // Unterminated literals and dangling prefixes.
            State::StringLiteral
            | State::StringLiteralBackslash
            | State::CharLiteral
            | State::CharLiteralBackslash
            | State::CharLiteralHexEscape
            | State::CharLiteralUnicodeEscapeSawU
            | State::CharLiteralUnicodeEscape
            | State::CharLiteralEnd
            | State::Backslash
            | State::SawAtSign
            | State::IntLiteralDecNoUnderscore
            | State::IntLiteralBinNoUnderscore
            | State::IntLiteralOctNoUnderscore
            | State::IntLiteralHexNoUnderscore
            | State::FloatFractionDecNoUnderscore
            | State::FloatFractionHexNoUnderscore
            | State::FloatExponentUnsigned
            | State::FloatExponentNumNoUnderscore => {
                result.tag = Tag::Invalid;
            }

            // A trailing `.` is not part of the number.
            State::NumDotDec | State::NumDotHex => {
                result.tag = Tag::IntegerLiteral;
                self.index -= 1;
            }

            State::Equal => result.tag = Tag::Equal,
            State::Bang => result.tag = Tag::Bang,
            State::Pipe => result.tag = Tag::Pipe,
            State::Minus => result.tag = Tag::Minus,
            State::MinusPercent => result.tag = Tag::MinusPercent,
            State::MinusPipe => result.tag = Tag::MinusPipe,
            State::Asterisk => result.tag = Tag::Asterisk,
            State::AsteriskPercent => result.tag = Tag::AsteriskPercent,
            State::AsteriskPipe => result.tag = Tag::AsteriskPipe,
            State::Slash => result.tag = Tag::Slash,
            State::LineCommentStart => result.tag = Tag::LineComment,
            State::DocCommentStart => result.tag = Tag::DocComment,
            State::Ampersand => result.tag = Tag::Ampersand,
            State::Caret => result.tag = Tag::Caret,
            State::Percent => result.tag = Tag::Percent,
            State::Plus => result.tag = Tag::Plus,
            State::PlusPercent => result.tag = Tag::PlusPercent,
            State::PlusPipe => result.tag = Tag::PlusPipe,
            State::AngleBracketLeft => result.tag = Tag::AngleBracketLeft,
            State::AngleBracketAngleBracketLeft => {
                result.tag = Tag::AngleBracketAngleBracketLeft;
            }
            State::AngleBracketAngleBracketLeftPipe => {
                result.tag = Tag::AngleBracketAngleBracketLeftPipe;
            }
            State::AngleBracketRight => result.tag = Tag::AngleBracketRight,
            State::AngleBracketAngleBracketRight => {
                result.tag = Tag::AngleBracketAngleBracketRight;
            }
            State::Period => result.tag = Tag::Period,
            State::Period2 => result.tag = Tag::Ellipsis2,
            State::PeriodAsterisk => result.tag = Tag::PeriodAsterisk,
        }
    }

    /// Record a disallowed raw character inside a literal or comment.
    ///
    /// The invalid span is not absorbed into the surrounding token; it is held back and
    /// surfaced by the next call to [`Tokenizer::next`].
    fn check_literal_character(&mut self) {
        if self.pending_invalid_token.is_some() {
            return;
        }
        let c = self.buffer[self.index];
        if is_invalid_literal_character(c) {
            self.pending_invalid_token = Some(Token {
                tag: Tag::Invalid,
                loc: Loc {
                    start: self.index,
                    end: self.index + 1,
                },
            });
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Raw characters that may never appear inside literals or comments.
///
/// Tabs are tolerated; `\n` is handled by the state machine itself.
fn is_invalid_literal_character(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{08}'
            | '\u{0b}'..='\u{0c}'
            | '\u{0e}'..='\u{1f}'
            | '\u{7f}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
