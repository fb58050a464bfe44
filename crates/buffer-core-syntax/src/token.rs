//! Token definitions and the reserved-word table.
//!
//! A [`Token`] is a classification ([`Tag`]) plus a half-open span ([`Loc`]) expressed in
//! **character offsets** (Unicode scalar values) into the scanned slice. The tag set is closed:
//! identifiers, literals, keywords, operators/punctuation, comment variants, `Eof` and `Invalid`.

/// Half-open character range of a token within the scanned slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loc {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

/// One lexical unit produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Classification of this unit.
    pub tag: Tag,
    /// Span of this unit in character offsets.
    pub loc: Loc,
}

/// Closed-set classification of a lexical unit.
///
/// Malformed input is represented by [`Tag::Invalid`] tokens, never by errors: the scanner is
/// total and the caller is expected to keep scanning past invalid spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// A malformed span (unterminated literal, bad escape, stray byte).
    Invalid,
    /// `.**` — looks like a chain of pointer dereferences, which is never valid.
    InvalidPeriodAsterisks,
    /// `[A-Za-z_][A-Za-z0-9_]*` that did not match a reserved word, or `@"..."`.
    Identifier,
    /// `"..."` including escapes.
    StringLiteral,
    /// One `\\...` continuation line of a multi-line string literal.
    MultilineStringLiteralLine,
    /// `'...'` including escapes.
    CharLiteral,
    /// End of input. Always the final token; repeated calls keep returning it.
    Eof,
    /// `@name` builtin call.
    Builtin,
    /// Integer literal in any base.
    IntegerLiteral,
    /// Float literal in any base.
    FloatLiteral,
    /// `//` comment, terminated by `\n` or end of input.
    LineComment,
    /// `///` doc comment.
    DocComment,
    /// `//!` container-level doc comment.
    ContainerDocComment,

    /// `!`
    Bang,
    /// `|`
    Pipe,
    /// `||`
    PipePipe,
    /// `|=`
    PipeEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `=>`
    EqualAngleBracketRight,
    /// `!=`
    BangEqual,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `;`
    Semicolon,
    /// `%`
    Percent,
    /// `%=`
    PercentEqual,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `.`
    Period,
    /// `.*`
    PeriodAsterisk,
    /// `..`
    Ellipsis2,
    /// `...`
    Ellipsis3,
    /// `^`
    Caret,
    /// `^=`
    CaretEqual,
    /// `+`
    Plus,
    /// `++`
    PlusPlus,
    /// `+=`
    PlusEqual,
    /// `+%`
    PlusPercent,
    /// `+%=`
    PlusPercentEqual,
    /// `+|`
    PlusPipe,
    /// `+|=`
    PlusPipeEqual,
    /// `-`
    Minus,
    /// `-=`
    MinusEqual,
    /// `-%`
    MinusPercent,
    /// `-%=`
    MinusPercentEqual,
    /// `-|`
    MinusPipe,
    /// `-|=`
    MinusPipeEqual,
    /// `*`
    Asterisk,
    /// `*=`
    AsteriskEqual,
    /// `**`
    AsteriskAsterisk,
    /// `*%`
    AsteriskPercent,
    /// `*%=`
    AsteriskPercentEqual,
    /// `*|`
    AsteriskPipe,
    /// `*|=`
    AsteriskPipeEqual,
    /// `:`
    Colon,
    /// `/`
    Slash,
    /// `/=`
    SlashEqual,
    /// `,`
    Comma,
    /// `&`
    Ampersand,
    /// `&=`
    AmpersandEqual,
    /// `?`
    QuestionMark,
    /// `<`
    AngleBracketLeft,
    /// `<=`
    AngleBracketLeftEqual,
    /// `<<`
    AngleBracketAngleBracketLeft,
    /// `<<=`
    AngleBracketAngleBracketLeftEqual,
    /// `<<|`
    AngleBracketAngleBracketLeftPipe,
    /// `<<|=`
    AngleBracketAngleBracketLeftPipeEqual,
    /// `>`
    AngleBracketRight,
    /// `>=`
    AngleBracketRightEqual,
    /// `>>`
    AngleBracketAngleBracketRight,
    /// `>>=`
    AngleBracketAngleBracketRightEqual,
    /// `~`
    Tilde,

    /// `addrspace`
    KeywordAddrspace,
    /// `align`
    KeywordAlign,
    /// `allowzero`
    KeywordAllowzero,
    /// `and`
    KeywordAnd,
    /// `anyframe`
    KeywordAnyframe,
    /// `anytype`
    KeywordAnytype,
    /// `asm`
    KeywordAsm,
    /// `async`
    KeywordAsync,
    /// `await`
    KeywordAwait,
    /// `break`
    KeywordBreak,
    /// `callconv`
    KeywordCallconv,
    /// `catch`
    KeywordCatch,
    /// `comptime`
    KeywordComptime,
    /// `const`
    KeywordConst,
    /// `continue`
    KeywordContinue,
    /// `defer`
    KeywordDefer,
    /// `else`
    KeywordElse,
    /// `enum`
    KeywordEnum,
    /// `errdefer`
    KeywordErrdefer,
    /// `error`
    KeywordError,
    /// `export`
    KeywordExport,
    /// `extern`
    KeywordExtern,
    /// `fn`
    KeywordFn,
    /// `for`
    KeywordFor,
    /// `if`
    KeywordIf,
    /// `inline`
    KeywordInline,
    /// `linksection`
    KeywordLinksection,
    /// `noalias`
    KeywordNoalias,
    /// `noinline`
    KeywordNoinline,
    /// `nosuspend`
    KeywordNosuspend,
    /// `opaque`
    KeywordOpaque,
    /// `or`
    KeywordOr,
    /// `orelse`
    KeywordOrelse,
    /// `packed`
    KeywordPacked,
    /// `pub`
    KeywordPub,
    /// `resume`
    KeywordResume,
    /// `return`
    KeywordReturn,
    /// `struct`
    KeywordStruct,
    /// `suspend`
    KeywordSuspend,
    /// `switch`
    KeywordSwitch,
    /// `test`
    KeywordTest,
    /// `threadlocal`
    KeywordThreadlocal,
    /// `try`
    KeywordTry,
    /// `union`
    KeywordUnion,
    /// `unreachable`
    KeywordUnreachable,
    /// `usingnamespace`
    KeywordUsingnamespace,
    /// `var`
    KeywordVar,
    /// `volatile`
    KeywordVolatile,
    /// `while`
    KeywordWhile,
}

impl Tag {
    /// Returns `true` if this tag is one of the reserved words.
    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|&(_, tag)| tag == self)
    }
}

/// Reserved words longer than this can never match; every entry of [`KEYWORDS`] fits.
pub const MAX_KEYWORD_LEN: usize = 20;

/// Reserved-word table, sorted for binary search.
static KEYWORDS: &[(&str, Tag)] = &[
    ("addrspace", Tag::KeywordAddrspace),
    ("align", Tag::KeywordAlign),
    ("allowzero", Tag::KeywordAllowzero),
    ("and", Tag::KeywordAnd),
    ("anyframe", Tag::KeywordAnyframe),
    ("anytype", Tag::KeywordAnytype),
    ("asm", Tag::KeywordAsm),
    ("async", Tag::KeywordAsync),
    ("await", Tag::KeywordAwait),
    ("break", Tag::KeywordBreak),
    ("callconv", Tag::KeywordCallconv),
    ("catch", Tag::KeywordCatch),
    ("comptime", Tag::KeywordComptime),
    ("const", Tag::KeywordConst),
    ("continue", Tag::KeywordContinue),
    ("defer", Tag::KeywordDefer),
    ("else", Tag::KeywordElse),
    ("enum", Tag::KeywordEnum),
    ("errdefer", Tag::KeywordErrdefer),
    ("error", Tag::KeywordError),
    ("export", Tag::KeywordExport),
    ("extern", Tag::KeywordExtern),
    ("fn", Tag::KeywordFn),
    ("for", Tag::KeywordFor),
    ("if", Tag::KeywordIf),
    ("inline", Tag::KeywordInline),
    ("linksection", Tag::KeywordLinksection),
    ("noalias", Tag::KeywordNoalias),
    ("noinline", Tag::KeywordNoinline),
    ("nosuspend", Tag::KeywordNosuspend),
    ("opaque", Tag::KeywordOpaque),
    ("or", Tag::KeywordOr),
    ("orelse", Tag::KeywordOrelse),
    ("packed", Tag::KeywordPacked),
    ("pub", Tag::KeywordPub),
    ("resume", Tag::KeywordResume),
    ("return", Tag::KeywordReturn),
    ("struct", Tag::KeywordStruct),
    ("suspend", Tag::KeywordSuspend),
    ("switch", Tag::KeywordSwitch),
    ("test", Tag::KeywordTest),
    ("threadlocal", Tag::KeywordThreadlocal),
    ("try", Tag::KeywordTry),
    ("union", Tag::KeywordUnion),
    ("unreachable", Tag::KeywordUnreachable),
    ("usingnamespace", Tag::KeywordUsingnamespace),
    ("var", Tag::KeywordVar),
    ("volatile", Tag::KeywordVolatile),
    ("while", Tag::KeywordWhile),
];

/// Resolve an identifier span to its keyword tag, if any.
///
/// The match is exact and case-sensitive. Spans longer than [`MAX_KEYWORD_LEN`] characters or
/// containing non-ASCII characters can never match and are rejected without a table lookup.
pub fn get_keyword(chars: &[char]) -> Option<Tag> {
    if chars.len() > MAX_KEYWORD_LEN {
        return None;
    }
    let mut buf = [0u8; MAX_KEYWORD_LEN];
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii() {
            return None;
        }
        buf[i] = c as u8;
    }
    let text = std::str::from_utf8(&buf[..chars.len()]).ok()?;
    KEYWORDS
        .binary_search_by_key(&text, |&(word, _)| word)
        .ok()
        .map(|idx| KEYWORDS[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_sorted() {
        for pair in KEYWORDS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_keyword_table_fits_length_cap() {
        for &(word, _) in KEYWORDS {
            assert!(word.len() <= MAX_KEYWORD_LEN);
        }
    }

    #[test]
    fn test_get_keyword_exact_match_only() {
        let chars: Vec<char> = "while".chars().collect();
        assert_eq!(get_keyword(&chars), Some(Tag::KeywordWhile));

        let chars: Vec<char> = "whil".chars().collect();
        assert_eq!(get_keyword(&chars), None);

        let chars: Vec<char> = "whilee".chars().collect();
        assert_eq!(get_keyword(&chars), None);

        // Case-sensitive.
        let chars: Vec<char> = "While".chars().collect();
        assert_eq!(get_keyword(&chars), None);
    }

    #[test]
    fn test_get_keyword_rejects_long_and_non_ascii_input() {
        let chars: Vec<char> = "a".repeat(MAX_KEYWORD_LEN + 1).chars().collect();
        assert_eq!(get_keyword(&chars), None);

        let chars: Vec<char> = "whilé".chars().collect();
        assert_eq!(get_keyword(&chars), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(Tag::KeywordConst.is_keyword());
        assert!(Tag::KeywordWhile.is_keyword());
        assert!(!Tag::Identifier.is_keyword());
        assert!(!Tag::Equal.is_keyword());
    }
}
