#![warn(missing_docs)]
//! `buffer-core-syntax` - the Zig scanner behind `buffer-core`'s syntax coloring.
//!
//! This crate intentionally stays a leaf: it has no dependency on the buffer layer (or anything
//! else) and operates on a plain codepoint slice. Given document contents as `&[char]`, a
//! [`Tokenizer`] yields a finite sequence of [`Token`]s terminating in a single [`Tag::Eof`].
//!
//! Error policy: malformed literals are ordinary [`Tag::Invalid`] tokens spanning the offending
//! region, never errors - tokenization of any finite input always runs to completion.
//!
//! ```rust
//! use buffer_core_syntax::{Tag, Tokenizer};
//!
//! let chars: Vec<char> = "const answer = 42;".chars().collect();
//! let mut tokenizer = Tokenizer::new(&chars);
//! assert_eq!(tokenizer.next().tag, Tag::KeywordConst);
//! assert_eq!(tokenizer.next().tag, Tag::Identifier);
//! assert_eq!(tokenizer.next().tag, Tag::Equal);
//! assert_eq!(tokenizer.next().tag, Tag::IntegerLiteral);
//! assert_eq!(tokenizer.next().tag, Tag::Semicolon);
//! assert_eq!(tokenizer.next().tag, Tag::Eof);
//! ```

pub mod token;
pub mod tokenizer;

pub use token::{Loc, MAX_KEYWORD_LEN, Tag, Token, get_keyword};
pub use tokenizer::Tokenizer;
