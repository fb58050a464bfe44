//! Headless text buffer with reversible edits, line indexing, and token-based coloring.
//!
//! `buffer-core` keeps a document as a flat array of Unicode codepoints and derives everything
//! else from it: a line table, a per-codepoint color array painted from a full tokenization
//! (via [`buffer_core_syntax`]), and a UTF-8 byte image for disk I/O. Every mutation records an
//! inverse-carrying [`Edit`], so [`Buffer::undo`] restores the previous content exactly.
//!
//! The crate is deliberately frontend-free: no rendering, no input handling, no async. A UI
//! drives it by applying edits, calling [`Buffer::sync_internal_data`] when `dirty` is set, and
//! reading the `chars`/`colors`/`lines` views back out.
//!
//! # Example
//!
//! ```
//! use buffer_core::Buffer;
//!
//! let mut buffer = Buffer::from_text("const answer = 42;\n");
//! buffer.insert_str(0, "// the obvious constant\n");
//! buffer.sync_internal_data();
//! assert_eq!(buffer.num_lines(), 3);
//!
//! buffer.undo();
//! buffer.sync_internal_data();
//! assert_eq!(buffer.get_text(), "const answer = 42;\n");
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod color;
pub mod edit;
pub mod line_index;
pub mod search;

pub use buffer::{Buffer, BufferError, MAX_FILE_SIZE};
pub use color::Color;
pub use edit::{Edit, LineCol, Range};
pub use line_index::{Line, LineIndex};
pub use search::{Query, SearchError, SearchOptions};
