//! The document buffer: codepoint storage, reversible edits, file binding, and color sync.
//!
//! A [`Buffer`] owns the document's codepoints, a derived UTF-8 byte cache, the per-codepoint
//! color array, the line index, and the edit log. It is mutated exclusively through the three
//! edit operations (which record an inverse-carrying [`Edit`]) or through [`Buffer::undo`].
//!
//! Everything is single-threaded and synchronous: every operation runs to completion on the
//! calling thread, and file I/O blocks.
//!
//! Derived state (line index, colors) is refreshed by [`Buffer::sync_internal_data`], a
//! whole-buffer pass gated on the `dirty` flag rather than run per keystroke.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use buffer_core_syntax::{Tag, Tokenizer};

use crate::color::Color;
use crate::edit::{Edit, LineCol, Range};
use crate::line_index::{Line, LineIndex};

/// Largest file the buffer will load, in bytes.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Fatal buffer errors.
///
/// Recoverable conditions never appear here: malformed tokens become `Invalid` tokens,
/// out-of-range edit positions are clamped, and an on-disk conflict is surfaced through the
/// `modified_on_disk` flag for the caller to resolve.
#[derive(Debug)]
pub enum BufferError {
    /// The file exceeds [`MAX_FILE_SIZE`].
    FileTooLarge {
        /// Size of the file on disk, in bytes.
        size: u64,
    },
    /// The file is not valid UTF-8. The source format is defined as UTF-8 text only.
    InvalidUtf8,
    /// Filesystem error other than "not found" during refresh.
    Io(std::io::Error),
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::FileTooLarge { size } => {
                write!(f, "File is {} bytes; the limit is {} bytes", size, MAX_FILE_SIZE)
            }
            BufferError::InvalidUtf8 => write!(f, "File is not valid UTF-8"),
            BufferError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BufferError {
    fn from(err: std::io::Error) -> Self {
        BufferError::Io(err)
    }
}

/// An in-memory text document.
#[derive(Debug)]
pub struct Buffer {
    /// The document's codepoints. Authoritative.
    chars: Vec<char>,
    /// UTF-8 byte cache. Rebuilt on demand; not authoritative between edits.
    bytes: Vec<u8>,
    /// One color class per codepoint. Same length as `chars` after any sync.
    colors: Vec<Color>,
    /// Line table. Rebuilt by sync.
    lines: LineIndex,
    /// Applied edits, most recent last.
    edits: Vec<Edit>,
    /// Reverted edits. Cleared by every new edit.
    redone_edits: Vec<Edit>,
    /// Bound file, if any.
    path: Option<PathBuf>,
    /// Modification time of the bound file as of the last load/save.
    disk_modified_time: Option<SystemTime>,
    /// Derived state (line index, colors) is stale relative to `chars`.
    pub dirty: bool,
    /// The buffer holds edits not yet written to disk.
    pub modified: bool,
    /// The bound file changed on disk while the buffer held unsaved edits.
    pub modified_on_disk: bool,
    /// The bound file no longer exists on disk.
    pub deleted: bool,
}

impl Buffer {
    /// Create an empty, freestanding buffer.
    pub fn new() -> Self {
        let mut buffer = Self {
            chars: Vec::new(),
            bytes: Vec::new(),
            colors: Vec::new(),
            lines: LineIndex::new(),
            edits: Vec::new(),
            redone_edits: Vec::new(),
            path: None,
            disk_modified_time: None,
            dirty: true,
            modified: false,
            modified_on_disk: false,
            deleted: false,
        };
        buffer.lines.recalculate(&buffer.chars);
        buffer
    }

    /// Create a freestanding buffer with initial content.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.chars = text.chars().collect();
        buffer.colors.resize(buffer.chars.len(), Color::Comment);
        buffer.lines.recalculate(&buffer.chars);
        buffer
    }

    /// Create a buffer bound to `path` by loading it.
    pub fn from_file(path: PathBuf) -> Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.load_file(path)?;
        Ok(buffer)
    }

    // ------------------------------------------------------------------
    // Read-only views (the renderer boundary)
    // ------------------------------------------------------------------

    /// The document's codepoints.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Per-codepoint color classes, indexed identically to [`Buffer::chars`].
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The line table.
    pub fn lines(&self) -> &[Line] {
        self.lines.lines()
    }

    /// Number of codepoints in the document.
    pub fn num_chars(&self) -> usize {
        self.chars.len()
    }

    /// Number of lines in the document.
    pub fn num_lines(&self) -> usize {
        self.lines.num_lines()
    }

    /// The bound file, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of edits available to [`Buffer::undo`].
    pub fn undo_depth(&self) -> usize {
        self.edits.len()
    }

    /// The document as a `String`.
    pub fn get_text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The document as UTF-8, rebuilding the byte cache.
    pub fn bytes(&mut self) -> &[u8] {
        self.update_bytes();
        &self.bytes
    }

    // ------------------------------------------------------------------
    // Edit operations
    // ------------------------------------------------------------------

    /// Insert `new_chars` at `pos`. `pos` is clamped to the end of the buffer.
    pub fn insert_slice(&mut self, pos: usize, new_chars: &[char]) {
        if new_chars.is_empty() {
            return;
        }
        let pos = pos.min(self.chars.len());
        self.chars.splice(pos..pos, new_chars.iter().copied());
        self.push_edit(Edit::Insert {
            pos,
            new_chars: new_chars.to_vec(),
        });
    }

    /// Insert `text` at `pos`. Convenience wrapper over [`Buffer::insert_slice`].
    pub fn insert_str(&mut self, pos: usize, text: &str) {
        let new_chars: Vec<char> = text.chars().collect();
        self.insert_slice(pos, &new_chars);
    }

    /// Replace `[start, end)` with `new_chars`. `end` is clamped to the buffer length.
    ///
    /// The replaced span is captured before mutating, so the edit can be inverted exactly.
    pub fn replace_range(&mut self, start: usize, end: usize, new_chars: &[char]) {
        let end = end.min(self.chars.len());
        assert!(start <= end, "replace_range: start {} > end {}", start, end);
        let old_chars: Vec<char> = self.chars[start..end].to_vec();
        self.chars.splice(start..end, new_chars.iter().copied());
        self.push_edit(Edit::Replace {
            range: Range::new(start, end),
            new_chars: new_chars.to_vec(),
            old_chars,
        });
    }

    /// Delete `[start, end)`. `end` is clamped; a resulting empty range is a no-op.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.chars.len());
        if start >= end {
            return;
        }
        let old_chars: Vec<char> = self.chars.drain(start..end).collect();
        self.push_edit(Edit::Delete {
            range: Range::new(start, end),
            old_chars,
        });
    }

    /// Revert the most recent edit by applying its exact inverse. No-op on an empty edit log.
    pub fn undo(&mut self) {
        let Some(edit) = self.edits.pop() else {
            return;
        };
        match edit {
            Edit::Insert { pos, new_chars } => {
                self.chars.drain(pos..pos + new_chars.len());
            }
            Edit::Delete { range, old_chars } => {
                self.chars.splice(range.start..range.start, old_chars);
            }
            Edit::Replace {
                range,
                new_chars,
                old_chars,
            } => {
                self.chars
                    .splice(range.start..range.start + new_chars.len(), old_chars);
            }
        }
        self.dirty = true;
        self.modified = true;
    }

    fn push_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
        self.redone_edits.clear();
        self.dirty = true;
        self.modified = true;
    }

    // ------------------------------------------------------------------
    // File binding
    // ------------------------------------------------------------------

    /// Bind to `path` and load its contents, replacing the document.
    ///
    /// Files over [`MAX_FILE_SIZE`] and files that are not valid UTF-8 are fatal. One array
    /// entry is stored per source codepoint; combining sequences become multiple characters.
    pub fn load_file(&mut self, path: PathBuf) -> Result<(), BufferError> {
        let metadata = fs::metadata(&path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(BufferError::FileTooLarge {
                size: metadata.len(),
            });
        }
        let bytes = fs::read(&path)?;
        let text = String::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)?;

        self.chars = text.chars().collect();
        self.bytes = text.into_bytes();
        self.colors.clear();
        self.colors.resize(self.chars.len(), Color::Comment);
        self.lines.recalculate(&self.chars);
        self.edits.clear();
        self.redone_edits.clear();
        self.disk_modified_time = metadata.modified().ok();
        self.path = Some(path);
        self.dirty = true;
        self.modified = false;
        self.modified_on_disk = false;
        self.deleted = false;
        Ok(())
    }

    /// Write the document to the bound file, truncating existing content. No-op if unbound.
    ///
    /// A trailing newline is appended first if the document lacks one.
    pub fn save_to_disk(&mut self) -> Result<(), BufferError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        if self.chars.last() != Some(&'\n') {
            self.chars.push('\n');
            self.dirty = true;
        }
        self.update_bytes();
        fs::write(&path, &self.bytes)?;
        self.disk_modified_time = fs::metadata(&path)?.modified().ok();
        self.modified = false;
        self.modified_on_disk = false;
        self.deleted = false;
        Ok(())
    }

    /// Re-check the bound file against the recorded modification time. No-op if unbound.
    ///
    /// - File missing: sets `deleted` and returns.
    /// - Timestamp changed with unsaved edits: sets `modified_on_disk`; never auto-resolved.
    /// - Timestamp changed with no unsaved edits: reloads the file.
    pub fn refresh_from_disk(&mut self) -> Result<(), BufferError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.deleted = true;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        if metadata.modified().ok() == self.disk_modified_time {
            return Ok(());
        }
        if self.modified {
            self.modified_on_disk = true;
            return Ok(());
        }
        self.load_file(path)
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// Rebuild the line index and repaint the whole color array from a fresh tokenization.
    ///
    /// The color array is first filled with [`Color::Comment`], then painted per token;
    /// whitespace keeps the fill. Identifiers directly followed by `(` are reclassified as
    /// [`Color::Function`]. Clears `dirty`.
    pub fn sync_internal_data(&mut self) {
        self.recalculate_lines();
        self.colors.clear();
        self.colors.resize(self.chars.len(), Color::Comment);

        let mut tokenizer = Tokenizer::new(&self.chars);
        loop {
            let token = tokenizer.next();
            if token.tag == Tag::Eof {
                break;
            }
            let mut color = Color::for_token(token.tag);
            if color == Color::Identifier && self.chars.get(token.loc.end) == Some(&'(') {
                color = Color::Function;
            }
            for slot in &mut self.colors[token.loc.start..token.loc.end] {
                *slot = color;
            }
        }
        self.dirty = false;
    }

    /// Rebuild the line table in a single linear pass.
    pub fn recalculate_lines(&mut self) {
        self.lines.recalculate(&self.chars);
    }

    /// Line/column position of a character offset. Binary search over the line table.
    pub fn get_line_col_from_pos(&self, pos: usize) -> LineCol {
        self.lines.line_col_from_pos(pos)
    }

    /// Absolute character offset of a line/column position, both clamped into range.
    pub fn get_pos_from_line_col(&self, line: usize, col: usize) -> usize {
        self.lines.pos_from_line_col(line, col)
    }

    // ------------------------------------------------------------------
    // Region helpers
    // ------------------------------------------------------------------

    /// The maximal run of word characters containing `pos` (or `pos - 1`).
    ///
    /// Word characters never include `\n`, so the run cannot cross a line boundary. Returns
    /// `None` if neither position holds a word character.
    pub fn select_word(&self, pos: usize) -> Option<Range> {
        let anchor = if pos < self.chars.len() && is_word_char(self.chars[pos]) {
            pos
        } else if pos > 0 && pos <= self.chars.len() && is_word_char(self.chars[pos - 1]) {
            pos - 1
        } else {
            return None;
        };
        let mut start = anchor;
        while start > 0 && is_word_char(self.chars[start - 1]) {
            start -= 1;
        }
        let mut end = anchor + 1;
        while end < self.chars.len() && is_word_char(self.chars[end]) {
            end += 1;
        }
        Some(Range::new(start, end))
    }

    /// Grow a (clamped) range outward to the start of its first line and the end of its last.
    pub fn expand_range_to_whole_lines(&self, start: usize, end: usize) -> Range {
        let start = start.min(self.chars.len());
        let end = end.min(self.chars.len()).max(start);
        let first = self.lines.line_col_from_pos(start).line;
        let last = self.lines.line_col_from_pos(end).line;
        Range::new(
            self.lines.get(first).map(|line| line.start).unwrap_or(0),
            self.lines
                .get(last)
                .map(|line| line.end)
                .unwrap_or(self.chars.len()),
        )
    }

    /// Delete every run of spaces immediately preceding a newline or the end of the buffer.
    ///
    /// Each removed run is recorded as its own edit, so the operation is undoable per run.
    pub fn strip_trailing_spaces(&mut self) {
        // Walk back to front so earlier offsets stay valid after each deletion.
        let mut pos = self.chars.len();
        loop {
            let mut run_start = pos;
            while run_start > 0 && self.chars[run_start - 1] == ' ' {
                run_start -= 1;
            }
            if run_start < pos {
                self.delete_range(run_start, pos);
            }
            let mut scan = run_start;
            while scan > 0 && self.chars[scan - 1] != '\n' {
                scan -= 1;
            }
            if scan == 0 {
                break;
            }
            pos = scan - 1;
        }
    }

    fn update_bytes(&mut self) {
        self.bytes.clear();
        let mut utf8 = [0u8; 4];
        for &c in &self.chars {
            self.bytes.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = Buffer::new();
        assert_eq!(buffer.num_chars(), 0);
        assert_eq!(buffer.num_lines(), 1);
        assert!(buffer.dirty);
        assert!(!buffer.modified);
    }

    #[test]
    fn test_colors_default_to_comment_before_first_sync() {
        let buffer = Buffer::from_text("abc");
        assert_eq!(buffer.colors(), &[Color::Comment; 3]);
    }

    #[test]
    fn test_insert_clamps_position() {
        let mut buffer = Buffer::new();
        let chars: Vec<char> = "ab".chars().collect();
        buffer.insert_slice(100, &chars);
        assert_eq!(buffer.get_text(), "ab");
        assert!(buffer.modified);
        assert!(buffer.dirty);
    }

    #[test]
    fn test_replace_range_clamps_end() {
        let mut buffer = Buffer::from_text("abcd");
        let chars: Vec<char> = "XY".chars().collect();
        buffer.replace_range(2, 100, &chars);
        assert_eq!(buffer.get_text(), "abXY");
    }

    #[test]
    #[should_panic]
    fn test_replace_range_rejects_inverted_range() {
        let mut buffer = Buffer::from_text("abcd");
        buffer.replace_range(3, 1, &[]);
    }

    #[test]
    fn test_delete_range_empty_is_noop() {
        let mut buffer = Buffer::from_text("abcd");
        buffer.delete_range(2, 2);
        buffer.delete_range(10, 20);
        assert_eq!(buffer.get_text(), "abcd");
        assert_eq!(buffer.undo_depth(), 0);
        assert!(!buffer.modified);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut buffer = Buffer::from_text("abc");
        buffer.undo();
        assert_eq!(buffer.get_text(), "abc");
    }

    #[test]
    fn test_undo_restores_replace_exactly() {
        let mut buffer = Buffer::from_text("hello world");
        let chars: Vec<char> = "rust!".chars().collect();
        buffer.replace_range(6, 11, &chars);
        assert_eq!(buffer.get_text(), "hello rust!");
        buffer.undo();
        assert_eq!(buffer.get_text(), "hello world");
    }

    #[test]
    fn test_new_edit_clears_redone_edits() {
        let mut buffer = Buffer::from_text("abc");
        buffer.insert_str(3, "d");
        buffer.undo();
        buffer.insert_str(0, "z");
        assert!(buffer.redone_edits.is_empty());
        assert_eq!(buffer.get_text(), "zabc");
    }

    #[test]
    fn test_select_word() {
        let buffer = Buffer::from_text("foo bar_baz\nqux");
        assert_eq!(buffer.select_word(0), Some(Range::new(0, 3)));
        assert_eq!(buffer.select_word(5), Some(Range::new(4, 11)));
        // At the end of a word, the preceding character anchors the selection.
        assert_eq!(buffer.select_word(3), Some(Range::new(0, 3)));
        // On whitespace with no word character before it: none.
        let spaced = Buffer::from_text("a  b");
        assert_eq!(spaced.select_word(2), None);
        // Runs never cross the line boundary.
        assert_eq!(buffer.select_word(12), Some(Range::new(12, 15)));
    }

    #[test]
    fn test_select_word_at_buffer_end() {
        let buffer = Buffer::from_text("abc");
        assert_eq!(buffer.select_word(3), Some(Range::new(0, 3)));
        let empty = Buffer::new();
        assert_eq!(empty.select_word(0), None);
    }

    #[test]
    fn test_expand_range_to_whole_lines() {
        let buffer = Buffer::from_text("one\ntwo\nthree");
        assert_eq!(buffer.expand_range_to_whole_lines(5, 9), Range::new(4, 13));
        assert_eq!(buffer.expand_range_to_whole_lines(1, 2), Range::new(0, 3));
        // Out-of-range inputs are clamped first.
        assert_eq!(buffer.expand_range_to_whole_lines(50, 90), Range::new(8, 13));
    }

    #[test]
    fn test_strip_trailing_spaces() {
        let mut buffer = Buffer::from_text("a  \nb \n  c\nd  ");
        buffer.strip_trailing_spaces();
        assert_eq!(buffer.get_text(), "a\nb\n  c\nd");
    }

    #[test]
    fn test_strip_trailing_spaces_is_undoable() {
        let mut buffer = Buffer::from_text("a \nb  ");
        buffer.strip_trailing_spaces();
        assert_eq!(buffer.get_text(), "a\nb");
        buffer.undo();
        buffer.undo();
        assert_eq!(buffer.get_text(), "a \nb  ");
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut buffer = Buffer::from_text("héllo 猫\n");
        let bytes = buffer.bytes().to_vec();
        let decoded: Vec<char> = String::from_utf8(bytes).unwrap().chars().collect();
        assert_eq!(decoded, buffer.chars());
    }

    #[test]
    fn test_save_without_binding_is_noop() {
        let mut buffer = Buffer::from_text("abc");
        buffer.save_to_disk().unwrap();
        buffer.refresh_from_disk().unwrap();
        assert_eq!(buffer.get_text(), "abc");
    }
}
