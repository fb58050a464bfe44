//! The logical line index.
//!
//! A flat table of [`Line`] records rebuilt from the codepoint array in one linear pass.
//! The table always partitions `[0, num_chars]` with no gaps: `lines[i].end` is the offset of
//! the `\n` separating it from `lines[i + 1]` (`lines[i].end == lines[i + 1].start - 1`), and
//! the final line's `end` equals the character count. A buffer whose text ends in `\n` therefore
//! carries a trailing empty line.

use crate::edit::LineCol;

/// Character-offset bounds of one logical line (the terminating `\n` is excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Offset of the first character of the line.
    pub start: usize,
    /// Offset of the first non-space character, or `end` if the line is blank.
    pub text_start: usize,
    /// Exclusive end offset (position of the `\n`, or the buffer length for the last line).
    pub end: usize,
}

impl Line {
    /// Length of the line in characters, excluding the `\n`.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the line holds no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Table mapping line numbers to character-offset ranges.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lines: Vec<Line>,
}

impl LineIndex {
    /// Create an empty index. Call [`LineIndex::recalculate`] before querying.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild the table from `chars` in a single linear pass.
    pub fn recalculate(&mut self, chars: &[char]) {
        self.lines.clear();
        let mut line_start = 0;
        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' {
                self.lines.push(make_line(chars, line_start, i));
                line_start = i + 1;
            }
        }
        self.lines.push(make_line(chars, line_start, chars.len()));
    }

    /// All lines, in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines. At least 1 once [`LineIndex::recalculate`] has run.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// The line with the given number, if it exists.
    pub fn get(&self, line_number: usize) -> Option<Line> {
        self.lines.get(line_number).copied()
    }

    /// Line number containing the (clamped) character offset. Binary search by `start`, O(log n).
    ///
    /// An offset pointing at a `\n` belongs to the line that the `\n` terminates; the buffer-end
    /// offset belongs to the last line.
    pub fn line_number_at(&self, pos: usize) -> usize {
        debug_assert!(!self.lines.is_empty());
        self.lines
            .partition_point(|line| line.start <= pos)
            .saturating_sub(1)
    }

    /// Convert a character offset to a line/column position. The offset is clamped to the
    /// containing line's bounds.
    pub fn line_col_from_pos(&self, pos: usize) -> LineCol {
        let line_number = self.line_number_at(pos);
        let line = self.lines[line_number];
        LineCol {
            line: line_number,
            col: pos.min(line.end) - line.start,
        }
    }

    /// Convert a line/column position to an absolute character offset.
    ///
    /// `line` is clamped into `[0, num_lines - 1]` and `col` into `[0, line_len]`.
    pub fn pos_from_line_col(&self, line: usize, col: usize) -> usize {
        debug_assert!(!self.lines.is_empty());
        let line = self.lines[line.min(self.lines.len() - 1)];
        line.start + col.min(line.len())
    }
}

fn make_line(chars: &[char], start: usize, end: usize) -> Line {
    let mut text_start = start;
    while text_start < end && chars[text_start] == ' ' {
        text_start += 1;
    }
    Line {
        start,
        text_start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(text: &str) -> LineIndex {
        let chars: Vec<char> = text.chars().collect();
        let mut index = LineIndex::new();
        index.recalculate(&chars);
        index
    }

    fn assert_partition(index: &LineIndex, num_chars: usize) {
        let lines = index.lines();
        assert_eq!(lines[0].start, 0);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].end, pair[1].start - 1);
        }
        assert_eq!(lines.last().unwrap().end, num_chars);
        for line in lines {
            assert!(line.start <= line.text_start && line.text_start <= line.end);
        }
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let index = index_of("");
        assert_eq!(index.num_lines(), 1);
        assert_eq!(
            index.get(0),
            Some(Line {
                start: 0,
                text_start: 0,
                end: 0
            })
        );
        assert_partition(&index, 0);
    }

    #[test]
    fn test_two_lines() {
        let index = index_of("line1\nline2");
        assert_eq!(index.num_lines(), 2);
        assert_eq!(index.get(0).unwrap().end, 5);
        assert_eq!(index.get(1).unwrap().start, 6);
        assert_eq!(index.get(1).unwrap().end, 11);
        assert_partition(&index, 11);
    }

    #[test]
    fn test_trailing_newline_yields_empty_last_line() {
        let index = index_of("abc\n");
        assert_eq!(index.num_lines(), 2);
        assert!(index.get(1).unwrap().is_empty());
        assert_partition(&index, 4);
    }

    #[test]
    fn test_text_start_skips_leading_spaces() {
        let index = index_of("  indented\n    \nplain");
        assert_eq!(index.get(0).unwrap().text_start, 2);
        // A blank (all-space) line reports text_start == end.
        let blank = index.get(1).unwrap();
        assert_eq!(blank.text_start, blank.end);
        assert_eq!(index.get(2).unwrap().text_start, index.get(2).unwrap().start);
    }

    #[test]
    fn test_line_col_from_pos() {
        let index = index_of("line1\nline2");
        assert_eq!(index.line_col_from_pos(0), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col_from_pos(4), LineCol { line: 0, col: 4 });
        // Offset 5 is the `\n`, which still belongs to line 0.
        assert_eq!(index.line_col_from_pos(5), LineCol { line: 0, col: 5 });
        assert_eq!(index.line_col_from_pos(6), LineCol { line: 1, col: 0 });
        // Buffer end belongs to the last line.
        assert_eq!(index.line_col_from_pos(11), LineCol { line: 1, col: 5 });
    }

    #[test]
    fn test_pos_from_line_col_clamps() {
        let index = index_of("ab\ncdef");
        assert_eq!(index.pos_from_line_col(0, 0), 0);
        assert_eq!(index.pos_from_line_col(1, 2), 5);
        // Column clamped to line length.
        assert_eq!(index.pos_from_line_col(0, 99), 2);
        // Line clamped to the last line.
        assert_eq!(index.pos_from_line_col(99, 1), 4);
    }

    #[test]
    fn test_partition_over_many_shapes() {
        for text in ["", "\n", "\n\n\n", "a", "a\nb\nc\n", "  \n \n", "猫\n犬"] {
            let index = index_of(text);
            assert_partition(&index, text.chars().count());
        }
    }
}
