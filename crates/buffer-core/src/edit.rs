//! Reversible edit records.
//!
//! Every mutation of a [`crate::Buffer`] is described by one [`Edit`]. Each variant captures
//! exactly the data needed to invert itself: inverting the most recent record restores the
//! codepoint sequence byte-for-byte. The captured spans are owned by the record until an applied
//! undo (or buffer teardown) frees them; live storage never aliases them.

/// A half-open character range, `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl Range {
    /// Create a range. `end` must not precede `start`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// Length of the range in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A derived line/column position. Never stored; computed from the line index on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based character column within the line.
    pub col: usize,
}

/// One reversible buffer mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Characters were inserted at `pos`.
    Insert {
        /// Insertion offset at the time the edit was applied.
        pos: usize,
        /// The inserted characters.
        new_chars: Vec<char>,
    },
    /// `range` was replaced by `new_chars`.
    Replace {
        /// The replaced range in the pre-edit document.
        range: Range,
        /// The replacement characters.
        new_chars: Vec<char>,
        /// The exact characters that were replaced.
        old_chars: Vec<char>,
    },
    /// `range` was deleted.
    Delete {
        /// The deleted range in the pre-edit document.
        range: Range,
        /// The exact characters that were deleted.
        old_chars: Vec<char>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len() {
        let range = Range::new(2, 5);
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert!(Range::new(4, 4).is_empty());
    }
}
