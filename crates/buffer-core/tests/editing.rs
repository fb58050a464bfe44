//! Integration tests for edit operations and undo.

use buffer_core::Buffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_insert_then_delete() {
    let mut buffer = Buffer::from_text("hello world");
    buffer.insert_str(5, ",");
    assert_eq!(buffer.get_text(), "hello, world");
    buffer.delete_range(5, 6);
    assert_eq!(buffer.get_text(), "hello world");
    assert_eq!(buffer.undo_depth(), 2);
}

#[test]
fn test_replace_records_old_text() {
    let mut buffer = Buffer::from_text("the quick brown fox");
    let new_chars: Vec<char> = "slow".chars().collect();
    buffer.replace_range(4, 9, &new_chars);
    assert_eq!(buffer.get_text(), "the slow brown fox");
    buffer.undo();
    assert_eq!(buffer.get_text(), "the quick brown fox");
}

#[test]
fn test_undo_unwinds_in_reverse_order() {
    let mut buffer = Buffer::new();
    buffer.insert_str(0, "abc");
    buffer.insert_str(3, "def");
    buffer.delete_range(1, 4);
    assert_eq!(buffer.get_text(), "aef");

    buffer.undo();
    assert_eq!(buffer.get_text(), "abcdef");
    buffer.undo();
    assert_eq!(buffer.get_text(), "abc");
    buffer.undo();
    assert_eq!(buffer.get_text(), "");
    // The log is exhausted; further undos change nothing.
    buffer.undo();
    assert_eq!(buffer.get_text(), "");
}

#[test]
fn test_edits_set_flags() {
    let mut buffer = Buffer::from_text("x");
    buffer.sync_internal_data();
    assert!(!buffer.dirty);
    assert!(!buffer.modified);

    buffer.insert_str(1, "y");
    assert!(buffer.dirty);
    assert!(buffer.modified);
}

#[test]
fn test_multibyte_characters_are_single_positions() {
    let mut buffer = Buffer::from_text("猫犬");
    buffer.insert_str(1, "と");
    assert_eq!(buffer.get_text(), "猫と犬");
    assert_eq!(buffer.num_chars(), 3);
    buffer.delete_range(0, 1);
    assert_eq!(buffer.get_text(), "と犬");
}

/// Apply a random edit, returning nothing; the buffer's own log must be able to revert it.
fn random_edit(buffer: &mut Buffer, rng: &mut StdRng) {
    let len = buffer.num_chars();
    match rng.gen_range(0..3) {
        0 => {
            let pos = rng.gen_range(0..=len);
            let count = rng.gen_range(1..5);
            let text: Vec<char> = (0..count)
                .map(|_| (b'a' + rng.gen_range(0..26)) as char)
                .collect();
            buffer.insert_slice(pos, &text);
        }
        1 if len > 0 => {
            let start = rng.gen_range(0..len);
            let end = rng.gen_range(start..=len);
            buffer.delete_range(start, end);
        }
        _ => {
            let start = rng.gen_range(0..=len);
            let end = rng.gen_range(start..=len);
            let text: Vec<char> = if rng.gen_bool(0.5) { vec!['X'] } else { vec![] };
            buffer.replace_range(start, end, &text);
        }
    }
}

#[test]
fn test_randomized_undo_restores_every_state() {
    let mut rng = StdRng::seed_from_u64(0xb0ffe4);
    for _ in 0..20 {
        let mut buffer = Buffer::from_text("fn main() {\n    return 0;\n}\n");
        let mut snapshots = vec![buffer.get_text()];
        for _ in 0..50 {
            let depth = buffer.undo_depth();
            random_edit(&mut buffer, &mut rng);
            // A clamped-to-empty delete records nothing, so snapshot only real edits.
            if buffer.undo_depth() > depth {
                snapshots.push(buffer.get_text());
            }
        }
        while snapshots.len() > 1 {
            snapshots.pop();
            buffer.undo();
            assert_eq!(buffer.get_text(), *snapshots.last().unwrap());
        }
    }
}

#[test]
fn test_line_queries_after_sync() {
    let mut buffer = Buffer::from_text("line1\nline2");
    buffer.sync_internal_data();
    assert_eq!(buffer.get_line_col_from_pos(0).line, 0);
    assert_eq!(buffer.get_line_col_from_pos(0).col, 0);
    assert_eq!(buffer.get_line_col_from_pos(6).line, 1);
    assert_eq!(buffer.get_line_col_from_pos(6).col, 0);
    assert_eq!(buffer.get_pos_from_line_col(1, 3), 9);
}
