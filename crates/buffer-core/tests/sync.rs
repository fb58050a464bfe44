//! Integration tests for whole-buffer sync: line table plus color array.

use buffer_core::{Buffer, Color};

fn colors_of(text: &str) -> Vec<Color> {
    let mut buffer = Buffer::from_text(text);
    buffer.sync_internal_data();
    buffer.colors().to_vec()
}

fn assert_span(colors: &[Color], start: usize, end: usize, expected: Color) {
    for (i, &color) in colors[start..end].iter().enumerate() {
        assert_eq!(color, expected, "color at offset {}", start + i);
    }
}

#[test]
fn test_sync_clears_dirty_and_covers_every_char() {
    let mut buffer = Buffer::from_text("const x = 1;\nvar y = \"two\";\n");
    assert!(buffer.dirty);
    buffer.sync_internal_data();
    assert!(!buffer.dirty);
    assert_eq!(buffer.colors().len(), buffer.num_chars());
    assert_eq!(buffer.lines().len(), 3);
}

#[test]
fn test_basic_declaration_colors() {
    let colors = colors_of("const answer = 42;");
    assert_span(&colors, 0, 5, Color::Keyword);
    assert_eq!(colors[5], Color::Comment); // whitespace keeps the scan fill
    assert_span(&colors, 6, 12, Color::Identifier);
    assert_eq!(colors[13], Color::Punctuation);
    assert_span(&colors, 15, 17, Color::Number);
    assert_eq!(colors[17], Color::Punctuation);
}

#[test]
fn test_identifier_before_paren_is_a_function() {
    let colors = colors_of("print(name)");
    assert_span(&colors, 0, 5, Color::Function);
    assert_eq!(colors[5], Color::Punctuation);
    assert_span(&colors, 6, 10, Color::Identifier);
}

#[test]
fn test_builtin_is_function_colored() {
    let colors = colors_of("@import(\"std\")");
    assert_span(&colors, 0, 7, Color::Function);
    assert_span(&colors, 8, 13, Color::String);
}

#[test]
fn test_string_and_comment_colors() {
    let colors = colors_of("\"hi\" // note");
    assert_span(&colors, 0, 4, Color::String);
    assert_span(&colors, 5, 12, Color::Comment);
}

#[test]
fn test_float_literal_is_number() {
    let colors = colors_of("x = 3.14");
    assert_span(&colors, 4, 8, Color::Number);
}

#[test]
fn test_sync_after_edit_repaints() {
    let mut buffer = Buffer::from_text("value");
    buffer.sync_internal_data();
    assert_eq!(buffer.colors()[0], Color::Identifier);

    buffer.insert_str(0, "// ");
    assert!(buffer.dirty);
    buffer.sync_internal_data();
    assert_span(buffer.colors(), 0, buffer.num_chars(), Color::Comment);
}

#[test]
fn test_sync_empty_buffer() {
    let mut buffer = Buffer::new();
    buffer.sync_internal_data();
    assert!(buffer.colors().is_empty());
    assert_eq!(buffer.lines().len(), 1);
    assert!(!buffer.dirty);
}

#[test]
fn test_multiline_source() {
    let mut buffer = Buffer::from_text("fn add(a: i32) i32 {\n    return a + 1;\n}\n");
    buffer.sync_internal_data();
    let colors = buffer.colors();
    assert_span(colors, 0, 2, Color::Keyword); // fn
    assert_span(colors, 3, 6, Color::Function); // add(
    assert_span(colors, 25, 31, Color::Keyword); // return
    assert_eq!(buffer.lines()[1].text_start, buffer.lines()[1].start + 4);
}
