use crate::SourceText;
use pretty_assertions::assert_eq;

fn text(source: &str) -> SourceText {
    SourceText::new("cursor.jst", source.as_bytes()).unwrap_or_else(|e| panic!("{e}"))
}

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let src = text("abc");
    assert_eq!(src.cursor().current(), b'a');
}

#[test]
fn advance_moves_forward() {
    let src = text("abc");
    let mut cursor = src.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn advance_stops_at_sentinel() {
    let src = text("hi");
    let mut cursor = src.cursor();
    cursor.advance();
    cursor.advance();
    assert!(cursor.is_eof());
    cursor.advance();
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current(), 0);
}

#[test]
fn advance_n_is_clamped() {
    let src = text("abcdef");
    let mut cursor = src.cursor();
    cursor.advance_n(3);
    assert_eq!(cursor.current(), b'd');
    cursor.advance_n(100);
    assert!(cursor.is_eof());
    assert_eq!(cursor.pos(), 6);
}

#[test]
fn peek_on_sentinel_is_safe() {
    let src = text("a");
    let mut cursor = src.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert_eq!(cursor.peek(), 0);
}

#[test]
fn interior_null_is_not_eof() {
    let src = SourceText::new("nul.jst", b"a\0b").unwrap_or_else(|e| panic!("{e}"));
    let mut cursor = src.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

// === Eating ===

#[test]
fn eat_whitespace_skips_spaces_and_tabs() {
    let src = text(" \t  x");
    let mut cursor = src.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn eat_until_newline_stops_on_either_byte() {
    let src = text("abc\r\ndef");
    let mut cursor = src.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 3);

    let src = text("no newline");
    let mut cursor = src.cursor();
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn eat_newline_collapses_pairs() {
    for (source, expected) in [("\nx", 1), ("\r\nx", 2), ("\n\rx", 2), ("\rx", 1), ("\n\nx", 1)] {
        let src = text(source);
        let mut cursor = src.cursor();
        assert!(cursor.eat_newline(), "{source:?}");
        assert_eq!(cursor.pos(), expected, "{source:?}");
    }
}

#[test]
fn eat_newline_ignores_other_bytes() {
    let src = text("x\n");
    let mut cursor = src.cursor();
    assert!(!cursor.eat_newline());
    assert_eq!(cursor.pos(), 0);
}

// === Slicing ===

#[test]
fn slice_from_and_rest() {
    let src = text("GET /cats");
    let mut cursor = src.cursor();
    cursor.advance_n(3);
    assert_eq!(cursor.slice_from(0), b"GET");
    assert_eq!(cursor.rest(), b" /cats");
    assert!(cursor.starts_with(b" /"));
}
