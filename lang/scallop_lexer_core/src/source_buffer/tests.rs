use super::*;
use pretty_assertions::assert_eq;

// === Construction ===

#[test]
fn empty_source() {
    let buf = SourceBuffer::new(b"");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.as_bytes().is_empty());
}

#[test]
fn ascii_source() {
    let buf = SourceBuffer::new(b"hello");
    assert_eq!(buf.len(), 5);
    assert!(!buf.is_empty());
    assert_eq!(buf.as_bytes(), b"hello");
}

#[test]
fn utf8_multibyte_source() {
    let source = "hello \u{1F600} world"; // emoji (4 bytes)
    let buf = SourceBuffer::new(source.as_bytes());
    assert_eq!(buf.len() as usize, source.len());
    assert_eq!(buf.as_bytes(), source.as_bytes());
}

#[test]
fn arbitrary_bytes_accepted() {
    // The buffer does not validate encoding; the decoder reports bad
    // sequences during scanning.
    let buf = SourceBuffer::new(&[0xFF, 0xFE, b'a']);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_bytes(), &[0xFF, 0xFE, b'a']);
}

// === Sentinel & Padding ===

#[test]
fn buffer_padded_to_boundary() {
    for len in [0usize, 1, 10, 63, 64, 65, 127, 128, 1000] {
        let source = vec![b'x'; len];
        let buf = SourceBuffer::new(&source);
        let cursor = buf.cursor();
        assert_eq!(cursor.source_len() as usize, len);
    }
}

#[test]
fn cursor_sees_sentinel_after_content() {
    let buf = SourceBuffer::new(b"abc");
    let mut cursor = buf.cursor();
    cursor.advance_n(3);
    assert_eq!(cursor.current(), 0);
    assert!(cursor.is_eof());
}

// === line_col ===

#[test]
fn line_col_at_start() {
    let buf = SourceBuffer::new(b"hello");
    assert_eq!(buf.line_col(0), LineCol { line: 1, col: 1 });
    assert_eq!(buf.line_col(0), LineCol::START);
}

#[test]
fn line_col_within_first_line() {
    let buf = SourceBuffer::new(b"hello world");
    assert_eq!(buf.line_col(6), LineCol { line: 1, col: 7 });
}

#[test]
fn line_col_after_newline() {
    let buf = SourceBuffer::new(b"one\ntwo\nthree");
    assert_eq!(buf.line_col(4), LineCol { line: 2, col: 1 });
    assert_eq!(buf.line_col(8), LineCol { line: 3, col: 1 });
    assert_eq!(buf.line_col(10), LineCol { line: 3, col: 3 });
}

#[test]
fn line_col_counts_characters_not_bytes() {
    // "héllo" -- 'é' is two bytes, so the 'o' is at byte 5 but column 5.
    let source = "h\u{e9}llo";
    let buf = SourceBuffer::new(source.as_bytes());
    assert_eq!(buf.line_col(5), LineCol { line: 1, col: 5 });
}

#[test]
fn line_col_clamps_past_end() {
    let buf = SourceBuffer::new(b"ab\ncd");
    assert_eq!(buf.line_col(100), LineCol { line: 2, col: 3 });
}

#[test]
fn line_col_on_empty_source() {
    let buf = SourceBuffer::new(b"");
    assert_eq!(buf.line_col(0), LineCol::START);
}
