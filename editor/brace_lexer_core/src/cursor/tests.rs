use super::*;

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let cursor = Cursor::new(b"abc");
    assert_eq!(cursor.current(), b'a');
}

#[test]
fn advance_moves_forward() {
    let mut cursor = Cursor::new(b"abc");
    cursor.advance();
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn at_starts_mid_buffer() {
    let cursor = Cursor::at(b"abcdef", 3);
    assert_eq!(cursor.current(), b'd');
    assert_eq!(cursor.pos(), 3);
    assert_eq!(cursor.source_len(), 6);
}

#[test]
fn at_end_is_eof() {
    let cursor = Cursor::at(b"ab", 2);
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
}

#[test]
#[should_panic(expected = "out of range")]
fn at_past_end_panics() {
    let _ = Cursor::at(b"ab", 3);
}

// === Peek ===

#[test]
fn peek_returns_next_byte() {
    let cursor = Cursor::new(b"abc");
    assert_eq!(cursor.peek(), b'b');
}

#[test]
fn peek_past_end_returns_zero() {
    let mut cursor = Cursor::new(b"ab");
    cursor.advance();
    assert_eq!(cursor.peek(), 0);
}

// === EOF Detection ===

#[test]
fn empty_buffer_is_eof() {
    let cursor = Cursor::new(b"");
    assert!(cursor.is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let cursor = Cursor::new(b"\0x");
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

// === Bulk Scanning ===

#[test]
fn eat_while_stops_at_eof() {
    let mut cursor = Cursor::new(b"aaaa");
    cursor.eat_while(|_| true);
    assert_eq!(cursor.pos(), 4);
    assert!(cursor.is_eof());
}

#[test]
fn eat_free_text_stops_at_specials() {
    for (src, stop) in [
        ("abc/", 3),
        ("ab\"", 2),
        ("a'", 1),
        ("foo(", 3),
        ("x;y}", 3),
        ("a b\n", 3),
        ("plain", 5),
    ] {
        let mut cursor = Cursor::new(src.as_bytes());
        cursor.eat_free_text();
        assert_eq!(cursor.pos(), stop, "wrong stop for {src:?}");
    }
}

#[test]
fn eat_free_text_passes_star_and_backslash() {
    let mut cursor = Cursor::new(b"a*b\\c");
    cursor.eat_free_text();
    assert!(cursor.is_eof());
}

#[test]
fn eat_until_newline() {
    let mut cursor = Cursor::at(b"// hi\nnext", 2);
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 5);
    assert_eq!(cursor.current(), b'\n');
}

#[test]
fn eat_until_newline_hits_eof() {
    let mut cursor = Cursor::new(b"no newline");
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn block_comment_delim_finds_star_or_newline() {
    let mut cursor = Cursor::new(b"abc*/");
    assert_eq!(cursor.skip_to_block_comment_delim(), b'*');
    assert_eq!(cursor.pos(), 3);

    let mut cursor = Cursor::new(b"ab\n*");
    assert_eq!(cursor.skip_to_block_comment_delim(), b'\n');
    assert_eq!(cursor.pos(), 2);

    let mut cursor = Cursor::new(b"open");
    assert_eq!(cursor.skip_to_block_comment_delim(), 0);
    assert!(cursor.is_eof());
}

#[test]
fn string_delim_respects_quote_kind() {
    let mut cursor = Cursor::new(b"it's \"x\"");
    assert_eq!(cursor.skip_to_string_delim(b'"'), b'"');
    assert_eq!(cursor.pos(), 5);

    let mut cursor = Cursor::new(b"say \"hi\" '");
    assert_eq!(cursor.skip_to_string_delim(b'\''), b'\'');
    assert_eq!(cursor.pos(), 9);

    let mut cursor = Cursor::new(b"a\\\"b");
    assert_eq!(cursor.skip_to_string_delim(b'"'), b'\\');
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn is_free_code_special_covers_delimiters() {
    for b in b"/\"'{}()[]\n" {
        assert!(
            is_free_code_special(*b),
            "{:?} should be special",
            *b as char
        );
    }
    for b in b"az09 *;\\\t" {
        assert!(
            !is_free_code_special(*b),
            "{:?} should be plain",
            *b as char
        );
    }
}
