//! Tests for end-of-line detection and the line reader

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;

use super::super::reader::{EolStyle, LineReader, detect_eol};

#[test]
fn test_eol_detection() {
    assert_eq!(EolStyle::detect(b"a,b\nc,d\n"), EolStyle::Lf);
    assert_eq!(EolStyle::detect(b"a,b\r\nc,d\r\n"), EolStyle::CrLf);
    assert_eq!(EolStyle::detect(b"a,b\rc,d\r"), EolStyle::Cr);
    assert_eq!(EolStyle::detect(b"a,b"), EolStyle::Lf);
    assert_eq!(EolStyle::detect(b""), EolStyle::Lf);
}

#[test]
fn test_detect_eol_rewinds_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"x\r\ny\r\n").unwrap();
    let mut handle = file.reopen().unwrap();

    assert_eq!(detect_eol(&mut handle).unwrap(), EolStyle::CrLf);

    let mut reader = LineReader::new(std::io::BufReader::new(handle), EolStyle::CrLf, 0, 0);
    assert_eq!(reader.next_line().unwrap().as_deref(), Some("x"));
}

#[test]
fn test_line_reader_tracks_offsets() {
    let data = "first\nsecond\r\n\nlast";
    let mut reader = LineReader::new(Cursor::new(data), EolStyle::Lf, 0, 0);

    assert_eq!(reader.next_line().unwrap().as_deref(), Some("first"));
    assert_eq!(reader.offset(), 6);
    assert_eq!(reader.line_number(), 1);

    assert_eq!(reader.next_line().unwrap().as_deref(), Some("second"));
    assert_eq!(reader.offset(), 14);

    assert_eq!(reader.next_line().unwrap().as_deref(), Some(""));
    assert_eq!(reader.next_line().unwrap().as_deref(), Some("last"));
    assert_eq!(reader.line_number(), 4);
    assert_eq!(reader.offset(), data.len() as u64);
    assert_eq!(reader.next_line().unwrap(), None);
}

#[test]
fn test_bare_carriage_return_lines() {
    let mut reader = LineReader::new(Cursor::new("a\rb\rc"), EolStyle::Cr, 0, 0);

    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().unwrap() {
        lines.push(line);
    }

    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn test_open_at_offset() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"header\nrow1\nrow2\n").unwrap();

    let mut reader = LineReader::open_at(file.path(), EolStyle::Lf, 7, 1).unwrap();

    assert_eq!(reader.next_line().unwrap().as_deref(), Some("row1"));
    assert_eq!(reader.line_number(), 2);
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let bytes: &[u8] = b"caf\xe9,1\n";
    let mut reader = LineReader::new(Cursor::new(bytes), EolStyle::Lf, 0, 0);

    let line = reader.next_line().unwrap().unwrap();
    assert!(line.starts_with("caf"));
    assert!(line.ends_with(",1"));
}
