use super::{SourceFile, Span};

#[test]
fn test_mapped_file() {
    const TEST_FILE: &str = "test file";
    let source_file = SourceFile::temp(TEST_FILE).unwrap();
    assert_eq!(source_file.content(), TEST_FILE);
}

#[test]
fn test_empty_mapped_file() {
    let source_file = SourceFile::temp("").unwrap();
    assert_eq!(source_file.content(), "");
    assert!(source_file.cursor().is_at_end());
}

#[test]
fn test_span_bounds() {
    let source_file = SourceFile::from_string("<test>", "héllo");

    assert_eq!(Span::new(source_file.clone(), 0, 3).unwrap().str(), "hé");
    assert_eq!(Span::new(source_file.clone(), 6, 6).unwrap().str(), "");

    // splits the two-byte `é`
    assert!(Span::new(source_file.clone(), 0, 2).is_none());
    assert!(Span::new(source_file.clone(), 3, 1).is_none());
    assert!(Span::new(source_file, 0, 7).is_none());
}

#[test]
fn test_cursor_lookahead() {
    let source_file = SourceFile::from_string("<test>", "ab");
    let mut cursor = source_file.cursor();

    assert_eq!(cursor.peek(), Some('a'));
    assert_eq!(cursor.peek_next(), Some('b'));
    assert!(!cursor.eat('b'));
    assert!(cursor.eat('a'));

    assert_eq!(cursor.peek(), Some('b'));
    assert_eq!(cursor.peek_next(), None);

    assert_eq!(cursor.advance(), Some('b'));
    assert!(cursor.is_at_end());
    assert_eq!(cursor.peek(), None);
    assert_eq!(cursor.peek_next(), None);
    assert_eq!(cursor.advance(), None);
    assert!(!cursor.eat('b'));
}

#[test]
fn test_cursor_counts_lines() {
    let source_file = SourceFile::from_string("<test>", "a\n\nb\r\n");
    let mut cursor = source_file.cursor();
    assert_eq!(cursor.line(), 1);

    while cursor.advance().is_some() {}

    assert_eq!(cursor.line(), 4);
    assert_eq!(cursor.current(), source_file.content().len());
}

#[test]
fn test_cursor_span() {
    let source_file = SourceFile::from_string("<test>", "let ünïcode = 1");
    let mut cursor = source_file.cursor();

    cursor.eat_while(|character| character != ' ');
    assert_eq!(cursor.lexeme(), "let");

    cursor.advance();
    cursor.begin();
    cursor.eat_while(char::is_alphabetic);

    let span = cursor.span();
    assert_eq!(span.str(), "ünïcode");
    assert_eq!(span.start(), cursor.start());
    assert_eq!(span.end(), cursor.current());
    assert_eq!(span.str(), cursor.lexeme());
}
