use phylowick::parser::{ByteParser, ParsingErrorType};
use std::io::Cursor;

const DELIMITERS: &[u8] = b"()[],:;' \n\t\r";

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_comment() {
    let mut parser = ByteParser::for_str("[Following tree is tiny] ((A:1,B:1):1,C:2)");
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b' '));
    assert_eq!(parser.next_byte(), Some(b'('));
    assert!(!parser.skip_comment().unwrap());
}

#[test]
fn test_skip_comment_and_whitespace() {
    let mut parser =
        ByteParser::for_str("[Go] \n[Keep going]   \t ['...']\n[One more to go]  END!");
    parser
        .skip_comment_and_whitespace()
        .expect("Failed to skip comments.");
    assert_eq!(parser.next_byte(), Some(b'E'));
}

#[test]
fn test_unclosed_comment() {
    let mut parser = ByteParser::for_str("  [never closed (A,B);");
    let err = parser.skip_comment_and_whitespace().unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

#[test]
fn test_consume_until() {
    let mut parser = ByteParser::for_str("consume a CAN of beans");
    assert!(parser.consume_until(b'C'));
    assert_eq!(parser.peek(), Some(b'A'));
    assert!(!parser.consume_until(b'X'));
    assert!(parser.is_eof());
}

#[test]
fn test_consume_if() {
    let mut parser = ByteParser::for_str("(A");
    assert!(!parser.consume_if(b')'));
    assert!(parser.consume_if(b'('));
    assert_eq!(parser.position(), 1);
    assert_eq!(parser.peek(), Some(b'A'));
}

#[test]
fn test_unquoted_label() {
    let mut parser = ByteParser::for_str("Apteryx_mantelli:0.3");
    let label = parser.parse_label(DELIMITERS).unwrap();
    assert_eq!(label, "Apteryx_mantelli");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_unquoted_label_stops_at_whitespace() {
    let mut parser = ByteParser::for_str("Kiwi Kea");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "Kiwi");
    assert_eq!(parser.peek(), Some(b' '));
}

#[test]
fn test_empty_label() {
    let mut parser = ByteParser::for_str(",B");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "");
    assert_eq!(parser.peek(), Some(b','));
}

#[test]
fn test_quoted_label_with_escaped_quote() {
    let mut parser = ByteParser::for_str("'Wilson''s Storm-petrel (Oceanites)':1");
    let label = parser.parse_label(DELIMITERS).unwrap();
    assert_eq!(label, "Wilson's Storm-petrel (Oceanites)");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_quoted_label_utf8() {
    let mut parser = ByteParser::for_str("'Kākāpō' rest");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "Kākāpō");
}

#[test]
fn test_unclosed_quote() {
    let mut parser = ByteParser::for_str("'Takahē,Weka);");
    let err = parser.parse_label(DELIMITERS).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedQuote(0));
}

#[test]
fn test_invalid_utf8_label() {
    let mut parser = ByteParser::for_bytes(b"ab\xff\xfe:1");
    let err = parser.parse_label(DELIMITERS).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidUtf8);
}

#[test]
fn test_context() {
    let mut parser = ByteParser::for_str("(A,B);");
    parser.next_byte();
    assert_eq!(parser.get_context_as_string(3), "A,B");
    assert_eq!(parser.get_context_as_string(100), "A,B);");
    assert_eq!(parser.position(), 1);
}

#[test]
fn test_buffered_reader_matches_in_memory() {
    let input = "[c] 'Kea''s':2.5,";
    let mut in_memory = ByteParser::for_str(input);
    let mut buffered = ByteParser::from_reader(Cursor::new(input.as_bytes().to_vec()));

    in_memory.skip_comment_and_whitespace().unwrap();
    buffered.skip_comment_and_whitespace().unwrap();
    assert_eq!(
        in_memory.parse_label(DELIMITERS).unwrap(),
        buffered.parse_label(DELIMITERS).unwrap()
    );
    assert_eq!(in_memory.position(), buffered.position());
}
