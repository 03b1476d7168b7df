//! Low-level byte-by-byte parser for Newick text.
//!
//! This module provides [ByteParser] with support for peeking, consuming,
//! comment skipping and quote-aware label parsing. It is the foundation the
//! [NewickParser](crate::newick::NewickParser) is built on.

use crate::parser::buffered_byte_source::BufferedByteSource;
use crate::parser::byte_source::ByteSource;
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use crate::parser::parsing_error::ParsingError;
use std::fs::File;
use std::io::{self, Read, Stdin};
use std::path::Path;

/// Bytes that count as whitespace between tokens.
const WHITESPACE: &[u8] = b" \t\n\r";

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================$=
/// A byte-by-byte parser with support for peeking, consuming and label parsing.
///
/// [ByteParser] works on any [ByteSource], either fully in memory or
/// streamed through a buffered reader.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes, `''` as escaped quote)
/// - UTF-8 validation of labels
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use phylowick::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [a comment] 'Kea''s nest':1.5");
/// parser.skip_comment_and_whitespace().unwrap();
/// let label = parser.parse_label(b"(),:;[] \t\n\r").unwrap();
/// assert_eq!(label, "Kea's nest");
/// assert_eq!(parser.peek(), Some(b':'));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl ByteParser<InMemoryByteSource> {
    /// Creates a new [ByteParser] from a string by copying it into memory.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new [ByteParser] from raw bytes by copying them into memory.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new [ByteParser] that loads the whole file into memory.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl ByteParser<BufferedByteSource<File>> {
    /// Creates a new [ByteParser] streaming the file through a buffer.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened.
    pub fn from_file_buffered<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufferedByteSource::from_file(path)?))
    }
}

impl ByteParser<BufferedByteSource<Stdin>> {
    /// Creates a new [ByteParser] reading standard input.
    pub fn stdin() -> Self {
        Self::new(BufferedByteSource::stdin())
    }
}

impl<R: Read> ByteParser<BufferedByteSource<R>> {
    /// Creates a new [ByteParser] streaming from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufferedByteSource::from_reader(reader))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new [ByteParser] from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

// ============================================================================
// Peeking, consuming, skipping (pub)
// ============================================================================
impl<S: ByteSource> ByteParser<S> {
    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&mut self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Checks if the current byte equals `ch`.
    pub fn peek_is(&mut self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes up to and including `target`.
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8) -> bool {
        while let Some(b) = self.next_byte() {
            if b == target {
                return true;
            }
        }
        false
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space, tab, newline and carriage return.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if WHITESPACE.contains(&b) {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment `[...]` if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }
        if !self.consume_until(b']') {
            return Err(ParsingError::unclosed_comment(self));
        }
        Ok(true)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&mut self) -> bool {
        self.source.is_eof()
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns up to `k` bytes from the current position for error context.
    pub fn get_context(&mut self, k: usize) -> Vec<u8> {
        self.source.get_context(k)
    }

    /// Returns up to `k` bytes from the current position as a string.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&mut self, k: usize) -> String {
        String::from_utf8_lossy(&self.get_context(k)).into_owned()
    }

    /// Takes the I/O error the underlying source ran into, if any.
    ///
    /// A failing reader looks like EOF to the parser, so callers check this
    /// whenever EOF was hit unexpectedly.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.source.take_error()
    }
}

// ============================================================================
// Labels (pub)
// ============================================================================
impl<S: ByteSource> ByteParser<S> {
    /// Parses a label (quoted or unquoted) at the current position.
    ///
    /// An opening `'` starts a quoted label, otherwise bytes are read until
    /// one of `delimiters` (or EOF). The label may be empty.
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed or the label is not
    /// valid UTF-8.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            self.parse_unquoted_label(delimiters)
        }
    }

    /// Parses a label enclosed in single quotes.
    ///
    /// Expects the parser at the opening quote. Doubled quotes inside the
    /// label stand for one quote, e.g. `'Wilson''s'` becomes `Wilson's`.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        let start = self.position();
        self.next_byte(); // opening '

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.consume_if(b'\'') {
                        bytes.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => bytes.push(b),
                None => return Err(ParsingError::unclosed_quote(self, start)),
            }
        }

        String::from_utf8(bytes).map_err(|_| ParsingError::invalid_utf8(self))
    }

    /// Parses an unquoted label until any of the given delimiters or EOF.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let mut bytes = Vec::new();
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            bytes.push(b);
            self.next_byte();
        }

        String::from_utf8(bytes).map_err(|_| ParsingError::invalid_utf8(self))
    }
}
