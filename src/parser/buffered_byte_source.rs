//! Buffered reader implementation of byte source for parsing.
//!
//! This module provides [BufferedByteSource], which wraps any [Read] in a
//! [BufReader] for streaming I/O. Use this for standard input or for large
//! files where loading everything into memory would be impractical.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Stdin};
use std::path::Path;

use crate::parser::byte_source::ByteSource;

// =#========================================================================#=
// BUFFERED BYTE SOURCE
// =#========================================================================$=
/// A buffered byte source for streaming input.
///
/// Uses [BufReader] for chunked reads. Peeking never looks past the
/// currently buffered chunk, so error context near a chunk boundary can be
/// shorter than requested. Reads are never rewound, which makes the source
/// usable on pipes and standard input.
///
/// A read error is treated as end of data and kept until
/// [take_error](ByteSource::take_error) is called, so the parser can report it.
pub struct BufferedByteSource<R: Read> {
    /// Underlying reader, handles getting chunks from the input
    reader: BufReader<R>,

    /// Current absolute position in the stream
    pos: usize,

    /// First read error encountered, reported by the parser
    error: Option<io::Error>,
}

impl BufferedByteSource<File> {
    /// Creates a new buffered byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl BufferedByteSource<Stdin> {
    /// Creates a new buffered byte source reading standard input.
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin())
    }
}

impl<R: Read> BufferedByteSource<R> {
    /// Wraps an arbitrary reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pos: 0,
            error: None,
        }
    }

    fn fill(&mut self) -> &[u8] {
        loop {
            match self.reader.fill_buf() {
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error.get_or_insert(e);
                    return &[];
                }
            }
        }
        self.reader.buffer()
    }
}

impl<R: Read> ByteSource for BufferedByteSource<R> {
    fn peek(&mut self) -> Option<u8> {
        self.fill().first().copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.reader.consume(1);
        self.pos += 1;
        Some(byte)
    }

    fn get_context(&mut self, k: usize) -> Vec<u8> {
        let buf = self.fill();
        buf[..k.min(buf.len())].to_vec()
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.fill().is_empty()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

// =#========================================================================#=
// TESTS - BUFFERED BYTE SOURCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_buffered_reads_all_bytes() {
        let mut source = BufferedByteSource::from_reader(Cursor::new(b"(A,B);".to_vec()));
        let mut read = Vec::new();
        while let Some(b) = source.next_byte() {
            read.push(b);
        }
        assert_eq!(read, b"(A,B);");
        assert_eq!(source.position(), 6);
        assert!(source.is_eof());
    }

    #[test]
    fn test_buffered_context_does_not_consume() {
        let mut source = BufferedByteSource::from_reader(Cursor::new(b"kiwi;".to_vec()));
        assert_eq!(source.get_context(3), b"kiw".to_vec());
        assert_eq!(source.peek(), Some(b'k'));
        assert_eq!(source.position(), 0);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_buffered_keeps_read_error() {
        let mut source = BufferedByteSource::from_reader(FailingReader);
        assert_eq!(source.peek(), None);
        assert!(source.is_eof());
        let err = source.take_error().expect("error should be kept");
        assert_eq!(err.to_string(), "disk on fire");
        assert!(source.take_error().is_none());
    }
}
