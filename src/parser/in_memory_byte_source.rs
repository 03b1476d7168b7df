//! In-memory implementation of byte source for parsing.

use crate::parser::byte_source::ByteSource;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source that owns its data.
///
/// This is the most efficient byte source for strings and for files
/// that can fit entirely in memory.
pub struct InMemoryByteSource {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the byte slice
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to parse
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the entire file at `path` into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        let mut contents = Vec::new();
        let mut file = File::open(path)?;
        file.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn get_context(&mut self, k: usize) -> Vec<u8> {
        let start = self.pos.min(self.input.len());
        let end = (start + k).min(self.input.len());
        self.input[start..end].to_vec()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.pos >= self.input.len()
    }
}
