//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait. Implementations live in
//! [in_memory_byte_source](crate::parser::in_memory_byte_source) and
//! [buffered_byte_source](crate::parser::buffered_byte_source).

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for different byte sources used by
/// [ByteParser](crate::parser::ByteParser).
///
/// This trait abstracts over different ways of accessing byte data:
/// - In-memory bytes (a string or a fully read file)
/// - Buffered reading from any reader (files, standard input)
///
/// By using this trait, the same parser logic can work with small inputs
/// loaded entirely into memory and with large streams read chunk by chunk.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF) or the underlying reader failed
    fn peek(&mut self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns up to `k` bytes from the current position for error context.
    ///
    /// Streaming sources may return fewer bytes than are actually left.
    fn get_context(&mut self, k: usize) -> Vec<u8>;

    /// Returns the number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Check if at end of data.
    fn is_eof(&mut self) -> bool;

    /// Takes the last I/O error encountered by the source, if any.
    ///
    /// Sources that cannot fail return `None`.
    fn take_error(&mut self) -> Option<std::io::Error> {
        None
    }
}
