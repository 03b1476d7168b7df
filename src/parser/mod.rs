//! Low-level parsing infrastructure.
//!
//! * [ByteParser] reads bytes from a [ByteSource](byte_source::ByteSource)
//!   (in memory or buffered) and knows about whitespace, comments and labels.
//! * [ParsingError] describes what went wrong and where.
//! * [utils] holds label quoting helpers used by the writer.

pub mod buffered_byte_source;
pub mod byte_parser;
pub mod byte_source;
pub mod in_memory_byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
