//! Errors raised while reading Newick text.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::io;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================$=
/// Error types that can occur during Newick parsing
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("Unexpected end of input - {0}")]
    UnexpectedEOF(String),
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Unclosed quoted label starting at position {0}")]
    UnclosedQuote(usize),
    #[error("Label is not valid UTF-8")]
    InvalidUtf8,
    #[error("Invalid branch length '{0}'")]
    InvalidBranchLength(String),
    #[error("Nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("Invalid newick string: {0}")]
    InvalidNewickString(String),
    #[error("I/O failure")]
    Io,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and surrounding bytes).
///
/// I/O failures of the underlying reader carry the [io::Error] as source.
#[derive(Error, Debug)]
#[error("{kind} at position {position}{}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
    #[source]
    source: Option<io::Error>,
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &mut ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
            source: None,
        }
    }

    /// Wraps an I/O failure that occurred at `position`.
    pub fn io(err: io::Error, position: usize) -> Self {
        Self {
            kind: ParsingErrorType::Io,
            position,
            context: String::new(),
            source: Some(err),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &mut ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF(msg), parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment<S: ByteSource>(parser: &mut ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for UnclosedQuote
    pub fn unclosed_quote<S: ByteSource>(parser: &mut ByteParser<S>, start: usize) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedQuote(start), parser)
    }

    /// Convenience constructor for InvalidUtf8
    pub fn invalid_utf8<S: ByteSource>(parser: &mut ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::InvalidUtf8, parser)
    }

    /// Convenience constructor for InvalidBranchLength
    pub fn invalid_branch_length<S: ByteSource>(parser: &mut ByteParser<S>, literal: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidBranchLength(literal), parser)
    }

    /// Convenience constructor for NestingTooDeep
    pub fn nesting_too_deep<S: ByteSource>(parser: &mut ByteParser<S>, max_depth: usize) -> Self {
        Self::from_parser(ParsingErrorType::NestingTooDeep(max_depth), parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string<S: ByteSource>(parser: &mut ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the input following the error position (up to 50 bytes)
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl From<io::Error> for ParsingError {
    fn from(err: io::Error) -> Self {
        Self::io(err, 0)
    }
}
