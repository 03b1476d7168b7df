//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick format strings
//! into [Tree]s and the writer functions to turn them back into text.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string, returns a [Tree]
//! * [`parse_all`] - lazily parses every tree of a string
//! * [`parse_file`] - parses a file eagerly, returns all [Tree]s
//! * [`parse_reader`] / [`parse_stdin`] - lazily parses a stream
//! * [`write_newick_file`] - writes trees to a file, one per line
//!
//! # Full API
//! For more control, configure a [NewickParser] and
//! provide data via a [ByteParser]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length] | [label] [branch_length]`
//! * `label ::= unquoted | "'" (any byte except "'" | "''")* "'"`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Comments are square brackets and can occur anywhere where whitespace
//!   is allowed; their content is never interpreted
//! * Labels are UTF-8, any vertex (not only leaves) may carry one

mod defs;
pub mod parser;
pub mod writer;

pub use defs::DEFAULT_MAX_DEPTH;
pub use parser::{NewickIterator, NewickParser};
pub use writer::write_newick_file;

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::buffered_byte_source::BufferedByteSource;
use crate::parser::byte_parser::ByteParser;
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use std::io::{Read, Stdin};
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [Tree].
///
/// This is a convenience function for quick parsing of a single Newick string
/// using default settings and thus not requiring configuration of a parser.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [Tree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use phylowick::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.leaf_count(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut newick_parser = NewickParser::new();
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    newick_parser.parse_str(&mut byte_parser)
}

/// Lazily parses every Newick tree in a string.
///
/// # Example
/// ```
/// use phylowick::newick::parse_all;
///
/// let trees: Result<Vec<_>, _> = parse_all("(A,B);\n(C,(D,E));").collect();
/// assert_eq!(trees.unwrap().len(), 2);
/// ```
pub fn parse_all<S: AsRef<str>>(newick: S) -> NewickIterator<InMemoryByteSource> {
    NewickParser::new().into_iter(ByteParser::for_str(newick.as_ref()))
}

/// Parses a Newick file eagerly and returns all trees.
///
/// The file holds a list of `;`-terminated Newick strings. Multiple trees
/// can appear on the same line or across multiple lines, and `[...]`
/// comments and whitespace are fine.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<Tree>` - All parsed trees
/// * [ParsingError] - If file reading fails or Newick format is invalid
///
/// # Example
/// ```no_run
/// use phylowick::newick::parse_file;
///
/// let trees = parse_file("anseriformes.nwk")?;
/// println!("Parsed {} trees", trees.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new().parse_all(byte_parser)
}

/// Lazily parses Newick trees from any reader through a buffer.
///
/// Suited for large inputs; only the tree being parsed is held in memory.
pub fn parse_reader<R: Read>(reader: R) -> NewickIterator<BufferedByteSource<R>> {
    NewickParser::new().into_iter(ByteParser::from_reader(reader))
}

/// Lazily parses Newick trees from standard input.
pub fn parse_stdin() -> NewickIterator<BufferedByteSource<Stdin>> {
    NewickParser::new().into_iter(ByteParser::stdin())
}
