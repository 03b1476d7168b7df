//! Constants for the Newick parser and writer.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon,
/// single quote and whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"()[],:;' \n\t\r";

/// Bytes that may occur in a branch length literal
pub(crate) const BRANCH_LENGTH_BYTES: &[u8] = b"0123456789.+-eE";

/// Default guess for number of vertices, when unknown
pub(crate) const DEFAULT_NUM_VERTICES_GUESS: usize = 20;

/// Default limit on parenthesis nesting
pub const DEFAULT_MAX_DEPTH: usize = 1024;
