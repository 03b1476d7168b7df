//! Phylowick is a library to parse, query and rewire rooted phylogenetic
//! trees given as Newick strings.
//!
//! Core functionality provided:
//! - Newick: Parse each Newick string in a file, stream or single string,
//!   eagerly or lazily, and write trees back to Newick.
//! - Tree model: [Tree] stores its vertices in an arena and refers to them
//!   by [VertexIndex] only. Vertices may have any number of children, a
//!   label and a [BranchLength].
//! - Queries: post-order traversal, label lookup, classification into
//!   cladogram/phylogram ([TreeType]), depth, last common ancestor.
//! - Edits: rerooting on any vertex, collapsing pure clades, extracting
//!   subtrees. Derived data is cached per tree and refreshed automatically
//!   after every edit.
//!
//! Limitations:
//! - Only rooted trees
//! - Bracketed comments (including NHX metadata) are skipped, never interpreted
//!
//! # Usage patterns
//! 1. Several functions provide quick access to parsers with default
//!    settings, see [crate::newick].
//! 2. Configure a [NewickParser](crate::newick::NewickParser) for control
//!    over nesting limit, comment handling and arena pre-allocation.
//!
//! ## Example
//! ```
//! use phylowick::{parse_newick_str, TreeType};
//!
//! let mut tree = parse_newick_str("(((A:2,B:1.5)f:1,C:0.5)g:2,(D:1,E:1)h:1.5)i;").unwrap();
//! assert_eq!(tree.leaf_count(), 5);
//! assert_eq!(tree.tree_type(), TreeType::Phylogram);
//!
//! let lca = tree.lca(["A", "C"]).unwrap();
//! assert_eq!(tree[lca].label(), "g");
//!
//! let a = tree.node_with_label("A").unwrap();
//! tree.reroot(a).unwrap();
//! assert_eq!(tree.to_newick(), "(A:1,(B:1.5,(C:0.5,(D:1,E:1)h:3.5)g:1)f:1);");
//! ```

pub mod model;
pub mod newick;
pub mod parser;

pub use crate::model::{BranchLength, Tree, TreeError, TreeStats, TreeType, Vertex, VertexIndex};
pub use crate::newick::NewickParser;
pub use crate::parser::ParsingError;

use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file containing a list of `;`-terminated Newick strings
/// using default settings, returning all trees.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}
