//! Tree model: an arena of vertices with cached derived data.
//!
//! * [Tree] - rooted tree of [Vertex]es referenced by [VertexIndex], with
//!   traversal, label lookup, classification, depth, LCA and rerooting
//! * [TreeBuilder] - bottom-up construction, driven by the parser
//! * [LabelIndex] - label to vertices lookup
//! * [TreeError] - errors of queries and edits
//!
//! The model uses the arena pattern, so no direct vertex references are
//! stored, only vertex indices.

mod cache;
pub mod label_index;
mod lca;
mod reroot;
pub mod tree;
pub mod tree_builder;
pub mod tree_error;
pub mod vertex;

pub use label_index::LabelIndex;
pub use tree::{PostOrderIter, PreOrderIter, Tree, TreeStats, TreeType};
pub use tree_builder::TreeBuilder;
pub use tree_error::TreeError;
pub use vertex::{BranchLength, Vertex, VertexIndex};
