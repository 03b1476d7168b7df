//! Errors raised by queries and edits on a [Tree](crate::model::Tree).

use crate::model::vertex::VertexIndex;
use thiserror::Error;

/// Errors of tree queries (label lookup, depth, LCA) and edits (reroot).
///
/// Ambiguous labels are never an error: lookups return all matches, and
/// single-vertex queries use the first match in post-order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// No vertex carries the label.
    #[error("No vertex with label '{0}'")]
    UnknownLabel(String),

    /// An LCA was requested for an empty set of vertices.
    #[error("Empty query, at least one vertex is needed")]
    EmptyQuery,

    /// Index out of range, or the vertex was detached from the tree by an edit.
    #[error("Vertex {0} is not part of the tree")]
    InvalidVertex(VertexIndex),

    /// A non-root vertex has no branch length where one is needed.
    #[error("Vertex {vertex} has no branch length")]
    UndefinedLength { vertex: VertexIndex },

    /// An edit would give the vertex a branch length beyond the `f64` range.
    #[error("Branch length of vertex {vertex} overflows")]
    LengthOverflow { vertex: VertexIndex },

    /// Internal inconsistency of the tree structure.
    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),
}
