//! Label lookup for a single tree.
//!
//! - [LabelIndex]: maps each label to all vertices carrying it, in post-order.

use crate::model::vertex::{Vertex, VertexIndex};
use std::collections::HashMap;

// =#========================================================================#=
// LABEL INDEX
// =#========================================================================$=
/// Maps labels to the vertices carrying them.
///
/// Built from a post-order pass, so for every label the vertices are listed
/// in post-order. Labels are not required to be unique; the empty label is
/// a key like any other. The index remembers the tree generation it was
/// built against.
///
/// # Example
/// ```
/// use phylowick::parse_newick_str;
///
/// let tree = parse_newick_str("((A,B)x,(A,C)y)r;").unwrap();
/// let index = tree.label_index();
///
/// assert_eq!(index.get("A").len(), 2);
/// assert_eq!(index.get("x").len(), 1);
/// assert!(index.get("Z").is_empty());
/// assert_eq!(index.first("A"), Some(index.get("A")[0]));
/// ```
#[derive(Debug, Clone)]
pub struct LabelIndex {
    /// Map from label to matching vertices in post-order
    map: HashMap<String, Vec<VertexIndex>>,
    /// Tree generation this index reflects
    generation: u64,
}

impl LabelIndex {
    /// Builds the index from vertices given in post-order.
    pub(crate) fn build<'a, I>(vertices: I, generation: u64) -> Self
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let mut map: HashMap<String, Vec<VertexIndex>> = HashMap::new();
        for vertex in vertices {
            map.entry(vertex.label().to_string())
                .or_default()
                .push(vertex.index());
        }
        LabelIndex { map, generation }
    }

    /// Returns all vertices with the given label in post-order; empty if none.
    pub fn get(&self, label: &str) -> &[VertexIndex] {
        self.map.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first vertex (in post-order) with the given label.
    pub fn first(&self, label: &str) -> Option<VertexIndex> {
        self.get(label).first().copied()
    }

    /// Returns whether any vertex carries the label.
    pub fn contains(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    /// Returns the number of distinct labels (including the empty label).
    pub fn num_labels(&self) -> usize {
        self.map.len()
    }

    /// Returns the distinct labels in arbitrary order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Returns the tree generation this index was built for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
