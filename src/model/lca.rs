//! Last common ancestor queries.

use crate::model::tree::Tree;
use crate::model::tree_error::TreeError;
use crate::model::vertex::VertexIndex;

impl Tree {
    /// Returns the last common ancestor of the vertices carrying `labels`.
    ///
    /// Each label resolves to its first vertex in post-order; repeated
    /// labels count once. A single label yields its own vertex.
    ///
    /// # Errors
    /// * [TreeError::UnknownLabel] if a label matches no vertex
    /// * [TreeError::EmptyQuery] if `labels` is empty
    ///
    /// # Example
    /// ```
    /// use phylowick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B)f,(C,(D,E)g)h)i;").unwrap();
    /// let lca = tree.lca(["D", "C"]).unwrap();
    /// assert_eq!(tree[lca].label(), "h");
    /// ```
    pub fn lca<I, S>(&self, labels: I) -> Result<VertexIndex, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vertices = self.nodes_from_labels(labels)?;
        self.lca_of_vertices(&vertices)
    }

    /// Returns the last common ancestor of the given vertices.
    ///
    /// Every vertex climbs to the root, counting visits per ancestor; the
    /// LCA is the lowest ancestor of the first vertex that all of them
    /// passed. Runs in O(k·h) for k distinct vertices and height h.
    ///
    /// # Errors
    /// * [TreeError::InvalidVertex] if an index is not part of the tree
    /// * [TreeError::EmptyQuery] if `vertices` is empty
    pub fn lca_of_vertices(&self, vertices: &[VertexIndex]) -> Result<VertexIndex, TreeError> {
        let mut distinct: Vec<VertexIndex> = Vec::with_capacity(vertices.len());
        for &vertex in vertices {
            self.check_attached(vertex)?;
            if !distinct.contains(&vertex) {
                distinct.push(vertex);
            }
        }

        let first = *distinct.first().ok_or(TreeError::EmptyQuery)?;
        if distinct.len() == 1 {
            return Ok(first);
        }

        let mut visits = vec![0usize; self.arena_len()];
        for &vertex in &distinct {
            let mut current = Some(vertex);
            while let Some(index) = current {
                visits[index] += 1;
                current = self[index].parent();
            }
        }

        let mut current = Some(first);
        while let Some(index) = current {
            if visits[index] == distinct.len() {
                return Ok(index);
            }
            current = self[index].parent();
        }

        Err(TreeError::InvariantViolation(format!(
            "vertices {:?} share no ancestor",
            distinct
        )))
    }
}
