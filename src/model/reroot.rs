//! Structural edits: rerooting, collapsing pure clades, extracting subtrees.
//!
//! All edits validate their arguments before touching the tree, then
//! invalidate every cache once they are done.

use crate::model::tree::{PostOrderIter, Tree};
use crate::model::tree_builder::TreeBuilder;
use crate::model::tree_error::TreeError;
use crate::model::vertex::{BranchLength, VertexIndex};
use std::collections::HashMap;
use tracing::debug;

// ============================================================================
// Rerooting (pub)
// ============================================================================
impl Tree {
    /// Reroots the tree in place on the edge above `outgroup`.
    ///
    /// A new unlabeled vertex is inserted halfway on the edge between
    /// `outgroup` and its parent and becomes the root. The edges on the path
    /// from there to the old root are reversed, each branch length moving
    /// along with its edge. If the old root is left with a single child it
    /// is spliced out and the two lengths add up; an old root with several
    /// remaining children stays as an internal vertex. A unary old root
    /// ends up childless and is removed.
    ///
    /// Path lengths between leaves are preserved. Rerooting on the current
    /// root changes nothing.
    ///
    /// # Errors
    /// The tree is left untouched on error.
    /// * [TreeError::InvalidVertex] if `outgroup` is not part of the tree
    /// * [TreeError::LengthOverflow] if splicing out the old root would add
    ///   two lengths beyond the `f64` range
    ///
    /// # Example
    /// ```
    /// use phylowick::parse_newick_str;
    ///
    /// let mut tree = parse_newick_str("(((A,B)f,C)g,(D,E)h)i;").unwrap();
    /// let a = tree.node_with_label("A").unwrap();
    /// tree.reroot(a).unwrap();
    /// assert_eq!(tree.to_newick(), "(A,(B,(C,(D,E)h)g)f);");
    /// ```
    pub fn reroot(&mut self, outgroup: VertexIndex) -> Result<(), TreeError> {
        self.check_attached(outgroup)?;
        let old_root = self.root_index();
        if outgroup == old_root {
            return Ok(());
        }

        let spliced_length = self.spliced_root_length(outgroup)?;
        let new_root = self.insert_vertex_above(outgroup);

        let mut path = vec![new_root];
        let mut current = new_root;
        while let Some(parent) = self[current].parent() {
            path.push(parent);
            current = parent;
        }

        // Flip edges starting at the old root end of the path
        for edge in path.windows(2).rev() {
            self.reverse_edge(edge[1], edge[0]);
        }
        self.set_root_index(new_root);

        match self[old_root].num_children() {
            0 => self.prune(old_root),
            1 => self.splice_out(old_root, spliced_length),
            _ => {}
        }

        self.invalidate_caches();
        debug!(outgroup, new_root, generation = self.generation(), "rerooted tree");
        Ok(())
    }

    /// Length the remaining child of the root gets if rerooting on
    /// `outgroup` leaves the root with one child; `None` otherwise or if both
    /// lengths are undefined.
    ///
    /// Computed before any mutation, so an overflow leaves the tree intact.
    fn spliced_root_length(
        &self,
        outgroup: VertexIndex,
    ) -> Result<Option<BranchLength>, TreeError> {
        let root = self.root_index();
        let mut below = outgroup;
        while let Some(parent) = self[below].parent() {
            if parent == root {
                break;
            }
            below = parent;
        }

        let mut others = self[root].children().iter().filter(|&&c| c != below);
        let remaining = match (others.next(), others.next()) {
            (Some(&remaining), None) => remaining,
            _ => return Ok(None),
        };

        // The edge above `below` moves onto the root; halved if it is the outgroup's
        let moved = if below == outgroup {
            self[outgroup].length().map(|length| length / 2.0)
        } else {
            self[below].length()
        };
        match (moved, self[remaining].length()) {
            (None, None) => Ok(None),
            (above, under) => {
                BranchLength::try_new(above.unwrap_or(0.0) + under.unwrap_or(0.0))
                    .map(Some)
                    .ok_or(TreeError::LengthOverflow { vertex: remaining })
            }
        }
    }

    /// Inserts an unlabeled vertex between `vertex` and its parent, splitting
    /// the branch length in half. Returns the index of the new vertex.
    fn insert_vertex_above(&mut self, vertex: VertexIndex) -> VertexIndex {
        let parent = self[vertex].parent();
        let half = self[vertex]
            .branch_length()
            .map(|length| BranchLength::new(length.value() / 2.0));

        let inserted = self.push_vertex(String::new(), vec![vertex], half.clone());
        self.vertex_mut(vertex).set_branch_length(half);
        self.vertex_mut(vertex).set_parent(Some(inserted));
        self.vertex_mut(inserted).set_parent(parent);
        if let Some(parent) = parent {
            self.replace_child(parent, vertex, inserted);
        }
        inserted
    }

    /// Turns the edge `parent -> child` into `child -> parent`.
    ///
    /// `child` ends up without parent, its length moves onto `parent`.
    fn reverse_edge(&mut self, parent: VertexIndex, child: VertexIndex) {
        self.vertex_mut(parent).children_mut().retain(|&c| c != child);
        self.vertex_mut(child).children_mut().push(parent);
        let length = self.vertex_mut(child).take_branch_length();
        self.vertex_mut(parent).set_branch_length(length);
        self.vertex_mut(parent).set_parent(Some(child));
        self.vertex_mut(child).set_parent(None);
    }

    /// Removes a vertex with exactly one child, connecting the child to the
    /// vertex's parent. The child gets `length`, the two joined edges.
    fn splice_out(&mut self, vertex: VertexIndex, length: Option<BranchLength>) {
        let child = self[vertex].children()[0];
        let parent = self[vertex].parent();

        self.vertex_mut(child).set_branch_length(length);
        self.vertex_mut(child).set_parent(parent);
        match parent {
            Some(parent) => self.replace_child(parent, vertex, child),
            None => self.set_root_index(child),
        }

        let detached = self.vertex_mut(vertex);
        detached.children_mut().clear();
        detached.set_parent(None);
        detached.set_branch_length(None);
    }

    /// Detaches a childless vertex from its parent.
    fn prune(&mut self, vertex: VertexIndex) {
        if let Some(parent) = self[vertex].parent() {
            self.vertex_mut(parent).children_mut().retain(|&c| c != vertex);
        }
        let detached = self.vertex_mut(vertex);
        detached.set_parent(None);
        detached.set_branch_length(None);
    }

    /// Puts `new` at the position of `old` among the children of `parent`.
    fn replace_child(&mut self, parent: VertexIndex, old: VertexIndex, new: VertexIndex) {
        if let Some(slot) = self
            .vertex_mut(parent)
            .children_mut()
            .iter_mut()
            .find(|c| **c == old)
        {
            *slot = new;
        }
    }
}

// ============================================================================
// Collapsing and extracting (pub)
// ============================================================================
impl Tree {
    /// Collapses every clade whose leaves all carry the same label into a
    /// single leaf with that label.
    ///
    /// Works bottom-up, so nested pure clades collapse as a whole. The
    /// collapsed vertex keeps its own branch length; its former children are
    /// detached.
    ///
    /// # Returns
    /// The number of vertices that were turned into leaves.
    ///
    /// # Example
    /// ```
    /// use phylowick::parse_newick_str;
    ///
    /// let mut tree = parse_newick_str("((A,A),(B,(C,C)));").unwrap();
    /// assert_eq!(tree.collapse_pure_clades(), 2);
    /// assert_eq!(tree.to_newick(), "(A,(B,C));");
    /// ```
    pub fn collapse_pure_clades(&mut self) -> usize {
        let order = self.post_order().to_vec();
        let mut collapsed = 0;

        for index in order {
            let vertex = &self[index];
            if vertex.is_leaf() {
                continue;
            }
            let children = vertex.children();
            if !children.iter().all(|&c| self[c].is_leaf()) {
                continue;
            }
            let label = self[children[0]].label();
            if children.iter().any(|&c| self[c].label() != label) {
                continue;
            }

            let label = label.to_string();
            let children = std::mem::take(self.vertex_mut(index).children_mut());
            for child in children {
                self.vertex_mut(child).set_parent(None);
            }
            self.vertex_mut(index).set_label(label);
            collapsed += 1;
        }

        if collapsed > 0 {
            self.invalidate_caches();
            debug!(collapsed, generation = self.generation(), "collapsed pure clades");
        }
        collapsed
    }

    /// Returns the clade rooted at `vertex` as an independent tree.
    ///
    /// The branch length of `vertex` is kept as the root length of the copy.
    ///
    /// # Errors
    /// [TreeError::InvalidVertex] if `vertex` is not part of the tree.
    pub fn clone_subtree(&self, vertex: VertexIndex) -> Result<Tree, TreeError> {
        self.check_attached(vertex)?;

        let mut builder = TreeBuilder::new();
        let mut new_index: HashMap<VertexIndex, VertexIndex> = HashMap::new();
        for original in PostOrderIter::new(self, vertex) {
            let children = original
                .children()
                .iter()
                .map(|c| new_index[c])
                .collect();
            let index = builder.add_internal(
                children,
                original.label(),
                original.branch_length().cloned(),
            );
            new_index.insert(original.index(), index);
        }

        builder.finish_tree(new_index[&vertex])
    }
}
