//! Bottom-up construction of [Tree]s.
//!
//! The [NewickParser](crate::newick::NewickParser) drives a [TreeBuilder] as
//! it reads Newick syntax: vertices are added once all their children are
//! known, and the tree is only handed out after the whole statement parsed.
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_*/set_name ──→ finish_tree() ──→ Empty
//!   ↑                                                                           │
//!   └───────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::model::tree::Tree;
use crate::model::tree_error::TreeError;
use crate::model::vertex::{BranchLength, Vertex, VertexIndex};

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================$=
/// Assembles a [Tree] bottom-up.
///
/// # Example
/// ```
/// use phylowick::model::{BranchLength, TreeBuilder};
///
/// // ((A:0.2,B:0.2)x:0.2,C:0.4);
/// let mut builder = TreeBuilder::new();
/// let a = builder.add_leaf("A", Some(BranchLength::new(0.2)));
/// let b = builder.add_leaf("B", Some(BranchLength::new(0.2)));
/// let x = builder.add_internal(vec![a, b], "x", Some(BranchLength::new(0.2)));
/// let c = builder.add_leaf("C", Some(BranchLength::new(0.4)));
/// let root = builder.add_internal(vec![x, c], "", None);
///
/// let tree = builder.finish_tree(root).unwrap();
/// assert!(tree.is_valid());
/// assert_eq!(tree.to_newick(), "((A:0.2,B:0.2)x:0.2,C:0.4);");
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    vertices: Vec<Vertex>,
    name: Option<String>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares the builder for the next tree, discarding any partial state.
    ///
    /// # Arguments
    /// * `num_vertices` - Capacity hint for the arena
    pub fn init_next(&mut self, num_vertices: usize) {
        self.vertices = Vec::with_capacity(num_vertices);
        self.name = None;
    }

    /// Adds a leaf and returns its index.
    pub fn add_leaf<S: Into<String>>(
        &mut self,
        label: S,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        self.add_internal(Vec::new(), label, branch_length)
    }

    /// Adds a vertex above the given children and returns its index.
    ///
    /// # Panics
    /// Panics if a child index has not been added before.
    pub fn add_internal<S: Into<String>>(
        &mut self,
        children: Vec<VertexIndex>,
        label: S,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(Some(index));
        }
        self.vertices
            .push(Vertex::new(index, label.into(), children, branch_length));
        index
    }

    /// Sets the name of the tree under construction.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns the number of vertices added so far.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Finishes the tree rooted at `root` and resets the builder.
    ///
    /// # Errors
    /// [TreeError::InvalidVertex] if `root` was not added or has a parent,
    /// or for the first vertex that is not reachable from `root` exactly
    /// once (e.g. a subtree never joined to the root, or a child given to
    /// two parents). The builder keeps its vertices in that case.
    pub fn finish_tree(&mut self, root: VertexIndex) -> Result<Tree, TreeError> {
        match self.vertices.get(root) {
            Some(vertex) if vertex.parent().is_none() => {}
            _ => return Err(TreeError::InvalidVertex(root)),
        }
        self.check_reachable(root)?;

        let vertices = std::mem::take(&mut self.vertices);
        Ok(Tree::from_arena(vertices, root, self.name.take()))
    }

    /// Walks down from `root`; every vertex must be met once, via its parent.
    fn check_reachable(&self, root: VertexIndex) -> Result<(), TreeError> {
        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if std::mem::replace(&mut seen[index], true) {
                return Err(TreeError::InvalidVertex(index));
            }
            for &child in self.vertices[index].children() {
                if self.vertices[child].parent() != Some(index) {
                    return Err(TreeError::InvalidVertex(child));
                }
                stack.push(child);
            }
        }

        match seen.iter().position(|&reached| !reached) {
            Some(unreached) => Err(TreeError::InvalidVertex(unreached)),
            None => Ok(()),
        }
    }
}
