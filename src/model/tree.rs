//! Tree module for rooted phylogenetic tree representation.
//!
//! This module provides the core data structures:
//! - [Tree]: arena of [Vertex] with cached derived data (post-order, label
//!   index, tree type, depths)
//! - [TreeType]: classification by branch length presence
//! - [TreeStats]: summary numbers of a tree
//! - [PostOrderIter] and [PreOrderIter] for stack-based traversal

use crate::model::cache::GenCache;
use crate::model::label_index::LabelIndex;
use crate::model::tree_error::TreeError;
use crate::model::vertex::{BranchLength, Vertex, VertexIndex};
use std::fmt;

// =#========================================================================#=
// TREE
// =#========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Vertices may have any number of children.
///
/// # Structure
/// - All vertices are stored in the arena, the root index is maintained
/// - No assumption on order of indices is maintained
/// - Vertices removed by an edit (reroot, collapse) stay in the arena as
///   detached vertices, so indices never shift; they are never reachable
///   from the root and operations taking a vertex reject them
///
/// # Derived data
/// The post-order sequence, [LabelIndex], [TreeType] and vertex depths are
/// computed on first use and cached. Every mutation bumps the
/// [generation](Tree::generation) and drops all caches, so readers always
/// see data matching the current shape.
///
/// # Construction
/// Trees are produced by the [NewickParser](crate::newick::NewickParser) or
/// assembled bottom-up with a [TreeBuilder](crate::model::TreeBuilder).
///
/// # Example
/// ```
/// use phylowick::parse_newick_str;
///
/// let tree = parse_newick_str("((A:1,B:1):1,C:1);").unwrap();
/// assert_eq!(tree.leaf_count(), 3);
/// assert_eq!(tree.depth().unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,

    /// Bumped on every structural mutation
    generation: u64,

    post_order: GenCache<Vec<VertexIndex>>,
    label_index: GenCache<LabelIndex>,
    tree_type: GenCache<TreeType>,
    depths: GenCache<Result<Vec<Option<f64>>, TreeError>>,
}

// ============================================================================
// Construction, Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Creates a tree from an arena and its root; builds the post-order.
    pub(crate) fn from_arena(
        vertices: Vec<Vertex>,
        root_index: VertexIndex,
        name: Option<String>,
    ) -> Self {
        let tree = Tree {
            vertices,
            root_index,
            name,
            generation: 0,
            post_order: GenCache::new("post-order"),
            label_index: GenCache::new("label index"),
            tree_type: GenCache::new("tree type"),
            depths: GenCache::new("depths"),
        };
        tree.post_order();
        tree
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets or replaces the name of this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the root vertex.
    pub fn root(&self) -> &Vertex {
        &self.vertices[self.root_index]
    }

    /// Returns the vertex at `index` if it is part of the tree.
    ///
    /// Detached vertices and out-of-range indices give `None`.
    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        if self.is_attached(index) {
            Some(&self.vertices[index])
        } else {
            None
        }
    }

    /// Returns whether `index` refers to a vertex reachable from the root.
    pub fn is_attached(&self, index: VertexIndex) -> bool {
        index < self.vertices.len()
            && (index == self.root_index || self.vertices[index].parent().is_some())
    }

    /// Returns the number of vertices reachable from the root.
    pub fn num_vertices(&self) -> usize {
        self.post_order().len()
    }

    /// Returns the number of leaves in this tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of non-leaf vertices (root included unless it is a leaf).
    pub fn num_internal(&self) -> usize {
        self.nodes().filter(|v| !v.is_leaf()).count()
    }

    /// Returns the size of the arena, detached vertices included.
    pub fn arena_len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the current generation; it changes with every mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is in bounds and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - Every reachable child points back to its parent
    /// - Every vertex with a parent is listed among that parent's children
    /// - No vertex is reachable twice
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || self.root().parent().is_some() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            if let Some(parent) = vertex.parent() {
                if parent >= self.vertices.len() || !self.vertices[parent].children().contains(&index)
                {
                    return false;
                }
            }
        }

        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            if std::mem::replace(&mut seen[index], true) {
                return false;
            }
            for &child in self.vertices[index].children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
                stack.push(child);
            }
        }

        true
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Mutation support (crate)
// ============================================================================
impl Tree {
    pub(crate) fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Appends a new unlinked vertex and returns its index.
    pub(crate) fn push_vertex(
        &mut self,
        label: String,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new(index, label, children, branch_length));
        index
    }

    pub(crate) fn set_root_index(&mut self, root_index: VertexIndex) {
        self.root_index = root_index;
    }

    /// Bumps the generation and drops every cached value.
    pub(crate) fn invalidate_caches(&mut self) {
        self.generation += 1;
        self.post_order.invalidate();
        self.label_index.invalidate();
        self.tree_type.invalidate();
        self.depths.invalidate();
    }

    /// Error for a vertex argument that is not part of the tree.
    pub(crate) fn check_attached(&self, index: VertexIndex) -> Result<(), TreeError> {
        if self.is_attached(index) {
            Ok(())
        } else {
            Err(TreeError::InvalidVertex(index))
        }
    }
}

// ============================================================================
// Traversal (pub)
// ============================================================================
impl Tree {
    /// Returns the vertex indices in post-order (children before parents).
    ///
    /// Children are visited in order and the root comes last. The sequence
    /// is computed once per generation.
    pub fn post_order(&self) -> &[VertexIndex] {
        self.post_order.get_or_build(self.generation, || {
            self.post_order_iter().map(Vertex::index).collect()
        })
    }

    /// Returns an iterator over all vertices in post-order.
    pub fn nodes(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.post_order().iter().map(move |&i| &self.vertices[i])
    }

    /// Returns a fresh iterator over the tree in post-order (children before parents).
    ///
    /// Prefer [post_order](Self::post_order), which is cached.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root_index)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use phylowick::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B)x,C)r;").unwrap();
    /// let labels: Vec<_> = tree.pre_order_iter().map(|v| v.label()).collect();
    /// assert_eq!(labels, vec!["r", "x", "A", "B", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root_index)
    }
}

// ============================================================================
// Labels (pub)
// ============================================================================
impl Tree {
    /// Returns the [LabelIndex] of this tree, built on first use.
    pub fn label_index(&self) -> &LabelIndex {
        self.label_index
            .get_or_build(self.generation, || LabelIndex::build(self.nodes(), self.generation))
    }

    /// Returns all vertices with the given label in post-order; empty if none.
    pub fn nodes_with_label(&self, label: &str) -> &[VertexIndex] {
        self.label_index().get(label)
    }

    /// Returns the first vertex (in post-order) with the given label.
    ///
    /// # Errors
    /// [TreeError::UnknownLabel] if no vertex carries it.
    pub fn node_with_label(&self, label: &str) -> Result<VertexIndex, TreeError> {
        self.label_index()
            .first(label)
            .ok_or_else(|| TreeError::UnknownLabel(label.to_string()))
    }

    /// Resolves each label to its first vertex, in input order.
    ///
    /// # Errors
    /// [TreeError::UnknownLabel] for the first label without a vertex.
    pub fn nodes_from_labels<I, S>(&self, labels: I) -> Result<Vec<VertexIndex>, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.node_with_label(label.as_ref()))
            .collect()
    }

    /// Returns all non-empty labels in post-order.
    pub fn labels(&self) -> Vec<&str> {
        self.nodes()
            .filter(|v| v.has_label())
            .map(Vertex::label)
            .collect()
    }

    /// Returns the non-empty labels of leaves in post-order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.nodes()
            .filter(|v| v.is_leaf() && v.has_label())
            .map(Vertex::label)
            .collect()
    }
}

// ============================================================================
// Classification, depth, statistics (pub)
// ============================================================================
impl Tree {
    /// Classifies the tree by which non-root vertices carry a branch length.
    ///
    /// * none of them: [TreeType::Cladogram] (also for a single-vertex tree)
    /// * all of them: [TreeType::Phylogram]
    /// * otherwise: [TreeType::Neither]
    ///
    /// The root's own length is ignored.
    pub fn tree_type(&self) -> TreeType {
        *self.tree_type.get_or_build(self.generation, || {
            let mut any_present = false;
            let mut any_absent = false;
            for vertex in self.nodes().filter(|v| v.index() != self.root_index) {
                if vertex.has_branch_length() {
                    any_present = true;
                } else {
                    any_absent = true;
                }
            }
            match (any_present, any_absent) {
                (false, _) => TreeType::Cladogram,
                (true, false) => TreeType::Phylogram,
                (true, true) => TreeType::Neither,
            }
        })
    }

    /// Returns `true` if no non-root vertex has a branch length.
    pub fn is_cladogram(&self) -> bool {
        self.tree_type() == TreeType::Cladogram
    }

    /// Returns the distance from the root to `index`.
    ///
    /// # Errors
    /// * [TreeError::InvalidVertex] if `index` is not part of the tree
    /// * [TreeError::UndefinedLength] if any non-root vertex lacks a length
    pub fn vertex_depth(&self, index: VertexIndex) -> Result<f64, TreeError> {
        self.check_attached(index)?;
        let depths = self.depths()?;
        depths[index].ok_or_else(|| {
            TreeError::InvariantViolation(format!("depth of vertex {} not computed", index))
        })
    }

    /// Returns the depth of the tree, the largest root-to-leaf distance.
    ///
    /// A single-vertex tree has depth `0`. The root's own length is never
    /// counted.
    ///
    /// # Errors
    /// [TreeError::UndefinedLength] if any non-root vertex lacks a length.
    pub fn depth(&self) -> Result<f64, TreeError> {
        let depths = self.depths()?;
        // every tree has a leaf, the root alone included
        let mut max = f64::NEG_INFINITY;
        for vertex in self.nodes().filter(|v| v.is_leaf()) {
            let depth = depths[vertex.index()].ok_or_else(|| {
                TreeError::InvariantViolation(format!(
                    "depth of leaf {} not computed",
                    vertex.index()
                ))
            })?;
            max = max.max(depth);
        }
        Ok(max)
    }

    /// Per-vertex depths indexed by arena position, cached per generation.
    ///
    /// Walks the post-order backwards, so parents are handled before
    /// their children.
    fn depths(&self) -> Result<&[Option<f64>], TreeError> {
        let depths = self.depths.get_or_build(self.generation, || {
            let mut depths = vec![None; self.vertices.len()];
            for &index in self.post_order().iter().rev() {
                if index == self.root_index {
                    depths[index] = Some(0.0);
                    continue;
                }
                let vertex = &self.vertices[index];
                let parent = vertex.parent().ok_or_else(|| {
                    TreeError::InvariantViolation(format!("vertex {} has no parent", index))
                })?;
                let parent_depth = depths[parent].ok_or_else(|| {
                    TreeError::InvariantViolation(format!(
                        "parent {} of vertex {} visited after child",
                        parent, index
                    ))
                })?;
                let length = vertex
                    .length()
                    .ok_or(TreeError::UndefinedLength { vertex: index })?;
                depths[index] = Some(parent_depth + length);
            }
            Ok(depths)
        });
        match depths {
            Ok(depths) => Ok(depths.as_slice()),
            Err(err) => Err(err.clone()),
        }
    }

    /// Computes summary numbers of this tree.
    ///
    /// The depth is only reported for phylograms.
    pub fn stats(&self) -> TreeStats {
        let tree_type = self.tree_type();
        let mut stats = TreeStats {
            tree_type,
            ..TreeStats::default()
        };
        for vertex in self.nodes() {
            stats.num_vertices += 1;
            match vertex.num_children() {
                0 => stats.num_leaves += 1,
                1 => {}
                2 => stats.num_dichotomies += 1,
                _ => stats.num_polytomies += 1,
            }
        }
        if tree_type == TreeType::Phylogram {
            stats.depth = self.depth().ok();
        }
        stats
    }
}

// =#========================================================================#=
// TREE TYPE & STATS
// =#========================================================================$=
/// Classification of a tree by branch length presence on non-root vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeType {
    /// No non-root vertex has a branch length.
    Cladogram,
    /// Every non-root vertex has a branch length.
    Phylogram,
    /// Some do, some don't.
    Neither,
    /// Not classified yet; [Tree::tree_type] never returns this.
    #[default]
    Unknown,
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TreeType::Cladogram => "cladogram",
            TreeType::Phylogram => "phylogram",
            TreeType::Neither => "neither",
            TreeType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Summary numbers of a tree, see [Tree::stats].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeStats {
    pub tree_type: TreeType,
    pub num_vertices: usize,
    pub num_leaves: usize,
    /// Vertices with exactly two children
    pub num_dichotomies: usize,
    /// Vertices with more than two children
    pub num_polytomies: usize,
    /// Largest root-to-leaf distance, phylograms only
    pub depth: Option<f64>,
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================$=
/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    /// Traverses the subtree rooted at `start`.
    pub(crate) fn new(tree: &'a Tree, start: VertexIndex) -> Self {
        let mut stack = Vec::new();
        if start < tree.vertices.len() {
            stack.push((start, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree.vertices[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // reversed, so the leftmost child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    pub(crate) fn new(tree: &'a Tree, start: VertexIndex) -> Self {
        let mut stack = Vec::new();
        if start < tree.vertices.len() {
            stack.push(start);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree.vertices[index];
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}
