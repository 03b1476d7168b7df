//! Vertex module for phylogenetic tree representation.

use std::fmt;
use std::ops::Deref;

/// Index of a vertex in a tree (arena). The sole identity of a vertex.
pub type VertexIndex = usize;

// =#========================================================================#=
// VERTEX
// =#========================================================================$=
/// Represents a vertex (node) in a rooted phylogenetic tree.
///
/// A vertex may have any number of children (in input order), an optional
/// label (empty string if none) and an optional [BranchLength] to its parent.
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `parent` is `None` only for the root and for vertices detached by an edit
/// - A vertex is a leaf if and only if it has no children
/// - `c` is in `children` of `p` if and only if `parent` of `c` is `p`
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Label; empty if the input had none
    label: String,
    /// Distance to parent; `None` if undefined (distinct from zero)
    branch_length: Option<BranchLength>,
    /// Children in input order (left to right)
    children: Vec<VertexIndex>,
    /// Index of the parent vertex
    parent: Option<VertexIndex>,
}

impl Vertex {
    /// Creates a new vertex without parent.
    pub(crate) fn new(
        index: VertexIndex,
        label: String,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Self {
            index,
            label,
            branch_length,
            children,
            parent: None,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the label of this vertex (empty if unlabeled).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if this vertex carries a non-empty label.
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }

    /// Returns the branch length to the parent, if defined.
    pub fn branch_length(&self) -> Option<&BranchLength> {
        self.branch_length.as_ref()
    }

    /// Returns the numeric branch length to the parent, if defined.
    pub fn length(&self) -> Option<f64> {
        self.branch_length.as_ref().map(BranchLength::value)
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the children of this vertex in order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    // Mutation is reserved to the tree, which keeps parent and child links in sync.

    pub(crate) fn set_parent(&mut self, parent: Option<VertexIndex>) {
        self.parent = parent;
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    pub(crate) fn take_branch_length(&mut self) -> Option<BranchLength> {
        self.branch_length.take()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<VertexIndex> {
        &mut self.children
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================$=
/// Branch length of a vertex, i.e. the distance to its parent.
///
/// Keeps the literal text it was parsed from next to the value. Negative
/// lengths are allowed (neighbour-joining produces them), non-finite ones
/// are not.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchLength {
    value: f64,
    literal: String,
}

impl BranchLength {
    /// Creates a new branch length, using the formatted value as literal.
    ///
    /// # Panics
    /// Panics if `length` is not finite.
    pub fn new(length: f64) -> Self {
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength {
            value: length,
            literal: length.to_string(),
        }
    }

    /// Like [new](Self::new), but returns `None` for a non-finite `length`.
    ///
    /// # Examples
    /// ```
    /// # use phylowick::model::BranchLength;
    /// assert_eq!(BranchLength::try_new(0.5).unwrap().literal(), "0.5");
    /// assert!(BranchLength::try_new(f64::MAX * 2.0).is_none());
    /// ```
    pub fn try_new(length: f64) -> Option<Self> {
        length.is_finite().then(|| Self::new(length))
    }

    /// Parses a branch length from its literal, `None` if it is not a
    /// finite float.
    ///
    /// # Examples
    /// ```
    /// # use phylowick::model::BranchLength;
    /// let length = BranchLength::parse("1.50").unwrap();
    /// assert_eq!(length.value(), 1.5);
    /// assert_eq!(length.literal(), "1.50");
    /// assert!(BranchLength::parse("1e999").is_none());
    /// assert!(BranchLength::parse("").is_none());
    /// ```
    pub fn parse(literal: &str) -> Option<Self> {
        let value: f64 = literal.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(BranchLength {
            value,
            literal: literal.to_string(),
        })
    }

    /// Returns the numeric value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the text this length was read from.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.value
    }
}

impl fmt::Display for BranchLength {
    /// Shortest representation that round-trips, e.g. `1` for `1.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
