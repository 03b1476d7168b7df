//! Random tree generation shared by the property tests.
#![allow(dead_code)]

use phylowick::Tree;
use phylowick::model::{BranchLength, TreeBuilder};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::Index;

/// Everything needed to assemble one random tree bottom-up.
///
/// Leaves are created first; then repeatedly two (or three, if `wide` says
/// so) subtrees are picked from the pool and joined under a new vertex
/// until only the root is left.
#[derive(Debug, Clone)]
pub struct TreeRecipe {
    pub num_leaves: usize,
    pub labels: Vec<String>,
    pub lengths: Vec<Option<f64>>,
    pub picks: Vec<Index>,
    pub wide: Vec<bool>,
}

impl TreeRecipe {
    pub fn build(&self) -> Tree {
        let mut builder = TreeBuilder::new();
        let mut pool: Vec<usize> = (0..self.num_leaves)
            .map(|i| builder.add_leaf(self.labels[i].clone(), self.length(i)))
            .collect();

        let mut next = self.num_leaves;
        let mut step = 0;
        while pool.len() > 1 {
            let arity = if self.wide[step] && pool.len() > 2 { 3 } else { 2 };
            let children = (0..arity)
                .map(|k| {
                    let pick = self.picks[3 * step + k].index(pool.len());
                    pool.swap_remove(pick)
                })
                .collect();
            let joined = builder.add_internal(children, self.labels[next].clone(), self.length(next));
            pool.push(joined);
            next += 1;
            step += 1;
        }

        builder.finish_tree(pool[0]).unwrap()
    }

    fn length(&self, i: usize) -> Option<BranchLength> {
        self.lengths[i].map(BranchLength::new)
    }
}

/// Recipes for trees with 1 to 15 leaves.
pub fn recipe<L, B>(label: L, length: B) -> impl Strategy<Value = TreeRecipe>
where
    L: Strategy<Value = String> + Clone,
    B: Strategy<Value = Option<f64>> + Clone,
{
    (1usize..16).prop_flat_map(move |n| {
        (
            Just(n),
            vec(label.clone(), 2 * n),
            vec(length.clone(), 2 * n),
            vec(any::<Index>(), 3 * n),
            vec(any::<bool>(), n),
        )
            .prop_map(|(num_leaves, labels, lengths, picks, wide)| TreeRecipe {
                num_leaves,
                labels,
                lengths,
                picks,
                wide,
            })
    })
}

/// Recipes for phylograms: every vertex has a length.
pub fn phylogram() -> impl Strategy<Value = TreeRecipe> {
    recipe("[A-Z][a-z]{0,3}", (-5.0f64..20.0).prop_map(Some))
}

/// Distance between two vertices along the tree.
pub fn distance(tree: &Tree, a: usize, b: usize) -> f64 {
    let lca = tree.lca_of_vertices(&[a, b]).unwrap();
    tree.vertex_depth(a).unwrap() + tree.vertex_depth(b).unwrap()
        - 2.0 * tree.vertex_depth(lca).unwrap()
}
