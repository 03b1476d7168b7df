mod common;

use phylowick::newick::parse_all;
use phylowick::{Tree, parse_newick_str};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z_][A-Za-z0-9_.-]{0,6}",
        "[ a-z',:;()\\[\\]]{1,6}",
        "\\PC{1,4}",
    ]
}

fn length() -> impl Strategy<Value = Option<f64>> + Clone {
    prop_oneof![
        Just(None),
        Just(Some(0.0)),
        (-100.0f64..100.0).prop_map(Some),
        prop::num::f64::NORMAL.prop_map(Some),
    ]
}

fn shape(tree: &Tree) -> Vec<(String, Option<f64>, usize)> {
    tree.nodes()
        .map(|v| (v.label().to_string(), v.length(), v.num_children()))
        .collect()
}

proptest! {
    #[test]
    fn written_tree_parses_back(recipe in common::recipe(label(), length())) {
        let tree = recipe.build();
        let newick = tree.to_newick();
        let parsed = parse_newick_str(&newick).unwrap();

        prop_assert_eq!(shape(&parsed), shape(&tree));
        prop_assert_eq!(parsed.tree_type(), tree.tree_type());
        prop_assert_eq!(parsed.to_newick(), newick);
    }

    #[test]
    fn many_trees_parse_back_in_order(
        recipes in prop::collection::vec(common::recipe(label(), length()), 1..6)
    ) {
        let trees: Vec<Tree> = recipes.iter().map(|r| r.build()).collect();
        let input: String = trees.iter().map(|t| format!("{t}\n")).collect();

        let parsed: Vec<Tree> = parse_all(&input).collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(parsed.len(), trees.len());
        for (original, copy) in trees.iter().zip(&parsed) {
            prop_assert_eq!(shape(copy), shape(original));
        }
    }

    #[test]
    fn parsing_never_panics(input in "[(),:;'\\[\\] A-C0-9.eE+-]{0,40}") {
        let _ = parse_newick_str(&input);
    }

    #[test]
    fn parsing_arbitrary_text_never_panics(input in "\\PC{0,60}") {
        let _ = parse_newick_str(&input);
    }
}
