use phylowick::{TreeError, parse_newick_str};

const LETTERS: &str = "(((A,B)f,C)g,(D,E)h)i;";

fn lca_label(newick: &str, labels: &[&str]) -> String {
    let tree = parse_newick_str(newick).unwrap();
    let lca = tree.lca(labels).unwrap();
    tree[lca].label().to_string()
}

#[test]
fn test_lca_of_leaves() {
    assert_eq!(lca_label(LETTERS, &["A", "B"]), "f");
    assert_eq!(lca_label(LETTERS, &["A", "C"]), "g");
    assert_eq!(lca_label(LETTERS, &["B", "E"]), "i");
    assert_eq!(lca_label(LETTERS, &["D", "E"]), "h");
}

#[test]
fn test_lca_of_many_labels() {
    assert_eq!(lca_label(LETTERS, &["A", "B", "C"]), "g");
    assert_eq!(lca_label(LETTERS, &["C", "B", "A", "D"]), "i");
    assert_eq!(lca_label(LETTERS, &["A", "B", "C", "D", "E"]), "i");
}

#[test]
fn test_lca_single_label_is_itself() {
    assert_eq!(lca_label(LETTERS, &["C"]), "C");
    assert_eq!(lca_label(LETTERS, &["h"]), "h");
    assert_eq!(lca_label(LETTERS, &["i"]), "i");
}

#[test]
fn test_lca_with_internal_vertex() {
    assert_eq!(lca_label(LETTERS, &["C", "h"]), "i");
    assert_eq!(lca_label(LETTERS, &["A", "f"]), "f");
    assert_eq!(lca_label(LETTERS, &["g", "C", "B"]), "g");
}

#[test]
fn test_lca_duplicates_count_once() {
    assert_eq!(lca_label(LETTERS, &["A", "A"]), "A");
    assert_eq!(lca_label(LETTERS, &["D", "E", "D", "E"]), "h");
}

#[test]
fn test_lca_polytomy() {
    let newick = "((A,B,C)x,(D,E,F,G)y,H)r;";
    assert_eq!(lca_label(newick, &["A", "C"]), "x");
    assert_eq!(lca_label(newick, &["E", "G", "F"]), "y");
    assert_eq!(lca_label(newick, &["B", "H"]), "r");
}

#[test]
fn test_lca_through_unary_vertices() {
    let newick = "((((A)u)v,B)w,C)r;";
    assert_eq!(lca_label(newick, &["A", "B"]), "w");
    assert_eq!(lca_label(newick, &["A", "u"]), "u");
}

#[test]
fn test_lca_ambiguous_label_uses_first_match() {
    // first A in post-order sits below x
    let newick = "((A,B)x,(A,C)y)r;";
    assert_eq!(lca_label(newick, &["A", "B"]), "x");
    assert_eq!(lca_label(newick, &["A", "C"]), "r");
}

#[test]
fn test_lca_unknown_label() {
    let tree = parse_newick_str(LETTERS).unwrap();
    assert_eq!(
        tree.lca(["A", "Kea"]),
        Err(TreeError::UnknownLabel("Kea".to_string()))
    );
}

#[test]
fn test_lca_empty_query() {
    let tree = parse_newick_str(LETTERS).unwrap();
    let labels: [&str; 0] = [];
    assert_eq!(tree.lca(labels), Err(TreeError::EmptyQuery));
    assert_eq!(tree.lca_of_vertices(&[]), Err(TreeError::EmptyQuery));
}

#[test]
fn test_lca_of_vertices() {
    let tree = parse_newick_str(LETTERS).unwrap();
    let b = tree.node_with_label("B").unwrap();
    let c = tree.node_with_label("C").unwrap();
    let g = tree.node_with_label("g").unwrap();
    assert_eq!(tree.lca_of_vertices(&[b, c]).unwrap(), g);
    assert_eq!(
        tree.lca_of_vertices(&[b, 1234]),
        Err(TreeError::InvalidVertex(1234))
    );
}

#[test]
fn test_lca_after_reroot() {
    let mut tree = parse_newick_str(LETTERS).unwrap();
    let a = tree.node_with_label("A").unwrap();
    tree.reroot(a).unwrap();

    // (A,(B,(C,(D,E)h)g)f);
    let f = tree.lca(["B", "E"]).unwrap();
    assert_eq!(tree[f].label(), "f");
    let root = tree.lca(["A", "D"]).unwrap();
    assert_eq!(root, tree.root_index());
    let g = tree.lca(["C", "h"]).unwrap();
    assert_eq!(tree[g].label(), "g");
}
