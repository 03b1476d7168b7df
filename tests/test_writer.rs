use phylowick::model::{BranchLength, TreeBuilder};
use phylowick::newick::{parse_file, write_newick_file};
use phylowick::parse_newick_str;
use std::io::{self, Write};

fn rewrite(newick: &str) -> String {
    parse_newick_str(newick).unwrap().to_newick()
}

#[test]
fn test_plain_output() {
    for newick in [
        "(((A,B)f,C)g,(D,E)h)i;",
        "((A,B,C,D),(E),((F)));",
        "(,);",
        "A;",
        ";",
    ] {
        assert_eq!(rewrite(newick), newick);
    }
}

#[test]
fn test_whitespace_and_comments_dropped() {
    assert_eq!(rewrite(" ( A [x] , B ) [y] ; "), "(A,B);");
}

#[test]
fn test_branch_length_formatting() {
    assert_eq!(
        rewrite("(A:1.0,B:3.50,C:0.00001,D:1e-3,E:2E2,F:+7);"),
        "(A:1,B:3.5,C:0.00001,D:0.001,E:200,F:7);"
    );
    assert_eq!(rewrite("(A:0,B:-0.25,C:0.0);"), "(A:0,B:-0.25,C:0);");
    assert_eq!(rewrite("(A:0.1,B:0.30000000000000004);"), "(A:0.1,B:0.30000000000000004);");
}

#[test]
fn test_missing_and_zero_length_differ() {
    assert_eq!(rewrite("(A,B:0);"), "(A,B:0);");
}

#[test]
fn test_root_length_is_written() {
    assert_eq!(rewrite("((A:1,B:1)x:1,C:2)r:0.5;"), "((A:1,B:1)x:1,C:2)r:0.5;");
}

#[test]
fn test_labels_quoted_when_needed() {
    assert_eq!(
        rewrite("('Wilson''s petrel','Little Spotted Kiwi',Apteryx_owenii,'plain');"),
        "('Wilson''s petrel','Little Spotted Kiwi',Apteryx_owenii,plain);"
    );
    assert_eq!(rewrite("('a,b','(c)','d:e','f;g');"), "('a,b','(c)','d:e','f;g');");
    assert_eq!(rewrite("('[not a comment]',x);"), "('[not a comment]',x);");
}

#[test]
fn test_utf8_labels_unquoted() {
    assert_eq!(rewrite("(Kākāpō:1,Takahē:2)Aotearoa;"), "(Kākāpō:1,Takahē:2)Aotearoa;");
}

#[test]
fn test_buffered_streaming_and_display_agree() {
    let tree =
        parse_newick_str("((('Kea''s',Kaka:0.5)Nestor:2,Kakapo:1.25)'Strigopoidea s.l.':0.1);")
            .unwrap();

    let mut streamed = Vec::new();
    tree.write_newick(&mut streamed).unwrap();
    let streamed = String::from_utf8(streamed).unwrap();

    assert_eq!(streamed, tree.to_newick());
    assert_eq!(format!("{tree}"), tree.to_newick());
}

#[test]
fn test_output_after_edit() {
    let mut tree = parse_newick_str("(('x y':1,B:1)f:1,C:2);").unwrap();
    let c = tree.node_with_label("C").unwrap();
    tree.reroot(c).unwrap();

    let mut streamed = Vec::new();
    tree.write_newick(&mut streamed).unwrap();
    assert_eq!(tree.to_newick(), "(C:1,('x y':1,B:1)f:2);");
    assert_eq!(streamed, tree.to_newick().into_bytes());
}

#[test]
fn test_deep_tree_does_not_overflow() {
    const DEPTH: usize = 100_000;

    let mut builder = TreeBuilder::new();
    let mut current = builder.add_leaf("deep", Some(BranchLength::new(1.0)));
    for _ in 0..DEPTH {
        current = builder.add_internal(vec![current], "", Some(BranchLength::new(1.0)));
    }
    let tree = builder.finish_tree(current).unwrap();

    let newick = tree.to_newick();
    assert!(newick.starts_with(&"(".repeat(DEPTH)));
    assert!(newick.ends_with("):1;"));
    assert_eq!(newick.matches(')').count(), DEPTH);
}

struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_error_is_reported() {
    let tree = parse_newick_str("(A,B);").unwrap();
    let err = tree.write_newick(FullDisk).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::StorageFull);
}

#[test]
fn test_write_newick_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trees.nwk");
    let trees = vec![
        parse_newick_str("((A:1,B:1)x:1,C:2);").unwrap(),
        parse_newick_str("('Homo sapiens',Pan);").unwrap(),
    ];

    write_newick_file(&path, &trees).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "((A:1,B:1)x:1,C:2);\n('Homo sapiens',Pan);\n");

    let read_back = parse_file(&path).unwrap();
    assert_eq!(read_back.len(), 2);
    for (original, copy) in trees.iter().zip(&read_back) {
        assert_eq!(original.to_newick(), copy.to_newick());
    }
}
