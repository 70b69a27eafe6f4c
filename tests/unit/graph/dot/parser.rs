use super::*;

#[test]
fn petgraph_dot_output() {
    let src = r#"digraph {
    0 [ label = "a1b2" ]
    1 [ label = "c3d4" ]
    2 [ label = "e5f6" ]
    0 -> 1 [ label = "3" ]
    1 -> 2 [ label = "5" ]
    0 -> 1 [ label = "3" ]
}
"#;
    let f = parse_dot(src).unwrap();
    assert!(f.is_directed());
    assert_eq!(f.node_count(), 3);
    assert_eq!(f.edge_count(), 3);
    let ids: Vec<&str> = f.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
    assert_eq!(f.nodes().next().unwrap().label.as_deref(), Some("a1b2"));
    assert_eq!(
        f.edges().collect::<Vec<_>>(),
        vec![("0", "1"), ("1", "2"), ("0", "1")]
    );
}

#[test]
fn chains_defaults_and_graph_attrs() {
    let src = r#"digraph topo {
        rankdir = LR; node [shape=box, color="red"]; edge [weight=2]
        a -> b -> c [color=blue];
        "d" + "e";
        c:p1:n -> a
    }"#;
    let f = parse_dot(src).unwrap();
    assert_eq!(
        f.nodes().map(|n| n.id.as_str()).collect::<Vec<_>>(),
        vec!["a", "b", "c", "de"]
    );
    assert_eq!(
        f.edges().collect::<Vec<_>>(),
        vec![("a", "b"), ("b", "c"), ("c", "a")]
    );
}

#[test]
fn undirected_graph() {
    let f = parse_dot("graph { x -- y; y -- z }").unwrap();
    assert!(!f.is_directed());
    assert_eq!(f.edge_count(), 2);
}

#[test]
fn empty_graph() {
    let f = parse_dot("digraph {\n}\n").unwrap();
    assert_eq!(f.node_count(), 0);
    assert_eq!(f.edge_count(), 0);
}

#[test]
fn malformed_inputs_are_rejected() {
    assert!(parse_dot("").is_err());
    assert!(parse_dot("digraph { a -> }").is_err());
    assert!(parse_dot("digraph { a -> b").is_err());
    assert!(parse_dot("digraph { a -- b }").is_err());
    assert!(parse_dot("graph { a -> b }").is_err());
    assert!(parse_dot("digraph { subgraph s { a } }").is_err());
    assert!(parse_dot("digraph { a [label] }").is_err());
    assert!(parse_dot("digraph { a } trailing").is_err());
}

#[test]
fn error_offset_points_at_token() {
    let err = parse_dot("digraph { a -> ; }").unwrap_err();
    assert_eq!(err.offset, 15);
    assert!(err.to_string().contains("byte 15"));
}

#[test]
fn escaped_backslash_in_label_round_trips() {
    let src = "digraph {\n    0 [ label = \"dir\\\\\" ]\n    1 [ label = \"b\" ]\n    0 -> 1 [ label = \"2\" ]\n}\n";
    let f = parse_dot(src).unwrap();
    assert_eq!(f.node_count(), 2);
    assert_eq!(f.edge_count(), 1);
    assert_eq!(f.nodes().next().unwrap().label.as_deref(), Some("dir\\"));
}

#[test]
fn strict_graphs_merge_repeated_edges() {
    let f = parse_dot("strict digraph { a -> b; a -> b -> c; b -> a }").unwrap();
    assert_eq!(
        f.edges().collect::<Vec<_>>(),
        vec![("a", "b"), ("b", "c"), ("b", "a")]
    );

    let g = parse_dot("strict graph { x -- y; y -- x; x -- x; x -- x }").unwrap();
    assert_eq!(g.edges().collect::<Vec<_>>(), vec![("x", "y"), ("x", "x")]);

    let multi = parse_dot("digraph { a -> b; a -> b }").unwrap();
    assert_eq!(multi.edge_count(), 2);
}
