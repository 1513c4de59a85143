//! Property tests for graph invariants.
//!
//! Arbitrary sequences of node and edge insertions must keep every
//! `depends_on` sorted, duplicate-free and closed over the node set, and the
//! dependents query must agree with the edges that were added.

use depgraph_store::{Graph, from_document_str, to_document_string};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Ensure(String),
    Edge(String, String),
    SetType(String, String),
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "E", "lgacb01", "LGCMAREA"])
        .prop_map(str::to_string)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        name().prop_map(Op::Ensure),
        (name(), name()).prop_map(|(s, t)| Op::Edge(s, t)),
        (name(), "[a-z]{0,8}").prop_map(|(n, t)| Op::SetType(n, t)),
    ]
}

fn apply(ops: &[Op]) -> Graph {
    let mut graph = Graph::new();
    for op in ops {
        match op {
            Op::Ensure(n) => {
                graph.ensure_node(n);
            }
            Op::Edge(s, t) => {
                graph.add_dependency(s, t);
            }
            Op::SetType(n, t) => graph.ensure_node(n).set_type(t.clone()),
        }
    }
    graph
}

proptest! {
    #[test]
    fn depends_on_stays_sorted_unique_and_closed(ops in prop::collection::vec(op(), 0..40)) {
        let graph = apply(&ops);

        for (_, node) in graph.nodes() {
            let deps: Vec<&str> = node.depends_on().collect();
            prop_assert!(deps.windows(2).all(|w| w[0] < w[1]));
            for dep in deps {
                prop_assert!(graph.contains(dep));
            }
        }
    }

    #[test]
    fn add_dependency_twice_is_idempotent(ops in prop::collection::vec(op(), 0..20), s in name(), t in name()) {
        let mut graph = apply(&ops);
        graph.add_dependency(&s, &t);
        let once = graph.clone();

        prop_assert!(!graph.add_dependency(&s, &t));
        prop_assert_eq!(graph, once);
    }

    #[test]
    fn source_is_dependent_of_target(ops in prop::collection::vec(op(), 0..20), s in name(), t in name()) {
        let mut graph = apply(&ops);
        graph.add_dependency(&s, &t);

        let dependents = graph.dependents_of(&t);
        prop_assert!(dependents.contains(&s));
        prop_assert!(dependents.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn document_round_trip(ops in prop::collection::vec(op(), 0..40)) {
        let graph = apply(&ops);
        let contents = to_document_string(&graph).unwrap();
        let (loaded, warnings) = from_document_str(&contents, "<test>").unwrap();

        prop_assert_eq!(loaded, graph);
        prop_assert!(warnings.is_empty());
    }

    #[test]
    fn ensure_node_on_fresh_name_is_empty(ops in prop::collection::vec(op(), 0..20)) {
        let mut graph = apply(&ops);
        let fresh = "never-generated";

        for _ in 0..2 {
            let node = graph.ensure_node(fresh);
            prop_assert_eq!(node.node_type(), None);
            prop_assert_eq!(node.description(), None);
            prop_assert_eq!(node.depends_on().len(), 0);
        }
    }
}
