//! In-memory graph model.
//!
//! Edges are not a separate entity: each [`Node`] carries the sorted set of
//! names it depends on. An edge `A -> B` means "A depends on B", so the
//! dependents of `B` are the callers that list it.
//!
//! # Invariants
//!
//! - Every name in any `depends_on` set is itself a node in the graph. The
//!   only way to add an edge is [`Graph::add_dependency`], which creates an
//!   empty placeholder for an undeclared target.
//! - `depends_on` is a set, so parallel edges cannot exist, and it iterates
//!   in lexicographic order.
//! - Self-loops are allowed and cycles are not checked.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// A single node of the dependency graph.
///
/// The node's name is its key in the owning [`Graph`] and is not stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) node_type: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) depends_on: BTreeSet<String>,
    /// Keys found in the persisted node that this crate does not interpret.
    pub(crate) extra: BTreeMap<String, Value>,
}

impl Node {
    /// Category label, if one was ever set.
    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_deref()
    }

    /// Free-form description, if one was ever set.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Names of the nodes this node depends on, in lexicographic order.
    pub fn depends_on(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.depends_on.iter().map(String::as_str)
    }

    /// Returns `true` if this node has an outgoing edge to `target`.
    pub fn depends_on_node(&self, target: &str) -> bool {
        self.depends_on.contains(target)
    }

    /// Overwrite the category label. Any string is accepted, including "".
    pub fn set_type(&mut self, node_type: impl Into<String>) {
        self.node_type = Some(node_type.into());
    }

    /// Overwrite the description. Any string is accepted, including "".
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }
}

/// The whole dependency graph, keyed by node name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub(crate) nodes: BTreeMap<String, Node>,
    /// Top-level document keys other than `nodes`, carried through unchanged.
    pub(crate) extra: BTreeMap<String, Value>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node called `name`, inserting an empty one if absent.
    ///
    /// Existing fields are never touched, so calling this repeatedly is safe.
    pub fn ensure_node(&mut self, name: &str) -> &mut Node {
        if !self.nodes.contains_key(name) {
            tracing::debug!(node = name, "Creating node");
        }
        self.nodes.entry(name.to_string()).or_default()
    }

    /// Look a node up without creating it.
    pub fn lookup(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Returns `true` if a node called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Record that `source` depends on `target`.
    ///
    /// Both endpoints are created as empty placeholders if missing, which is
    /// how forward references to undeclared dependencies resolve. Adding an
    /// edge that already exists changes nothing. `source == target` is
    /// allowed.
    ///
    /// Returns `true` if a new edge was inserted.
    pub fn add_dependency(&mut self, source: &str, target: &str) -> bool {
        self.ensure_node(target);
        let inserted = self
            .ensure_node(source)
            .depends_on
            .insert(target.to_string());

        if inserted {
            tracing::debug!(source, target, "Added dependency");
        }
        inserted
    }

    /// Names of every node that lists `name` in its `depends_on`.
    ///
    /// This is a full scan over all nodes; graphs are small and the query
    /// runs at most once per invocation, so no reverse index is kept. The
    /// result is sorted, and empty when `name` is unknown.
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.depends_on_node(name))
            .map(|(candidate, _)| candidate.clone())
            .collect()
    }

    /// All nodes with their names, in lexicographic order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> + '_ {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// All edges as `(source, target)` pairs, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes().flat_map(|(source, node)| {
            node.depends_on().map(move |target| (source, target))
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.depends_on.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_node_creates_empty_placeholder() {
        let mut graph = Graph::new();
        let node = graph.ensure_node("A");

        assert_eq!(node.node_type(), None);
        assert_eq!(node.description(), None);
        assert_eq!(node.depends_on().len(), 0);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_ensure_node_does_not_overwrite() {
        let mut graph = Graph::new();
        graph.ensure_node("A").set_type("cobol");
        graph.ensure_node("A").set_description("Customer add");

        let node = graph.ensure_node("A");
        assert_eq!(node.node_type(), Some("cobol"));
        assert_eq!(node.description(), Some("Customer add"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_set_type_accepts_empty_string() {
        let mut graph = Graph::new();
        graph.ensure_node("A").set_type("");

        // Empty is stored, and is distinct from absent
        assert_eq!(graph.lookup("A").unwrap().node_type(), Some(""));
    }

    #[test]
    fn test_lookup_does_not_create() {
        let graph = Graph::new();
        assert!(graph.lookup("missing").is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_add_dependency_creates_both_endpoints() {
        let mut graph = Graph::new();
        assert!(graph.add_dependency("A", "B"));

        assert!(graph.contains("A"));
        assert!(graph.contains("B"));
        assert!(graph.lookup("A").unwrap().depends_on_node("B"));
        assert_eq!(graph.lookup("B").unwrap().depends_on().len(), 0);
    }

    #[test]
    fn test_add_dependency_is_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.add_dependency("A", "B"));
        assert!(!graph.add_dependency("A", "B"));

        let deps: Vec<_> = graph.lookup("A").unwrap().depends_on().collect();
        assert_eq!(deps, vec!["B"]);
    }

    #[test]
    fn test_add_dependency_keeps_sorted_order() {
        let mut graph = Graph::new();
        graph.add_dependency("A", "zeta");
        graph.add_dependency("A", "alpha");
        graph.add_dependency("A", "mid");

        let deps: Vec<_> = graph.lookup("A").unwrap().depends_on().collect();
        assert_eq!(deps, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_self_dependency_allowed() {
        let mut graph = Graph::new();
        assert!(graph.add_dependency("A", "A"));

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.dependents_of("A"), vec!["A".to_string()]);
    }

    #[test]
    fn test_add_dependency_preserves_existing_fields() {
        let mut graph = Graph::new();
        graph.ensure_node("B").set_type("copybook");
        graph.add_dependency("A", "B");

        assert_eq!(graph.lookup("B").unwrap().node_type(), Some("copybook"));
    }

    #[test]
    fn test_dependents_of_sorted() {
        let mut graph = Graph::new();
        graph.add_dependency("Z", "Y");
        graph.add_dependency("X", "Y");
        graph.add_dependency("M", "Q");

        assert_eq!(
            graph.dependents_of("Y"),
            vec!["X".to_string(), "Z".to_string()]
        );
    }

    #[test]
    fn test_dependents_of_unknown_is_empty() {
        let mut graph = Graph::new();
        graph.add_dependency("A", "B");

        assert!(graph.dependents_of("nonexistent").is_empty());
        assert!(graph.dependents_of("A").is_empty());
    }

    #[test]
    fn test_edges_and_counts() {
        let mut graph = Graph::new();
        graph.add_dependency("B", "C");
        graph.add_dependency("A", "C");
        graph.add_dependency("A", "B");

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("A", "B"), ("A", "C"), ("B", "C")]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.len(), 3);
    }
}
