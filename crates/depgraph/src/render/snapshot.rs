//! Read-only petgraph view of the dependency graph.
//!
//! The snapshot copies what rendering needs out of a [`Graph`] and never
//! holds a mutable reference to it, so nothing downstream of it can change
//! the store.

use depgraph_store::Graph;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Label used for nodes with no category.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Node attributes carried into the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// Node name.
    pub name: String,
    /// Category label, as stored.
    pub node_type: Option<String>,
    /// Description, as stored.
    pub description: Option<String>,
}

impl NodeInfo {
    /// Category for grouping and styling; absent or empty is [`UNKNOWN_TYPE`].
    pub fn type_label(&self) -> &str {
        self.node_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TYPE)
    }
}

/// Directed graph with edges pointing from dependent to dependency.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    graph: DiGraph<NodeInfo, ()>,
}

impl GraphSnapshot {
    /// Copy `graph` into a snapshot.
    ///
    /// Nodes are added in name order. An edge whose target is not a node is
    /// skipped.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut snapshot = DiGraph::with_capacity(graph.len(), graph.edge_count());
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(graph.len());

        for (name, node) in graph.nodes() {
            let idx = snapshot.add_node(NodeInfo {
                name: name.to_string(),
                node_type: node.node_type().map(str::to_string),
                description: node.description().map(str::to_string),
            });
            index.insert(name, idx);
        }

        for (source, target) in graph.edges() {
            match (index.get(source), index.get(target)) {
                (Some(&from), Some(&to)) => {
                    snapshot.add_edge(from, to, ());
                }
                _ => tracing::warn!(source, target, "Skipping edge to unknown node"),
            }
        }

        Self { graph: snapshot }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes in name order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &NodeInfo)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// All edges as `(dependent, dependency)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeInfo, &NodeInfo)> + '_ {
        self.graph
            .edge_references()
            .map(move |edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Number of nodes that depend on `idx`.
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Number of nodes `idx` depends on.
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }
}
