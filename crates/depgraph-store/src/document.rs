//! On-disk document shape and its conversion to and from [`Graph`].
//!
//! ```json
//! {
//!   "nodes": {
//!     "<name>": {
//!       "depends_on": ["<name>", ...],
//!       "description": "<string>" | null,
//!       "type": "<string>" | null
//!     }
//!   }
//! }
//! ```
//!
//! Loading is tolerant in the same places a hand-edited file tends to drift:
//! missing node fields default, unsorted or duplicated `depends_on` lists are
//! normalized, and dangling targets become placeholder nodes. Each repair is
//! reported as a [`LoadWarning`]. Keys this crate does not know are carried
//! through to the next save untouched.

use crate::graph::{Graph, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Non-fatal problems found while loading a document.
///
/// The graph returned alongside these warnings has already been repaired;
/// the next save writes the normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A node's `depends_on` list was not in lexicographic order.
    ///
    /// **Effect**: the list is re-sorted.
    UnsortedDependencies {
        /// The node whose list was out of order.
        node: String,
    },

    /// A node listed the same dependency more than once.
    ///
    /// **Effect**: the duplicate entry is dropped.
    DuplicateDependency {
        /// The node with the repeated entry.
        node: String,
        /// The repeated dependency name.
        target: String,
    },

    /// A dependency names a node that is not declared in the document.
    ///
    /// **Effect**: an empty placeholder node is created for `to`, exactly as
    /// if the edge had been added through `add_dependency`.
    DanglingDependency {
        /// The node holding the edge.
        from: String,
        /// The undeclared target.
        to: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsortedDependencies { node } => {
                write!(f, "dependencies of '{node}' were not sorted")
            }
            Self::DuplicateDependency { node, target } => {
                write!(f, "'{node}' listed dependency '{target}' more than once")
            }
            Self::DanglingDependency { from, to } => {
                write!(f, "'{from}' depends on undeclared node '{to}'")
            }
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct GraphDocument {
    #[serde(default)]
    nodes: BTreeMap<String, NodeRecord>,

    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    #[serde(default)]
    depends_on: Vec<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(rename = "type", default)]
    node_type: Option<String>,

    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl GraphDocument {
    /// Build the graph, repairing anything that breaks a graph invariant.
    pub(crate) fn into_graph(self) -> (Graph, Vec<LoadWarning>) {
        let mut warnings = Vec::new();
        let mut graph = Graph {
            nodes: BTreeMap::new(),
            extra: self.extra,
        };

        for (name, record) in self.nodes {
            if !record.depends_on.is_sorted() {
                warnings.push(LoadWarning::UnsortedDependencies { node: name.clone() });
            }

            let mut depends_on = BTreeSet::new();
            for target in record.depends_on {
                if depends_on.contains(&target) {
                    warnings.push(LoadWarning::DuplicateDependency {
                        node: name.clone(),
                        target,
                    });
                } else {
                    depends_on.insert(target);
                }
            }

            graph.nodes.insert(
                name,
                Node {
                    node_type: record.node_type,
                    description: record.description,
                    depends_on,
                    extra: record.extra,
                },
            );
        }

        let dangling: Vec<(String, String)> = graph
            .edges()
            .filter(|(_, target)| !graph.contains(target))
            .map(|(source, target)| (source.to_string(), target.to_string()))
            .collect();

        for (from, to) in dangling {
            graph.ensure_node(&to);
            warnings.push(LoadWarning::DanglingDependency { from, to });
        }

        (graph, warnings)
    }

    pub(crate) fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|(name, node)| {
                let record = NodeRecord {
                    depends_on: node.depends_on.iter().cloned().collect(),
                    description: node.description.clone(),
                    node_type: node.node_type.clone(),
                    extra: node.extra.clone(),
                };
                (name.clone(), record)
            })
            .collect();

        Self {
            nodes,
            extra: graph.extra.clone(),
        }
    }
}
