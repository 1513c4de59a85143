//! Command engine: one request in, one report out.
//!
//! Each [`Request`] maps to a short sequence of graph operations. Mutating
//! requests (`AddNode`, `AddEdge`) change the graph in place; the rest only
//! read it. Nothing here touches storage or knows about argument parsing, so
//! a request can be executed against any [`Graph`].
//!
//! A node that cannot be found is a normal outcome ([`Report::NotFound`] or an
//! empty dependents list), never an error.

use depgraph_store::{Graph, Node};
use serde::Serialize;

/// A single operation against the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Create or update a node and add outgoing edges.
    AddNode {
        /// Node to create or update.
        name: String,
        /// New category label, if given.
        node_type: Option<String>,
        /// New description, if given.
        description: Option<String>,
        /// Targets of new outgoing edges.
        depends_on: Vec<String>,
    },

    /// Add one directed edge `source -> target`.
    AddEdge {
        /// The dependent (caller).
        source: String,
        /// The dependency.
        target: String,
    },

    /// Describe one node.
    Show {
        /// Node to describe.
        name: String,
        /// Also report the nodes that depend on it.
        include_dependents: bool,
    },

    /// List every node, optionally only those of one category.
    List {
        /// Exact category to keep. `None` or empty keeps everything.
        node_type: Option<String>,
    },

    /// Names of the nodes that depend on `name`.
    Dependents {
        /// Node whose dependents are wanted.
        name: String,
    },
}

impl Request {
    /// Returns `true` if executing this request can change the graph.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::AddNode { .. } | Self::AddEdge { .. })
    }
}

/// Read-only view of one node, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    /// Node name.
    pub name: String,
    /// Category label.
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Dependencies, sorted.
    pub depends_on: Vec<String>,
}

impl NodeView {
    fn of(name: &str, node: &Node) -> Self {
        Self {
            name: name.to_string(),
            node_type: node.node_type().map(str::to_string),
            description: node.description().map(str::to_string),
            depends_on: node.depends_on().map(str::to_string).collect(),
        }
    }
}

/// One line of a `list` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// Node name.
    pub name: String,
    /// Category label.
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Outcome of executing a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// A node was created or updated; carries its state afterwards.
    Updated(NodeView),

    /// The requested node exists.
    Node {
        /// The node.
        view: NodeView,
        /// Its dependents, when they were asked for.
        dependents: Option<Vec<String>>,
    },

    /// The requested node does not exist.
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Nodes matching a `list` request, sorted by name.
    Listing(Vec<ListEntry>),

    /// Dependents of a node, sorted.
    Dependents {
        /// The node that was queried.
        name: String,
        /// Names of the nodes that depend on it.
        dependents: Vec<String>,
    },
}

/// Execute `request` against `graph`.
pub fn execute(request: &Request, graph: &mut Graph) -> Report {
    match request {
        Request::AddNode {
            name,
            node_type,
            description,
            depends_on,
        } => add_node(graph, name, node_type.as_deref(), description.as_deref(), depends_on),
        Request::AddEdge { source, target } => add_edge(graph, source, target),
        Request::Show {
            name,
            include_dependents,
        } => show(graph, name, *include_dependents),
        Request::List { node_type } => list(graph, node_type.as_deref()),
        Request::Dependents { name } => Report::Dependents {
            name: name.clone(),
            dependents: graph.dependents_of(name),
        },
    }
}

fn add_node(
    graph: &mut Graph,
    name: &str,
    node_type: Option<&str>,
    description: Option<&str>,
    depends_on: &[String],
) -> Report {
    // An empty value leaves the existing field alone.
    let node = graph.ensure_node(name);
    if let Some(node_type) = node_type.filter(|t| !t.is_empty()) {
        node.set_type(node_type);
    }
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        node.set_description(description);
    }

    for target in depends_on {
        graph.add_dependency(name, target);
    }

    tracing::debug!(node = name, dependencies = depends_on.len(), "Node updated");
    updated(graph, name)
}

fn add_edge(graph: &mut Graph, source: &str, target: &str) -> Report {
    graph.add_dependency(source, target);
    updated(graph, source)
}

fn updated(graph: &Graph, name: &str) -> Report {
    match graph.lookup(name) {
        Some(node) => Report::Updated(NodeView::of(name, node)),
        None => Report::NotFound {
            name: name.to_string(),
        },
    }
}

fn show(graph: &Graph, name: &str, include_dependents: bool) -> Report {
    let Some(node) = graph.lookup(name) else {
        return Report::NotFound {
            name: name.to_string(),
        };
    };

    Report::Node {
        view: NodeView::of(name, node),
        dependents: include_dependents.then(|| graph.dependents_of(name)),
    }
}

fn list(graph: &Graph, node_type: Option<&str>) -> Report {
    let filter = node_type.filter(|t| !t.is_empty());

    let entries = graph
        .nodes()
        .filter(|(_, node)| filter.is_none_or(|wanted| node.node_type() == Some(wanted)))
        .map(|(name, node)| ListEntry {
            name: name.to_string(),
            node_type: node.node_type().map(str::to_string),
            description: node.description().map(str::to_string),
        })
        .collect();

    Report::Listing(entries)
}
