//! Storage and queries for a small, named, directed dependency graph.
//!
//! The whole graph lives in one JSON document. Each invocation loads the
//! document in full, applies at most one change, and writes it back in full:
//!
//! ```no_run
//! use depgraph_store::GraphStore;
//!
//! # fn main() -> depgraph_store::Result<()> {
//! let store = GraphStore::open("dependency_graph.json");
//! let (mut graph, _warnings) = store.load()?;
//!
//! graph.ensure_node("LGACB01").set_type("cobol");
//! graph.add_dependency("LGACB01", "LGCMAREA");
//!
//! assert_eq!(graph.dependents_of("LGCMAREA"), vec!["LGACB01".to_string()]);
//! store.save(&graph)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod document;
pub mod error;
pub mod graph;
pub mod lock;
pub mod storage;

pub use document::LoadWarning;
pub use error::{Error, Result};
pub use graph::{Graph, Node};
pub use lock::StoreLock;
pub use storage::{
    DocumentBackend, FileBackend, GraphStore, from_document_str, load_graph, save_graph,
    to_document_string,
};

#[cfg(any(test, feature = "test-util"))]
pub use storage::MemoryBackend;
