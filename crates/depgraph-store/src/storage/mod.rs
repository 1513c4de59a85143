//! Persistence of the graph document.
//!
//! [`GraphStore`] owns the load-full / save-full cycle. The bytes themselves
//! go through a [`DocumentBackend`], so the store can be exercised in tests
//! without a filesystem:
//!
//! - [`FileBackend`]: a JSON file on disk, written atomically
//! - [`MemoryBackend`]: a shared in-memory buffer (enable the `test-util`
//!   feature to use it from another crate)
//!
//! # Output format
//!
//! Saves are deterministic: two-space indented JSON, every object's keys in
//! lexicographic order (node names, node fields, and any carried-through
//! keys), `depends_on` sorted, and a trailing newline. Two graphs that
//! compare equal always produce identical bytes.

pub(crate) mod file;
#[cfg(any(test, feature = "test-util"))]
mod memory;

pub use file::FileBackend;
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryBackend;

use crate::document::{GraphDocument, LoadWarning};
use crate::error::{Error, Result};
use crate::graph::Graph;
use std::path::{Path, PathBuf};

/// Raw access to the persisted document.
pub trait DocumentBackend {
    /// Read the whole document. `Ok(None)` means nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the medium exists but cannot be read.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the whole document with `contents`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the medium cannot be written.
    fn write(&self, contents: &str) -> Result<()>;

    /// Human-readable location used in error messages and logs.
    fn location(&self) -> String;
}

/// Loads and saves a [`Graph`] through a [`DocumentBackend`].
pub struct GraphStore {
    backend: Box<dyn DocumentBackend>,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("location", &self.backend.location())
            .finish()
    }
}

impl GraphStore {
    /// Create a store over any backend.
    pub fn new(backend: impl DocumentBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Create a store backed by the JSON file at `path`.
    ///
    /// Nothing is touched on disk until [`load`](Self::load) or
    /// [`save`](Self::save) is called.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }

    /// Where this store reads and writes.
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Load the full graph.
    ///
    /// A store that has never been written loads as an empty graph.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if the document cannot be read
    /// - `Error::CorruptDocument` if it does not parse into the expected shape
    pub fn load(&self) -> Result<(Graph, Vec<LoadWarning>)> {
        match self.backend.read()? {
            Some(contents) => from_document_str(&contents, &self.backend.location()),
            None => {
                tracing::debug!(location = %self.backend.location(), "No store yet, starting empty");
                Ok((Graph::new(), Vec::new()))
            }
        }
    }

    /// Replace the persisted document with `graph`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backend cannot be written. The error is
    /// passed through unchanged.
    pub fn save(&self, graph: &Graph) -> Result<()> {
        let contents = to_document_string(graph)?;
        self.backend.write(&contents)?;
        tracing::debug!(
            location = %self.backend.location(),
            nodes = graph.len(),
            edges = graph.edge_count(),
            "Saved graph"
        );
        Ok(())
    }
}

/// Parse a document, normalizing it into a [`Graph`].
///
/// `location` only labels the error if parsing fails.
///
/// # Errors
///
/// Returns `Error::CorruptDocument` if `contents` is not a JSON object of the
/// expected shape.
pub fn from_document_str(contents: &str, location: &str) -> Result<(Graph, Vec<LoadWarning>)> {
    let document: GraphDocument =
        serde_json::from_str(contents).map_err(|source| Error::CorruptDocument {
            location: location.to_string(),
            source,
        })?;
    Ok(document.into_graph())
}

/// Serialize `graph` in the canonical document format.
///
/// # Errors
///
/// Returns `Error::Serialization` if the graph cannot be encoded.
pub fn to_document_string(graph: &Graph) -> Result<String> {
    // Going through `Value` sorts every object's keys, including the ones
    // carried through from the loaded document.
    let value = serde_json::to_value(GraphDocument::from_graph(graph)).map_err(Error::Serialization)?;
    let mut contents = serde_json::to_string_pretty(&value).map_err(Error::Serialization)?;
    contents.push('\n');
    Ok(contents)
}

/// Load the graph stored at `path`.
///
/// Shorthand for `GraphStore::open(path).load()`.
///
/// # Errors
///
/// See [`GraphStore::load`].
pub fn load_graph(path: &Path) -> Result<(Graph, Vec<LoadWarning>)> {
    GraphStore::open(path).load()
}

/// Save `graph` to `path`, creating parent directories as needed.
///
/// Shorthand for `GraphStore::open(path).save(graph)`.
///
/// # Errors
///
/// See [`GraphStore::save`].
pub fn save_graph(path: &Path, graph: &Graph) -> Result<()> {
    GraphStore::open(path).save(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_empty_backend_is_empty_graph() {
        let store = GraphStore::new(MemoryBackend::new());
        let (graph, warnings) = store.load().unwrap();

        assert!(graph.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_save_format_is_canonical() {
        let mut graph = Graph::new();
        graph.ensure_node("B").set_type("copybook");
        graph.add_dependency("A", "B");

        let contents = to_document_string(&graph).unwrap();
        let expected = r#"{
  "nodes": {
    "A": {
      "depends_on": [
        "B"
      ],
      "description": null,
      "type": null
    },
    "B": {
      "depends_on": [],
      "description": null,
      "type": "copybook"
    }
  }
}
"#;
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let backend = MemoryBackend::new();
        let store = GraphStore::new(backend.clone());

        let mut graph = Graph::new();
        graph.ensure_node("A").set_description("Add customer");
        graph.add_dependency("A", "B");
        graph.add_dependency("A", "A");
        store.save(&graph).unwrap();

        let (loaded, warnings) = GraphStore::new(backend).load().unwrap();
        assert_eq!(loaded, graph);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_corrupt_document() {
        let backend = MemoryBackend::with_contents("not json");
        let err = GraphStore::new(backend).load().unwrap_err();

        assert!(matches!(err, Error::CorruptDocument { .. }));
        assert!(err.to_string().contains("<memory>"));
    }

    #[test]
    fn test_write_failure_surfaces_io_error() {
        let backend = MemoryBackend::new();
        backend.fail_writes(true);

        let err = GraphStore::new(backend).save(&Graph::new()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
