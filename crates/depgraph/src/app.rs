//! Application context for CLI command execution.
//!
//! An [`App`] is one load-mutate-save transaction over the graph store:
//!
//! 1. [`App::open`] takes the exclusive store lock, then loads the graph
//! 2. [`App::run`] executes one [`Request`] and saves the graph back, even
//!    for read-only requests, so the document is always left normalized
//! 3. Dropping the `App` releases the lock
//!
//! # Example
//!
//! ```no_run
//! use depgraph::app::App;
//! use depgraph::config::Config;
//! use depgraph::engine::Request;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = App::open(&Config::default())?;
//!     app.run(&Request::Dependents { name: "LGCMAREA".to_string() })?;
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::engine::{self, Report, Request};
use crate::error::Result;
use depgraph_store::{Graph, GraphStore, LoadWarning, StoreLock};

/// A loaded graph together with the store it came from.
pub struct App {
    store: GraphStore,
    graph: Graph,
    // Declared last so it is dropped after everything else.
    lock: Option<StoreLock>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("nodes", &self.graph.len())
            .field("locked", &self.lock.is_some())
            .finish()
    }
}

impl App {
    /// Lock and load the file store named by `config`.
    ///
    /// Blocks while another process holds the store lock.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock file cannot be created or locked
    /// - The store exists but cannot be read
    /// - The store content is not a valid graph document
    pub fn open(config: &Config) -> Result<Self> {
        let lock = StoreLock::acquire(config.store_path())?;
        let store = GraphStore::open(config.store_path());
        Self::load(store, Some(lock))
    }

    /// Load from an arbitrary store without taking a lock.
    ///
    /// Intended for tests and embedding, where the caller controls access.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or parsed.
    pub fn from_store(store: GraphStore) -> Result<Self> {
        Self::load(store, None)
    }

    fn load(store: GraphStore, lock: Option<StoreLock>) -> Result<Self> {
        let (graph, warnings) = store.load()?;
        log_load_warnings(&store, &warnings);

        Ok(Self { store, graph, lock })
    }

    /// Execute `request` and persist the resulting graph.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails. The in-memory graph keeps the change
    /// either way.
    pub fn run(&mut self, request: &Request) -> Result<Report> {
        tracing::debug!(?request, mutation = request.is_mutation(), "Executing request");
        let report = engine::execute(request, &mut self.graph);
        self.save()?;
        Ok(report)
    }

    /// The loaded graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Save the graph to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.graph)?;
        Ok(())
    }
}

pub(crate) fn log_load_warnings(store: &GraphStore, warnings: &[LoadWarning]) {
    for warning in warnings {
        tracing::warn!(store = %store.location(), "Repaired graph document: {warning}");
    }
}
