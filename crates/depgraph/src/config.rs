//! Configuration for a single depgraph invocation.
//!
//! The store location is an explicit value handed to [`App`](crate::app::App)
//! and the render pipeline rather than process-wide state, so tests can point
//! every command at a temporary file.

use std::path::{Path, PathBuf};

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "dependency_graph.json";

/// Environment variable that overrides the default store location.
pub const STORE_ENV_VAR: &str = "DEPGRAPH_STORE";

/// Settings resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    store_path: PathBuf,
}

impl Config {
    /// Create a configuration for the store at `store_path`.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Path of the JSON store.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}
