//! Error types for depgraph CLI operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for depgraph CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Loading or saving the graph store failed.
    #[error(transparent)]
    Store(#[from] depgraph_store::Error),

    /// IO error outside the store itself (render output, palette files).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A read-only consumer was pointed at a store that does not exist.
    #[error("Dependency graph not found: {}", .0.display())]
    StoreNotFound(PathBuf),

    /// A render palette file could not be used.
    #[error("Invalid palette {}: {message}", path.display())]
    Palette {
        /// The palette file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
}

/// A specialized Result type for depgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
