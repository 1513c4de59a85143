//! Error types for depgraph-store operations.

use std::io;
use thiserror::Error;

/// The error type for graph store operations.
///
/// Only storage failures are errors. Looking up a node that does not exist,
/// asking for the dependents of an unknown name, or loading a store that was
/// never written are all ordinary results.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading or writing the document or its lock file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The persisted document does not parse into the expected shape.
    #[error("Corrupt graph document at {location}: {source}")]
    CorruptDocument {
        /// Where the document was read from (a path, or `<memory>`).
        location: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory graph could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// A specialized Result type for graph store operations.
pub type Result<T> = std::result::Result<T, Error>;
