//! In-memory document backend for tests.

use super::DocumentBackend;
use crate::error::Result;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Document held in a shared buffer.
///
/// Clones share the same buffer, so a test can keep one handle to inspect
/// what a [`GraphStore`](super::GraphStore) wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    /// Create an empty backend, equivalent to a store that was never saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.lock() = Some(contents.into());
        backend
    }

    /// Current document, if any has been written.
    pub fn contents(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Make subsequent writes fail with an IO error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("simulated write failure").into());
        }
        *self.lock() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
