//! Advisory locking around a whole command.
//!
//! The store is rewritten in full on every invocation, so two processes
//! running at once would silently lose one side's change. A [`StoreLock`]
//! held from before load until after save serializes them. The lock is taken
//! on a sibling `<store>.lock` file rather than the document itself because
//! saves replace the document by rename.
//!
//! Locks are advisory: they only exclude other processes that also lock.

use crate::error::Result;
use crate::storage::file::sibling_path;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// An OS file lock held until dropped.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Block until an exclusive lock for the store at `store_path` is held.
    ///
    /// Creates the lock file, and the store's parent directory, if needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the lock file cannot be created or locked.
    pub fn acquire(store_path: &Path) -> Result<Self> {
        let (file, path) = open_lock_file(store_path)?;
        file.lock()?;
        tracing::debug!(lock = %path.display(), "Acquired exclusive store lock");
        Ok(Self { file, path })
    }

    /// Block until a shared lock for the store at `store_path` is held.
    ///
    /// Shared holders exclude exclusive holders but not each other, which
    /// suits read-only consumers.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the lock file cannot be created or locked.
    pub fn acquire_shared(store_path: &Path) -> Result<Self> {
        let (file, path) = open_lock_file(store_path)?;
        file.lock_shared()?;
        tracing::debug!(lock = %path.display(), "Acquired shared store lock");
        Ok(Self { file, path })
    }

    /// Path of the lock file used for the store at `store_path`.
    pub fn lock_path(store_path: &Path) -> PathBuf {
        sibling_path(store_path, "lock")
    }

    /// Path of the lock file this lock holds.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(lock = %self.path.display(), error = %e, "Failed to release store lock");
        }
    }
}

fn open_lock_file(store_path: &Path) -> Result<(File, PathBuf)> {
    if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let path = StoreLock::lock_path(store_path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)?;
    Ok((file, path))
}
