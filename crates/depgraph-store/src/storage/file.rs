//! File-backed document storage with atomic writes.
//!
//! Writes go to a temporary sibling file first and are then renamed over the
//! target. On POSIX a rename within one filesystem is atomic, so a crash
//! mid-write leaves the previous document intact. A stray `.tmp` file may be
//! left behind; the next successful save overwrites it.

use super::DocumentBackend;
use crate::error::{Error, Result};
use serde::de::Error as _;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Document stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A document that is not UTF-8 cannot be JSON.
        String::from_utf8(bytes).map(Some).map_err(|e| Error::CorruptDocument {
            location: self.location(),
            source: serde_json::Error::custom(format!(
                "invalid UTF-8 at byte {}",
                e.utf8_error().valid_up_to()
            )),
        })
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = sibling_path(&self.path, "tmp");
        if let Err(e) = write_to_temp_file(&temp_path, contents) {
            // Best-effort cleanup of temp file
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Path next to `path` with `suffix` appended to its extension.
///
/// `graph.json` becomes `graph.json.tmp`; `graph` becomes `graph.tmp`.
pub(crate) fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".");
            new_ext.push(suffix);
            new_ext
        }
        None => OsString::from(suffix),
    };
    sibling.set_extension(new_extension);
    sibling
}

fn write_to_temp_file(temp_path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sibling_path_with_extension() {
        assert_eq!(
            sibling_path(Path::new("dir/graph.json"), "tmp"),
            PathBuf::from("dir/graph.json.tmp")
        );
    }

    #[test]
    fn test_sibling_path_without_extension() {
        assert_eq!(
            sibling_path(Path::new("dir/graph"), "lock"),
            PathBuf::from("dir/graph.lock")
        );
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::new(temp.path().join("absent.json"));

        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("deeper").join("graph.json");
        let backend = FileBackend::new(&path);

        backend.write("{}\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(!sibling_path(&path, "tmp").exists());
    }

    #[test]
    fn test_write_replaces_existing_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("graph.json");
        fs::write(&path, "old contents that are longer").unwrap();

        FileBackend::new(&path).write("new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_read_invalid_utf8_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("graph.json");
        fs::write(&path, b"{\"nodes\": {\xff}}").unwrap();

        match FileBackend::new(&path).read() {
            Err(Error::CorruptDocument { location, source }) => {
                assert_eq!(location, path.display().to_string());
                assert!(source.to_string().contains("byte 11"), "{source}");
            }
            other => panic!("Expected CorruptDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::new(temp.path());

        assert!(backend.read().is_err());
    }
}
