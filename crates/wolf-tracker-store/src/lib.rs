//! File format and storage for wolf-tracker projects.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wolf_tracker_core::Project;

/// Text encoding and decoding of projects.
pub mod codec;
/// Error types.
pub mod error;

pub use codec::{
    DecodePolicy, RecordPolicy, STATS_HEADER, TaskRecord, decode, decode_with, encode, encode_stats,
};
pub use error::{FormatError, StoreError};

/// Byte-level source and sink for project files.
///
/// Implementors only move strings; the provided methods add the codec.
pub trait ProjectStore {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    /// Returns [`StoreError::Read`] when the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String, StoreError>;

    /// Replace the file at `path` with `contents`.
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] when the file cannot be written.
    fn write_string(&self, path: &Path, contents: &str) -> Result<(), StoreError>;

    /// Read and decode a project.
    ///
    /// # Errors
    /// Propagates read failures and fatal format problems.
    fn load_project(&self, path: &Path, policy: DecodePolicy) -> Result<Project, StoreError> {
        let text = self.read_to_string(path)?;
        Ok(decode_with(&text, policy)?)
    }

    /// Encode and write a project. The project's changed flag is left alone.
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] when the file cannot be written.
    fn save_project(&self, path: &Path, project: &Project) -> Result<(), StoreError> {
        self.write_string(path, &encode(project))
    }

    /// Write the statistics table of a project.
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] when the file cannot be written.
    fn save_stats(&self, path: &Path, project: &Project) -> Result<(), StoreError> {
        self.write_string(path, &encode_stats(project))
    }
}

/// Store backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    /// Create a filesystem store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProjectStore for FsStore {
    fn read_to_string(&self, path: &Path) -> Result<String, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "Read project file");
        Ok(text)
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        fs::write(path, contents).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}

/// Path helper used by tests and callers that want an absolute location.
///
/// Relative paths are resolved against `base`.
#[must_use]
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_keeps_absolute_paths() {
        let base = Path::new("/work");
        assert_eq!(
            resolve_path(base, Path::new("/tmp/p.txt")),
            PathBuf::from("/tmp/p.txt")
        );
        assert_eq!(
            resolve_path(base, Path::new("p.txt")),
            PathBuf::from("/work/p.txt")
        );
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.txt");
        let err = FsStore::new()
            .read_to_string(&path)
            .expect_err("file does not exist");
        assert!(matches!(err, StoreError::Read { path: p, .. } if p == path));
    }
}
