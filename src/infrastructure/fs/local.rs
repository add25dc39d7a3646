//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::domain::ports::file_system::{EntryKind, FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temp file in the target directory followed by a
/// rename, so a reader never observes a half-written stylesheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| FsError::at(&parent, e))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(&parent).map_err(|e| FsError::at(&parent, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| FsError::at(path, e))?;
        temp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn kind(&self, path: &Path) -> FsResult<EntryKind> {
        let meta = std::fs::metadata(path).map_err(|e| FsError::at(path, e))?;
        Ok(if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn modified(&self, path: &Path) -> FsResult<SystemTime> {
        std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| FsError::at(path, e))
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| FsError::at(path, e))? {
            let entry = entry.map_err(|e| FsError::at(path, e))?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| FsError::at(path, e))
    }
}
