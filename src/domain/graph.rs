//! Dependency graph (the watchlist)
//!
//! Holds one [`FileNode`] per discovered stylesheet, keyed by canonical path.
//! Only reverse edges are stored: each node knows which files import it.
//! Forward edges are re-derived from the file text whenever a file is
//! discovered, so edited import lists never go stale in memory.
//!
//! Nodes are never removed. The graph lives exactly as long as the watch
//! session that owns it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexSet;

/// One discovered stylesheet source file
#[derive(Debug, Clone)]
pub struct FileNode {
    path: PathBuf,
    last_seen: SystemTime,
    importers: IndexSet<PathBuf>,
}

impl FileNode {
    /// Create a node that has never been acted upon
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_seen: SystemTime::UNIX_EPOCH,
            importers: IndexSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the last change that triggered a rebuild
    pub fn last_seen(&self) -> SystemTime {
        self.last_seen
    }

    /// Files that directly import this one, in the order they were found
    pub fn importers(&self) -> impl Iterator<Item = &Path> {
        self.importers.iter().map(PathBuf::as_path)
    }

    pub fn importer_count(&self) -> usize {
        self.importers.len()
    }
}

/// Mapping from canonical path to [`FileNode`]
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: HashMap<PathBuf, FileNode>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    /// Insert a fresh node for `path`.
    ///
    /// Returns `false` and leaves the existing node untouched when the path
    /// is already known (first discovery wins).
    pub fn insert(&mut self, path: &Path) -> bool {
        if self.nodes.contains_key(path) {
            return false;
        }
        self.nodes
            .insert(path.to_path_buf(), FileNode::new(path.to_path_buf()));
        true
    }

    /// Record that `importer` imports `imported`.
    ///
    /// Returns `true` if the edge is new. The imported node must already
    /// exist; edges to unknown paths are ignored and return `false`.
    pub fn add_importer(&mut self, imported: &Path, importer: &Path) -> bool {
        match self.nodes.get_mut(imported) {
            Some(node) => node.importers.insert(importer.to_path_buf()),
            None => false,
        }
    }

    /// Advance the last-seen modification time of `path` if `modified` is
    /// strictly newer.
    ///
    /// This is the staleness filter: it returns `true` only for a genuine
    /// change. Unknown paths return `false`.
    pub fn mark_modified(&mut self, path: &Path, modified: SystemTime) -> bool {
        match self.nodes.get_mut(path) {
            Some(node) if modified > node.last_seen => {
                node.last_seen = modified;
                true
            }
            _ => false,
        }
    }

    /// Importers of `path` in insertion order (empty for unknown paths)
    pub fn importers_of(&self, path: &Path) -> Vec<PathBuf> {
        self.nodes
            .get(path)
            .map(|node| node.importers.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All known paths, sorted for stable output
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.nodes.keys().cloned().collect();
        paths.sort();
        paths
    }
}
