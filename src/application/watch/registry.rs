//! Watch registry
//!
//! Guarantees at most one underlying watch per distinct path. Watches live as
//! long as the registry; there is no unwatch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::ports::{ChangeNotifier, NotifierError};

/// Deduplicating front for a [`ChangeNotifier`]
#[derive(Debug)]
pub struct WatchRegistry<N> {
    notifier: N,
    watched: HashSet<PathBuf>,
}

impl<N: ChangeNotifier> WatchRegistry<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            watched: HashSet::new(),
        }
    }

    /// Watch `path` unless it is already watched.
    ///
    /// Returns `Ok(true)` when a new watch was established. A failed attempt
    /// is not remembered.
    pub fn watch(&mut self, path: &Path) -> Result<bool, NotifierError> {
        if self.watched.contains(path) {
            return Ok(false);
        }
        self.notifier.watch(path)?;
        self.watched.insert(path.to_path_buf());
        tracing::trace!(path = %path.display(), "watch registered");
        Ok(true)
    }

    pub fn is_watched(&self, path: &Path) -> bool {
        self.watched.contains(path)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
