//! Change propagation
//!
//! A genuine change to a file rebuilds the file itself and then, depth first,
//! every file that imports it directly or transitively. Each file is built at
//! most once per change even when the import graph has diamonds or cycles.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::ports::{ChangeNotifier, FileSystem};
use crate::domain::DependencyGraph;

use super::event::WatchEvent;
use super::session::WatchSession;

/// Visit `changed` and everything that imports it, calling `build` for each.
///
/// Preorder over reverse edges: a file is built before its importers, and
/// importers are taken in the order they were recorded. Returns the visit
/// order.
pub fn rebuild_closure(
    graph: &DependencyGraph,
    changed: &Path,
    mut build: impl FnMut(&Path),
) -> Vec<PathBuf> {
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![changed.to_path_buf()];

    while let Some(path) = stack.pop() {
        if !visited.insert(path.clone()) {
            continue;
        }
        build(&path);

        let importers = graph.importers_of(&path);
        stack.extend(importers.into_iter().rev().filter(|p| !visited.contains(p)));
        order.push(path);
    }

    order
}

/// Files to build for one genuine change, in build order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuild {
    /// The changed file, always first in `order`
    pub trigger: PathBuf,
    pub order: Vec<PathBuf>,
}

impl<F: FileSystem + Clone, N: ChangeNotifier> WatchSession<F, N> {
    /// Handle one change notification for `path`, building on this thread.
    ///
    /// Returns the files rebuilt, in build order. Empty when the path is not
    /// tracked, has gone missing, or has not been modified since the last
    /// rebuild it triggered.
    pub fn on_change(&mut self, path: &Path, on_event: &impl Fn(WatchEvent)) -> Vec<PathBuf> {
        let Some(rebuild) = self.plan_rebuild(path, on_event) else {
            return Vec::new();
        };
        self.builder.run(&rebuild, on_event);
        rebuild.order
    }

    /// Apply the staleness filter to a notification and work out what to
    /// rebuild, without compiling anything.
    ///
    /// Updates the file's last-seen time, so a second notification for the
    /// same write plans nothing.
    pub fn plan_rebuild(&mut self, path: &Path, on_event: &impl Fn(WatchEvent)) -> Option<Rebuild> {
        tracing::trace!(path = %path.display(), "modified");

        let Some(path) = self.tracked(path) else {
            tracing::trace!(path = %path.display(), "ignoring untracked path");
            return None;
        };

        let modified = match self.fs.modified(&path) {
            Ok(modified) => modified,
            Err(err) if err.is_not_found() => {
                on_event(WatchEvent::FileMissing {
                    path: self.relative(&path),
                });
                return None;
            }
            Err(err) => {
                on_event(WatchEvent::StatFailed {
                    path: self.relative(&path),
                    message: err.to_string(),
                });
                return None;
            }
        };

        if !self.graph.mark_modified(&path, modified) {
            tracing::trace!(path = %path.display(), "spurious event");
            return None;
        }

        on_event(WatchEvent::FileChanged {
            path: self.relative(&path),
        });

        let order = rebuild_closure(&self.graph, &path, |_| {});
        Some(Rebuild {
            trigger: path,
            order,
        })
    }

    /// Graph key for a notified path.
    ///
    /// Notifiers may report a different spelling of a watched path, so an
    /// unknown path is canonicalized once before giving up.
    fn tracked(&self, path: &Path) -> Option<PathBuf> {
        if self.graph.contains(path) {
            return Some(path.to_path_buf());
        }
        self.fs
            .canonicalize(path)
            .ok()
            .filter(|canonical| self.graph.contains(canonical))
    }
}
