//! `notify`-backed change notifier
//!
//! One non-recursive watch per stylesheet. Every reported event path is
//! forwarded to the watch session's channel; pure access events (open, read,
//! close without write) are dropped since they can never advance an mtime.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{ChangeNotifier, NotifierError};
use crate::error::StylewatchResult;

/// File watcher using the platform's recommended backend
pub struct NotifyWatcher {
    watcher: RecommendedWatcher,
}

impl NotifyWatcher {
    /// Create a watcher that sends changed paths to `tx`
    pub fn new(tx: Sender<PathBuf>) -> StylewatchResult<Self> {
        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if !forwards(&event.kind) {
                        return;
                    }
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            },
            Config::default(),
        )?;

        Ok(Self { watcher })
    }
}

impl ChangeNotifier for NotifyWatcher {
    fn watch(&mut self, path: &Path) -> Result<(), NotifierError> {
        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| NotifierError {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

/// Whether an event kind may indicate new content
fn forwards(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}
