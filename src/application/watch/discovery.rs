//! Discovery: walk roots, register stylesheets, record import edges

use std::path::{Path, PathBuf};

use crate::domain::path::{has_extension, resolve_import};
use crate::domain::ports::{ChangeNotifier, EntryKind, FileSystem};

use super::event::WatchEvent;
use super::session::WatchSession;

impl<F: FileSystem + Clone, N: ChangeNotifier> WatchSession<F, N> {
    /// Walk `root` and register every stylesheet below it.
    ///
    /// Directory entries are visited in name order. Problems with one entry
    /// are reported and the walk continues with its siblings.
    ///
    /// Returns the number of nodes added to the graph.
    pub fn discover(&mut self, root: &Path, on_event: &impl Fn(WatchEvent)) -> usize {
        let before = self.graph.len();
        let mut stack = vec![root.to_path_buf()];

        while let Some(path) = stack.pop() {
            tracing::trace!(path = %path.display(), "add");

            let kind = match self.fs.kind(&path) {
                Ok(kind) => kind,
                Err(err) => {
                    let message = if err.is_not_found() {
                        "does not exist".to_string()
                    } else {
                        err.to_string()
                    };
                    on_event(WatchEvent::DiscoveryError {
                        path: self.relative(&path),
                        message,
                    });
                    continue;
                }
            };

            match kind {
                EntryKind::Directory => match self.fs.read_dir(&path) {
                    // Reversed so the first entry is popped first.
                    Ok(entries) => stack.extend(entries.into_iter().rev()),
                    Err(err) => on_event(WatchEvent::DiscoveryError {
                        path: self.relative(&path),
                        message: format!("could not list directory: {err}"),
                    }),
                },
                EntryKind::File if has_extension(&path, &self.options.source_extension) => {
                    match self.fs.canonicalize(&path) {
                        Ok(canonical) => {
                            self.found(&canonical, on_event);
                        }
                        Err(err) => on_event(WatchEvent::DiscoveryError {
                            path: self.relative(&path),
                            message: err.to_string(),
                        }),
                    }
                }
                _ => {}
            }
        }

        self.graph.len() - before
    }

    /// Register a stylesheet and, transitively, everything it imports.
    ///
    /// `path` must be canonical. Returns `false` when the file was already
    /// known; the existing node is left untouched.
    pub fn found(&mut self, path: &Path, on_event: &impl Fn(WatchEvent)) -> bool {
        if !self.graph.insert(path) {
            return false;
        }
        self.register(path, on_event);

        let mut pending: Vec<PathBuf> = vec![path.to_path_buf()];
        while let Some(importer) = pending.pop() {
            let text = match self.fs.read(&importer) {
                Ok(text) => text,
                Err(err) => {
                    on_event(WatchEvent::DiscoveryError {
                        path: self.relative(&importer),
                        message: format!("could not scan imports: {err}"),
                    });
                    continue;
                }
            };

            for target in self.imports.extract(&text) {
                let resolved = resolve_import(&importer, &target);
                if !self.fs.exists(&resolved) {
                    on_event(WatchEvent::DanglingImport {
                        importer: self.relative(&importer),
                        imported: self.relative(&resolved),
                    });
                    continue;
                }

                let imported = match self.fs.canonicalize(&resolved) {
                    Ok(canonical) => canonical,
                    Err(err) => {
                        on_event(WatchEvent::DiscoveryError {
                            path: self.relative(&resolved),
                            message: err.to_string(),
                        });
                        continue;
                    }
                };

                if self.graph.insert(&imported) {
                    self.register(&imported, on_event);
                    pending.push(imported.clone());
                }
                // A repeated import, or another spelling of one, adds no edge.
                if self.graph.add_importer(&imported, &importer) {
                    on_event(WatchEvent::ImportFound {
                        importer: self.relative(&importer),
                        imported: self.relative(&imported),
                    });
                }
            }
        }

        true
    }

    fn register(&mut self, path: &Path, on_event: &impl Fn(WatchEvent)) {
        match self.registry.watch(path) {
            Ok(true) => {
                tracing::debug!(path = %path.display(), "watching");
                on_event(WatchEvent::Discovered {
                    path: self.relative(path),
                });
            }
            Ok(false) => {}
            Err(err) => on_event(WatchEvent::DiscoveryError {
                path: self.relative(path),
                message: err.to_string(),
            }),
        }
    }
}
