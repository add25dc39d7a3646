//! Watch session state
//!
//! A [`WatchSession`] owns everything the watch loop mutates: the dependency
//! graph and the watch registry. It is driven from a single thread, which makes
//! it the only writer of the graph.
//!
//! The operations live in sibling modules:
//! - `discovery` - walking roots and registering stylesheets
//! - `propagate` - turning change notifications into rebuilds
//! - `build` - compiling one file and writing its output
//!
//! Compiling happens in a [`Builder`], which the session shares with the build
//! queue so that a slow compiler never holds up the loop.

use std::path::Path;
use std::sync::Arc;

use crate::domain::path::display_relative;
use crate::domain::ports::{ChangeNotifier, FileSystem, StylesheetCompiler};
use crate::domain::{DependencyGraph, ImportExtractor};
use crate::error::{StylewatchError, StylewatchResult};

use super::build::Builder;
use super::event::{WatchEvent, WatchOptions};
use super::registry::WatchRegistry;

/// Dependency graph, watches and collaborators for one watch run
pub struct WatchSession<F, N> {
    pub(super) options: WatchOptions,
    pub(super) fs: F,
    pub(super) builder: Builder<F>,
    pub(super) graph: DependencyGraph,
    pub(super) registry: WatchRegistry<N>,
    pub(super) imports: ImportExtractor,
}

impl<F: FileSystem + Clone, N: ChangeNotifier> WatchSession<F, N> {
    pub fn new(
        options: WatchOptions,
        fs: F,
        compiler: Arc<dyn StylesheetCompiler>,
        notifier: N,
    ) -> StylewatchResult<Self> {
        let imports = ImportExtractor::new(&options.source_extension)?;
        let builder = Builder::new(fs.clone(), compiler, options.clone());
        Ok(Self {
            options,
            fs,
            builder,
            graph: DependencyGraph::new(),
            registry: WatchRegistry::new(notifier),
            imports,
        })
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn registry(&self) -> &WatchRegistry<N> {
        &self.registry
    }

    /// Compiler front end shared with build workers
    pub fn builder(&self) -> &Builder<F> {
        &self.builder
    }

    /// Discover every root, optionally build everything, and announce the
    /// watch.
    ///
    /// Fails when no root exists or nothing was found to watch; per-path
    /// problems are reported through `on_event` and do not fail startup.
    pub fn start(&mut self, on_event: &impl Fn(WatchEvent)) -> StylewatchResult<()> {
        let roots = self.options.roots.clone();
        let mut any_root = false;

        for root in &roots {
            if self.fs.exists(root) {
                any_root = true;
            }
            self.discover(root, on_event);
        }

        if !any_root {
            return Err(StylewatchError::NoRoots { roots });
        }
        if self.graph.is_empty() {
            return Err(StylewatchError::NothingToWatch {
                roots,
                extension: self.options.source_extension.clone(),
            });
        }

        if self.options.build_on_start {
            self.build_all(on_event);
        }

        on_event(WatchEvent::WatchStarted {
            roots: roots.iter().map(|r| self.relative(r)).collect(),
            files: self.graph.len(),
        });
        Ok(())
    }

    /// Path as shown in diagnostics
    pub(super) fn relative(&self, path: &Path) -> String {
        display_relative(path, &self.options.cwd)
    }
}
