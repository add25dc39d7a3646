//! Compiling a single stylesheet

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::path::{display_relative, output_path};
use crate::domain::ports::{
    ChangeNotifier, CompileError, CompileRequest, FileSystem, StylesheetCompiler,
};

use super::event::{WatchEvent, WatchOptions};
use super::propagate::Rebuild;
use super::session::WatchSession;

/// Result of one [`Builder::build_one`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Compiled { target: PathBuf },
    /// Nothing was written; a previous output is left as it was
    CompileFailed(CompileError),
    ReadFailed,
    WriteFailed { target: PathBuf },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Compiled { .. })
    }
}

/// Read, compile and write stylesheets.
///
/// Holds no graph state, so a clone can run a [`Rebuild`] on a build worker
/// while the watch loop keeps handling notifications.
#[derive(Clone)]
pub struct Builder<F> {
    fs: F,
    compiler: Arc<dyn StylesheetCompiler>,
    options: WatchOptions,
}

impl<F: FileSystem> Builder<F> {
    pub fn new(fs: F, compiler: Arc<dyn StylesheetCompiler>, options: WatchOptions) -> Self {
        Self {
            fs,
            compiler,
            options,
        }
    }

    /// Where the compiled output of `source` is written
    pub fn output_for(&self, source: &Path) -> PathBuf {
        output_path(
            source,
            &self.options.source_extension,
            &self.options.output_extension,
            self.options.output_dir.as_deref(),
        )
    }

    /// Compile `path` and write its output.
    ///
    /// Failures are reported through `on_event` and never abort the caller.
    pub fn build_one(&self, path: &Path, on_event: &impl Fn(WatchEvent)) -> BuildOutcome {
        tracing::trace!(path = %path.display(), "compile");

        let source = match self.fs.read(path) {
            Ok(source) => source,
            Err(err) => {
                on_event(WatchEvent::ReadFailed {
                    path: self.relative(path),
                    message: err.to_string(),
                });
                return BuildOutcome::ReadFailed;
            }
        };

        let request = CompileRequest {
            source: path.to_path_buf(),
            include_paths: path.parent().map(Path::to_path_buf).into_iter().collect(),
            compress: self.options.compress,
        };

        let css = match self.compiler.compile(&source, &request) {
            Ok(css) => css,
            Err(err) => {
                on_event(WatchEvent::CompileFailed {
                    source: self.relative(path),
                    file: err.filename.clone(),
                    line: err.line,
                    column: err.column,
                    message: err.message.trim().to_string(),
                    extract: err.excerpt(),
                });
                return BuildOutcome::CompileFailed(err);
            }
        };

        let target = self.output_for(path);
        if let Err(err) = self.fs.write(&target, &css) {
            on_event(WatchEvent::WriteFailed {
                path: self.relative(&target),
                message: err.to_string(),
            });
            return BuildOutcome::WriteFailed { target };
        }

        on_event(WatchEvent::Compiled {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            source: self.relative(path),
            target: self.relative(&target),
        });
        BuildOutcome::Compiled { target }
    }

    /// Build every file of `rebuild` in order, then report the pass.
    pub fn run(&self, rebuild: &Rebuild, on_event: &impl Fn(WatchEvent)) -> Vec<BuildOutcome> {
        let outcomes = rebuild
            .order
            .iter()
            .map(|path| self.build_one(path, on_event))
            .collect();

        on_event(WatchEvent::RebuildComplete {
            trigger: self.relative(&rebuild.trigger),
            rebuilt: rebuild.order.iter().map(|p| self.relative(p)).collect(),
        });
        outcomes
    }

    fn relative(&self, path: &Path) -> String {
        display_relative(path, &self.options.cwd)
    }
}

impl<F: FileSystem + Clone, N: ChangeNotifier> WatchSession<F, N> {
    /// Where the compiled output of `source` is written
    pub fn output_for(&self, source: &Path) -> PathBuf {
        self.builder.output_for(source)
    }

    /// Compile `path` and write its output on the calling thread
    pub fn build_one(&self, path: &Path, on_event: &impl Fn(WatchEvent)) -> BuildOutcome {
        self.builder.build_one(path, on_event)
    }

    /// Compile every known stylesheet once, in path order.
    ///
    /// Each file's current modification time becomes its last-seen time, so
    /// notifications that merely echo the startup state are filtered out.
    pub fn build_all(&mut self, on_event: &impl Fn(WatchEvent)) -> usize {
        let mut compiled = 0;
        for path in self.graph.paths() {
            if let Ok(modified) = self.fs.modified(&path) {
                self.graph.mark_modified(&path, modified);
            }
            if self.builder.build_one(&path, on_event).is_success() {
                compiled += 1;
            }
        }
        compiled
    }
}
