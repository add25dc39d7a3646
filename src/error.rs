//! Error types for stylewatch
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stylewatch operations
pub type StylewatchResult<T> = Result<T, StylewatchError>;

/// Main error type for stylewatch operations
///
/// Only startup can fail with one of these. Once the watch loop is running,
/// every per-file problem is reported as a [`crate::WatchEvent`] instead.
#[derive(Error, Debug)]
pub enum StylewatchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The import scanner could not be built for the configured extension
    #[error("invalid import pattern: {0}")]
    ImportPattern(#[from] regex::Error),

    /// The change notifier could not be created
    #[error("file watcher error: {0}")]
    Notifier(String),

    /// The build worker pool could not be started
    #[error("could not start build workers: {0}")]
    BuildWorkers(#[from] rayon::ThreadPoolBuildError),

    /// None of the requested roots exists on disk
    #[error("no valid paths to watch: {}", display_paths(.roots))]
    NoRoots { roots: Vec<PathBuf> },

    /// Roots exist but contain no stylesheets
    #[error("no .{extension} files found under {}", display_paths(.roots))]
    NothingToWatch {
        roots: Vec<PathBuf>,
        extension: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<notify::Error> for StylewatchError {
    fn from(err: notify::Error) -> Self {
        StylewatchError::Notifier(err.to_string())
    }
}
