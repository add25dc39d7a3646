//! Change notifier port
//!
//! A notifier establishes one watch per path and delivers the path of every
//! reported change to whoever owns the receiving end (the watch session's
//! channel). It makes no promise about coalescing or ordering.

use std::path::Path;

use thiserror::Error;

/// Failure to establish a watch
#[derive(Debug, Error)]
#[error("could not watch {path}: {message}")]
pub struct NotifierError {
    pub path: String,
    pub message: String,
}

/// Source of filesystem change notifications
pub trait ChangeNotifier {
    /// Start watching `path`. Called at most once per path by the registry.
    fn watch(&mut self, path: &Path) -> Result<(), NotifierError>;
}
