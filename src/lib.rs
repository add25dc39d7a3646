//! stylewatch - dependency-aware stylesheet watch-and-rebuild engine
//!
//! Discovers stylesheet sources under a set of roots, records which files
//! import which, and when a file changes on disk recompiles that file and
//! every file that transitively imports it, each exactly once.
//!
//! ## Layers
//!
//! - `domain` - dependency graph, import scanning, path rules, ports
//! - `application` - the watch session and its event loop
//! - `infrastructure` - local filesystem, `notify` watcher, compilers
//! - `config` - layered TOML configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::watch::{WatchEvent, WatchOptions, WatchSession, WatchUseCase};
pub use config::Config;
pub use domain::{DependencyGraph, FileNode};
pub use error::{StylewatchError, StylewatchResult};
