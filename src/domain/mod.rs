//! Domain layer
//!
//! The dependency graph and the stateless helpers around it, plus the ports
//! through which the watch engine reaches the outside world.

pub mod graph;
pub mod imports;
pub mod path;
pub mod ports;

pub use graph::{DependencyGraph, FileNode};
pub use imports::{extract_imports, ImportExtractor};
