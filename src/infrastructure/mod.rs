//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `notifier` - `notify`-based change notifications
//! - `compiler/` - Stylesheet compilers (passthrough, external command)

pub mod compiler;
pub mod fs;
pub mod notifier;

// Re-export for convenience
pub use compiler::{CommandCompiler, PassthroughCompiler};
pub use fs::LocalFs;
pub use notifier::NotifyWatcher;
