//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the watch engine.
//! The infrastructure layer provides concrete implementations.

pub mod compiler;
pub mod file_system;
pub mod notifier;

pub use compiler::{CompileError, CompileRequest, StylesheetCompiler};
pub use file_system::{EntryKind, FileSystem, FsError, FsResult};
pub use notifier::{ChangeNotifier, NotifierError};
