//! Watch Use Case
//!
//! Keeps compiled CSS in sync with a tree of stylesheet sources. It
//! orchestrates:
//! - Discovery of stylesheets and their import edges
//! - One file watch per discovered stylesheet (via `notify`)
//! - A staleness filter on modification times
//! - Rebuilding a changed file and everything that imports it
//!
//! ## Architecture
//!
//! - `WatchUseCase` - production wiring and the event loop
//! - `WatchSession` - graph, registry and the discovery/propagation/build
//!   operations, generic over the filesystem and notifier ports
//! - `BuildQueue` - runs rebuilds on worker threads so a slow compile never
//!   blocks the loop
//! - `WatchEvent` - events emitted during watch operation
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(roots, cwd);
//! let use_case = WatchUseCase::new(options, compiler);
//! use_case.start(running, |event| { ... });
//! ```

mod build;
mod discovery;
mod event;
mod propagate;
mod queue;
mod registry;
mod session;
mod use_case;


pub use build::{BuildOutcome, Builder};
pub use event::{WatchEvent, WatchOptions, DEFAULT_OUTPUT_EXTENSION, DEFAULT_SOURCE_EXTENSION};
pub use propagate::{rebuild_closure, Rebuild};
pub use queue::BuildQueue;
pub use registry::WatchRegistry;
pub use session::WatchSession;
pub use use_case::WatchUseCase;
