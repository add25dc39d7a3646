//! Application Layer
//!
//! Use cases that orchestrate the domain through its ports.
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - discovers stylesheets and keeps their compiled output
//!   current as files change

pub mod watch;

pub use watch::{BuildOutcome, WatchEvent, WatchOptions, WatchSession, WatchUseCase};
