//! Property tests for stylewatch.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "builds each file once".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/path_handling.rs"]
mod path_handling;

#[path = "properties/imports.rs"]
mod imports;

#[path = "properties/propagation.rs"]
mod propagation;
