//! Configuration module for stylewatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STYLEWATCH_*)
//! 3. Project config (`stylewatch.toml` or `--config <FILE>`)
//! 4. User config (`<config dir>/stylewatch/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{BuildConfig, ColorMode, Config, OutputConfig};
