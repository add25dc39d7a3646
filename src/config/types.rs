//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::watch::{DEFAULT_OUTPUT_EXTENSION, DEFAULT_SOURCE_EXTENSION};
use crate::error::StylewatchResult;

use super::loader::{self, ConfigWarning};

/// Build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    #[serde(default)]
    pub compress: bool,

    /// Shared output directory (relative to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub build_on_start: bool,

    /// External compiler command line; empty selects the built-in compiler
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiler: Vec<String>,

    /// Arguments the external compiler gets when compressing (default `-x`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress_args: Option<Vec<String>>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            output_extension: default_output_extension(),
            compress: false,
            output_dir: None,
            build_on_start: false,
            compiler: Vec::new(),
            compress_args: None,
        }
    }
}

fn default_source_extension() -> String {
    DEFAULT_SOURCE_EXTENSION.to_string()
}

fn default_output_extension() -> String {
    DEFAULT_OUTPUT_EXTENSION.to_string()
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub verbose: bool,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load from an explicit file, the project config, the user config, or
    /// defaults (first match wins), then apply environment overrides.
    pub fn load_layered(
        cwd: &Path,
        explicit: Option<&Path>,
    ) -> StylewatchResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(cwd, explicit)
    }
}
