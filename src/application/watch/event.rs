//! Watch event types and options

use std::path::PathBuf;

/// Default source stylesheet extension
pub const DEFAULT_SOURCE_EXTENSION: &str = "less";
/// Default compiled output extension
pub const DEFAULT_OUTPUT_EXTENSION: &str = "css";

/// Watch options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Files or directories to watch (absolute)
    pub roots: Vec<PathBuf>,
    /// Working directory diagnostics are made relative to
    pub cwd: PathBuf,
    /// Extension of source stylesheets, without the dot
    pub source_extension: String,
    /// Extension of compiled output, without the dot
    pub output_extension: String,
    /// Write every output here instead of next to its source
    pub output_dir: Option<PathBuf>,
    /// Remove insignificant whitespace from output
    pub compress: bool,
    /// Compile everything once before waiting for changes
    pub build_on_start: bool,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(roots: Vec<PathBuf>, cwd: PathBuf) -> Self {
        Self {
            roots,
            cwd,
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            output_dir: None,
            compress: false,
            build_on_start: false,
        }
    }

    /// Set the source and output extensions
    pub fn with_extensions(mut self, source: &str, output: &str) -> Self {
        self.source_extension = source.trim_start_matches('.').to_string();
        self.output_extension = output.trim_start_matches('.').to_string();
        self
    }

    /// Set the shared output directory
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Set output compression
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set whether to compile everything at startup
    pub fn with_build_on_start(mut self, build_on_start: bool) -> Self {
        self.build_on_start = build_on_start;
        self
    }
}

/// Watch event types for human and NDJSON output
///
/// Paths are rendered relative to the session's working directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Discovery finished and the loop is waiting for changes
    WatchStarted { roots: Vec<String>, files: usize },
    /// A stylesheet was registered and is now watched
    Discovered { path: String },
    /// An import edge was recorded
    ImportFound { importer: String, imported: String },
    /// An import points at a file that does not exist
    DanglingImport { importer: String, imported: String },
    /// A root or directory could not be read
    DiscoveryError { path: String, message: String },
    /// A watched file changed on disk (after the staleness filter)
    FileChanged { path: String },
    /// A watched file disappeared
    FileMissing { path: String },
    /// A watched file's timestamp could not be read
    StatFailed { path: String, message: String },
    /// A stylesheet compiled and its output was written
    Compiled {
        time: String,
        source: String,
        target: String,
    },
    /// The compiler rejected a stylesheet; nothing was written
    CompileFailed {
        source: String,
        file: String,
        line: usize,
        column: usize,
        message: String,
        extract: String,
    },
    /// A source file could not be read
    ReadFailed { path: String, message: String },
    /// An output file could not be written
    WriteFailed { path: String, message: String },
    /// A propagation pass finished
    RebuildComplete { trigger: String, rebuilt: Vec<String> },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Detail only shown with `--verbose`
    pub fn is_verbose(&self) -> bool {
        matches!(
            self,
            WatchEvent::Discovered { .. }
                | WatchEvent::ImportFound { .. }
                | WatchEvent::RebuildComplete { .. }
        )
    }

    /// Whether this event reports a problem
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            WatchEvent::DanglingImport { .. }
                | WatchEvent::DiscoveryError { .. }
                | WatchEvent::FileMissing { .. }
                | WatchEvent::StatFailed { .. }
                | WatchEvent::CompileFailed { .. }
                | WatchEvent::ReadFailed { .. }
                | WatchEvent::WriteFailed { .. }
        )
    }
}
