//! Stylesheet compiler port
//!
//! The translation from source stylesheet to CSS is a black box to the watch
//! engine: text in, CSS or a located diagnostic out.

use std::path::PathBuf;

/// Per-file compilation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Source file being compiled (used for diagnostics)
    pub source: PathBuf,
    /// Directories searched for relative imports
    pub include_paths: Vec<PathBuf>,
    /// Remove insignificant whitespace from the output
    pub compress: bool,
}

/// A located compilation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// File the error was found in (may be an imported file)
    pub filename: String,
    /// 1-based line, 0 when unknown
    pub line: usize,
    /// 1-based column, 0 when unknown
    pub column: usize,
    pub message: String,
    /// Source lines around the error
    pub extract: Vec<String>,
}

impl CompileError {
    /// Error without a source position
    pub fn unlocated(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            line: 0,
            column: 0,
            message: message.into(),
            extract: Vec::new(),
        }
    }

    /// Excerpt text with leading blank lines and trailing whitespace removed
    pub fn excerpt(&self) -> String {
        let joined = self.extract.join("\n");
        joined.trim_start_matches('\n').trim_end().to_string()
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}: {}",
            self.filename,
            self.line,
            self.column,
            self.message.trim()
        )
    }
}

impl std::error::Error for CompileError {}

/// External stylesheet compiler
///
/// Compilers are shared with build workers, hence `Send + Sync`.
pub trait StylesheetCompiler: Send + Sync {
    /// Compile `source` to CSS
    fn compile(&self, source: &str, request: &CompileRequest) -> Result<String, CompileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_strips_leading_blank_lines_and_trailing_space() {
        let err = CompileError {
            filename: "a.less".to_string(),
            line: 2,
            column: 4,
            message: "unexpected }".to_string(),
            extract: vec![
                String::new(),
                ".a {".to_string(),
                "  }}  ".to_string(),
            ],
        };
        assert_eq!(err.excerpt(), ".a {\n  }}");
    }

    #[test]
    fn display_includes_position() {
        let err = CompileError {
            filename: "main.less".to_string(),
            line: 3,
            column: 7,
            message: " missing closing `}` \n".to_string(),
            extract: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "main.less at line 3, column 7: missing closing `}`"
        );
    }
}
