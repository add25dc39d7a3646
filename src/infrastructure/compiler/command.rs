//! External compiler command
//!
//! Runs a stylesheet compiler such as `lessc` as a child process: the source
//! text goes in on stdin, CSS comes back on stdout, and a non-zero exit status
//! turns stderr into a [`CompileError`].

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ports::{CompileError, CompileRequest, StylesheetCompiler};

/// Placeholder replaced by the source file's directory
pub const INCLUDE_PATH_PLACEHOLDER: &str = "{include_path}";
/// Placeholder replaced by the source file path
pub const SOURCE_PLACEHOLDER: &str = "{source}";

static POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)line\s+(\d+),?\s+column\s+(\d+)|:(\d+):(\d+)").expect("valid position regex")
});

static ERROR_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin\s+(\S+)\s+on line").expect("valid filename regex"));

/// Compiler backed by an external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
    compress_args: Vec<String>,
}

impl CommandCompiler {
    /// Build from an argv-style command line; `None` when it is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            compress_args: vec!["-x".to_string()],
        })
    }

    /// Arguments inserted before the others when compression is requested
    pub fn with_compress_args(mut self, compress_args: Vec<String>) -> Self {
        self.compress_args = compress_args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Final argument list for one compilation
    pub fn arguments(&self, request: &CompileRequest) -> Vec<String> {
        let include_path = request
            .include_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(if cfg!(windows) { ";" } else { ":" });
        let source = request.source.display().to_string();

        let compress: &[String] = if request.compress {
            self.compress_args.as_slice()
        } else {
            &[]
        };

        compress
            .iter()
            .chain(self.args.iter())
            .map(|arg| {
                arg.replace(INCLUDE_PATH_PLACEHOLDER, &include_path)
                    .replace(SOURCE_PLACEHOLDER, &source)
            })
            .collect()
    }
}

impl StylesheetCompiler for CommandCompiler {
    fn compile(&self, source: &str, request: &CompileRequest) -> Result<String, CompileError> {
        let source_name = request.source.display().to_string();
        let args = self.arguments(request);
        tracing::trace!(program = %self.program, ?args, "spawning compiler");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                CompileError::unlocated(
                    source_name.clone(),
                    format!("could not run `{}`: {}", self.program, e),
                )
            })?;

        // Feed stdin from a separate thread so a chatty compiler cannot
        // deadlock on a full stdout pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = source.to_string();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|e| {
            CompileError::unlocated(
                source_name.clone(),
                format!("`{}` failed: {}", self.program, e),
            )
        })?;

        if let Some(handle) = writer {
            if let Ok(Err(e)) = handle.join() {
                tracing::debug!(error = %e, "compiler closed stdin early");
            }
        }

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(parse_failure(&stderr, &source_name, output.status.code()))
    }
}

/// Turn compiler stderr into a located error
pub fn parse_failure(stderr: &str, source_name: &str, code: Option<i32>) -> CompileError {
    let mut lines = stderr.lines().filter(|l| !l.trim().is_empty());

    let message = match lines.next() {
        Some(first) => first.trim().to_string(),
        None => match code {
            Some(code) => format!("compiler exited with status {code}"),
            None => "compiler terminated by signal".to_string(),
        },
    };
    let extract = lines.map(|l| l.to_string()).collect();

    let (line, column) = POSITION
        .captures(stderr)
        .map(|caps| {
            let num = |a: usize, b: usize| {
                caps.get(a)
                    .or_else(|| caps.get(b))
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0)
            };
            (num(1, 3), num(2, 4))
        })
        .unwrap_or((0, 0));

    let filename = ERROR_FILE
        .captures(stderr)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| source_name.to_string());

    CompileError {
        filename,
        line,
        column,
        message,
        extract,
    }
}
