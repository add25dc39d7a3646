//! Stylesheet compiler implementations
//!
//! - [`PassthroughCompiler`] - built-in default, validates and copies CSS
//! - [`CommandCompiler`] - delegates to an external program such as `lessc`

mod command;
mod passthrough;

pub use command::{parse_failure, CommandCompiler, INCLUDE_PATH_PLACEHOLDER, SOURCE_PLACEHOLDER};
pub use passthrough::PassthroughCompiler;
