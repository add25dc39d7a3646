use std::path::PathBuf;

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// stylewatch - recompile stylesheets and everything that imports them
#[derive(Parser, Debug)]
#[command(name = "stylewatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Watches the current directory when no paths are given.")]
pub struct Cli {
    /// Files or directories to watch
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Compress output by removing whitespace
    #[arg(short = 'x', long)]
    pub compress: bool,

    /// Write all compiled CSS into this directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Verbosity level (-v discovery and watch details, -vv trace logging)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output NDJSON events instead of text
    #[arg(long)]
    pub json: bool,

    /// Compile every discovered stylesheet once before watching
    #[arg(long)]
    pub build_on_start: bool,

    /// External compiler command, e.g. "lessc -"
    #[arg(long, value_name = "CMD")]
    pub compiler: Option<String>,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Read configuration from this file instead of stylewatch.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["stylewatch"]).unwrap();
        assert!(cli.paths.is_empty());
        assert!(!cli.compress);
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.json);
        assert!(cli.color.is_none());
    }

    #[test]
    fn test_cli_parse_paths_and_flags() {
        let cli = Cli::try_parse_from([
            "stylewatch",
            "-x",
            "-o",
            "dist",
            "styles",
            "vendor/theme.less",
        ])
        .unwrap();
        assert_eq!(
            cli.paths,
            vec![PathBuf::from("styles"), PathBuf::from("vendor/theme.less")]
        );
        assert!(cli.compress);
        assert_eq!(cli.output, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_cli_verbose_count() {
        let cli = Cli::try_parse_from(["stylewatch", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_compiler_and_config() {
        let cli = Cli::try_parse_from([
            "stylewatch",
            "--compiler",
            "lessc -",
            "--config",
            "ci.toml",
            "--build-on-start",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.compiler.as_deref(), Some("lessc -"));
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        assert!(cli.build_on_start);
        assert!(cli.json);
    }

    #[test]
    fn test_cli_color_flag() {
        let cli = Cli::try_parse_from(["stylewatch", "--color", "never"]).unwrap();
        assert!(matches!(cli.color, Some(ColorWhen::Never)));
    }

    #[test]
    fn test_cli_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["stylewatch", "--color", "sometimes"]).is_err());
    }
}
