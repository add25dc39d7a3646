//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StylewatchError, StylewatchResult};

use super::types::{ColorMode, Config};

/// Project config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "stylewatch.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key `{}` in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean `{suggestion}`?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StylewatchResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StylewatchError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config file to use, load it and apply env overrides.
///
/// An explicit file must exist. Otherwise `stylewatch.toml` in `cwd` is
/// preferred over the user config; when neither exists defaults are used.
pub fn load_layered(
    cwd: &Path,
    explicit: Option<&Path>,
) -> StylewatchResult<(Config, Vec<ConfigWarning>)> {
    let file = match explicit {
        Some(path) if !path.is_file() => {
            return Err(StylewatchError::InvalidConfig {
                file: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }
        Some(path) => Some(path.to_path_buf()),
        None => [
            Some(cwd.join(PROJECT_CONFIG_FILE)),
            user_config_path(),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.is_file()),
    };

    let (config, warnings) = match file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

/// User config location (`<config dir>/stylewatch/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stylewatch").join("config.toml"))
}

/// Apply environment variable overrides (STYLEWATCH_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // STYLEWATCH_COMPRESS
    if let Some(value) = get_env("STYLEWATCH_COMPRESS") {
        match parse_bool(&value) {
            Some(compress) => config.build.compress = compress,
            None => tracing::warn!(value = %value, "ignoring invalid STYLEWATCH_COMPRESS"),
        }
    }

    // STYLEWATCH_OUTPUT_DIR (empty clears)
    if let Some(dir) = get_env("STYLEWATCH_OUTPUT_DIR") {
        let dir = dir.trim();
        config.build.output_dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
    }

    // STYLEWATCH_COMPILER (whitespace-separated)
    if let Some(command) = get_env("STYLEWATCH_COMPILER") {
        config.build.compiler = command.split_whitespace().map(str::to_string).collect();
    }

    // STYLEWATCH_COLOR
    if let Some(value) = get_env("STYLEWATCH_COLOR") {
        match ColorMode::parse(&value) {
            Some(mode) => config.output.color = mode,
            None => tracing::warn!(
                value = %value,
                "ignoring invalid STYLEWATCH_COLOR (expected auto, always or never)"
            ),
        }
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "source_extension",
        "output_extension",
        "compress",
        "output_dir",
        "build_on_start",
        "compiler",
        "compress_args",
        "output",
        "color",
        "verbose",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
