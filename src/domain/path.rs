//! Path resolution helpers
//!
//! Pure functions: no filesystem access. Symlink resolution is left to
//! [`FileSystem::canonicalize`](crate::domain::ports::FileSystem::canonicalize)
//! once a path is known to exist.

use std::path::{Component, Path, PathBuf};

/// Resolve an import target against the directory of the importing file.
///
/// Absolute targets are returned as is (normalized). Relative targets are
/// joined onto the importer's parent directory.
pub fn resolve_import(importer: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return normalize(target);
    }

    let base = importer.parent().unwrap_or_else(|| Path::new(""));
    normalize(&base.join(target))
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component.
///
/// `..` at the root of an absolute path is discarded; leading `..` on a
/// relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Absolute form of `path`, joined onto `cwd` when relative.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Render `path` relative to `base` for diagnostics.
///
/// Falls back to the full path when the two share no common prefix
/// (e.g. different drives on Windows).
pub fn display_relative(path: &Path, base: &Path) -> String {
    match relative_to(path, base) {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

fn relative_to(path: &Path, base_path: &Path) -> Option<PathBuf> {
    if path.is_absolute() != base_path.is_absolute() {
        return None;
    }

    let path: Vec<_> = normalize(path)
        .components()
        .map(|c| c.as_os_str().to_owned())
        .collect();
    let base: Vec<_> = normalize(base_path)
        .components()
        .map(|c| c.as_os_str().to_owned())
        .collect();

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();
    // Absolute paths with nothing in common sit on different drives.
    if common == 0 && base_path.is_absolute() {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for part in &path[common..] {
        rel.push(part);
    }
    Some(rel)
}

/// Output location for a compiled stylesheet.
///
/// The output keeps the source's file stem, swaps the source extension for
/// `output_extension`, and lands either next to the source or directly under
/// `output_dir` (subdirectories are not recreated).
pub fn output_path(
    source: &Path,
    source_extension: &str,
    output_extension: &str,
    output_dir: Option<&Path>,
) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{source_extension}");
    let stem = file_name.strip_suffix(&suffix).unwrap_or(&file_name);

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{stem}.{output_extension}"))
}

/// Whether `path` names a source stylesheet (by extension).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map(|e| e == extension).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_import_joins_importer_directory() {
        let resolved = resolve_import(Path::new("/site/styles/main.less"), "partials/nav.less");
        assert_eq!(resolved, PathBuf::from("/site/styles/partials/nav.less"));
    }

    #[test]
    fn resolve_import_folds_parent_components() {
        let resolved = resolve_import(Path::new("/site/styles/pages/home.less"), "../base.less");
        assert_eq!(resolved, PathBuf::from("/site/styles/base.less"));
    }

    #[test]
    fn resolve_import_keeps_absolute_targets() {
        let resolved = resolve_import(Path::new("/site/a.less"), "/shared/./vars.less");
        assert_eq!(resolved, PathBuf::from("/shared/vars.less"));
    }

    #[test]
    fn two_spellings_of_same_file_resolve_identically() {
        let a = resolve_import(Path::new("/site/a.less"), "./lib/../vars.less");
        let b = resolve_import(Path::new("/site/b.less"), "vars.less");
        assert_eq!(a, b);
    }

    #[test]
    fn normalize_discards_parent_above_root() {
        assert_eq!(normalize(Path::new("/../etc/x.less")), PathBuf::from("/etc/x.less"));
    }

    #[test]
    fn normalize_keeps_leading_parent_on_relative_path() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn normalize_empty_becomes_dot() {
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn absolutize_joins_cwd() {
        assert_eq!(
            absolutize(Path::new("styles"), Path::new("/work")),
            PathBuf::from("/work/styles")
        );
        assert_eq!(
            absolutize(Path::new("/abs/x"), Path::new("/work")),
            PathBuf::from("/abs/x")
        );
    }

    #[test]
    fn display_relative_inside_base() {
        assert_eq!(
            display_relative(Path::new("/work/styles/a.less"), Path::new("/work")),
            "styles/a.less"
        );
    }

    #[test]
    fn display_relative_outside_base() {
        assert_eq!(
            display_relative(Path::new("/other/a.less"), Path::new("/work/site")),
            "../../other/a.less"
        );
    }

    #[test]
    fn display_relative_same_path_is_dot() {
        assert_eq!(display_relative(Path::new("/work"), Path::new("/work")), ".");
    }

    #[test]
    fn output_path_next_to_source() {
        let out = output_path(Path::new("/site/styles/main.less"), "less", "css", None);
        assert_eq!(out, PathBuf::from("/site/styles/main.css"));
    }

    #[test]
    fn output_path_flattened_into_output_dir() {
        let out = output_path(
            Path::new("/site/styles/deep/nested/main.less"),
            "less",
            "css",
            Some(Path::new("/site/dist")),
        );
        assert_eq!(out, PathBuf::from("/site/dist/main.css"));
    }

    #[test]
    fn output_path_keeps_inner_dots() {
        let out = output_path(Path::new("/s/theme.dark.less"), "less", "css", None);
        assert_eq!(out, PathBuf::from("/s/theme.dark.css"));
    }

    #[test]
    fn has_extension_matches_exactly() {
        assert!(has_extension(Path::new("a/b.less"), "less"));
        assert!(!has_extension(Path::new("a/b.css"), "less"));
        assert!(!has_extension(Path::new("a/less"), "less"));
    }
}
