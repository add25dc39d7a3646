//! Property tests for import resolution and output paths.

use std::path::{Component, Path, PathBuf};

use proptest::prelude::*;

use stylewatch::domain::path::{normalize, output_path, resolve_import};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => proptest::string::string_regex("[A-Za-z0-9_-]{1,8}").unwrap(),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=6).prop_map(|segments| segments.join("/"))
}

fn stem() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,11}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: normalization never panics on arbitrary input.
    #[test]
    fn property_normalize_never_panics(s in "(?s).{0,256}") {
        let _ = normalize(Path::new(&s));
    }

    /// PROPERTY: normalizing twice changes nothing.
    #[test]
    fn property_normalize_is_idempotent(rel in relative_path(), absolute in any::<bool>()) {
        let raw = if absolute { format!("/{rel}") } else { rel };
        let once = normalize(Path::new(&raw));
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: a normalized path has no `.` and no `..` after a named component.
    #[test]
    fn property_normalize_folds_dot_segments(rel in relative_path()) {
        let normalized = normalize(Path::new(&rel));
        let mut seen_normal = false;
        for component in normalized.components() {
            match component {
                Component::Normal(_) => seen_normal = true,
                Component::ParentDir => prop_assert!(!seen_normal, "`..` after a name in {:?}", normalized),
                Component::CurDir => prop_assert_eq!(normalized.as_os_str(), "."),
                _ => {}
            }
        }
    }

    /// PROPERTY: relative imports from an absolute importer stay absolute.
    #[test]
    fn property_resolved_import_is_absolute(dir in relative_path(), target in relative_path()) {
        let importer = PathBuf::from(format!("/{dir}/main.less"));
        let resolved = resolve_import(&importer, &format!("{target}.less"));
        prop_assert!(resolved.is_absolute(), "{:?} is not absolute", resolved);
        prop_assert!(!resolved.components().any(|c| c == Component::ParentDir));
    }

    /// PROPERTY: the output sits next to the source with the extension swapped.
    #[test]
    fn property_output_path_swaps_extension(dir in relative_path(), stem in stem()) {
        let source = normalize(Path::new(&format!("/{dir}/{stem}.less")));
        let target = output_path(&source, "less", "css", None);

        prop_assert_eq!(target.parent(), source.parent());
        prop_assert_eq!(
            target.file_name().map(|n| n.to_string_lossy().into_owned()),
            Some(format!("{stem}.css"))
        );
    }

    /// PROPERTY: with an output directory, every source lands directly inside it.
    #[test]
    fn property_output_dir_flattens(dir in relative_path(), stem in stem()) {
        let source = normalize(Path::new(&format!("/{dir}/{stem}.less")));
        let out = Path::new("/dist");
        let target = output_path(&source, "less", "css", Some(out));

        prop_assert_eq!(target, out.join(format!("{stem}.css")));
    }
}
