//! Property tests for `@import` scanning.

use proptest::prelude::*;

use stylewatch::domain::extract_imports;

fn target() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,7}(/[a-z][a-z0-9_-]{0,7}){0,2}").unwrap()
}

fn quote() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\""), Just("'")]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: scanning never panics on arbitrary text.
    #[test]
    fn property_extract_never_panics(s in "(?s).{0,512}") {
        let _ = extract_imports(&s, "less");
    }

    /// PROPERTY: every import line is found, in source order, once each.
    #[test]
    fn property_import_lines_are_found_in_order(
        targets in proptest::collection::vec(target(), 0..8),
        quote in quote(),
    ) {
        let source: String = targets
            .iter()
            .map(|t| format!("@import {quote}{t}.less{quote};\n.rule {{ color: red; }}\n"))
            .collect();

        let mut expected: Vec<String> = Vec::new();
        for t in &targets {
            let t = format!("{t}.less");
            if !expected.contains(&t) {
                expected.push(t);
            }
        }

        prop_assert_eq!(extract_imports(&source, "less"), expected);
    }

    /// PROPERTY: imports of other extensions are not dependencies.
    #[test]
    fn property_css_imports_are_ignored(targets in proptest::collection::vec(target(), 1..6)) {
        let source: String = targets
            .iter()
            .map(|t| format!("@import \"{t}.css\";\n"))
            .collect();

        prop_assert!(extract_imports(&source, "less").is_empty());
    }
}
