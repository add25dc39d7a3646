//! Import directive scanning
//!
//! Finds the stylesheet files referenced by `@import` statements. Only
//! targets with the configured source extension count as dependencies;
//! plain `.css` imports are left to the browser.

use regex::Regex;

/// Extracts import targets from stylesheet source text
#[derive(Debug, Clone)]
pub struct ImportExtractor {
    pattern: Regex,
}

impl ImportExtractor {
    /// Build an extractor for files ending in `.{extension}`
    pub fn new(extension: &str) -> Result<Self, regex::Error> {
        // @import [(options)] [url(] ["|'] target.ext ["|'] [)] [;]
        let pattern = format!(
            r#"@import\s*(?:\([^)]*\)\s*)?(?:url\(\s*)?["']?([^"'\s;()]+\.{ext})(?:["')\s;,]|$)"#,
            ext = regex::escape(extension)
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Return import targets in source order, without duplicates
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut targets: Vec<String> = Vec::new();

        for line in text.lines() {
            if line.trim_start().starts_with("//") {
                continue;
            }
            for caps in self.pattern.captures_iter(line) {
                if let Some(target) = caps.get(1) {
                    let target = target.as_str();
                    if !targets.iter().any(|t| t == target) {
                        targets.push(target.to_string());
                    }
                }
            }
        }

        targets
    }
}

/// Convenience wrapper around [`ImportExtractor`]
pub fn extract_imports(text: &str, extension: &str) -> Vec<String> {
    ImportExtractor::new(extension)
        .map(|extractor| extractor.extract(text))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn less(text: &str) -> Vec<String> {
        extract_imports(text, "less")
    }

    #[test]
    fn finds_double_and_single_quoted_imports() {
        let text = "@import \"a.less\";\n@import 'b.less';\n";
        assert_eq!(less(text), vec!["a.less", "b.less"]);
    }

    #[test]
    fn finds_unquoted_and_url_imports() {
        let text = "@import base.less;\n@import url(grid.less);\n@import url(\"type.less\");";
        assert_eq!(less(text), vec!["base.less", "grid.less", "type.less"]);
    }

    #[test]
    fn finds_imports_with_options() {
        let text = "@import (reference) \"mixins.less\";\n@import (css, optional) 'x.less';";
        assert_eq!(less(text), vec!["mixins.less", "x.less"]);
    }

    #[test]
    fn keeps_relative_directories() {
        let text = "@import \"../shared/vars.less\";\n@import \"./partials/nav.less\";";
        assert_eq!(less(text), vec!["../shared/vars.less", "./partials/nav.less"]);
    }

    #[test]
    fn ignores_other_extensions() {
        let text = "@import \"reset.css\";\n@import \"theme.less.css\";\n@import url(http://x/y.css);";
        assert!(less(text).is_empty());
    }

    #[test]
    fn ignores_line_comments() {
        let text = "// @import \"old.less\";\n  // @import 'older.less';\n@import \"new.less\";";
        assert_eq!(less(text), vec!["new.less"]);
    }

    #[test]
    fn finds_several_imports_on_one_line() {
        let text = "@import \"a.less\"; @import \"b.less\";";
        assert_eq!(less(text), vec!["a.less", "b.less"]);
    }

    #[test]
    fn drops_duplicate_targets() {
        let text = "@import \"a.less\";\n@import 'a.less';\n@import \"b.less\";";
        assert_eq!(less(text), vec!["a.less", "b.less"]);
    }

    #[test]
    fn no_imports_in_plain_rules() {
        assert!(less(".nav { color: red; }\n").is_empty());
    }

    #[test]
    fn honours_configured_extension() {
        let text = "@import \"a.scss\";\n@import \"b.less\";";
        assert_eq!(extract_imports(text, "scss"), vec!["a.scss"]);
    }
}
