//! Translation of raw ignore-file lines into matchable rules.
//!
//! The translation is intentionally small: `.` is literal, `*` matches any
//! run of characters (separators included), `?` matches one character and
//! `/` is a literal separator. Everything else is matched literally, so
//! character classes, `!` negation, a leading `/` root anchor and a trailing
//! `/` directory marker are all treated as plain text.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::warn;

/// A single pattern line, bound to the directory whose ignore file declared it.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw:      String,
    dir:      PathBuf,
    compiled: Result<Regex, String>,
}

impl IgnorePattern {
    /// Compile `raw` for the ignore file located in `dir`.
    ///
    /// Never fails: a pattern the regex engine refuses is logged and kept as
    /// a rule that matches nothing.
    pub fn new(raw: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        let raw = raw.into();
        let dir = dir.into();
        let compiled = compile(&raw).map_err(|e| {
            warn!(dir = %dir.display(), len = raw.len(), "ignore pattern not usable: {e}");
            e.to_string()
        });
        Self { raw, dir, compiled }
    }

    /// The pattern text as written in the ignore file.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Directory of the ignore file this pattern came from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the pattern compiled into a usable rule.
    pub fn is_usable(&self) -> bool {
        self.compiled.is_ok()
    }

    /// Why the regex engine refused this pattern, if it did.
    pub fn rejection(&self) -> Option<&str> {
        self.compiled.as_ref().err().map(String::as_str)
    }

    /// Test a root-relative, `/`-separated path.
    pub fn is_match(&self, relative: &str) -> bool {
        self.compiled.as_ref().is_ok_and(|re| re.is_match(relative))
    }
}

/// Build the anchored expression for one pattern.
///
/// The body may match the whole path, a leading segment, a trailing segment
/// or a fully delimited interior segment.
pub(crate) fn compile(raw: &str) -> Result<Regex, regex::Error> {
    let body = translate(raw);
    Regex::new(&format!("^{body}$|^{body}/|/{body}$|/{body}/"))
}

fn translate(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() * 2);
    let mut buf = [0u8; 4];
    for ch in raw.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '/' => out.push('/'),
            // `.` and every other metacharacter stay literal
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    out
}

/// Split ignore-file text into pattern lines.
///
/// Lines are trimmed; blank lines and lines starting with `#` are dropped.
pub fn parse_ignore_file(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, relative: &str) -> bool {
        IgnorePattern::new(pattern, "/root").is_match(relative)
    }

    #[test]
    fn bare_name_matches_at_any_depth() {
        assert!(matches("build", "build"));
        assert!(matches("build", "build/out.txt"));
        assert!(matches("build", "src/build"));
        assert!(matches("build", "src/build/out.txt"));
        assert!(!matches("build", "notbuild/out.txt"));
        assert!(!matches("build", "src/builds"));
    }

    #[test]
    fn dot_is_literal() {
        assert!(matches("a.txt", "a.txt"));
        assert!(!matches("a.txt", "abtxt"));
    }

    #[test]
    fn wildcards() {
        assert!(matches("*.log", "a.log"));
        assert!(matches("*.log", "src/sub/a.log"));
        assert!(!matches("*.log", "a.log.txt"));
        assert!(matches("file?.rs", "file1.rs"));
        assert!(!matches("file?.rs", "file12.rs"));
    }

    #[test]
    fn paths_with_separators() {
        assert!(matches("docs/gen", "docs/gen/index.html"));
        assert!(matches("docs/gen", "site/docs/gen"));
        assert!(!matches("docs/gen", "docs/general"));
    }

    #[test]
    fn unsupported_syntax_is_literal() {
        // Character classes are not expanded.
        assert!(!matches("[ab].txt", "a.txt"));
        assert!(matches("[ab].txt", "[ab].txt"));
        // Negation is not supported, the `!` is part of the name.
        assert!(!matches("!keep.txt", "keep.txt"));
        // A trailing slash doubles up against the anchors and under-matches.
        assert!(!matches("out/", "out"));
        assert!(!matches("out/", "out/x"));
    }

    #[test]
    fn regex_metacharacters_never_fail_to_compile() {
        for raw in ["(", "a+b", "{x}", "^$", "c++", "\\"] {
            assert!(IgnorePattern::new(raw, "/root").is_usable(), "{raw}");
        }
        assert!(matches("c++", "c++"));
    }

    #[test]
    fn parse_drops_comments_and_blanks() {
        let parsed = parse_ignore_file("# comment\n\n  target  \n\t\n*.log\r\n   # indented comment\n");
        assert_eq!(parsed, vec!["target".to_string(), "*.log".to_string()]);
    }
}
