use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::engine::{is_skipped_name, map_ignore_error, WalkConfig};
use crate::entry::slash_path;
use crate::error::WalkError;
use crate::rules::{parse_ignore_file, IgnorePattern};

// ---------------------------------------------------------------------------
// PatternSet
// ---------------------------------------------------------------------------

/// Ignore patterns keyed by the directory whose ignore file declared them.
///
/// A pattern applies to its own directory and everything below it, never to
/// an ancestor. The set is a plain value: discovery builds a fresh one on
/// every call and hands it back, so nothing leaks between walks.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    by_dir: HashMap<PathBuf, Vec<IgnorePattern>>,
}

impl PatternSet {
    /// An empty set. Nothing is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover every ignore file under `root` and compile its patterns.
    ///
    /// Unreadable directories and ignore files are logged and skipped.
    /// Use [`WalkBuilder::collect_errors`](crate::WalkBuilder::collect_errors)
    /// on a full walk to get them back as values.
    pub fn discover(root: &Path, config: &WalkConfig) -> Self {
        let mut errors = Vec::new();
        discover_into(root, config, &mut errors)
    }

    /// Register the patterns of an ignore file located directly in `dir`.
    ///
    /// Replaces whatever `dir` held before.
    pub fn insert<I, S>(&mut self, dir: impl Into<PathBuf>, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dir = dir.into();
        let compiled = patterns
            .into_iter()
            .map(|raw| IgnorePattern::new(raw, dir.clone()))
            .collect();
        self.by_dir.insert(dir, compiled);
    }

    /// Patterns declared directly in `dir`, in file order.
    pub fn get(&self, dir: &Path) -> Option<&[IgnorePattern]> {
        self.by_dir.get(dir).map(Vec::as_slice)
    }

    /// Directories that carry an ignore file.
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.by_dir.keys().map(PathBuf::as_path)
    }

    /// Number of directories that carry an ignore file.
    pub fn len(&self) -> usize {
        self.by_dir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_dir.is_empty()
    }

    /// Total number of patterns across all directories.
    pub fn pattern_count(&self) -> usize {
        self.by_dir.values().map(Vec::len).sum()
    }

    /// Whether `path` is excluded by any ignore file between it and `root`.
    ///
    /// Starts at the directory containing `path` and climbs to `root`
    /// inclusive. Every level with patterns is consulted and the first
    /// matching pattern wins. There is no negation, so a deeper file can
    /// never re-include what a shallower one excluded. Paths outside `root`
    /// are never ignored.
    pub fn is_ignored(&self, path: &Path, root: &Path) -> bool {
        self.matching_pattern(path, root).is_some()
    }

    /// Like [`is_ignored`](Self::is_ignored) but returns the pattern that matched.
    pub fn matching_pattern(&self, path: &Path, root: &Path) -> Option<&IgnorePattern> {
        if self.by_dir.is_empty() {
            return None;
        }
        let relative = slash_path(path.strip_prefix(root).ok()?);
        let parent = path.parent()?;

        for dir in parent.ancestors().take_while(|dir| dir.starts_with(root)) {
            let Some(patterns) = self.by_dir.get(dir) else {
                continue;
            };
            if let Some(hit) = patterns.iter().find(|p| p.is_match(&relative)) {
                trace!(path = %relative, pattern = hit.raw(), dir = %dir.display(), "ignored");
                return Some(hit);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Walk every directory under `root` (hidden and excluded names pruned) and
/// load the ignore file each one contains.
///
/// Failures are logged, pushed onto `errors`, and otherwise ignored: the
/// affected directory just contributes no patterns.
pub(crate) fn discover_into(root: &Path, config: &WalkConfig, errors: &mut Vec<WalkError>) -> PatternSet {
    let mut set = PatternSet::new();

    let excluded = config.excluded_dirs.clone();
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            is_dir && !is_skipped_name(entry.file_name(), is_dir, &excluded)
        });

    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                let err = map_ignore_error(e);
                warn!("ignore-file discovery skipped a directory: {err}");
                errors.push(err);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }

        let dir = entry.path();
        let ignore_path = dir.join(&config.ignore_file_name);
        match fs::read_to_string(&ignore_path) {
            Ok(content) => {
                let patterns = parse_ignore_file(&content);
                debug!(
                    file = %ignore_path.display(),
                    patterns = patterns.len(),
                    "loaded ignore file"
                );
                set.insert(dir, patterns);
                for pattern in set.get(dir).unwrap_or_default() {
                    if let Some(reason) = pattern.rejection() {
                        errors.push(WalkError::InvalidPattern {
                            pattern: pattern.raw().to_string(),
                            reason:  reason.to_string(),
                        });
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            // A directory by the ignore file's name is not an ignore file
            Err(_) if ignore_path.is_dir() => {}
            Err(e) => {
                warn!(file = %ignore_path.display(), "could not read ignore file: {e}");
                errors.push(WalkError::IgnoreFile { path: ignore_path, source: e });
            }
        }
    }

    debug!(
        root = %root.display(),
        ignore_files = set.len(),
        patterns = set.pattern_count(),
        "ignore-file discovery finished"
    );
    set
}
