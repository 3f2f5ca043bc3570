use std::path::PathBuf;

use crate::discovery::PatternSet;
use crate::engine::{run, EngineOptions, WalkConfig};
use crate::entry::FileRecord;
use crate::error::WalkError;
use crate::results::Results;
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing an ignore-aware walk.
///
/// Created via [`ctxwalk::walk()`](crate::walk). Configure with chained
/// builder methods, then call [`run()`](WalkBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = ctxwalk::walk()
///     .root(workspace_root)
///     .exclude_dir("target")
///     .matching("main")
///     .collect_errors(true)
///     .run()?;
/// ```
#[derive(Default)]
pub struct WalkBuilder {
    root:           Option<PathBuf>,
    config:         WalkConfig,
    matcher:        Option<Box<dyn Matcher>>,
    patterns:       Option<PatternSet>,
    collect_errors: bool,
}

impl WalkBuilder {
    // ── Root ──────────────────────────────────────────────────────────────

    /// Directory to walk. Expected to be absolute: returned paths are this
    /// root joined with each entry.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    // ── Ignore rules ──────────────────────────────────────────────────────

    /// Name of the per-directory ignore file. Defaults to `.gitignore`.
    pub fn ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.ignore_file_name = name.into();
        self
    }

    /// Never descend into directories with this exact name. Files that
    /// happen to share the name are still listed.
    ///
    /// Adds to the defaults (`.git`, `node_modules`). Hidden entries are
    /// always skipped regardless.
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_dirs.push(name.into());
        self
    }

    /// Reuse a pattern set from an earlier walk instead of discovering
    /// ignore files again.
    ///
    /// The set is only valid for the root it was discovered under. Stale
    /// sets silently miss ignore files added since.
    pub fn patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = Some(patterns);
        self
    }

    // ── Matcher ───────────────────────────────────────────────────────────

    /// Set a custom matcher applied to every surviving file.
    ///
    /// For the common case of name filtering, prefer `.matching()`.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    /// Shorthand for file-name substring matching, case-insensitive.
    pub fn matching(mut self, pattern: impl Into<String>) -> Self {
        self.matcher = Some(Box::new(SubstringMatcher {
            pattern: pattern.into().to_lowercase(),
        }));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Maximum traversal depth. `1` means the root's own entries only.
    /// Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.config.max_depth = Some(d);
        self
    }

    /// Follow symbolic links into directories. Off by default.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.config.follow_links = yes;
        self
    }

    /// Collect non-fatal errors into [`Results::errors`].
    ///
    /// Disabled by default. Errors are logged either way.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Discover ignore files, walk the tree and return the surviving files.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when no root was configured. A root that does not
    /// exist or cannot be read produces an empty [`Results`] (with the error
    /// in [`Results::errors`] when collecting).
    pub fn run(self) -> Result<Results, WalkError> {
        let root = self.root.ok_or(WalkError::MissingRoot)?;

        let opts = EngineOptions {
            config:         self.config,
            matcher:        self.matcher,
            patterns:       self.patterns,
            collect_errors: self.collect_errors,
        };

        Ok(run(&root, opts))
    }
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

/// Matches files whose name contains `pattern` (case-insensitive).
struct SubstringMatcher {
    pattern: String,
}

impl Matcher for SubstringMatcher {
    fn is_match(&self, file: &FileRecord) -> bool {
        file.name().to_lowercase().contains(&self.pattern)
    }
}
