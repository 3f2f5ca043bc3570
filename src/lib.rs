//! # ctxwalk
//!
//! Ignore-file aware project walker for gathering source context into a chat
//! transcript.
//!
//! A walk runs in two passes over a root directory:
//!
//! 1. **Discovery** finds every ignore file (`.gitignore` by default) and
//!    compiles its lines into a [`PatternSet`], keyed by the directory that
//!    declared them. A pattern applies to that directory and everything
//!    below it.
//! 2. **Enumeration** walks the tree depth-first and returns every regular
//!    file that is not hidden, not inside an excluded directory (`.git`,
//!    `node_modules`) and not matched by an applicable pattern.
//!
//! Pattern syntax is a small subset of gitignore: `*`, `?`, literal `.` and
//! `/`. A bare name matches at any depth. There is no negation and no
//! character classes. Such lines are matched literally.
//!
//! Failures never abort a walk. Unreadable directories and ignore files are
//! logged through `tracing` and skipped; a missing root yields an empty
//! result.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let results = ctxwalk::walk()
//!     .root("/path/to/project")
//!     .collect_errors(true)
//!     .run()
//!     .unwrap();
//!
//! for file in &results.files {
//!     println!("{}", file.relative_display());
//! }
//! for err in &results.errors {
//!     eprintln!("skipped: {err}");
//! }
//! ```
//!
//! # Checking a single path
//!
//! ```rust
//! use std::path::Path;
//! use ctxwalk::PatternSet;
//!
//! let mut patterns = PatternSet::new();
//! patterns.insert("/project/src", ["*.log"]);
//!
//! let root = Path::new("/project");
//! assert!(patterns.is_ignored(Path::new("/project/src/sub/a.log"), root));
//! assert!(!patterns.is_ignored(Path::new("/project/a.log"), root));
//! ```

#![forbid(unsafe_code)]

pub mod context;

mod builder;
mod discovery;
mod engine;
mod entry;
mod error;
mod results;
mod rules;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::WalkBuilder;
pub use discovery::PatternSet;
pub use engine::{WalkConfig, DEFAULT_EXCLUDED_DIRS, DEFAULT_IGNORE_FILE};
pub use entry::FileRecord;
pub use error::WalkError;
pub use results::{Results, ScanStats};
pub use rules::{parse_ignore_file, IgnorePattern};
pub use traits::Matcher;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`WalkBuilder`] to configure and run a walk.
///
/// # Example
///
/// ```rust,no_run
/// let results = ctxwalk::walk()
///     .root("/path/to/project")
///     .exclude_dir("target")
///     .run()
///     .unwrap();
///
/// println!("{} files, {} ignored", results.files.len(), results.stats.ignored);
/// ```
pub fn walk() -> WalkBuilder {
    WalkBuilder::default()
}
