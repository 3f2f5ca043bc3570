use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, error, warn};

use crate::discovery::{discover_into, PatternSet};
use crate::entry::FileRecord;
use crate::error::WalkError;
use crate::results::{Results, ScanStats};
use crate::traits::Matcher;

/// Default ignore-file name.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Directory names that are never walked, independent of ignore files:
/// version-control metadata and the dependency cache.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters shared by discovery and enumeration.
///
/// Callers normally set these through the builder methods
/// (`.ignore_file_name()`, `.exclude_dir()`, `.max_depth()`, `.follow_links()`).
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Name of the per-directory ignore file.
    pub ignore_file_name: String,

    /// Directory names pruned unconditionally. Hidden entries (leading `.`)
    /// are always pruned on top of these.
    pub excluded_dirs:    Vec<String>,

    /// Maximum depth below the root. `None` walks the whole tree.
    pub max_depth:        Option<usize>,

    /// Follow symbolic links into directories.
    pub follow_links:     bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
            excluded_dirs:    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            max_depth:        None,
            follow_links:     false,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub config:         WalkConfig,
    pub matcher:        Option<Box<dyn Matcher>>,
    pub patterns:       Option<PatternSet>,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Discover ignore files under `root`, then enumerate the surviving files.
///
/// Sequential and depth-first. Files come back in directory-listing order,
/// which differs between platforms and filesystems. A missing root, or one
/// that is not a directory, yields an empty result.
pub(crate) fn run(root: &Path, opts: EngineOptions) -> Results {
    let start = Instant::now();
    let mut errors = Vec::new();

    if let Some(err) = check_root(root) {
        error!("cannot walk {}: {err}", root.display());
        if opts.collect_errors {
            errors.push(err);
        }
        return Results {
            files:    Vec::new(),
            patterns: opts.patterns.unwrap_or_default(),
            stats:    ScanStats::compute(0, 0, 0, 0, start.elapsed()),
            errors,
        };
    }

    let patterns = match opts.patterns {
        Some(p) => p,
        None    => discover_into(root, &opts.config, &mut errors),
    };
    let ignore_files = patterns.len();

    let patterns = Arc::new(patterns);
    let ignored  = Arc::new(AtomicUsize::new(0));

    let mut files = Vec::new();
    let mut file_count = 0;
    let mut dir_count = 0;

    {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(opts.config.follow_links)
            .max_depth(opts.config.max_depth);

        let filter_patterns = Arc::clone(&patterns);
        let filter_ignored  = Arc::clone(&ignored);
        let excluded        = opts.config.excluded_dirs.clone();
        let filter_root     = root.to_path_buf();

        builder.filter_entry(move |entry: &DirEntry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if is_skipped_name(entry.file_name(), is_dir, &excluded) {
                return false;
            }
            if filter_patterns.is_ignored(entry.path(), &filter_root) {
                filter_ignored.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            true
        });

        for result in builder.build() {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    let err = map_ignore_error(e);
                    warn!("enumeration skipped an entry: {err}");
                    errors.push(err);
                    continue;
                }
            };

            // Skip the root itself
            if entry.depth() == 0 {
                continue;
            }

            let ft = match entry.file_type() {
                Some(ft) => ft,
                None     => continue,
            };

            if ft.is_dir() {
                dir_count += 1;
                continue;
            }

            // Symlinks are not followed into directories but a link to a
            // file still counts as a file.
            let is_file = ft.is_file() || (ft.is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            file_count += 1;

            let record = FileRecord::new(root, entry.path().to_path_buf(), entry.depth());
            if let Some(matcher) = &opts.matcher {
                if !matcher.is_match(&record) {
                    continue;
                }
            }
            files.push(record);
        }
    }

    let ignored  = ignored.load(Ordering::Relaxed);
    let patterns = Arc::try_unwrap(patterns).unwrap_or_else(|shared| (*shared).clone());
    let duration = start.elapsed();

    debug!(
        root = %root.display(),
        files = files.len(),
        ignored,
        errors = errors.len(),
        "enumeration finished in {:?}",
        duration
    );

    if !opts.collect_errors {
        errors.clear();
    }

    Results {
        files,
        patterns,
        stats: ScanStats::compute(file_count, dir_count, ignored, ignore_files, duration),
        errors,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_root(root: &Path) -> Option<WalkError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => None,
        Ok(_) => Some(WalkError::InvalidRoot(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Some(WalkError::NotFound(root.to_path_buf()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Some(WalkError::PermissionDenied(root.to_path_buf()))
        }
        Err(e) => Some(WalkError::Io { path: root.to_path_buf(), source: e }),
    }
}

/// Hidden entries are never walked, nor are directories with an excluded name.
pub(crate) fn is_skipped_name(name: &OsStr, is_dir: bool, excluded: &[String]) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || (is_dir && excluded.iter().any(|ex| ex.as_str() == name.as_ref()))
}

// ---------------------------------------------------------------------------
// Map ignore::Error to WalkError
// ---------------------------------------------------------------------------

pub(crate) fn map_ignore_error(e: ignore::Error) -> WalkError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    WalkError::PermissionDenied(path)
                } else {
                    WalkError::Io { path, source: io_err }
                }
            }
            other => WalkError::Walk(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => WalkError::SymlinkLoop(child),
        ignore::Error::Io(io_err)         => WalkError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => WalkError::Walk(other.to_string()),
    }
}
