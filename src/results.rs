use std::path::PathBuf;
use std::time::Duration;

use crate::discovery::PatternSet;
use crate::entry::FileRecord;
use crate::error::WalkError;

/// The output of a completed walk.
///
/// `errors` is opt-in. Failures are always logged, but only kept here when
/// `.collect_errors(true)` was set on the builder.
pub struct Results {
    /// Files that survived the hidden, excluded and ignore-file filters, in
    /// the order they were found. That order is platform dependent.
    pub files: Vec<FileRecord>,

    /// The ignore patterns the walk used. Pass it back through
    /// [`WalkBuilder::patterns`](crate::WalkBuilder::patterns) to skip
    /// re-discovery on an unchanged tree.
    pub patterns: PatternSet,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Non-fatal errors encountered during the walk (unreadable directories,
    /// unreadable ignore files, a missing root).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<WalkError>,
}

impl Results {
    /// Absolute paths of every surviving file.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }

    /// Root-relative, `/`-separated paths, suitable for a picker list.
    pub fn relative_paths(&self) -> Vec<String> {
        self.files.iter().map(FileRecord::relative_display).collect()
    }
}

/// Statistics for a completed walk.
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Regular files reached (before any matcher ran).
    pub files: usize,

    /// Directories descended into, excluding the root.
    pub dirs: usize,

    /// Entries pruned by an ignore pattern. A pruned directory counts once.
    pub ignored: usize,

    /// Directories that carried an ignore file.
    pub ignore_files: usize,

    /// Wall-clock time, discovery included.
    pub duration: Duration,

    /// Convenience field: `(files + dirs) / duration.as_secs_f64()`, 0 on
    /// zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(
        files: usize,
        dirs: usize,
        ignored: usize,
        ignore_files: usize,
        duration: Duration,
    ) -> Self {
        let total = files + dirs;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            ignored,
            ignore_files,
            duration,
            entries_per_sec: eps,
        }
    }
}
