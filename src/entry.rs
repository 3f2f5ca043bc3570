use std::path::{Path, PathBuf};

/// A regular file that survived enumeration.
///
/// `path` is absolute (it is the root joined with the walked entry), and
/// `relative` is the same file expressed against the walk root, for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRecord {
    /// Absolute path to the file.
    pub path: PathBuf,

    /// Path relative to the walk root.
    pub relative: PathBuf,

    /// How deep below the root the file was found. Files directly in the root = 1.
    pub depth: usize,
}

impl FileRecord {
    pub(crate) fn new(root: &Path, path: PathBuf, depth: usize) -> Self {
        let relative = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        Self { path, relative, depth }
    }

    /// The file name, lossily converted.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Root-relative path joined with `/` regardless of platform.
    pub fn relative_display(&self) -> String {
        slash_path(&self.relative)
    }
}

/// Render a relative path with `/` separators, one component at a time.
///
/// Ignore patterns are written with `/`, so both matching and display work
/// on this form rather than on the platform's native separator.
pub(crate) fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
