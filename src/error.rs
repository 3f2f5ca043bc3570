use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    // Config
    #[error("no root provided")]
    MissingRoot,

    // Root
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("symlink loop: {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Ignore files
    #[error("unreadable ignore file: {}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Anything else the underlying walker reports
    #[error("walk error: {0}")]
    Walk(String),
}

impl WalkError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p)
            | Self::InvalidRoot(p)
            | Self::PermissionDenied(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. }
            | Self::IgnoreFile { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the walk kept going after this error.
    ///
    /// Everything below the root is recoverable: the affected subtree or
    /// pattern contributes nothing and the rest of the tree is still walked.
    /// A missing or non-directory root ends the walk with an empty result,
    /// and an unset root means no walk happened at all.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingRoot | Self::NotFound(_) | Self::InvalidRoot(_))
    }
}
