//! Turning files into transcript blocks for the chat panel.
//!
//! The panel itself (webview, message passing, transcript storage) lives in
//! the host editor. This module only covers what the two slash commands
//! produce: `/tab` dumps every open tab, `/file` lists the workspace through
//! the ignore-aware walker and dumps the one file the user picks.

use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entry::slash_path;
use crate::error::WalkError;

pub const NO_TABS: &str = "None of the tabs are open.";
pub const NO_WORKSPACE: &str = "No workspace is opened.";
pub const NO_FILES: &str = "Files not found in the workspace.";
pub const CANCELED: &str = "Canceled.";

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A context command typed into the chat input or sent by a toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Dump every open tab.
    Tab,
    /// Pick one workspace file and dump it.
    File,
}

impl Command {
    /// Parse chat input such as `/tab` or ` /FILE `.
    ///
    /// Input that does not start with `/` is an ordinary message, not a command.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().strip_prefix('/').and_then(Self::from_name)
    }

    /// Look a command up by bare name (`tab`, `file`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "tab" => Some(Self::Tab),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::File => "file",
        }
    }
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// What the host editor knows at the moment a command runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Workspace<'a> {
    /// First workspace folder, if one is open.
    pub root: Option<&'a Path>,

    /// Files backing the open text tabs, in tab order.
    pub tabs: &'a [PathBuf],
}

/// Execute `command` against `workspace`.
///
/// `pick` stands in for the editor's quick-pick: it receives the candidate
/// relative paths and returns the chosen one, or `None` when dismissed. It
/// is only called for [`Command::File`].
pub fn run_command<F>(command: Command, workspace: Workspace<'_>, pick: F) -> String
where
    F: FnOnce(&[String]) -> Option<String>,
{
    debug!(command = command.name(), "running context command");
    match command {
        Command::Tab => gather_tabs(workspace.root, workspace.tabs),
        Command::File => gather_file(workspace.root, pick),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Wrap file content in a fence labelled with its path.
pub fn fenced(label: &str, content: &str) -> String {
    format!("```{label}\n{content}\n```")
}

/// Path shown to the user: relative to `root` when inside it, otherwise the
/// path as given.
pub fn display_path(root: Option<&Path>, path: &Path) -> String {
    match root.and_then(|root| path.strip_prefix(root).ok()) {
        Some(relative) => slash_path(relative),
        None => path.display().to_string(),
    }
}

/// Render every tab as a fenced block.
///
/// Tabs that cannot be read are logged and left out.
pub fn gather_tabs(root: Option<&Path>, tabs: &[PathBuf]) -> String {
    if tabs.is_empty() {
        return NO_TABS.to_string();
    }

    let mut out = String::new();
    for tab in tabs {
        match read_lossy(tab) {
            Ok(content) => {
                out.push_str(&fenced(&display_path(root, tab), &content));
                out.push_str("\n\n");
            }
            Err(e) => warn!(tab = %tab.display(), "failed to read tab content: {e}"),
        }
    }
    out.trim().to_string()
}

/// List the workspace, let the user pick a file, and render it.
pub fn gather_file<F>(root: Option<&Path>, pick: F) -> String
where
    F: FnOnce(&[String]) -> Option<String>,
{
    let Some(root) = root else {
        return NO_WORKSPACE.to_string();
    };

    let results = match crate::walk().root(root).run() {
        Ok(results) => results,
        Err(err) => {
            warn!("workspace listing failed: {err}");
            return NO_FILES.to_string();
        }
    };

    let candidates = results.relative_paths();
    if candidates.is_empty() {
        return NO_FILES.to_string();
    }

    let Some(selected) = pick(&candidates) else {
        return CANCELED.to_string();
    };

    match read_fenced(root, &selected) {
        Ok(block) => block,
        Err(err) => {
            warn!("failed to read picked file: {err}");
            format!("Failed to read file content: {}", describe(&err))
        }
    }
}

/// Read `relative` under `root` and render it fenced with its relative label.
pub fn read_fenced(root: &Path, relative: &str) -> Result<String, WalkError> {
    let path = root.join(relative);
    let content = read_lossy(&path).map_err(|source| WalkError::Io { path, source })?;
    Ok(fenced(relative, &content))
}

/// Read a file as text, replacing invalid UTF-8 sequences.
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn describe(err: &WalkError) -> String {
    match err.source() {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/tab"), Some(Command::Tab));
        assert_eq!(Command::parse("  /FILE \n"), Some(Command::File));
        assert_eq!(Command::parse("/File"), Some(Command::File));
        assert_eq!(Command::parse("tab"), None);
        assert_eq!(Command::parse("/tabs"), None);
        assert_eq!(Command::parse("/tab now"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn from_name_matches_button_ids() {
        assert_eq!(Command::from_name("tab"), Some(Command::Tab));
        assert_eq!(Command::from_name("file"), Some(Command::File));
        assert_eq!(Command::from_name("/tab"), None);
    }

    #[test]
    fn fence_layout() {
        assert_eq!(fenced("src/a.rs", "fn a() {}"), "```src/a.rs\nfn a() {}\n```");
    }

    #[test]
    fn display_path_relative_inside_root() {
        let root = Path::new("/work/proj");
        assert_eq!(display_path(Some(root), Path::new("/work/proj/src/a.rs")), "src/a.rs");
        assert_eq!(display_path(Some(root), Path::new("/elsewhere/b.rs")), "/elsewhere/b.rs");
        assert_eq!(display_path(None, Path::new("/work/proj/c.rs")), "/work/proj/c.rs");
    }

    #[test]
    fn no_tabs_message() {
        assert_eq!(gather_tabs(None, &[]), NO_TABS);
    }

    #[test]
    fn no_workspace_message() {
        let picked = gather_file(None, |_| panic!("picker must not run without a workspace"));
        assert_eq!(picked, NO_WORKSPACE);
    }
}
