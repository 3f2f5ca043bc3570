use crate::entry::FileRecord;

/// Decides whether a surviving file is reported.
///
/// Runs after the hidden, excluded and ignore-file filters, so it only ever
/// sees files the walk would otherwise return. Use it to narrow a listing
/// (by extension, by name, by size) without touching the ignore rules.
///
/// # Example
///
/// ```rust
/// use ctxwalk::{FileRecord, Matcher};
///
/// struct ExtensionMatcher(String);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, file: &FileRecord) -> bool {
///         file.path
///             .extension()
///             .map(|e| e.eq_ignore_ascii_case(&self.0))
///             .unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this file should be included in results.
    fn is_match(&self, file: &FileRecord) -> bool;
}
