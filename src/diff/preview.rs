//! Bounded unified-diff previews

use crate::types::SyncError;
use similar::TextDiff;
use std::path::Path;

/// Diff lines kept in a mismatch error
pub const MAX_PREVIEW_LINES: usize = 80;

/// Unified diff of `expected` against `actual`, cut to `max_lines` lines
///
/// Headers read `<path> (expected)` and `<path> (actual)`.
pub fn unified_preview(path: &Path, expected: &str, actual: &str, max_lines: usize) -> String {
    let from = format!("{} (expected)", path.display());
    let to = format!("{} (actual)", path.display());

    let diff = TextDiff::from_lines(expected, actual);
    let full = diff
        .unified_diff()
        .context_radius(3)
        .header(&from, &to)
        .to_string();

    full.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}

/// Fail with a diff preview unless `actual` equals `expected`
pub fn assert_same_content(path: &Path, expected: &str, actual: &str) -> Result<(), SyncError> {
    if actual == expected {
        return Ok(());
    }

    Err(SyncError::ContentMismatch {
        path: path.to_path_buf(),
        preview: unified_preview(path, expected, actual, MAX_PREVIEW_LINES),
    })
}
