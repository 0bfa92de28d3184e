//! Overlay splicing at the SQL footer anchor

use crate::types::SyncError;

/// Marker that separates schema/seed statements from the trailing
/// SQL-mode-restoring statements of a mysqldump-style file.
pub const FOOTER_ANCHOR: &str = "/*!40111 SET SQL_NOTES=@OLD_SQL_NOTES */;";

/// Strip surrounding blank lines from an overlay block
///
/// Only `\n` is stripped; leading spaces or comment markers are content.
pub fn normalize_overlay(overlay: &str) -> &str {
    overlay.trim_matches('\n')
}

/// Number of footer anchors in `text`
pub fn anchor_count(text: &str) -> usize {
    text.matches(FOOTER_ANCHOR).count()
}

/// Byte offset of the single footer anchor
pub(crate) fn locate_anchor(text: &str, name: &str) -> Result<usize, SyncError> {
    let count = anchor_count(text);
    let not_found = || SyncError::AnchorNotFound {
        name: name.to_string(),
        anchor: FOOTER_ANCHOR,
        count,
    };

    if count != 1 {
        return Err(not_found());
    }
    text.find(FOOTER_ANCHOR).ok_or_else(not_found)
}

/// Splice `overlay` into `source` immediately before the footer anchor
///
/// The result is `prefix`, a blank line, the normalized overlay, a blank
/// line, then everything from the anchor onward. Blank lines already
/// surrounding the splice point are collapsed so the output does not depend
/// on how the upstream file happens to space its footer.
///
/// # Errors
/// * [`SyncError::AnchorNotFound`] - anchor missing or present more than once
/// * [`SyncError::EmptyOverlay`] - overlay has no content besides newlines
pub fn render(source: &str, overlay: &str, name: &str) -> Result<String, SyncError> {
    let anchor_pos = locate_anchor(source, name)?;

    let block = normalize_overlay(overlay);
    if block.is_empty() {
        return Err(SyncError::EmptyOverlay {
            name: name.to_string(),
        });
    }

    let prefix = source[..anchor_pos].trim_end_matches('\n');
    let suffix = source[anchor_pos..].trim_start_matches('\n');
    Ok(format!("{prefix}\n\n{block}\n\n{suffix}"))
}
