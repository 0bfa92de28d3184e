//! Post-hoc checks on rendered output

use super::enforce::ConfigRowRule;
use super::splice::{anchor_count, normalize_overlay, FOOTER_ANCHOR};
use crate::types::SyncError;

/// Check a rendered document against its overlay and, optionally, a config row rule
///
/// Verifies that:
/// 1. The footer anchor appears exactly once
/// 2. The normalized overlay appears exactly once
/// 3. The overlay starts before the anchor
/// 4. With `rule`, exactly one row carries the key and its value is the required one
pub fn validate(
    rendered: &str,
    overlay: &str,
    name: &str,
    rule: Option<&ConfigRowRule>,
) -> Result<(), SyncError> {
    let anchors = anchor_count(rendered);
    if anchors != 1 {
        return Err(SyncError::ValidationFailed(format!(
            "{name} must contain exactly one footer anchor '{FOOTER_ANCHOR}', found {anchors}."
        )));
    }

    let block = normalize_overlay(overlay);
    if block.is_empty() {
        return Err(SyncError::ValidationFailed(format!(
            "{name} sample overlay is empty."
        )));
    }

    let blocks = rendered.matches(block).count();
    if blocks != 1 {
        return Err(SyncError::ValidationFailed(format!(
            "{name} sample overlay block must appear exactly once, found {blocks}."
        )));
    }

    match (rendered.find(block), rendered.find(FOOTER_ANCHOR)) {
        (Some(block_pos), Some(anchor_pos)) if block_pos < anchor_pos => {}
        _ => {
            return Err(SyncError::ValidationFailed(format!(
                "{name} sample overlay must be inserted before SQL footer."
            )));
        }
    }

    if let Some(rule) = rule {
        validate_config_row(rendered, name, rule)?;
    }

    Ok(())
}

fn validate_config_row(rendered: &str, name: &str, rule: &ConfigRowRule) -> Result<(), SyncError> {
    let values = rule.values(rendered);
    match values.as_slice() {
        [value] if *value == rule.value() => Ok(()),
        [value] => Err(SyncError::ValidationFailed(format!(
            "{name} {} must be '{}', found '{value}'.",
            rule.key(),
            rule.value()
        ))),
        _ => Err(SyncError::ValidationFailed(format!(
            "{name} must contain exactly one {} entry, found {}.",
            rule.key(),
            values.len()
        ))),
    }
}
