//! Single-row configuration rewrite

use crate::types::SyncError;
use regex::{Captures, Regex};

/// Key of the portal row that lists member-only environments
pub const MEMBER_ONLY_ENVS_KEY: &str = "configView.memberOnly.envs";

/// Value the quick-start portal must ship with
pub const MEMBER_ONLY_ENVS_VALUE: &str = "dev";

/// A `('key', 'value', ...)` row whose value must be forced to a literal
#[derive(Debug, Clone)]
pub struct ConfigRowRule {
    key: String,
    value: String,
    /// `('<key>', ` prefix and trailing `,` around the value
    rewrite: Regex,
    /// Captures the current non-empty value
    capture: Regex,
}

impl ConfigRowRule {
    /// Build a rule for `key`, forcing its value to `value`
    pub fn new(key: &str, value: &str) -> Result<Self, SyncError> {
        if key.is_empty() || key.contains('\'') || value.contains('\'') {
            return Err(SyncError::Config(format!(
                "Config row key/value must be non-empty and unquoted: {key}={value}"
            )));
        }

        let escaped = regex::escape(key);
        let rewrite = Regex::new(&format!(r"('{escaped}'\s*,\s*)'[^']*'(\s*,)"))
            .map_err(|e| SyncError::Config(e.to_string()))?;
        let capture = Regex::new(&format!(r"'{escaped}'\s*,\s*'([^']+)'\s*,"))
            .map_err(|e| SyncError::Config(e.to_string()))?;

        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
            rewrite,
            capture,
        })
    }

    /// `configView.memberOnly.envs` forced to `dev`
    pub fn member_only_envs() -> Result<Self, SyncError> {
        Self::new(MEMBER_ONLY_ENVS_KEY, MEMBER_ONLY_ENVS_VALUE)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current values of every row carrying this key
    pub fn values<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.capture
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

/// Rewrite the value of the single row matching `rule`
///
/// Everything outside the value literal is left byte-for-byte unchanged.
///
/// # Errors
/// [`SyncError::ConfigKeyNotFound`] unless exactly one row matches.
pub fn enforce_config_value(
    text: &str,
    rule: &ConfigRowRule,
    name: &str,
) -> Result<String, SyncError> {
    let count = rule.rewrite.find_iter(text).count();
    if count != 1 {
        return Err(SyncError::ConfigKeyNotFound {
            key: rule.key.clone(),
            value: rule.value.clone(),
            name: name.to_string(),
            count,
        });
    }

    let rewritten = rule.rewrite.replacen(text, 1, |caps: &Captures| {
        format!("{}'{}'{}", &caps[1], rule.value, &caps[2])
    });
    Ok(rewritten.into_owned())
}
