//! Sync engine - text operations on SQL documents
//!
//! SQL is treated as opaque text: one known footer anchor and one known
//! key/value row pattern are all the structure this module relies on.

mod enforce;
mod splice;
mod validate;

pub use enforce::{enforce_config_value, ConfigRowRule, MEMBER_ONLY_ENVS_KEY, MEMBER_ONLY_ENVS_VALUE};
pub use splice::{anchor_count, normalize_overlay, render, FOOTER_ANCHOR};
pub use validate::validate;
