//! Content comparison - expected vs. on-disk output

mod preview;

pub use preview::{assert_same_content, unified_preview, MAX_PREVIEW_LINES};
