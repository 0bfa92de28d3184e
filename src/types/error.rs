//! Error types for relsync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for sync operations
///
/// Every failure is fatal to the run: there is no partial success and no
/// retry path. The message of each variant is meant to be printed as-is.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid command-line or layout configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input or output file is absent
    #[error("{label} does not exist: {}", path.display())]
    MissingFile { label: String, path: PathBuf },

    /// Reading a file failed
    #[error("Unable to read file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed
    #[error("Unable to write file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Footer anchor missing or duplicated
    #[error("{name} must contain exactly one footer anchor '{anchor}', found {count}.")]
    AnchorNotFound {
        name: String,
        anchor: &'static str,
        count: usize,
    },

    /// Overlay is blank after stripping surrounding newlines
    #[error("{name} sample overlay is empty.")]
    EmptyOverlay { name: String },

    /// Configuration row could not be rewritten exactly once
    #[error("Failed to enforce {key}='{value}' in {name}: expected exactly one row, found {count}")]
    ConfigKeyNotFound {
        key: String,
        value: String,
        name: String,
        count: usize,
    },

    /// Rendered output failed a post-hoc check
    #[error("Validation error: {0}")]
    ValidationFailed(String),

    /// On-disk output differs from the expected rendering
    #[error("{} does not match expected synced content.\n{preview}", path.display())]
    ContentMismatch { path: PathBuf, preview: String },
}

impl SyncError {
    /// Check if this error came from checking document content
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            SyncError::AnchorNotFound { .. }
                | SyncError::EmptyOverlay { .. }
                | SyncError::ConfigKeyNotFound { .. }
                | SyncError::ValidationFailed(_)
                | SyncError::ContentMismatch { .. }
        )
    }

    /// Check if this error came from the filesystem
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            SyncError::Read { .. }
                | SyncError::Write { .. }
                | SyncError::MissingFile { .. }
        )
    }
}
