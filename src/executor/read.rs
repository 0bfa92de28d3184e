//! Required-file reads

use crate::types::SyncError;
use std::fs;
use std::path::Path;

/// Fail with a labelled error if `path` does not exist
pub fn require_file(path: &Path, label: &str) -> Result<(), SyncError> {
    if !path.exists() {
        return Err(SyncError::MissingFile {
            label: label.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Read a UTF-8 text file
pub fn read_text(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}
