//! Atomic file write implementation

use crate::types::SyncError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `content` to `dest` using the write-then-rename strategy
///
/// 1. Write to a sibling `.part` file
/// 2. Flush and sync to disk
/// 3. Carry over permissions of an existing `dest`
/// 4. Rename over `dest`
///
/// Parent directories are created as needed.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes written
/// * `Err(SyncError::Write)` - any step failed
///
/// # Example
/// ```no_run
/// use relsync::executor::write_file_atomic;
/// use std::path::Path;
///
/// let bytes = write_file_atomic(Path::new("sql/apolloconfigdb.sql"), "SELECT 1;\n")?;
/// # Ok::<(), relsync::SyncError>(())
/// ```
pub fn write_file_atomic(dest: &Path, content: &str) -> Result<u64, SyncError> {
    let write_err = |source| SyncError::Write {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let part_path = part_path_for(dest);
    let part_file = File::create(&part_path).map_err(write_err)?;

    // Once the .part file exists, every failure must remove it
    if let Err(e) = fill_and_commit(part_file, &part_path, dest, content) {
        let _ = fs::remove_file(&part_path);
        return Err(write_err(e));
    }

    Ok(content.len() as u64)
}

fn fill_and_commit(
    mut part_file: File,
    part_path: &Path,
    dest: &Path,
    content: &str,
) -> io::Result<()> {
    part_file.write_all(content.as_bytes())?;
    part_file.sync_all()?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    if let Ok(existing) = fs::metadata(dest) {
        fs::set_permissions(part_path, existing.permissions())?;
    }

    fs::rename(part_path, dest)
}

/// `<dest>.part`, keeping the original extension so outputs never collide
pub(crate) fn part_path_for(dest: &Path) -> PathBuf {
    let mut name: OsString = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
