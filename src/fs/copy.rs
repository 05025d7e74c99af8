//! Directory tree helpers for the output directory and static assets.

use crate::error::{Result, SiteError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively copy `source` into `destination`, returning the copied
/// files' paths relative to `destination`.
///
/// Existing files in `destination` are overwritten; other files are left
/// alone. A missing `source` copies nothing.
pub fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !source.is_dir() {
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| SiteError::io("failed to read directory entry", source, e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| SiteError::io("failed to resolve path", entry.path(), e))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| SiteError::io("failed to create directory", &target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| SiteError::io("failed to create directory", parent, e))?;
            }
            fs::copy(entry.path(), &target)
                .map_err(|e| SiteError::io("failed to copy static file", entry.path(), e))?;
            copied.push(relative.to_path_buf());
        }
    }

    Ok(copied)
}

/// Remove a directory tree if it exists.
pub fn remove_dir_if_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        fs::remove_dir_all(path)
            .map_err(|e| SiteError::io("failed to remove directory", path, e))?;
    }
    Ok(())
}
