//! Atomic filesystem writes.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename the temporary file over the target
//!
//! On POSIX `rename()` replaces the target atomically when both paths are on
//! the same filesystem. Elsewhere an existing target is removed first, so the
//! replacement is not atomic but still never exposes partial content.
//!
//! On crash a temporary file (named `.{filename}.tmp`) may remain next to
//! the target.

use crate::error::{Result, SiteError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| SiteError::io("failed to create parent directory", parent, e))?;
    }

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;
    atomic_replace(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SiteError::io("invalid file path", target, "no file name"))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).map_err(|e| SiteError::io("failed to create temporary file", path, e))?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        SiteError::io("failed to write temporary file", path, e)
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        SiteError::io("failed to sync temporary file", path, e)
    })?;

    Ok(())
}

#[cfg(unix)]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SiteError::io("failed to atomically replace", target, e)
    })?;

    // Persist the directory entry as well.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(not(unix))]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        fs::remove_file(target).map_err(|e| {
            let _ = fs::remove_file(source);
            SiteError::io("failed to replace", target, e)
        })?;
    }

    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SiteError::io("failed to replace", target, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("index.html");

        atomic_write(&file_path, b"<html></html>").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "<html></html>");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("index.html");
        fs::write(&file_path, "old page").unwrap();

        atomic_write_file(&file_path, "new page").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new page");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("blog").join("2024").join("post.html");

        atomic_write_file(&file_path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "nested");
    }

    #[test]
    fn test_atomic_write_temp_file_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.html");

        atomic_write(&file_path, b"content").unwrap();

        assert!(!temp_dir.path().join(".page.html.tmp").exists());
    }

    #[test]
    fn test_atomic_write_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.html");

        atomic_write(&file_path, b"").unwrap();

        assert!(fs::read(&file_path).unwrap().is_empty());
    }

    #[test]
    fn test_generate_temp_path() {
        let temp = generate_temp_path(Path::new("/site/build/page.html")).unwrap();

        assert_eq!(temp.parent().unwrap(), Path::new("/site/build"));
        assert_eq!(temp.file_name().unwrap(), ".page.html.tmp");
    }
}
