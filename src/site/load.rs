//! Loading layouts and documents from the site directories.

use crate::config::SiteConfig;
use crate::document::Document;
use crate::error::{Result, SiteError};
use crate::layout::RawLayout;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Load every layout file directly inside `dir`, keyed by file stem.
///
/// Subdirectories are skipped. A missing directory yields no layouts.
pub fn load_layouts(dir: &Path) -> Result<BTreeMap<String, RawLayout>> {
    let mut layouts = BTreeMap::new();

    if !dir.is_dir() {
        debug!("no layouts directory at '{}'", dir.display());
        return Ok(layouts);
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| SiteError::io("failed to read layouts directory", dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SiteError::io("failed to read directory entry", dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        if !path.is_file() {
            warn!("layout '{}' is not a file, skipping", path.display());
            continue;
        }

        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("layout '{}' has no usable name, skipping", path.display());
            continue;
        };

        if layouts.contains_key(name) {
            return Err(SiteError::Config(format!(
                "more than one layout file is named '{}' (in '{}')",
                name,
                dir.display()
            )));
        }

        let text = fs::read_to_string(&path)
            .map_err(|e| SiteError::io("failed to read layout", &path, e))?;
        let layout = RawLayout::parse(name, &text)?;
        layouts.insert(name.to_string(), layout);
    }

    Ok(layouts)
}

/// Load every document under `dir`, in path order.
///
/// Documents matching the config's `exclude` globs (relative to `dir`) are
/// skipped.
pub fn load_documents(dir: &Path, config: &SiteConfig) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(SiteError::io(
            "content directory not found",
            dir,
            "not a directory",
        ));
    }

    let excluded = config.exclude_globset()?;
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| SiteError::io("failed to read directory entry", dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(dir)
            .map_err(|e| SiteError::io("failed to resolve path", path, e))?;
        let relative_str = slash_path(relative);

        if excluded.is_match(&relative_str) {
            debug!("excluding '{}'", relative_str);
            continue;
        }

        let id = slash_path(&relative.with_extension(""));
        let extension = relative
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let text = fs::read_to_string(path)
            .map_err(|e| SiteError::io("failed to read document", path, e))?;
        documents.push(Document::parse(id, extension, &text)?);
    }

    Ok(documents)
}

/// Join a relative path's components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
