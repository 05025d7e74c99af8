//! Config loading, validation, and utility operations.

use super::model::{CONFIG_FILE_NAME, SiteConfig};
use crate::error::{Result, SiteError};
use crate::frontmatter::{self, CONTENT_VARIABLE, LAYOUT_KEY, REDIRECT_FROM_KEY};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};

impl SiteConfig {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| SiteError::io("failed to read config file", path, e))?;

        Self::from_yaml(&content)
    }

    /// Load `site.yaml` from the site root, or use defaults if it is absent.
    pub fn load_from_root<P: AsRef<Path>>(root: P) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to `null`, not to the defaults.
        let config: SiteConfig = if yaml.trim().is_empty() {
            SiteConfig::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| SiteError::Config(format!("failed to parse site.yaml: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - directory names must be non-empty
    /// - `output_dir` must be a subdirectory of the root that neither equals,
    ///   contains, nor sits inside a source directory
    /// - extensions must be non-empty and have no leading dots
    /// - `exclude` entries must be valid globs
    /// - `variables` keys must be identifiers and not reserved names
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("layouts_dir", &self.layouts_dir),
            ("content_dir", &self.content_dir),
            ("output_dir", &self.output_dir),
            ("static_dir", &self.static_dir),
        ] {
            if value.trim().is_empty() {
                return Err(SiteError::Config(format!("{} must not be empty", field)));
            }
        }

        // Cleaning removes output_dir wholesale; it must not reach any source.
        let output = normalized(&self.output_dir)
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| {
                SiteError::Config(format!(
                    "output_dir '{}' must be a relative path below the site root",
                    self.output_dir
                ))
            })?;

        for (field, value) in [
            ("layouts_dir", &self.layouts_dir),
            ("content_dir", &self.content_dir),
            ("static_dir", &self.static_dir),
        ] {
            let Some(source) = normalized(value) else {
                continue;
            };
            if output == source {
                return Err(SiteError::Config(format!(
                    "output_dir '{}' must not be the same as {}",
                    self.output_dir, field
                )));
            }
            if output.starts_with(&source) || source.starts_with(&output) {
                return Err(SiteError::Config(format!(
                    "output_dir '{}' must not overlap {} '{}'",
                    self.output_dir, field, value
                )));
            }
        }

        for ext in self
            .markup_extensions
            .iter()
            .chain(std::iter::once(&self.output_extension))
        {
            if ext.is_empty() {
                return Err(SiteError::Config(
                    "extensions must be non-empty".to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(SiteError::Config(format!(
                    "extensions must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        for name in self.variables.keys() {
            if !frontmatter::is_identifier(name) {
                return Err(SiteError::InvalidVariableName { name: name.clone() });
            }
            if [CONTENT_VARIABLE, LAYOUT_KEY, REDIRECT_FROM_KEY].contains(&name.as_str()) {
                return Err(SiteError::ReservedVariable { name: name.clone() });
            }
        }

        self.exclude_globset()?;
        Ok(())
    }

    /// Compile the `exclude` patterns.
    pub fn exclude_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                SiteError::Config(format!("invalid glob pattern in exclude: '{}' - {}", pattern, e))
            })?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| SiteError::Config(format!("failed to compile exclude globs: {}", e)))
    }

    /// Whether a document with extension `ext` needs markup conversion.
    pub fn is_markup_extension(&self, ext: &str) -> bool {
        self.markup_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

/// `path` relative to the site root with `.` components removed, or `None`
/// if it is absolute or climbs out of the root. The root itself is empty.
fn normalized(path: &str) -> Option<PathBuf> {
    let mut result = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => result.push(part),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(result)
}
