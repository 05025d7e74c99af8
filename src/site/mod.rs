//! Whole-site build pipeline.
//!
//! A build runs in two phases. The first loads every layout and document
//! and renders the complete site in memory; any error aborts the build
//! before the output directory is touched. The second writes the rendered
//! pages and redirects, then copies static assets.

mod load;

pub use load::{load_documents, load_layouts};

use crate::config::SiteConfig;
use crate::document::{DocumentRenderer, RenderedOutput};
use crate::error::{Result, SiteError};
use crate::fs::{atomic_write_file, copy_dir_all, remove_dir_if_exists};
use crate::layout::{self, ResolvedLayouts};
use crate::markup::CommonMark;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A site rooted at a directory, with its configuration.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
}

/// Everything a build produces, held in memory.
#[derive(Debug, Clone)]
pub struct RenderedSite {
    pub layouts: ResolvedLayouts,
    pub pages: Vec<RenderedOutput>,
}

impl RenderedSite {
    pub fn redirect_count(&self) -> usize {
        self.pages.iter().filter(|p| p.redirect.is_some()).count()
    }
}

/// Counts reported after a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub layouts: usize,
    pub pages: usize,
    pub redirects: usize,
    pub static_files: usize,
    pub elapsed: Duration,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Open the site at `root`, reading `site.yaml` there if present, or the
    /// explicit `config_path` instead.
    pub fn open(root: impl Into<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let root = root.into();
        let config = match config_path {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::load_from_root(&root)?,
        };
        Ok(Self::new(root, config))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn layouts_dir(&self) -> PathBuf {
        self.root.join(&self.config.layouts_dir)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.content_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.config.static_dir)
    }

    /// Load and resolve all layouts.
    pub fn resolve_layouts(&self) -> Result<ResolvedLayouts> {
        let raw = load_layouts(&self.layouts_dir())?;
        let resolved = layout::compose(&raw)?;
        info!("resolved {} layout(s)", resolved.len());
        Ok(resolved)
    }

    /// Render the whole site in memory without writing anything.
    pub fn render(&self) -> Result<RenderedSite> {
        let layouts = self.resolve_layouts()?;
        let documents = load_documents(&self.content_dir(), &self.config)?;

        let markup = CommonMark::new(self.config.footnote_links);
        let renderer = DocumentRenderer::new(&layouts, &self.config, &markup);

        let mut pages = Vec::with_capacity(documents.len());
        let mut claimed: HashSet<PathBuf> = HashSet::new();

        for document in documents {
            let id = document.id.clone();
            let started = Instant::now();
            let page = renderer.render(document)?;
            debug!(
                "rendered {} in {:.4} second(s)",
                id,
                started.elapsed().as_secs_f64()
            );

            let outputs = std::iter::once(&page.path).chain(page.redirect.as_ref().map(|r| &r.path));
            for path in outputs {
                if !claimed.insert(path.clone()) {
                    return Err(SiteError::Config(format!(
                        "output '{}' is produced more than once (last by '{}')",
                        path.display(),
                        id
                    )));
                }
            }

            pages.push(page);
        }

        Ok(RenderedSite { layouts, pages })
    }

    /// Write rendered pages and redirects, then copy static assets.
    ///
    /// Returns the number of static files copied. A static file with the
    /// same path as a rendered page or redirect replaces it.
    pub fn write(&self, rendered: &RenderedSite) -> Result<usize> {
        let output_dir = self.output_dir();

        if self.config.clean_output {
            remove_dir_if_exists(&output_dir)?;
        }

        let mut written: HashSet<&Path> = HashSet::new();
        for page in &rendered.pages {
            atomic_write_file(output_dir.join(&page.path), &page.text)?;
            written.insert(&page.path);
            if let Some(redirect) = &page.redirect {
                atomic_write_file(output_dir.join(&redirect.path), &redirect.page())?;
                written.insert(&redirect.path);
            }
        }

        let copied = copy_dir_all(self.static_dir(), &output_dir)?;
        for path in copied.iter().filter(|p| written.contains(p.as_path())) {
            warn!(
                "static file '{}' replaces a rendered page of the same name",
                path.display()
            );
        }
        Ok(copied.len())
    }

    /// Render and write the site.
    pub fn build(&self) -> Result<BuildSummary> {
        let started = Instant::now();

        let rendered = self.render()?;
        let static_files = self.write(&rendered)?;

        let summary = BuildSummary {
            layouts: rendered.layouts.len(),
            pages: rendered.pages.len(),
            redirects: rendered.redirect_count(),
            static_files,
            elapsed: started.elapsed(),
        };
        info!(
            "done generating {} page(s) after {:.4} second(s)",
            summary.pages,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }
}
