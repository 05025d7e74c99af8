//! SiteConfig struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the config file looked up at the site root.
pub const CONFIG_FILE_NAME: &str = "site.yaml";

/// Configuration for a site build.
///
/// Directory fields are relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // =========================================================================
    // Directories
    // =========================================================================
    /// Directory holding layout templates (default: "layouts").
    pub layouts_dir: String,

    /// Directory holding content documents (default: "site").
    pub content_dir: String,

    /// Directory the rendered site is written to (default: "build").
    pub output_dir: String,

    /// Directory of static files copied verbatim into the output (default: "public").
    pub static_dir: String,

    // =========================================================================
    // Rendering
    // =========================================================================
    /// Document extensions converted from Markdown (no leading dots).
    pub markup_extensions: Vec<String>,

    /// Extension given to rendered documents (default: "html").
    pub output_extension: String,

    /// Glob patterns, relative to `content_dir`, of documents to skip.
    pub exclude: Vec<String>,

    /// Whether `[^id]` footnotes are turned into linked superscripts.
    pub footnote_links: bool,

    /// Whether the output directory is emptied before writing.
    pub clean_output: bool,

    /// Site-wide variables available to every document render.
    /// Document and layout front matter override these.
    pub variables: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            layouts_dir: "layouts".to_string(),
            content_dir: "site".to_string(),
            output_dir: "build".to_string(),
            static_dir: "public".to_string(),
            markup_extensions: vec!["md".to_string()],
            output_extension: "html".to_string(),
            exclude: Vec::new(),
            footnote_links: true,
            clean_output: true,
            variables: BTreeMap::new(),
        }
    }
}
