//! Implementation of the `plinth layouts` command.
//!
//! Prints layouts in resolution order (parents first) with their parent
//! and the variables the resolved template still expects from documents.

use super::open_site;
use crate::cli::LayoutsArgs;
use crate::error::{Result, SiteError};
use crate::frontmatter::CONTENT_VARIABLE;
use crate::layout::{self, ResolvedLayouts};
use crate::site::{Site, load_layouts};
use crate::template;
use serde::Serialize;
use std::collections::BTreeSet;

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEntry {
    pub name: String,
    pub parent: Option<String>,
    /// Placeholders a document must supply, excluding `content` and any the
    /// layout chain provides a default for.
    pub requires: Vec<String>,
}

/// Execute the `plinth layouts` command.
pub fn cmd_layouts(args: LayoutsArgs) -> Result<()> {
    let site = open_site(&args.site)?;
    let entries = layout_entries(&site)?;

    if args.json {
        let output = serde_json::to_string_pretty(&entries)
            .map_err(|e| SiteError::Config(format!("failed to encode JSON: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No layouts in {}", site.layouts_dir().display());
        return Ok(());
    }

    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

/// Collect the report for every layout, in resolution order.
pub fn layout_entries(site: &Site) -> Result<Vec<LayoutEntry>> {
    let raw = load_layouts(&site.layouts_dir())?;
    let order = layout::resolution_order(&raw)?;
    let resolved = layout::compose(&raw)?;

    order
        .into_iter()
        .map(|name| {
            let parent = raw[&name].parent.clone();
            let requires = required_variables(&resolved, &name)?;
            Ok(LayoutEntry {
                name,
                parent,
                requires,
            })
        })
        .collect()
}

fn required_variables(resolved: &ResolvedLayouts, name: &str) -> Result<Vec<String>> {
    let Some(layout) = resolved.get(name) else {
        return Ok(Vec::new());
    };

    let names: BTreeSet<&str> = template::placeholders(&layout.body)?
        .into_iter()
        .filter(|n| *n != CONTENT_VARIABLE && layout.defaults.get(n).is_none())
        .collect();
    Ok(names.into_iter().map(str::to_string).collect())
}

fn format_entry(entry: &LayoutEntry) -> String {
    let mut line = match &entry.parent {
        Some(parent) => format!("{} <- {}", entry.name, parent),
        None => entry.name.clone(),
    };
    if !entry.requires.is_empty() {
        line.push_str(&format!("  (requires: {})", entry.requires.join(", ")));
    }
    line
}
