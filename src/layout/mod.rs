//! Layout inheritance.
//!
//! A layout is a template that wraps inner content at its `{{ content }}`
//! marker and may itself declare a parent layout through the `layout`
//! front-matter key. [`compose`] flattens every layout into a single
//! template by merging each one into its already-resolved parent, in the
//! order given by [`crate::graph::topo_sort`].
//!
//! Raw and resolved layouts are separate types: composition reads a map of
//! [`RawLayout`]s and builds a new map of [`ResolvedLayout`]s without
//! modifying its input.

use crate::error::{Result, SiteError};
use crate::frontmatter::{self, CONTENT_VARIABLE, FrontMatter};
use crate::graph::topo_sort;
use crate::template::{self, Variables};
use log::{debug, warn};
use std::collections::BTreeMap;


/// A layout as loaded from its source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLayout {
    /// Layout name (the source file stem).
    pub name: String,
    /// Template body after the front matter.
    pub body: String,
    /// Name of the parent layout, taken from the `layout` key.
    pub parent: Option<String>,
    /// Remaining front-matter entries.
    pub front_matter: FrontMatter,
}

impl RawLayout {
    /// Parse a layout from its source text.
    ///
    /// The `layout` key is moved out of the front matter into
    /// [`RawLayout::parent`]. Errors are tagged with the layout name.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let origin = || format!("layout '{}'", name);

        let (body, mut front_matter) =
            frontmatter::parse(text).map_err(|e| e.in_source(origin()))?;
        let parent = front_matter.take_layout();

        if front_matter.get(CONTENT_VARIABLE).is_some() {
            return Err(SiteError::ReservedVariable {
                name: CONTENT_VARIABLE.to_string(),
            }
            .in_source(origin()));
        }

        Ok(Self {
            name,
            body: body.to_string(),
            parent,
            front_matter,
        })
    }
}

/// A layout with its whole ancestor chain merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub name: String,
    /// Flat template, ready to render a document into.
    pub body: String,
    /// Front matter of the ancestor chain; nearer layouts override farther
    /// ones. Used as fallback values when a document is rendered.
    pub defaults: FrontMatter,
}

/// Resolved layouts keyed by name.
pub type ResolvedLayouts = BTreeMap<String, ResolvedLayout>;

/// Resolve every layout in `raw` against its ancestors.
///
/// A layout without a parent resolves to its own body. A child resolves to
/// its parent's resolved body rendered with `content` set to the child's raw
/// body and the child's front matter as extra variables. Placeholders the
/// child does not supply stay in place for the document render.
///
/// A child's front matter is therefore bound into its ancestors' bodies at
/// merge time and a document cannot override it there. The same values are
/// kept as [`ResolvedLayout::defaults`], which documents do override, for
/// placeholders still open after composition (such as those in the child's
/// own body).
///
/// # Errors
///
/// - [`SiteError::UnknownLayoutReference`] if a parent does not exist
/// - [`SiteError::ContentMarker`] if a layout used as a parent does not
///   contain exactly one `{{ content }}`, or any layout contains several
/// - [`SiteError::UnembeddableValue`] if a child's front-matter value cannot
///   be kept literal inside its parent
/// - [`SiteError::CircularDependency`] if inheritance loops
/// - template syntax errors from a parent body
pub fn compose(raw: &BTreeMap<String, RawLayout>) -> Result<ResolvedLayouts> {
    let order = resolution_order(raw)?;

    let parents: Vec<&str> = raw.values().filter_map(|l| l.parent.as_deref()).collect();
    for layout in raw.values() {
        let markers = count_content_markers(layout)?;
        let is_parent = parents.contains(&layout.name.as_str());
        if markers > 1 || (is_parent && markers == 0) {
            return Err(SiteError::ContentMarker {
                layout: layout.name.clone(),
                found: markers,
            });
        }
        if markers == 0 {
            warn!(
                "layout '{}' has no {{{{ content }}}} marker; documents using it will lose their body",
                layout.name
            );
        }
    }

    let mut resolved = ResolvedLayouts::new();

    for name in order {
        let layout = &raw[&name];
        let entry = match &layout.parent {
            None => ResolvedLayout {
                name: name.clone(),
                body: layout.body.clone(),
                defaults: layout.front_matter.clone(),
            },
            Some(parent_name) => {
                let parent = resolved.get(parent_name).ok_or_else(|| {
                    SiteError::UnknownLayoutReference {
                        layout: parent_name.clone(),
                        referenced_by: name.clone(),
                    }
                })?;
                merge_into_parent(layout, parent)?
            }
        };

        debug!("resolved layout '{}' ({} bytes)", name, entry.body.len());
        resolved.insert(name, entry);
    }

    Ok(resolved)
}

/// Order in which layouts are resolved: every parent before its children.
pub fn resolution_order(raw: &BTreeMap<String, RawLayout>) -> Result<Vec<String>> {
    for layout in raw.values() {
        if let Some(parent) = &layout.parent
            && !raw.contains_key(parent)
        {
            return Err(SiteError::UnknownLayoutReference {
                layout: parent.clone(),
                referenced_by: layout.name.clone(),
            });
        }
    }

    let parent_of: BTreeMap<String, Option<String>> = raw
        .iter()
        .map(|(name, layout)| (name.clone(), layout.parent.clone()))
        .collect();
    topo_sort(&parent_of)
}

fn merge_into_parent(child: &RawLayout, parent: &ResolvedLayout) -> Result<ResolvedLayout> {
    let origin = || format!("layout '{}'", child.name);

    let mut variables = Variables::new();
    for (name, value) in child.front_matter.iter() {
        let literal = as_literal(name, value).map_err(|e| e.in_source(origin()))?;
        variables.insert(name.to_string(), literal);
    }
    variables.insert(CONTENT_VARIABLE.to_string(), child.body.clone());

    let body = template::render(&parent.body, &variables, true).map_err(|e| {
        e.in_source(format!(
            "layout '{}' (while wrapping '{}')",
            parent.name, child.name
        ))
    })?;

    Ok(ResolvedLayout {
        name: child.name.clone(),
        body,
        defaults: parent.defaults.merged_with(&child.front_matter),
    })
}

/// Front-matter values are plain strings, but a merged body is scanned
/// again by every later render. Values containing `{` are wrapped in a
/// verbatim block so those passes copy them out unchanged.
fn as_literal(name: &str, value: &str) -> Result<String> {
    if !value.contains('{') {
        return Ok(value.to_string());
    }
    if value.contains("\"}}") {
        return Err(SiteError::UnembeddableValue {
            name: name.to_string(),
        });
    }
    Ok(format!("{{{{\"{}\"}}}}", value))
}

fn count_content_markers(layout: &RawLayout) -> Result<usize> {
    let names = template::placeholders(&layout.body)
        .map_err(|e| e.in_source(format!("layout '{}'", layout.name)))?;
    Ok(names.into_iter().filter(|n| *n == CONTENT_VARIABLE).count())
}
