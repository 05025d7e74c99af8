//! Front matter for layouts and documents.
//!
//! Source files may start with a block of `key: value` lines delimited by
//! `---` lines:
//!
//! ```text
//! ---
//! layout: post
//! title: Hello
//! ---
//! Body text...
//! ```
//!
//! Values are plain strings; no YAML interpretation is applied. Keys must be
//! identifiers (`[A-Za-z_][A-Za-z0-9_]*`) because every key becomes a
//! template variable.

use crate::error::{Result, SiteError};
use crate::template::Variables;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;


/// Reserved key naming the layout a file is wrapped with.
pub const LAYOUT_KEY: &str = "layout";

/// Reserved key naming a path that should redirect to the document.
pub const REDIRECT_FROM_KEY: &str = "redirect_from";

/// Variable name the engine uses for the wrapped body.
pub const CONTENT_VARIABLE: &str = "content";

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex")
});

/// Check whether `name` is a valid variable name.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Parsed front-matter entries.
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert an entry, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Remove and return the `layout` entry.
    pub fn take_layout(&mut self) -> Option<String> {
        self.entries.remove(LAYOUT_KEY)
    }

    /// Remove and return the `redirect_from` entry.
    pub fn take_redirect_from(&mut self) -> Option<String> {
        self.entries.remove(REDIRECT_FROM_KEY)
    }

    /// Overlay these entries onto `variables`, replacing existing values.
    ///
    /// Fails if an entry would define the reserved `content` variable.
    pub fn apply_to(&self, variables: &mut Variables) -> Result<()> {
        for (key, value) in &self.entries {
            if key == CONTENT_VARIABLE {
                return Err(SiteError::ReservedVariable { name: key.clone() });
            }
            variables.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Merge `other` on top of `self`; entries in `other` win.
    pub fn merged_with(&self, other: &FrontMatter) -> FrontMatter {
        let mut merged = self.clone();
        for (key, value) in &other.entries {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split source text into its body and front matter.
///
/// Text that does not begin with a `---` line is returned unchanged with
/// empty front matter. The returned body is everything after the closing
/// `---` line.
///
/// # Errors
///
/// - [`SiteError::UnterminatedFrontMatter`] if no closing `---` line exists
/// - [`SiteError::MalformedFrontMatterLine`] for a line without `": "`
///   (line numbers count from the opening delimiter as line 1)
/// - [`SiteError::InvalidVariableName`] for a key that is not an identifier
pub fn parse(text: &str) -> Result<(&str, FrontMatter)> {
    let header_len = if text.starts_with("---\n") {
        4
    } else if text.starts_with("---\r\n") {
        5
    } else {
        return Ok((text, FrontMatter::new()));
    };

    let (block_end, body_start) = find_closing_delimiter(text, header_len)?;
    let block = if block_end > header_len {
        &text[header_len..block_end]
    } else {
        ""
    };

    let mut front_matter = FrontMatter::new();
    for (idx, line) in block.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(": ") else {
            return Err(SiteError::MalformedFrontMatterLine {
                line_number: idx + 2,
                line: line.trim_end().to_string(),
            });
        };

        let key = key.trim();
        if !is_identifier(key) {
            return Err(SiteError::InvalidVariableName {
                name: key.to_string(),
            });
        }

        front_matter.insert(key, value.trim());
    }

    Ok((&text[body_start..], front_matter))
}

/// Locate the closing `---` line.
///
/// Returns the offset of the newline that precedes it (end of the block)
/// and the offset where the body begins.
fn find_closing_delimiter(text: &str, header_len: usize) -> Result<(usize, usize)> {
    // Start at the newline ending the opening line so an empty block matches.
    let mut search_from = header_len - 1;

    while let Some(rel) = text[search_from..].find("\n---") {
        let delimiter = search_from + rel;
        let after = delimiter + "\n---".len();
        let tail = &text[after..];

        let body_start = if tail.is_empty() {
            Some(after)
        } else if tail.starts_with('\n') {
            Some(after + 1)
        } else if tail.starts_with("\r\n") {
            Some(after + 2)
        } else {
            None
        };

        match body_start {
            Some(body_start) => return Ok((delimiter, body_start)),
            // `---` followed by more text on the same line is content, keep looking
            None => search_from = delimiter + 1,
        }
    }

    Err(SiteError::UnterminatedFrontMatter)
}
