//! Markup-to-HTML conversion for documents.
//!
//! Conversion is behind the [`MarkupRenderer`] trait so the document
//! pipeline does not depend on a particular Markdown implementation.

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use std::sync::LazyLock;

/// `[^id]: ` at a footnote definition.
static FOOTNOTE_DEFINITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\^([^\]]+)\]:\s?").expect("Invalid footnote definition regex")
});

/// `[^id]` at a footnote reference.
static FOOTNOTE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\^([^\]]+)\]").expect("Invalid footnote reference regex")
});

/// Converts document markup into output text.
pub trait MarkupRenderer {
    fn render_markup(&self, text: &str) -> String;
}

/// CommonMark renderer with optional footnote back-links.
#[derive(Debug, Clone, Copy)]
pub struct CommonMark {
    footnote_links: bool,
}

impl CommonMark {
    pub fn new(footnote_links: bool) -> Self {
        Self { footnote_links }
    }
}

impl Default for CommonMark {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MarkupRenderer for CommonMark {
    fn render_markup(&self, text: &str) -> String {
        let linked;
        let source = if self.footnote_links {
            linked = link_footnotes(text);
            linked.as_str()
        } else {
            text
        };

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(source, options);
        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

/// Turn `[^id]` references and `[^id]: ` definitions into linked
/// superscripts that point at each other.
///
/// Definitions are rewritten first so the reference pattern does not
/// consume them.
pub fn link_footnotes(text: &str) -> String {
    let text = FOOTNOTE_DEFINITION_REGEX.replace_all(text, |caps: &regex::Captures| {
        let id = &caps[1];
        format!(
            "<sup id=\"footnote-{id}\"><a href=\"#footnote-back-{id}\">{id}</a></sup>: "
        )
    });
    FOOTNOTE_REFERENCE_REGEX
        .replace_all(&text, |caps: &regex::Captures| {
            let id = &caps[1];
            format!(
                "<sup id=\"footnote-back-{id}\"><a href=\"#footnote-{id}\">{id}</a></sup>"
            )
        })
        .into_owned()
}
