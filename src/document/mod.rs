//! Content documents and their final render.
//!
//! A document's body is converted from markup when its extension calls for
//! it, then wrapped by the layout named in its `layout` front-matter key.
//! A `redirect_from` key additionally produces a redirect page pointing at
//! the rendered document.

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::frontmatter::{self, CONTENT_VARIABLE, FrontMatter};
use crate::layout::ResolvedLayouts;
use crate::markup::MarkupRenderer;
use crate::template::{self, Variables};
use std::path::PathBuf;

mod redirect;

pub use redirect::{Redirect, redirect_page};

/// A content document as loaded from the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the content directory, without extension, using `/`
    /// separators (e.g. `blog/first-post`).
    pub id: String,
    /// Source file extension without the dot (e.g. `md`).
    pub extension: String,
    /// Body after the front matter.
    pub body: String,
    pub front_matter: FrontMatter,
}

impl Document {
    /// Parse a document from its source text. Errors are tagged with `id`.
    pub fn parse(id: impl Into<String>, extension: impl Into<String>, text: &str) -> Result<Self> {
        let id = id.into();
        let (body, front_matter) = frontmatter::parse(text).map_err(|e| e.in_source(&id))?;

        Ok(Self {
            id,
            extension: extension.into(),
            body: body.to_string(),
            front_matter,
        })
    }
}

/// A fully rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    /// Output path relative to the output directory.
    pub path: PathBuf,
    pub text: String,
    pub redirect: Option<Redirect>,
}

/// Renders documents against resolved layouts.
///
/// Holds only shared references; layouts are never modified while
/// documents render.
pub struct DocumentRenderer<'a> {
    layouts: &'a ResolvedLayouts,
    config: &'a SiteConfig,
    markup: &'a dyn MarkupRenderer,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(
        layouts: &'a ResolvedLayouts,
        config: &'a SiteConfig,
        markup: &'a dyn MarkupRenderer,
    ) -> Self {
        Self {
            layouts,
            config,
            markup,
        }
    }

    /// Render one document.
    ///
    /// Variables available to the layout, lowest precedence first: site
    /// variables from the config, the layout chain's front matter, the
    /// document's own front matter, and finally `content`.
    pub fn render(&self, document: Document) -> Result<RenderedOutput> {
        let id = document.id.clone();
        self.render_document(document).map_err(|e| e.in_source(id))
    }

    fn render_document(&self, mut document: Document) -> Result<RenderedOutput> {
        let body = if self.config.is_markup_extension(&document.extension) {
            self.markup.render_markup(&document.body)
        } else {
            document.body
        };

        let layout_name = document.front_matter.take_layout();
        let redirect_from = document.front_matter.take_redirect_from();

        let text = match layout_name {
            None => body,
            Some(name) => {
                let layout =
                    self.layouts
                        .get(&name)
                        .ok_or_else(|| SiteError::UnknownLayoutReference {
                            layout: name.clone(),
                            referenced_by: document.id.clone(),
                        })?;

                let mut variables: Variables = template::vars(&self.config.variables);
                layout.defaults.apply_to(&mut variables)?;
                document.front_matter.apply_to(&mut variables)?;
                variables.insert(CONTENT_VARIABLE.to_string(), body);

                template::render(&layout.body, &variables, false)?
            }
        };

        let file_name = format!("{}.{}", document.id, self.config.output_extension);
        let redirect = redirect_from
            .map(|from| Redirect::new(&from, &format!("/{}", file_name)))
            .transpose()?;

        Ok(RenderedOutput {
            path: PathBuf::from(file_name),
            text,
            redirect,
        })
    }
}
