//! Redirect pages generated from `redirect_from`.

use crate::error::{Result, SiteError};
use std::path::{Component, Path, PathBuf};

/// A redirect from an old location to a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Where the redirect page is written, relative to the output directory.
    pub path: PathBuf,
    /// URL the page redirects to.
    pub target: String,
}

impl Redirect {
    /// Build a redirect from the `redirect_from` value to `target`.
    ///
    /// A source ending in `.html` is written as that file; any other source
    /// is treated as a directory and gets an `index.html`.
    pub fn new(from: &str, target: &str) -> Result<Self> {
        let trimmed = from.trim().trim_matches('/');
        let relative = Path::new(trimmed);

        let inside_site = !trimmed.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !inside_site {
            return Err(SiteError::Config(format!(
                "redirect_from '{}' must be a relative path inside the site",
                from
            )));
        }

        let path = if trimmed.ends_with(".html") {
            relative.to_path_buf()
        } else {
            relative.join("index.html")
        };

        Ok(Self {
            path,
            target: target.to_string(),
        })
    }

    /// The HTML page written at [`Redirect::path`].
    pub fn page(&self) -> String {
        redirect_page(&self.target)
    }
}

/// Minimal HTML page that forwards the browser to `target`.
pub fn redirect_page(target: &str) -> String {
    let target = escape_attribute(target);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={target}\">\n\
         <link rel=\"canonical\" href=\"{target}\">\n\
         <title>Redirecting</title>\n\
         </head>\n\
         <body><a href=\"{target}\">Click here if you are not redirected.</a></body>\n\
         </html>\n"
    )
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_redirect_gets_index() {
        let redirect = Redirect::new("/old/post/", "/blog/post.html").unwrap();
        assert_eq!(redirect.path, PathBuf::from("old/post/index.html"));
        assert_eq!(redirect.target, "/blog/post.html");
    }

    #[test]
    fn test_html_redirect_is_written_as_file() {
        let redirect = Redirect::new("old.html", "/new.html").unwrap();
        assert_eq!(redirect.path, PathBuf::from("old.html"));
    }

    #[test]
    fn test_redirect_outside_site_rejected() {
        assert!(Redirect::new("../escape", "/x.html").is_err());
        assert!(Redirect::new("a/../../b", "/x.html").is_err());
        assert!(Redirect::new("/", "/x.html").is_err());
        assert!(Redirect::new("", "/x.html").is_err());
    }

    #[test]
    fn test_redirect_page_points_at_target() {
        let page = redirect_page("/blog/post.html");
        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<meta http-equiv=\"refresh\" content=\"0; url=/blog/post.html\">"));
        assert!(page.contains("<a href=\"/blog/post.html\">"));
    }

    #[test]
    fn test_redirect_page_escapes_target() {
        let page = redirect_page("/a\"b.html");
        assert!(page.contains("/a&quot;b.html"));
        assert!(!page.contains("/a\"b.html"));
    }
}
