use std::path::Path;
use tempfile::TempDir;

/// Create a temporary site directory containing `files` (relative path, content).
pub(crate) fn create_test_site(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        write_file(temp_dir.path(), path, content);
    }
    temp_dir
}

/// A small blog: a base layout, a post layout inheriting from it, a
/// Markdown post, a plain HTML page and a static asset.
pub(crate) fn create_blog_site() -> TempDir {
    create_test_site(&[
        (
            "layouts/base.html",
            "---\nsite_name: Example\n---\n<html><head><title>{{ title }} - {{ site_name }}</title></head><body>{{ content }}</body></html>",
        ),
        (
            "layouts/post.html",
            "---\nlayout: base\n---\n<article>{{ content }}</article>",
        ),
        (
            "site/blog/hello.md",
            "---\nlayout: post\ntitle: Hello\nredirect_from: hello-world\n---\n# Hello\n",
        ),
        (
            "site/about.html",
            "---\nlayout: base\ntitle: About\n---\n<p>About us</p>",
        ),
        ("public/css/site.css", "body { margin: 0 }"),
    ])
}

pub(crate) fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
