//! Implementation of the `plinth build` command.

use super::open_site;
use crate::cli::SiteArgs;
use crate::error::Result;
use crate::site::BuildSummary;

/// Execute the `plinth build` command.
pub fn cmd_build(args: SiteArgs) -> Result<()> {
    let site = open_site(&args)?;
    let summary = site.build()?;

    println!("{}", format_summary(&summary, &site.output_dir().display().to_string()));
    Ok(())
}

fn format_summary(summary: &BuildSummary, output_dir: &str) -> String {
    let mut line = format!(
        "Built {} page(s) from {} layout(s) into {}",
        summary.pages, summary.layouts, output_dir
    );
    if summary.redirects > 0 {
        line.push_str(&format!(", {} redirect(s)", summary.redirects));
    }
    if summary.static_files > 0 {
        line.push_str(&format!(", {} static file(s)", summary.static_files));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_blog_site;
    use std::time::Duration;

    #[test]
    fn test_cmd_build_writes_site() {
        let root = create_blog_site();
        let args = SiteArgs {
            root: root.path().to_path_buf(),
            config: None,
        };

        cmd_build(args).unwrap();
        assert!(root.path().join("build/about.html").exists());
        assert!(root.path().join("build/blog/hello.html").exists());
    }

    #[test]
    fn test_format_summary_omits_zero_counts() {
        let summary = BuildSummary {
            layouts: 1,
            pages: 3,
            redirects: 0,
            static_files: 0,
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(
            format_summary(&summary, "build"),
            "Built 3 page(s) from 1 layout(s) into build"
        );
    }

    #[test]
    fn test_format_summary_lists_extras() {
        let summary = BuildSummary {
            layouts: 2,
            pages: 2,
            redirects: 1,
            static_files: 4,
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(
            format_summary(&summary, "out"),
            "Built 2 page(s) from 2 layout(s) into out, 1 redirect(s), 4 static file(s)"
        );
    }
}
