//! Implementation of the `plinth check` command.
//!
//! Renders the whole site in memory and reports what a build would
//! produce, without touching the output directory.

use super::open_site;
use crate::cli::SiteArgs;
use crate::error::Result;

/// Execute the `plinth check` command.
pub fn cmd_check(args: SiteArgs) -> Result<()> {
    let site = open_site(&args)?;
    let rendered = site.render()?;

    println!(
        "OK: {} layout(s), {} page(s), {} redirect(s)",
        rendered.layouts.len(),
        rendered.pages.len(),
        rendered.redirect_count()
    );
    Ok(())
}
