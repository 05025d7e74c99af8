//! Site configuration for plinth.
//!
//! This module defines the `SiteConfig` struct that represents `site.yaml`
//! at the site root. Every field has a default, so the file is optional and
//! unknown fields are ignored.

mod model;
mod operations;


pub use model::{CONFIG_FILE_NAME, SiteConfig};
