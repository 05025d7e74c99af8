//! Filesystem utilities for plinth.
//!
//! Output files are written atomically so an interrupted build never leaves
//! a half-written page behind, and static assets are copied as a tree.

pub mod atomic;
mod copy;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
pub use copy::{copy_dir_all, remove_dir_if_exists};
