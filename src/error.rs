//! Error types for plinth.
//!
//! Every failure is fatal for the run: errors propagate to `main`, which
//! prints them and exits with the code from [`SiteError::exit_code`].

use crate::exit_codes;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for plinth operations.
#[derive(Error, Debug)]
pub enum SiteError {
    /// A `---` front-matter block was opened but never closed.
    #[error("unterminated front matter: missing closing '---' delimiter")]
    UnterminatedFrontMatter,

    /// A front-matter line has no `": "` separator.
    #[error("malformed front-matter line {line_number}: '{line}' (expected 'key: value')")]
    MalformedFrontMatterLine { line_number: usize, line: String },

    /// A front-matter key or configured variable is not an identifier.
    #[error("invalid variable name '{name}'")]
    InvalidVariableName { name: String },

    /// A layout name was referenced but no such layout exists.
    #[error("unknown layout '{layout}' referenced by '{referenced_by}'")]
    UnknownLayoutReference {
        layout: String,
        referenced_by: String,
    },

    /// The layout inheritance graph contains a cycle.
    #[error("circular dependency detected between layouts: {}", .nodes.join(", "))]
    CircularDependency { nodes: Vec<String> },

    /// A `{{"` verbatim block has no closing `"}}`.
    #[error("unterminated verbatim block starting at byte {position}")]
    UnterminatedVerbatimBlock { position: usize },

    /// A `{{` variable reference has no closing `}}`.
    #[error("unterminated variable reference starting at byte {position}")]
    UnterminatedVariableReference { position: usize },

    /// A placeholder names a variable that was not supplied.
    #[error("undefined variable '{name}' at byte {position}")]
    UndefinedVariable { name: String, position: usize },

    /// A layout does not contain exactly one `{{ content }}` marker.
    #[error("layout '{layout}' must contain '{{{{ content }}}}' exactly once (found {found})")]
    ContentMarker { layout: String, found: usize },

    /// A layout front-matter value cannot be merged into its parent without
    /// being read as template syntax.
    #[error("value of '{name}' contains '\"}}}}' and cannot be merged into a parent layout")]
    UnembeddableValue { name: String },

    /// User data tried to define a variable the engine supplies itself.
    #[error("'{name}' is reserved and cannot be set in front matter")]
    ReservedVariable { name: String },

    /// Site configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem operation failed.
    #[error("{message} '{}': {reason}", .path.display())]
    Io {
        message: String,
        path: PathBuf,
        reason: String,
    },

    /// An error raised while processing a named layout or document.
    #[error("{origin}: {cause}")]
    InSource {
        origin: String,
        #[source]
        cause: Box<SiteError>,
    },
}

impl SiteError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SiteError::UnterminatedFrontMatter
            | SiteError::MalformedFrontMatterLine { .. }
            | SiteError::InvalidVariableName { .. }
            | SiteError::UnterminatedVerbatimBlock { .. }
            | SiteError::UnterminatedVariableReference { .. }
            | SiteError::UndefinedVariable { .. }
            | SiteError::ReservedVariable { .. }
            | SiteError::UnembeddableValue { .. } => exit_codes::TEMPLATE_FAILURE,
            SiteError::UnknownLayoutReference { .. }
            | SiteError::CircularDependency { .. }
            | SiteError::ContentMarker { .. } => exit_codes::LAYOUT_FAILURE,
            SiteError::Config(_) | SiteError::Io { .. } => exit_codes::USER_ERROR,
            SiteError::InSource { cause, .. } => cause.exit_code(),
        }
    }

    /// Attach the identifier of the layout or document being processed.
    pub fn in_source(self, origin: impl Into<String>) -> Self {
        SiteError::InSource {
            origin: origin.into(),
            cause: Box::new(self),
        }
    }

    /// Build an `Io` error from a failed filesystem call.
    pub fn io(message: impl Into<String>, path: &Path, err: impl std::fmt::Display) -> Self {
        SiteError::Io {
            message: message.into(),
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// The innermost error, skipping any `InSource` wrappers.
    pub fn root_cause(&self) -> &SiteError {
        match self {
            SiteError::InSource { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for plinth operations.
pub type Result<T> = std::result::Result<T, SiteError>;
