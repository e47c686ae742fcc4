//! Error types for template rendering.

use std::path::PathBuf;
use thiserror::Error;

use crate::formatter::FormatError;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that abort a generation run.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Template expansion failed for {template}: {message}")]
    Expansion { template: PathBuf, message: String },

    #[error("Malformed markdown produced by {template}: {source}")]
    Format {
        template: PathBuf,
        source: FormatError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
