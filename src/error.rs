use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a dataset directory.
///
/// Individual malformed records are never errors: the loader drops them.
/// Only an unusable directory is reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Dataset directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Background load failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
