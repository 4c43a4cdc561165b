//! Error types for servicemap operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for servicemap operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No service with the given name was loaded.
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// A path that must be a readable directory is missing or is a file.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// A specialized Result type for servicemap operations.
pub type Result<T> = std::result::Result<T, Error>;
