//! Error types for the circuit file crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for circuit file operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing circuit files.
#[derive(Debug, Error)]
pub enum Error {
    /// Refused to replace an existing file.
    #[error("file {} already exists", path.display())]
    FileExists { path: PathBuf },

    /// Circuit file not found.
    #[error("circuit file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but does not describe a valid circuit.
    #[error("invalid circuit: {0}")]
    Circuit(#[from] nodal_core::Error),
}
