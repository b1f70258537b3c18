//! Error types for nodal-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("singular system: {0}")]
    SingularSystem(String),

    #[error("invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Circuit(#[from] nodal_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
