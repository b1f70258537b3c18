//! Error types for nodal-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("type mismatch: `{name}` is a {found}, expected a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("circuit membership: {0}")]
    CircuitMembership(String),

    #[error("duplicate name: {0}")]
    DuplicateName(String),

    #[error("circuit {0} has no ground node")]
    NoGroundNode(String),

    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("unknown component kind: {0}")]
    UnknownComponentKind(String),

    #[error("no node or component named {0}")]
    UnknownEntity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
