//! Domain-level errors (no external dependencies)

use thiserror::Error;

use super::entities::NodeKind;

/// Domain errors: the only failures the hierarchy can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: NodeKind, name: String },

    #[error("stale node handle: node was deleted")]
    StaleHandle,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
