/// Error types for graph mutations and queries

use crate::types::{VertexId, VertexIdError};
use thiserror::Error;

/// Coarse error classification shared by every error of the crate
///
/// Callers that only care about the category (the CLI exit code, the session
/// log line) match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Negative id or weight, malformed threshold, self-loop
    InvalidArgument,
    /// Operation references a vertex or edge that does not exist
    NotFound,
    /// Duplicate edge insertion
    AlreadyExists,
}

/// Graph operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Negative vertex id
    #[error("Invalid vertex id: {0}")]
    InvalidVertexId(#[from] VertexIdError),

    /// Negative edge weight
    #[error("Negative weights are not allowed: {0}")]
    NegativeWeight(i64),

    /// Edge from a vertex to itself
    #[error("Self-loops are not allowed: {0} -> {0}")]
    SelfLoop(VertexId),

    /// Vertex not found
    #[error("Vertex not found: {0}")]
    VertexNotFound(i64),

    /// Edge not found
    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: i64, to: i64 },

    /// Edge for the same ordered pair already present
    #[error("Edge already exists: {from} -> {to}")]
    EdgeAlreadyExists { from: VertexId, to: VertexId },

    /// Any other rejected argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::InvalidVertexId(_)
            | GraphError::NegativeWeight(_)
            | GraphError::SelfLoop(_)
            | GraphError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GraphError::VertexNotFound(_) | GraphError::EdgeNotFound { .. } => {
                ErrorKind::NotFound
            }
            GraphError::EdgeAlreadyExists { .. } => ErrorKind::AlreadyExists,
        }
    }
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
