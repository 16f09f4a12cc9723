/// Graph algorithms module
///
/// Single-source shortest paths over non-negative weights, and the
/// distance-bounded reachability sets (isochrones) derived from them.

pub mod isochrone;
pub mod parallel;
pub mod shortest_path;

pub use isochrone::{isochrone, isochrone_from, Isochrone};
pub use parallel::{isochrones_from_many, shortest_paths_from_many};
pub use shortest_path::{
    shortest_path, shortest_path_with, Distance, SettleStep, ShortestPathOptions,
    ShortestPathResult, ShortestPathStrategy,
};

use crate::graph::ErrorKind;
use thiserror::Error;

/// Algorithm errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Source vertex not found: {0}")]
    VertexNotFound(i64),

    #[error("Maximum distance cannot be negative: {0}")]
    InvalidThreshold(i64),
}

impl AlgorithmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlgorithmError::VertexNotFound(_) => ErrorKind::NotFound,
            AlgorithmError::InvalidThreshold(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;
