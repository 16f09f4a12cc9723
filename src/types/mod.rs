/// Core data types for the graph
///
/// This module defines the fundamental types used throughout the system:
/// - VertexId: validated non-negative vertex identifier
/// - Edge: directed, weighted arc between two vertices
/// - WeightedPath: sequence of vertices and edges forming a walk

pub mod edge;
pub mod path;
pub mod vertex;

pub use edge::{Edge, Weight};
pub use path::{PathError, WeightedPath};
pub use vertex::{VertexId, VertexIdError};
