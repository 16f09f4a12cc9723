use super::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative edge weight
pub type Weight = u64;

/// Directed, weighted edge of the graph
///
/// The graph itself stores edges as `source -> (destination -> weight)`;
/// this struct is the flattened form handed out by `Graph::edges` and used
/// in reconstructed paths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    /// Tail of the edge
    pub source: VertexId,

    /// Head of the edge
    pub destination: VertexId,

    /// Edge weight
    pub weight: Weight,
}

impl Edge {
    /// Create a new edge
    pub fn new(source: VertexId, destination: VertexId, weight: Weight) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }

    /// Check if this edge is a self-loop
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }

    /// Check whether the edge touches `vertex` at either end
    pub fn is_incident_to(&self, vertex: VertexId) -> bool {
        self.source == vertex || self.destination == vertex
    }
}

impl fmt::Display for Edge {
    /// Same layout as a data line of the graph file
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.destination, self.weight)
    }
}
