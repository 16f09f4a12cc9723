use super::{edge::Edge, edge::Weight, vertex::VertexId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Edge {edge} does not continue the path ending at {end}")]
    Discontinuity { end: VertexId, edge: Edge },
}

/// A walk through the graph built edge by edge
///
/// (v1) -[e1]-> (v2) -[e2]-> (v3) ... -[en]-> (vn+1)
///
/// `edges[i]` always connects `vertices[i]` to `vertices[i + 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeightedPath {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<Edge>,
}

impl WeightedPath {
    /// Create a path with a single vertex (no edges)
    pub fn new(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
        }
    }

    /// Append an edge; its destination becomes the new end
    ///
    /// # Errors
    /// Returns an error if the edge doesn't start at the last vertex
    pub fn push(&mut self, edge: Edge) -> Result<(), PathError> {
        match self.vertices.last() {
            Some(&end) if end != edge.source => {
                return Err(PathError::Discontinuity { end, edge });
            }
            Some(_) => {}
            None => self.vertices.push(edge.source),
        }

        self.vertices.push(edge.destination);
        self.edges.push(edge);
        Ok(())
    }

    /// Number of edges in the path
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of edge weights along the path
    pub fn total_weight(&self) -> Weight {
        self.edges
            .iter()
            .fold(0, |acc: Weight, e| acc.saturating_add(e.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    #[test]
    fn test_path_single_vertex() {
        let path = WeightedPath::new(v(1));

        assert!(path.is_empty());
        assert_eq!(path.vertices, vec![v(1)]);
        assert_eq!(path.total_weight(), 0);
    }

    #[test]
    fn test_path_push() {
        let mut path = WeightedPath::new(v(1));
        path.push(Edge::new(v(1), v(2), 1)).unwrap();
        path.push(Edge::new(v(2), v(3), 2)).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path.vertices, vec![v(1), v(2), v(3)]);
        assert_eq!(path.total_weight(), 3);
    }

    #[test]
    fn test_path_push_discontinuous() {
        let mut path = WeightedPath::new(v(1));
        let edge = Edge::new(v(2), v(3), 1);

        let err = path.push(edge).unwrap_err();

        assert_eq!(err, PathError::Discontinuity { end: v(1), edge });
        assert_eq!(path.vertices, vec![v(1)]);
    }

    #[test]
    fn test_path_total_weight_saturates() {
        let mut path = WeightedPath::new(v(0));
        path.push(Edge::new(v(0), v(1), u64::MAX)).unwrap();
        path.push(Edge::new(v(1), v(2), 5)).unwrap();

        assert_eq!(path.total_weight(), u64::MAX);
    }
}
