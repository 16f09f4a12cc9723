/// Isochrones: vertices reachable within a maximum distance
///
/// An isochrone is a pure function of a `ShortestPathResult`; no path is
/// recomputed. Growing the threshold can only add vertices.

use super::shortest_path::{shortest_path_with, ShortestPathOptions, ShortestPathResult};
use super::{AlgorithmError, AlgorithmResult};
use crate::graph::Graph;
use crate::types::VertexId;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Set of vertices within `max_distance` of `source`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Isochrone {
    pub source: VertexId,
    pub max_distance: u64,
    pub vertices: BTreeSet<VertexId>,
}

impl Isochrone {
    pub fn contains(&self, vertex: i64) -> bool {
        VertexId::try_from(vertex).is_ok_and(|id| self.vertices.contains(&id))
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Never true for a computed isochrone, which always holds its source
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().copied()
    }
}

/// Derive the isochrone of `max_distance` from a shortest path result
///
/// # Errors
/// * `AlgorithmError::InvalidThreshold` if `max_distance` is negative
pub fn isochrone(result: &ShortestPathResult, max_distance: i64) -> AlgorithmResult<Isochrone> {
    let limit =
        u64::try_from(max_distance).map_err(|_| AlgorithmError::InvalidThreshold(max_distance))?;

    let mut vertices: BTreeSet<VertexId> = result
        .reachable()
        .filter(|(_, distance)| *distance <= limit)
        .map(|(id, _)| id)
        .collect();
    vertices.insert(result.source);

    debug!(
        "Isochrone from {} within {}: {} vertices",
        result.source,
        limit,
        vertices.len()
    );

    Ok(Isochrone {
        source: result.source,
        max_distance: limit,
        vertices,
    })
}

/// Run a shortest path query from `source` and derive its isochrone
///
/// # Errors
/// * `AlgorithmError::InvalidThreshold` if `max_distance` is negative
/// * `AlgorithmError::VertexNotFound` if `source` is not in the graph
pub fn isochrone_from(
    graph: &Graph,
    source: i64,
    max_distance: i64,
    options: &ShortestPathOptions,
) -> AlgorithmResult<Isochrone> {
    if max_distance < 0 {
        return Err(AlgorithmError::InvalidThreshold(max_distance));
    }
    let result = shortest_path_with(graph, source, options)?;
    isochrone(&result, max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::shortest_path::shortest_path;
    use crate::graph::ErrorKind;

    fn sample_graph() -> Graph {
        // 1 -1-> 2 -2-> 3 -3-> 4, plus 1 -10-> 3 and an isolated 5
        let mut graph = Graph::new();
        for id in 1..=5 {
            graph.add_vertex(id).unwrap();
        }
        for (s, d, w) in [(1, 2, 1), (2, 3, 2), (1, 3, 10), (3, 4, 3)] {
            graph.add_edge(s, d, w).unwrap();
        }
        graph
    }

    fn ids(iso: &Isochrone) -> Vec<u64> {
        iso.iter().map(|v| v.as_raw()).collect()
    }

    #[test]
    fn test_isochrone_thresholds() {
        let result = shortest_path(&sample_graph(), 1).unwrap();

        assert_eq!(ids(&isochrone(&result, 0).unwrap()), vec![1]);
        assert_eq!(ids(&isochrone(&result, 1).unwrap()), vec![1, 2]);
        assert_eq!(ids(&isochrone(&result, 3).unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&isochrone(&result, 5).unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&isochrone(&result, 6).unwrap()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_isochrone_excludes_unreachable() {
        let result = shortest_path(&sample_graph(), 1).unwrap();
        let iso = isochrone(&result, i64::MAX).unwrap();

        assert!(!iso.contains(5));
        assert_eq!(iso.len(), 4);
    }

    #[test]
    fn test_isochrone_always_contains_source() {
        let result = shortest_path(&sample_graph(), 5).unwrap();
        let iso = isochrone(&result, 0).unwrap();

        assert_eq!(ids(&iso), vec![5]);
        assert!(!iso.is_empty());
    }

    #[test]
    fn test_isochrone_monotone() {
        let result = shortest_path(&sample_graph(), 1).unwrap();
        let mut previous = isochrone(&result, 0).unwrap();

        for threshold in 1..12 {
            let current = isochrone(&result, threshold).unwrap();
            assert!(previous.vertices.is_subset(&current.vertices));
            previous = current;
        }
    }

    #[test]
    fn test_isochrone_negative_threshold() {
        let result = shortest_path(&sample_graph(), 1).unwrap();
        let err = isochrone(&result, -1).unwrap_err();

        assert_eq!(err, AlgorithmError::InvalidThreshold(-1));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_isochrone_from() {
        let graph = sample_graph();
        let options = ShortestPathOptions::default();

        let iso = isochrone_from(&graph, 2, 2, &options).unwrap();
        assert_eq!(ids(&iso), vec![2, 3]);

        let err = isochrone_from(&graph, 9, 2, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = isochrone_from(&graph, 9, -2, &options).unwrap_err();
        assert_eq!(err, AlgorithmError::InvalidThreshold(-2));
    }
}
