/// Parallel graph algorithms
///
/// Shortest path and isochrone queries only read the graph, so independent
/// queries from many sources can share one `&Graph` across rayon workers.
/// Holding the shared borrow rules out any mutation while they run.

use super::isochrone::{isochrone_from, Isochrone};
use super::shortest_path::{shortest_path_with, ShortestPathOptions, ShortestPathResult};
use super::AlgorithmResult;
use crate::graph::Graph;
use rayon::prelude::*;

/// Shortest paths from each source in parallel
///
/// # Returns
/// * One result per source, in the order of `sources`
pub fn shortest_paths_from_many(
    graph: &Graph,
    sources: &[i64],
    options: &ShortestPathOptions,
) -> Vec<AlgorithmResult<ShortestPathResult>> {
    sources
        .par_iter()
        .map(|&source| shortest_path_with(graph, source, options))
        .collect()
}

/// Isochrones of the same radius around each source in parallel
///
/// # Returns
/// * One isochrone per source, in the order of `sources`
pub fn isochrones_from_many(
    graph: &Graph,
    sources: &[i64],
    max_distance: i64,
    options: &ShortestPathOptions,
) -> Vec<AlgorithmResult<Isochrone>> {
    sources
        .par_iter()
        .map(|&source| isochrone_from(graph, source, max_distance, options))
        .collect()
}
