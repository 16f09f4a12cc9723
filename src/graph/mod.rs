/// In-memory directed weighted graph
///
/// This module provides the graph data structure and its invariants:
/// - Graph: vertex set plus ordered adjacency map (source -> destination -> weight)
/// - SharedGraph: lock-serialized handle for multi-threaded callers
/// - GraphError: error type for every mutation and query
///
/// Invariants held after every successful operation:
/// - both endpoints of every edge exist
/// - no self-loops
/// - at most one edge per ordered (source, destination) pair
/// - weights are non-negative
/// - removing a vertex removes every edge touching it
///
/// A failed operation leaves the graph untouched: all checks run before the
/// first write.

pub mod error;
pub mod shared;

pub use error::{ErrorKind, GraphError, GraphResult};
pub use shared::SharedGraph;

use crate::types::{Edge, VertexId, Weight};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

/// Outgoing edges of a single vertex: destination -> weight
pub type EdgeMap = BTreeMap<VertexId, Weight>;

/// Full adjacency relation: source -> outgoing edges
pub type AdjacencyMap = BTreeMap<VertexId, EdgeMap>;

/// Directed, weighted graph without self-loops or parallel edges
///
/// Vertex ids and weights are accepted as raw `i64` values, the way the file
/// loader and the CLI receive them; negative values are rejected here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: AdjacencyMap,
    edge_count: usize,
}

impl Graph {
    /// Largest size accepted by `resize`; each vertex costs one map entry
    pub const MAX_RESIZE: u64 = 1 << 24;

    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an adjacency matrix of raw weights
    ///
    /// Vertices `0..n` are created for an `n x n` matrix. A negative entry
    /// means "no arc" and the diagonal is ignored.
    ///
    /// # Errors
    /// * `InvalidArgument` if a row does not have exactly `n` entries
    pub fn from_adjacency_matrix(rows: &[Vec<i64>]) -> GraphResult<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(GraphError::InvalidArgument(format!(
                "matrix row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }

        let mut graph = Self::new();
        for i in 0..n {
            graph.adjacency.insert(VertexId::new(i as u64), EdgeMap::new());
        }

        for (i, row) in rows.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                if i == j || weight < 0 {
                    continue;
                }
                graph.add_edge(i as i64, j as i64, weight)?;
            }
        }

        Ok(graph)
    }

    /// Add a vertex
    ///
    /// Adding an existing vertex is a no-op.
    ///
    /// # Errors
    /// * `InvalidArgument` if `vertex` is negative
    pub fn add_vertex(&mut self, vertex: i64) -> GraphResult<VertexId> {
        let id = VertexId::try_from(vertex)?;
        if let Entry::Vacant(slot) = self.adjacency.entry(id) {
            slot.insert(EdgeMap::new());
            debug!("Added vertex {}", id);
        }
        Ok(id)
    }

    /// Add a directed edge `source -> destination`
    ///
    /// # Errors
    /// * `InvalidArgument` if `weight` is negative
    /// * `NotFound` if either endpoint is absent
    /// * `InvalidArgument` if `source == destination`
    /// * `AlreadyExists` if the edge is already present
    pub fn add_edge(&mut self, source: i64, destination: i64, weight: i64) -> GraphResult<()> {
        let weight = Weight::try_from(weight).map_err(|_| GraphError::NegativeWeight(weight))?;
        let from = self.lookup(source)?;
        let to = self.lookup(destination)?;

        if from == to {
            return Err(GraphError::SelfLoop(from));
        }

        let edges = self
            .adjacency
            .get_mut(&from)
            .ok_or(GraphError::VertexNotFound(source))?;

        match edges.entry(to) {
            Entry::Occupied(_) => Err(GraphError::EdgeAlreadyExists { from, to }),
            Entry::Vacant(slot) => {
                slot.insert(weight);
                self.edge_count += 1;
                debug!("Added edge {} -> {} (weight {})", from, to, weight);
                Ok(())
            }
        }
    }

    /// Remove the edge `source -> destination`, returning its weight
    ///
    /// # Errors
    /// * `NotFound` if no such edge exists
    pub fn remove_edge(&mut self, source: i64, destination: i64) -> GraphResult<Weight> {
        let removed = VertexId::try_from(source)
            .ok()
            .zip(VertexId::try_from(destination).ok())
            .and_then(|(from, to)| self.adjacency.get_mut(&from)?.remove(&to));

        match removed {
            Some(weight) => {
                self.edge_count -= 1;
                debug!("Removed edge {} -> {}", source, destination);
                Ok(weight)
            }
            None => Err(GraphError::EdgeNotFound {
                from: source,
                to: destination,
            }),
        }
    }

    /// Remove a vertex and every edge that starts or ends at it
    ///
    /// # Errors
    /// * `NotFound` if the vertex is absent
    pub fn remove_vertex(&mut self, vertex: i64) -> GraphResult<()> {
        let id = self.lookup(vertex)?;
        let removed_edges = self.detach_and_remove(id);
        debug!("Removed vertex {} ({} incident edges)", id, removed_edges);
        Ok(())
    }

    /// Resize the graph so that its vertex set is exactly `0..size`
    ///
    /// Vertices with an id `>= size` are removed from the highest id down,
    /// each removal dropping its incident edges. Missing ids below `size` are
    /// added. On a graph numbered contiguously from zero this trims or extends
    /// the tail; on a graph with gaps it also fills them.
    ///
    /// # Errors
    /// * `InvalidArgument` if `size` is negative or above `Graph::MAX_RESIZE`
    pub fn resize(&mut self, size: i64) -> GraphResult<()> {
        let target = u64::try_from(size).map_err(|_| {
            GraphError::InvalidArgument(format!("graph size cannot be negative: {}", size))
        })?;
        if target > Self::MAX_RESIZE {
            return Err(GraphError::InvalidArgument(format!(
                "graph size {} exceeds the resize limit of {}",
                size,
                Self::MAX_RESIZE
            )));
        }

        let doomed: Vec<VertexId> = self
            .adjacency
            .range(VertexId::new(target)..)
            .rev()
            .map(|(id, _)| *id)
            .collect();
        for id in doomed {
            self.detach_and_remove(id);
        }

        let before = self.adjacency.len();
        for raw in 0..target {
            self.adjacency.entry(VertexId::new(raw)).or_default();
        }

        debug!(
            "Resized graph to {} vertices ({} added)",
            target,
            self.adjacency.len() - before
        );
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Check whether a vertex exists; negative ids never exist
    pub fn contains_vertex(&self, vertex: i64) -> bool {
        self.lookup(vertex).is_ok()
    }

    /// Outgoing edges of `vertex` as destination -> weight
    ///
    /// # Errors
    /// * `NotFound` if the vertex is absent
    pub fn neighbors(&self, vertex: i64) -> GraphResult<&EdgeMap> {
        let id = self.lookup(vertex)?;
        self.adjacency
            .get(&id)
            .ok_or(GraphError::VertexNotFound(vertex))
    }

    /// Incoming edges of `vertex` as source -> weight
    ///
    /// Found by scanning every source's outgoing edges, O(V log V).
    ///
    /// # Errors
    /// * `NotFound` if the vertex is absent
    pub fn predecessors(&self, vertex: i64) -> GraphResult<EdgeMap> {
        let id = self.lookup(vertex)?;
        Ok(self
            .adjacency
            .iter()
            .filter_map(|(source, edges)| edges.get(&id).map(|w| (*source, *w)))
            .collect())
    }

    /// Check whether the edge `source -> destination` exists
    pub fn has_edge(&self, source: i64, destination: i64) -> bool {
        self.edge_weight(source, destination).is_ok()
    }

    /// Weight of the edge `source -> destination`
    ///
    /// # Errors
    /// * `NotFound` if no such edge exists
    pub fn edge_weight(&self, source: i64, destination: i64) -> GraphResult<Weight> {
        VertexId::try_from(source)
            .ok()
            .zip(VertexId::try_from(destination).ok())
            .and_then(|(from, to)| self.adjacency.get(&from)?.get(&to).copied())
            .ok_or(GraphError::EdgeNotFound {
                from: source,
                to: destination,
            })
    }

    /// Read-only view of the whole adjacency relation
    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Vertices in ascending id order
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Edges ordered by source, then destination
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(source, edges)| {
            edges
                .iter()
                .map(move |(destination, weight)| Edge::new(*source, *destination, *weight))
        })
    }

    /// Resolve a raw id to a present vertex
    fn lookup(&self, vertex: i64) -> GraphResult<VertexId> {
        VertexId::try_from(vertex)
            .ok()
            .filter(|id| self.adjacency.contains_key(id))
            .ok_or(GraphError::VertexNotFound(vertex))
    }

    /// Remove a present vertex with its incident edges; returns the edge count removed
    fn detach_and_remove(&mut self, id: VertexId) -> usize {
        let outgoing = self.adjacency.remove(&id).map_or(0, |edges| edges.len());
        let incoming = self
            .adjacency
            .values_mut()
            .filter_map(|edges| edges.remove(&id))
            .count();
        self.edge_count -= outgoing + incoming;
        outgoing + incoming
    }
}
