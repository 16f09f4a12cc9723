/// Lock-serialized graph handle
///
/// Intermediate states inside a mutation (a vertex removed but its incoming
/// edges not yet swept) break the graph invariants, so every mutation holds
/// the write lock for its whole duration. Readers either hold the read lock
/// or work on a cloned snapshot.

use super::{Graph, GraphResult};
use crate::types::{VertexId, Weight};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable handle to one graph shared between threads
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Shared read access; blocks mutations while held
    pub fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.inner.read()
    }

    /// Owned copy of the current graph
    pub fn snapshot(&self) -> Graph {
        self.inner.read().clone()
    }

    /// Run an arbitrary mutation under the write lock
    pub fn mutate<T>(&self, f: impl FnOnce(&mut Graph) -> GraphResult<T>) -> GraphResult<T> {
        let mut graph = self.inner.write();
        f(&mut *graph)
    }

    pub fn add_vertex(&self, vertex: i64) -> GraphResult<VertexId> {
        self.mutate(|g| g.add_vertex(vertex))
    }

    pub fn add_edge(&self, source: i64, destination: i64, weight: i64) -> GraphResult<()> {
        self.mutate(|g| g.add_edge(source, destination, weight))
    }

    pub fn remove_edge(&self, source: i64, destination: i64) -> GraphResult<Weight> {
        self.mutate(|g| g.remove_edge(source, destination))
    }

    pub fn remove_vertex(&self, vertex: i64) -> GraphResult<()> {
        self.mutate(|g| g.remove_vertex(vertex))
    }

    pub fn resize(&self, size: i64) -> GraphResult<()> {
        self.mutate(|g| g.resize(size))
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}
