/// Interactive session state
///
/// A `Session` owns the active graph, the file it came from, and the last
/// shortest path result. Mutating the graph drops the cached result, since a
/// result is a snapshot of the graph at query time.

use crate::algorithms::{
    isochrone, shortest_path_with, AlgorithmError, AlgorithmResult, Isochrone,
    ShortestPathResult,
};
use crate::config::Config;
use crate::graph::{Graph, GraphResult};
use crate::tools::{
    load_graph_from_file, save_graph_to_file, ImportStats, ToolError, ToolResult,
};
use crate::types::{VertexId, Weight};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Session {
    graph: Graph,
    path: Option<PathBuf>,
    config: Config,
    last_result: Option<ShortestPathResult>,
}

impl Session {
    /// Start with an empty graph
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_graph(graph: Graph, config: Config) -> Self {
        Self {
            graph,
            config,
            ..Default::default()
        }
    }

    /// Start from a graph file
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> ToolResult<(Self, ImportStats)> {
        let mut session = Self::new(config);
        let stats = session.load(path)?;
        Ok((session, stats))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// File the graph was loaded from or last saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn last_result(&self) -> Option<&ShortestPathResult> {
        self.last_result.as_ref()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    // Mutations. A failed mutation leaves the graph, and so the cache, unchanged.

    pub fn add_vertex(&mut self, vertex: i64) -> GraphResult<VertexId> {
        let id = self.graph.add_vertex(vertex)?;
        self.invalidate();
        Ok(id)
    }

    pub fn add_edge(&mut self, source: i64, destination: i64, weight: i64) -> GraphResult<()> {
        self.graph.add_edge(source, destination, weight)?;
        self.invalidate();
        Ok(())
    }

    pub fn remove_edge(&mut self, source: i64, destination: i64) -> GraphResult<Weight> {
        let weight = self.graph.remove_edge(source, destination)?;
        self.invalidate();
        Ok(weight)
    }

    pub fn remove_vertex(&mut self, vertex: i64) -> GraphResult<()> {
        self.graph.remove_vertex(vertex)?;
        self.invalidate();
        Ok(())
    }

    pub fn resize(&mut self, size: i64) -> GraphResult<()> {
        self.graph.resize(size)?;
        self.invalidate();
        Ok(())
    }

    /// Run a shortest path query and keep its result
    pub fn shortest_path(&mut self, source: i64) -> AlgorithmResult<&ShortestPathResult> {
        let result = shortest_path_with(&self.graph, source, &self.config.algorithm.options())?;
        Ok(self.last_result.insert(result))
    }

    /// Isochrone around `source`, reusing the cached result when it has the same source
    pub fn isochrone(&mut self, source: i64, max_distance: i64) -> AlgorithmResult<Isochrone> {
        if max_distance < 0 {
            return Err(AlgorithmError::InvalidThreshold(max_distance));
        }

        if self.has_result_for(source) {
            debug!("Reusing shortest path result from {}", source);
        } else {
            self.shortest_path(source)?;
        }

        let result = self
            .last_result
            .as_ref()
            .ok_or(AlgorithmError::VertexNotFound(source))?;
        isochrone(result, max_distance)
    }

    fn has_result_for(&self, source: i64) -> bool {
        match (&self.last_result, VertexId::try_from(source)) {
            (Some(result), Ok(id)) => result.source == id,
            _ => false,
        }
    }

    /// Replace the graph with the content of `path`
    ///
    /// The current graph is kept if the file cannot be read.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> ToolResult<ImportStats> {
        let path = path.as_ref();
        let (graph, stats) = load_graph_from_file(path, &self.config.io.import_options())?;

        self.graph = graph;
        self.path = Some(path.to_path_buf());
        self.invalidate();

        info!(
            "Session graph loaded from {} ({} lines skipped)",
            path.display(),
            stats.lines_skipped
        );
        Ok(stats)
    }

    /// Save back to the file the graph came from
    pub fn save(&self) -> ToolResult<usize> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| ToolError::InvalidPath("session has no file path".to_string()))?;
        save_graph_to_file(&self.graph, path)
    }

    /// Save to `path` and remember it for later saves
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> ToolResult<usize> {
        let written = save_graph_to_file(&self.graph, path.as_ref())?;
        self.path = Some(path.as_ref().to_path_buf());
        Ok(written)
    }

    fn invalidate(&mut self) {
        if self.last_result.take().is_some() {
            debug!("Graph changed, dropping cached shortest path result");
        }
    }
}
