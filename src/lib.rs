/// Isochrone Graph
///
/// An in-memory directed, weighted graph with single-source shortest paths
/// (Dijkstra) and isochrones: the set of vertices reachable from a source
/// within a maximum total weight.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │              graph_cli / Session                 │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Config (.env + environment)  │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                  │
/// │  ┌────────────────────────────────┐              │
/// │  │   Algorithms (Dijkstra,        │              │
/// │  │   isochrones, rayon fan-out)   │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                  │
/// │  ┌────────────────────────────────┐              │
/// │  │   Graph (BTreeMap adjacency)   │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                  │
/// │  ┌────────────────────────────────┐              │
/// │  │   Text file import / export    │              │
/// │  └────────────────────────────────┘              │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Core data types (VertexId, Edge, WeightedPath)
/// - `graph`: Graph structure, invariants and the shared handle
/// - `algorithms`: Shortest paths and isochrones
/// - `tools`: Graph file loading and saving
/// - `config`: Environment configuration and logging setup
/// - `session`: Owner of the active graph and its last query result

pub mod types;
pub mod graph;
pub mod algorithms;
pub mod tools;
pub mod config;
pub mod session;

// Re-export commonly used types
pub use types::{Edge, VertexId, VertexIdError, Weight, WeightedPath};

// Re-export graph types
pub use graph::{ErrorKind, Graph, GraphError, GraphResult, SharedGraph};

// Re-export algorithm types
pub use algorithms::{
    isochrone, isochrone_from, shortest_path, shortest_path_with, AlgorithmError,
    AlgorithmResult, Distance, Isochrone, ShortestPathOptions, ShortestPathResult,
    ShortestPathStrategy,
};

// Re-export tool types
pub use tools::{
    load_graph, load_graph_from_file, save_graph, save_graph_to_file, to_text, ImportOptions,
    ImportStats, ToolError, ToolResult,
};

pub use config::{Config, ConfigError};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
