/// Shortest path algorithms
///
/// Implements Dijkstra's label-setting algorithm for single-source shortest
/// paths over non-negative weights. Two frontier strategies are available and
/// produce identical results:
/// - `LinearScan`: scans every unsettled vertex for the minimum, O(V^2)
/// - `BinaryHeap`: lazy-deletion min-heap, O((V + E) log V)
///
/// Both select the unsettled vertex with the smallest `(distance, id)` pair,
/// so ties are broken towards the lowest vertex id.

use super::{AlgorithmError, AlgorithmResult};
use crate::graph::Graph;
use crate::types::{Edge, VertexId, WeightedPath, Weight};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Distance label of a vertex
///
/// Every finite distance orders before `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "Option<u64>", from = "Option<u64>")]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Finite value, if any
    pub fn value(&self) -> Option<u64> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Unreachable => None,
        }
    }

    /// Extend the distance by one edge; saturates instead of overflowing
    pub fn plus(self, weight: Weight) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d.saturating_add(weight)),
            Distance::Unreachable => Distance::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Unreachable => write!(f, "∞"),
        }
    }
}

impl From<Distance> for Option<u64> {
    fn from(distance: Distance) -> Self {
        distance.value()
    }
}

impl From<Option<u64>> for Distance {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Distance::Unreachable, Distance::Finite)
    }
}

/// Frontier data structure used to pick the next vertex to settle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortestPathStrategy {
    /// Full frontier scan per extraction
    #[default]
    LinearScan,
    /// Min-heap keyed by (distance, id)
    BinaryHeap,
}

impl FromStr for ShortestPathStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear-scan" | "linear" | "scan" => Ok(ShortestPathStrategy::LinearScan),
            "binary-heap" | "heap" => Ok(ShortestPathStrategy::BinaryHeap),
            other => Err(format!(
                "unknown shortest path strategy '{}' (expected linear-scan or binary-heap)",
                other
            )),
        }
    }
}

impl fmt::Display for ShortestPathStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortestPathStrategy::LinearScan => write!(f, "linear-scan"),
            ShortestPathStrategy::BinaryHeap => write!(f, "binary-heap"),
        }
    }
}

/// Shortest path options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestPathOptions {
    pub strategy: ShortestPathStrategy,
    /// Record a distance snapshot every time a vertex is settled
    pub record_steps: bool,
}

/// Distance table after a vertex was settled and its edges relaxed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettleStep {
    pub vertex: VertexId,
    pub distances: BTreeMap<VertexId, Distance>,
}

/// Result of a single-source shortest path computation
///
/// A snapshot of the graph at query time: later mutations of the graph are
/// not reflected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPathResult {
    /// Source vertex of the query
    pub source: VertexId,
    /// Distance label for every vertex of the graph
    pub distances: BTreeMap<VertexId, Distance>,
    /// Predecessor on a shortest path; `None` for the source and unreachable vertices
    pub predecessors: BTreeMap<VertexId, Option<VertexId>>,
    /// Settlement trace, empty unless requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<SettleStep>,
}

impl ShortestPathResult {
    /// Distance of `vertex`, or `None` if it was not part of the graph
    pub fn distance(&self, vertex: i64) -> Option<Distance> {
        VertexId::try_from(vertex)
            .ok()
            .and_then(|id| self.distances.get(&id).copied())
    }

    /// Predecessor of `vertex` on a shortest path
    pub fn predecessor(&self, vertex: i64) -> Option<VertexId> {
        VertexId::try_from(vertex)
            .ok()
            .and_then(|id| self.predecessors.get(&id).copied().flatten())
    }

    pub fn is_reachable(&self, vertex: i64) -> bool {
        self.distance(vertex).is_some_and(|d| d.is_finite())
    }

    /// Reachable vertices with their distances, in ascending id order
    pub fn reachable(&self) -> impl Iterator<Item = (VertexId, u64)> + '_ {
        self.distances
            .iter()
            .filter_map(|(id, d)| d.value().map(|d| (*id, d)))
    }

    /// Rebuild the shortest path from the source to `vertex`
    ///
    /// Edge weights are recovered from the distance labels, which differ by
    /// exactly the edge weight along a predecessor link.
    pub fn path_to(&self, vertex: i64) -> Option<WeightedPath> {
        let target = VertexId::try_from(vertex).ok()?;
        self.distances.get(&target)?.value()?;

        let mut chain = vec![target];
        let mut current = target;
        while current != self.source {
            // Guard against a malformed predecessor map
            if chain.len() > self.distances.len() {
                return None;
            }
            current = self.predecessors.get(&current).copied().flatten()?;
            chain.push(current);
        }
        chain.reverse();

        let mut path = WeightedPath::new(self.source);
        for pair in chain.windows(2) {
            let from = self.distances.get(&pair[0])?.value()?;
            let to = self.distances.get(&pair[1])?.value()?;
            path.push(Edge::new(pair[0], pair[1], to.checked_sub(from)?)).ok()?;
        }
        Some(path)
    }
}

/// Node in the priority queue
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct FrontierEntry {
    vertex: VertexId,
    cost: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap, lowest id first on ties
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distance and predecessor labels during a run
struct Labels {
    distances: BTreeMap<VertexId, Distance>,
    predecessors: BTreeMap<VertexId, Option<VertexId>>,
    steps: Vec<SettleStep>,
    record_steps: bool,
}

impl Labels {
    fn new(graph: &Graph, source: VertexId, record_steps: bool) -> Self {
        let mut distances: BTreeMap<VertexId, Distance> = graph
            .vertices()
            .map(|v| (v, Distance::Unreachable))
            .collect();
        distances.insert(source, Distance::ZERO);

        Self {
            predecessors: graph.vertices().map(|v| (v, None)).collect(),
            distances,
            steps: Vec::new(),
            record_steps,
        }
    }

    fn distance(&self, vertex: VertexId) -> Distance {
        self.distances
            .get(&vertex)
            .copied()
            .unwrap_or(Distance::Unreachable)
    }

    /// Try to improve `to` through `from`; true if the label changed
    fn relax(&mut self, from: VertexId, to: VertexId, weight: Weight) -> bool {
        let candidate = self.distance(from).plus(weight);
        let current = self.distance(to);
        if candidate < current {
            debug!("Updating distance of vertex {} from {} to {}", to, current, candidate);
            self.distances.insert(to, candidate);
            self.predecessors.insert(to, Some(from));
            true
        } else {
            false
        }
    }

    fn record_step(&mut self, vertex: VertexId) {
        if self.record_steps {
            self.steps.push(SettleStep {
                vertex,
                distances: self.distances.clone(),
            });
        }
    }

    fn into_result(self, source: VertexId) -> ShortestPathResult {
        ShortestPathResult {
            source,
            distances: self.distances,
            predecessors: self.predecessors,
            steps: self.steps,
        }
    }
}

/// Shortest paths from `source` to every vertex, with default options
///
/// # Errors
/// * `AlgorithmError::VertexNotFound` if `source` is not a vertex of the graph
pub fn shortest_path(graph: &Graph, source: i64) -> AlgorithmResult<ShortestPathResult> {
    shortest_path_with(graph, source, &ShortestPathOptions::default())
}

/// Shortest paths from `source` to every vertex
///
/// Unreachable vertices are part of the result with `Distance::Unreachable`
/// and no predecessor; disconnection is never an error.
///
/// # Errors
/// * `AlgorithmError::VertexNotFound` if `source` is not a vertex of the graph
pub fn shortest_path_with(
    graph: &Graph,
    source: i64,
    options: &ShortestPathOptions,
) -> AlgorithmResult<ShortestPathResult> {
    let source_id = VertexId::try_from(source)
        .ok()
        .filter(|id| graph.adjacency().contains_key(id))
        .ok_or(AlgorithmError::VertexNotFound(source))?;

    let result = dijkstra(graph, source_id, options);

    info!(
        "Shortest paths from {} ({}): {} of {} vertices reachable",
        source_id,
        options.strategy,
        result.reachable().count(),
        graph.vertex_count()
    );
    Ok(result)
}

/// Dijkstra's algorithm over a source known to be in the graph
fn dijkstra(graph: &Graph, source: VertexId, options: &ShortestPathOptions) -> ShortestPathResult {
    let mut labels = Labels::new(graph, source, options.record_steps);

    match options.strategy {
        ShortestPathStrategy::LinearScan => linear_scan(graph, &mut labels),
        ShortestPathStrategy::BinaryHeap => binary_heap(graph, source, &mut labels),
    }

    labels.into_result(source)
}

fn linear_scan(graph: &Graph, labels: &mut Labels) {
    let mut frontier: BTreeSet<VertexId> = graph.vertices().collect();

    // Stops once the frontier is empty or only unreachable vertices remain
    while let Some(current) = frontier
        .iter()
        .map(|v| (labels.distance(*v), *v))
        .min()
        .filter(|(d, _)| d.is_finite())
        .map(|(_, v)| v)
    {
        frontier.remove(&current);

        for (&neighbor, &weight) in graph.adjacency().get(&current).into_iter().flatten() {
            if frontier.contains(&neighbor) {
                labels.relax(current, neighbor, weight);
            }
        }
        labels.record_step(current);
    }
}

fn binary_heap(graph: &Graph, source: VertexId, labels: &mut Labels) {
    let mut heap = BinaryHeap::new();
    let mut settled: BTreeSet<VertexId> = BTreeSet::new();

    heap.push(FrontierEntry {
        vertex: source,
        cost: 0,
    });

    while let Some(FrontierEntry { vertex, cost }) = heap.pop() {
        // Skip entries superseded by a later improvement
        if settled.contains(&vertex) || labels.distance(vertex) != Distance::Finite(cost) {
            continue;
        }

        settled.insert(vertex);

        for (&neighbor, &weight) in graph.adjacency().get(&vertex).into_iter().flatten() {
            if settled.contains(&neighbor) {
                continue;
            }
            if labels.relax(vertex, neighbor, weight) {
                if let Distance::Finite(cost) = labels.distance(neighbor) {
                    heap.push(FrontierEntry {
                        vertex: neighbor,
                        cost,
                    });
                }
            }
        }
        labels.record_step(vertex);
    }
}
