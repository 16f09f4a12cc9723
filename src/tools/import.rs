/// Graph file loader
///
/// Line 1 is the header `<vertexCount> <edgeCount>`. It is informational only:
/// a missing, malformed or inaccurate header produces a warning, never a
/// failure. Every following non-empty line must be `<source> <destination>
/// <weight>`; endpoints are created on demand. Lines that cannot be applied are
/// skipped and recorded in `ImportStats`, and loading continues.

use super::ToolResult;
use crate::graph::Graph;
use crate::types::VertexId;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Import options
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Maximum number of line errors kept in `ImportStats::errors`
    ///
    /// Lines beyond the cap are still skipped and counted.
    pub max_errors: Option<usize>,
}

/// A data line that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineError {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ('{}')", self.line, self.reason, self.content)
    }
}

/// Header problems; reported, never fatal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImportWarning {
    MissingHeader,
    MalformedHeader(String),
    HeaderMismatch {
        declared_vertices: usize,
        declared_edges: usize,
        vertices: usize,
        edges: usize,
    },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::MissingHeader => write!(f, "file has no header line"),
            ImportWarning::MalformedHeader(line) => write!(f, "malformed header '{}'", line),
            ImportWarning::HeaderMismatch {
                declared_vertices,
                declared_edges,
                vertices,
                edges,
            } => write!(
                f,
                "header declares {} vertices and {} edges, loaded {} and {}",
                declared_vertices, declared_edges, vertices, edges
            ),
        }
    }
}

/// Import statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    /// Counts declared by the header, if it parsed
    pub header: Option<(usize, usize)>,
    pub vertices_created: usize,
    pub edges_imported: usize,
    pub lines_skipped: usize,
    pub errors: Vec<LineError>,
    pub warnings: Vec<ImportWarning>,
}

impl ImportStats {
    fn skip_line(&mut self, line: usize, content: &str, reason: String, options: &ImportOptions) {
        warn!("Skipping line {}: {} ('{}')", line, reason, content);
        self.lines_skipped += 1;
        if options.max_errors.map_or(true, |max| self.errors.len() < max) {
            self.errors.push(LineError {
                line,
                content: content.to_string(),
                reason,
            });
        }
    }

    fn add_warning(&mut self, warning: ImportWarning) {
        warn!("Graph file header: {}", warning);
        self.warnings.push(warning);
    }

    /// True when every data line was applied and the header was accurate
    pub fn is_clean(&self) -> bool {
        self.lines_skipped == 0 && self.warnings.is_empty()
    }
}

/// Load a graph from any buffered reader
///
/// Only I/O failures are returned as errors; bad lines end up in the stats.
pub fn load_graph<R: BufRead>(reader: R, options: &ImportOptions) -> ToolResult<(Graph, ImportStats)> {
    let mut graph = Graph::new();
    let mut stats = ImportStats::default();
    let mut saw_header = false;

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line_number = index + 1;

        // Undecodable bytes make the line malformed, not the whole file
        let (line, valid_utf8) = match String::from_utf8(raw) {
            Ok(line) => (line, true),
            Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), false),
        };
        let content = line.trim();

        if !saw_header {
            saw_header = true;
            match parse_header(content).filter(|_| valid_utf8) {
                Some(counts) => stats.header = Some(counts),
                None => stats.add_warning(ImportWarning::MalformedHeader(content.to_string())),
            }
            continue;
        }

        if content.is_empty() {
            continue;
        }

        let applied = if valid_utf8 {
            apply_edge_line(&mut graph, content)
        } else {
            Err("invalid UTF-8".to_string())
        };
        if let Err(reason) = applied {
            stats.skip_line(line_number, content, reason, options);
            continue;
        }
        stats.edges_imported += 1;
    }

    if !saw_header {
        stats.add_warning(ImportWarning::MissingHeader);
    }

    if let Some((declared_vertices, declared_edges)) = stats.header {
        if declared_vertices != graph.vertex_count() || declared_edges != graph.edge_count() {
            stats.add_warning(ImportWarning::HeaderMismatch {
                declared_vertices,
                declared_edges,
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
            });
        }
    }

    stats.vertices_created = graph.vertex_count();

    info!(
        "Loaded graph: {} vertices, {} edges, {} lines skipped",
        graph.vertex_count(),
        graph.edge_count(),
        stats.lines_skipped
    );

    Ok((graph, stats))
}

/// Load a graph from in-memory text
pub fn load_graph_from_str(text: &str, options: &ImportOptions) -> ToolResult<(Graph, ImportStats)> {
    load_graph(text.as_bytes(), options)
}

/// Load a graph from a file
pub fn load_graph_from_file<P: AsRef<Path>>(
    path: P,
    options: &ImportOptions,
) -> ToolResult<(Graph, ImportStats)> {
    let file = File::open(path.as_ref())?;
    info!("Loading graph from {}", path.as_ref().display());
    load_graph(BufReader::new(file), options)
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let vertices = parts.next()?.parse().ok()?;
    let edges = parts.next()?.parse().ok()?;
    match parts.next() {
        Some(_) => None,
        None => Some((vertices, edges)),
    }
}

/// Apply one data line; on failure the graph is left as the reason describes
///
/// Endpoints are created before the edge is checked, so a line rejected for
/// being a self-loop or a duplicate still introduces its vertices.
fn apply_edge_line(graph: &mut Graph, content: &str) -> Result<(), String> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 fields, found {}", parts.len()));
    }

    let mut values = [0i64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("'{}' is not an integer", part))?;
    }
    let [source, destination, weight] = values;

    if weight < 0 {
        return Err(format!("negative weight {}", weight));
    }
    for id in [source, destination] {
        VertexId::try_from(id).map_err(|e| e.to_string())?;
    }

    graph.add_vertex(source).map_err(|e| e.to_string())?;
    graph.add_vertex(destination).map_err(|e| e.to_string())?;
    graph
        .add_edge(source, destination, weight)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(text: &str) -> (Graph, ImportStats) {
        load_graph_from_str(text, &ImportOptions::default()).unwrap()
    }

    #[test]
    fn test_load_basic() {
        let (graph, stats) = load("3 3\n0 1 5\n1 2 3\n0 2 10\n");

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_weight(0, 2).unwrap(), 10);
        assert_eq!(stats.header, Some((3, 3)));
        assert_eq!(stats.edges_imported, 3);
        assert_eq!(stats.vertices_created, 3);
        assert!(stats.is_clean());
    }

    #[test]
    fn test_load_skips_blank_lines_and_extra_whitespace() {
        let (graph, stats) = load("2 1\n\n   \n  4\t7   2  \n\n");

        assert_eq!(graph.edge_weight(4, 7).unwrap(), 2);
        assert_eq!(stats.lines_skipped, 0);
    }

    #[test]
    fn test_load_collects_malformed_lines() {
        let text = "4 4\n1 2 3\n1 2\nfoo bar baz\n2 3 -4\n1 2 3 4\n3 4 1\n";
        let (graph, stats) = load(text);

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(3, 4));
        assert_eq!(stats.lines_skipped, 4);

        let lines: Vec<usize> = stats.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert!(stats.errors[2].reason.contains("negative weight"));
        assert_eq!(stats.errors[1].content, "foo bar baz");
    }

    #[test]
    fn test_load_negative_weight_creates_no_vertices() {
        let (graph, _) = load("0 0\n8 9 -1\n");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_load_negative_vertex_id() {
        let (graph, stats) = load("1 0\n-1 2 5\n");

        assert!(graph.is_empty());
        assert_eq!(stats.lines_skipped, 1);
    }

    #[test]
    fn test_load_duplicate_edge_first_wins() {
        let (graph, stats) = load("2 1\n1 2 3\n1 2 9\n");

        assert_eq!(graph.edge_weight(1, 2).unwrap(), 3);
        assert_eq!(stats.lines_skipped, 1);
        assert!(stats.errors[0].reason.contains("already exists"));
    }

    #[test]
    fn test_load_self_loop_keeps_vertex() {
        let (graph, stats) = load("1 0\n5 5 1\n");

        assert!(graph.contains_vertex(5));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(stats.lines_skipped, 1);
    }

    #[test]
    fn test_load_header_mismatch_is_warning() {
        let (graph, stats) = load("10 20\n1 2 3\n");

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            stats.warnings,
            vec![ImportWarning::HeaderMismatch {
                declared_vertices: 10,
                declared_edges: 20,
                vertices: 2,
                edges: 1,
            }]
        );
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_load_malformed_header() {
        let (graph, stats) = load("vertices edges\n1 2 3\n");

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(stats.header, None);
        assert_eq!(
            stats.warnings,
            vec![ImportWarning::MalformedHeader("vertices edges".to_string())]
        );
    }

    #[test]
    fn test_load_empty_input() {
        let (graph, stats) = load("");

        assert!(graph.is_empty());
        assert_eq!(stats.warnings, vec![ImportWarning::MissingHeader]);
    }

    #[test]
    fn test_load_skips_invalid_utf8_line() {
        let bytes: &[u8] = b"3 2\n0 1 5\n\xff\xfe garbage\n1 2 3\n";
        let (graph, stats) = load_graph(bytes, &ImportOptions::default()).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight(1, 2).unwrap(), 3);
        assert_eq!(stats.lines_skipped, 1);
        assert_eq!(stats.errors[0].line, 3);
        assert_eq!(stats.errors[0].reason, "invalid UTF-8");
        assert!(stats.warnings.is_empty());
    }

    #[test]
    fn test_load_invalid_utf8_header() {
        let bytes: &[u8] = b"\xff 1\n0 1 5\r\n";
        let (graph, stats) = load_graph(bytes, &ImportOptions::default()).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(stats.header, None);
        assert!(matches!(stats.warnings[0], ImportWarning::MalformedHeader(_)));
    }

    #[test]
    fn test_load_max_errors() {
        let options = ImportOptions {
            max_errors: Some(2),
        };
        let (_, stats) = load_graph_from_str("0 0\nx\ny\nz\n", &options).unwrap();

        assert_eq!(stats.lines_skipped, 3);
        assert_eq!(stats.errors.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.txt");
        std::fs::write(&path, "2 1\n0 1 7\n").unwrap();

        let (graph, stats) = load_graph_from_file(&path, &ImportOptions::default()).unwrap();

        assert_eq!(graph.edge_weight(0, 1).unwrap(), 7);
        assert!(stats.is_clean());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_graph_from_file(temp_dir.path().join("nope.txt"), &ImportOptions::default());

        assert!(matches!(result, Err(super::super::ToolError::IoError(_))));
    }
}
