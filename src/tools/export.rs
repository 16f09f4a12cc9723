/// Graph file saver
///
/// Writes the header `<vertexCount> <edgeCount>` followed by one
/// `<source> <destination> <weight>` line per edge, sorted by source and then
/// destination.

use super::{ToolError, ToolResult};
use crate::graph::Graph;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `graph` to any writer
///
/// # Returns
/// * Number of edge lines written
pub fn save_graph<W: Write>(graph: &Graph, mut writer: W) -> ToolResult<usize> {
    writeln!(writer, "{} {}", graph.vertex_count(), graph.edge_count())?;

    let mut written = 0;
    for edge in graph.edges() {
        writeln!(writer, "{}", edge)?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

/// Write `graph` to a file, replacing any existing content
pub fn save_graph_to_file<P: AsRef<Path>>(graph: &Graph, path: P) -> ToolResult<usize> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ToolError::InvalidPath("empty path".to_string()));
    }

    let file = File::create(path)?;
    let written = save_graph(graph, BufWriter::new(file))?;

    info!(
        "Saved graph to {}: {} vertices, {} edges",
        path.display(),
        graph.vertex_count(),
        written
    );

    Ok(written)
}

/// Render `graph` in the file format
pub fn to_text(graph: &Graph) -> String {
    let mut text = format!("{} {}\n", graph.vertex_count(), graph.edge_count());
    for edge in graph.edges() {
        text.push_str(&edge.to_string());
        text.push('\n');
    }
    text
}
