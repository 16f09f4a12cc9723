/// Graph file import and export
///
/// The only persistence format is plain text:
///
/// ```text
/// <vertexCount> <edgeCount>
/// <source> <destination> <weight>
/// ...
/// ```
///
/// Loading collects per-line errors instead of failing fast; saving writes
/// vertices and edges in ascending order so identical graphs produce
/// identical files.

pub mod export;
pub mod import;

pub use export::{save_graph, save_graph_to_file, to_text};
pub use import::{
    load_graph, load_graph_from_file, load_graph_from_str, ImportOptions, ImportStats,
    ImportWarning, LineError,
};

use thiserror::Error;

/// Import/export errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
