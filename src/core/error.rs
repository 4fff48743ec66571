/*!
# Unified Error Type

This module provides a single error enum used across the engine: the file
reader, the CLI, the parallel coordinator, and the MST kernels all report
failures through [`MstError`].
*/

use std::fmt;

/// Unified error type for all engine operations.
#[derive(Debug)]
pub enum MstError {
    /// The caller requested an MST for an empty graph.
    EmptyGraph,

    /// An edge referenced a vertex id that is not present in the graph.
    InvalidVertexId { vertex: usize, vertex_count: usize },

    /// The number of edges cannot be distributed across the requested rank
    /// count (see the `scatter` guard in the parallel sort and Borůvka).
    UnsupportedPartition { edge_count: usize, rank_count: usize },

    /// The graph file did not have the shape the reader expects.
    MalformedGraphFile(String),

    /// An unknown CLI flag was supplied.
    UnknownFlag(String),

    /// An unknown algorithm number was supplied to `-a`.
    UnknownAlgorithm(i32),

    /// Wraps an underlying I/O failure.
    Io(String),
}

impl MstError {
    /// Creates a malformed-graph-file error with the given message.
    pub fn malformed_graph_file(message: impl Into<String>) -> Self {
        MstError::MalformedGraphFile(message.into())
    }
}

impl fmt::Display for MstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MstError::EmptyGraph => write!(f, "cannot compute an MST for an empty graph"),
            MstError::InvalidVertexId {
                vertex,
                vertex_count,
            } => write!(
                f,
                "edge references vertex {vertex}, but vertex_count is {vertex_count}"
            ),
            MstError::UnsupportedPartition {
                edge_count,
                rank_count,
            } => write!(
                f,
                "cannot distribute {edge_count} edges across {rank_count} ranks"
            ),
            MstError::MalformedGraphFile(msg) => write!(f, "malformed graph file: {msg}"),
            MstError::UnknownFlag(flag) => write!(f, "unknown flag: {flag}"),
            MstError::UnknownAlgorithm(n) => write!(f, "unknown algorithm number: {n}"),
            MstError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for MstError {}

impl From<std::io::Error> for MstError {
    fn from(e: std::io::Error) -> Self {
        MstError::Io(e.to_string())
    }
}

impl From<std::num::ParseIntError> for MstError {
    fn from(e: std::num::ParseIntError) -> Self {
        MstError::malformed_graph_file(e.to_string())
    }
}
