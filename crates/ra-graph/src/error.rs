//! Graph-subsystem error type.

use thiserror::Error;

use ra_core::{GeoPoint, NodeId};

/// Errors produced by `ra-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("node {0} declared more than once")]
    DuplicateNode(NodeId),

    #[error("node {id} has invalid coordinate {pos}")]
    InvalidCoordinate { id: NodeId, pos: GeoPoint },

    #[error("edge references unknown node {0}")]
    UnknownNode(NodeId),

    #[error("graph has {0} nodes; at most u32::MAX - 1 are supported")]
    TooLarge(usize),

    #[error("malformed graph file: {0}")]
    Malformed(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
