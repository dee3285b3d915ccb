use thiserror::Error;

/// Errors reported by graph construction and the flow solvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    InvalidNode { node: usize, node_count: usize },

    #[error("source and sink are the same node ({0})")]
    SourceIsSink(usize),

    #[error("edge {from} -> {to} has a negative capacity")]
    NegativeCapacity { from: usize, to: usize },

    #[error("insufficient residual capacity on {from} -> {to}")]
    InsufficientCapacity { from: usize, to: usize },

    #[error("residual graph contains a negative cost cycle")]
    NegativeCycle,

    #[error("edge {edge} carries more flow than its capacity")]
    CapacityExceeded { edge: usize },

    #[error("flow is not conserved at node {node}")]
    Unbalanced { node: usize },

    #[error("capacity matrix is not square: row {row} has {len} entries, expected {expected}")]
    MalformedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, FlowError>;
