//! Error types shared by all algorithms.

use thiserror::Error;

use crate::node::Node;

/// All errors an algorithm call can end with.
///
/// Every error aborts the computation it was raised in; working state written so far is unspecified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A distance-based aggregate found a node it cannot reach.
    #[error("The graph/component is not connected: node {unreachable} is unreachable from node {from}")]
    NotConnected { from: Node, unreachable: Node },

    /// Like [`GraphError::NotConnected`] for scopes containing directed links.
    #[error("The graph/component is not strongly connected: node {unreachable} is unreachable from node {from}")]
    NotStronglyConnected { from: Node, unreachable: Node },

    /// Relaxation did not converge or produced a negative self-distance.
    #[error("Negative cycle reachable from node {0}")]
    NegativeCycle(Node),

    /// Strict BFS found a label that contradicts the assumption of uniform link lengths.
    #[error("Inconsistent link lengths: node {node} improved from {labeled} to {improved} after being finalized")]
    InconsistentEdgeLength {
        node: Node,
        labeled: f64,
        improved: f64,
    },

    /// A spanning tree could not connect all nodes.
    #[error("The graph is disconnected: spanning tree has {edges} edges, {required} are required")]
    DisconnectedGraph { edges: usize, required: usize },

    /// The requested node set (after component filtering) is empty.
    #[error("The requested node set is empty")]
    EmptyNodeSet,

    /// An algorithm name could not be parsed.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Convenience result type for graph algorithms.
pub type Result<T> = std::result::Result<T, GraphError>;
