/*!
# Node Representation

Nodes are addressed by their index `Node = u32` into the node table of a [`Graph`](crate::repr::Graph).
All attributes that persist between algorithm calls live in [`NodeData`]; per-call working state
(distances, predecessors, tags) lives in caller-owned buffers instead (see [`crate::algo::Workspace`]).
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Identifier of a connected component. Component `0` is always the largest one.
pub type CompId = u32;

/// Simulation time at which a node or link was deactivated.
pub type Tick = u32;

/// Centrality accumulators of a single node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeCentrality {
    /// Number of shortest paths passing through the node (endpoints excluded)
    pub betweenness: f64,
    /// Sum of distances to all other nodes, divided by the number of nodes
    pub closeness: f64,
    /// Sum of distances to all other nodes, divided by the size of the own component
    pub farness: f64,
    /// Fraction of neighbor pairs that are linked themselves
    pub clustering: f64,
    /// Mean degree of the neighbors
    pub avg_neighbor_degree: f64,
}

/// Persistent attributes of a node.
///
/// The payload `P` is an extension point for domain-specific data (coordinates of spatial models,
/// dependency information, ...); no algorithm of this crate inspects it.
#[derive(Debug, Clone)]
pub struct NodeData<P = ()> {
    pub name: String,
    pub coords: Option<[f64; 2]>,
    /// `None` while the node is active, otherwise the tick of its deactivation
    pub deactivated_at: Option<Tick>,
    pub component: Option<CompId>,
    pub component_size: NumNodes,
    pub centrality: NodeCentrality,
    /// `None` if the node is not on any path between the last analysed terminal pair
    pub path_tolerance: Option<f64>,
    pub times_in_giant: u32,
    pub times_on_path: u32,
    pub payload: P,
}

impl<P> NodeData<P> {
    /// Creates an active node without any computed attributes
    pub fn new(name: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            coords: None,
            deactivated_at: None,
            component: None,
            component_size: 0,
            centrality: NodeCentrality::default(),
            path_tolerance: None,
            times_in_giant: 0,
            times_on_path: 0,
            payload,
        }
    }

    /// Returns *true* if the node has not been deactivated
    #[inline]
    pub fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }
}
