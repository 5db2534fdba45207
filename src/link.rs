use std::fmt::{Debug, Display};

use crate::node::*;

/// Links are addressed by their index into the link table of a graph.
pub type LinkId = u32;

/// We limit the number of links to `2^32 - 1`.
pub type NumLinks = u32;

/// Persistent attributes of a link.
///
/// An undirected link is stored once and referenced from the adjacency lists of both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub directed: bool,
    /// Used by all shortest-path computations
    pub length: f64,
    /// Used by spanning trees; may be negative
    pub weight: f64,
    /// `None` while the link is active, otherwise the tick of its deactivation
    pub deactivated_at: Option<Tick>,
    pub betweenness: f64,
    pub closeness: f64,
    pub farness: f64,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            directed: false,
            length: 1.0,
            weight: 1.0,
            deactivated_at: None,
            betweenness: 0.0,
            closeness: 0.0,
            farness: 0.0,
        }
    }
}

impl Link {
    /// Undirected link of unit length and unit weight
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Directed link of unit length and unit weight
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Sets the length used for shortest paths
    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets the weight used for spanning trees
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns *true* if the link has not been deactivated
    #[inline]
    pub fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }
}

/// Entry of an adjacency list: the node on the other end and the link leading there.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Adjacent {
    pub node: Node,
    pub link: LinkId,
}

impl Debug for Adjacent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.node, self.link)
    }
}

/// A link together with both of its endpoints, as produced by
/// [`Graph::source_links`](crate::repr::Graph::source_links).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcedLink {
    pub source: Node,
    pub target: Node,
    pub link: LinkId,
}

impl Display for SourcedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})#{}", self.source, self.target, self.link)
    }
}

impl Debug for SourcedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl SourcedLink {
    /// Returns *true* if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}
