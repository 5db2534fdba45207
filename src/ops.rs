use std::ops::Range;

use crate::{link::*, node::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over all node indices.
    /// In contrast to iterating the node table, the range does not borrow `self`.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no links)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the link-size of a graph
pub trait GraphLinkOrder {
    /// Returns the number of links of the graph; an undirected link counts once
    fn number_of_links(&self) -> NumLinks;
}

/// Which adjacency list a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Follow outgoing links
    #[default]
    Forward,
    /// Follow incoming links, i.e. compute distances *towards* the source
    Backward,
}

/// Read access to the node/link model that every algorithm of this crate is written against.
///
/// Each node has an outgoing and an incoming adjacency list. An undirected link `{u, v}` appears
/// in the outgoing and incoming lists of both `u` and `v`, whereas a directed link `(u, v)` appears
/// only in the outgoing list of `u` and the incoming list of `v`.
pub trait LinkedAdjacency: GraphNodeOrder + GraphLinkOrder {
    /// Returns the outgoing adjacency list of `u`.
    /// ** Panics if `u >= n` **
    fn out_links_of(&self, u: Node) -> &[Adjacent];

    /// Returns the incoming adjacency list of `u`; entries name the *source* of each link.
    /// ** Panics if `u >= n` **
    fn in_links_of(&self, u: Node) -> &[Adjacent];

    /// Returns the adjacency list of `u` that a traversal in `direction` follows
    fn links_of(&self, u: Node, direction: Direction) -> &[Adjacent] {
        match direction {
            Direction::Forward => self.out_links_of(u),
            Direction::Backward => self.in_links_of(u),
        }
    }

    /// Returns the attributes of a link.
    /// ** Panics if `id >= m` **
    fn link(&self, id: LinkId) -> &Link;

    /// Returns *true* if `u` has not been deactivated
    fn is_node_active(&self, u: Node) -> bool;

    /// Returns *true* if the link has not been deactivated
    fn is_link_active(&self, id: LinkId) -> bool {
        self.link(id).is_active()
    }

    /// Returns *true* if both the link and the node it leads to are active
    fn is_adjacent_active(&self, adj: Adjacent) -> bool {
        self.is_link_active(adj.link) && self.is_node_active(adj.node)
    }

    /// Returns the component id last assigned to `u`, if any
    fn component_of(&self, u: Node) -> Option<CompId>;

    /// Returns the size of the component last assigned to `u` (`0` if none was assigned)
    fn component_size_of(&self, u: Node) -> NumNodes;

    /// Returns the number of outgoing adjacency entries of `u`
    fn out_degree_of(&self, u: Node) -> NumNodes {
        self.out_links_of(u).len() as NumNodes
    }

    /// Returns the number of incoming adjacency entries of `u`
    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_links_of(u).len() as NumNodes
    }

    /// Returns the link from `u` to `v` if present (the first one for multi-links)
    fn find_link(&self, u: Node, v: Node) -> Option<LinkId> {
        self.out_links_of(u)
            .iter()
            .find(|adj| adj.node == v)
            .map(|adj| adj.link)
    }

    /// Restricts `nodes` to those assigned to `component`; `None` keeps all of them
    fn nodes_in_component(&self, nodes: &[Node], component: Option<CompId>) -> Vec<Node> {
        match component {
            None => nodes.to_vec(),
            Some(c) => nodes
                .iter()
                .copied()
                .filter(|&u| self.component_of(u) == Some(c))
                .collect(),
        }
    }

    /// Returns *true* if a directed link joins two nodes of `nodes`. With `active_only`, only
    /// active links between active nodes are considered.
    fn has_directed_links(&self, nodes: &[Node], active_only: bool) -> bool {
        let mut in_scope = self.vertex_bitset_unset();
        for &u in nodes {
            in_scope.set_bit(u);
        }

        nodes.iter().any(|&u| {
            (!active_only || self.is_node_active(u))
                && self.out_links_of(u).iter().any(|&adj| {
                    self.link(adj.link).directed
                        && in_scope.get_bit(adj.node)
                        && (!active_only || self.is_adjacent_active(adj))
                })
        })
    }
}
