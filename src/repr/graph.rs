use std::ops::Range;

use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;

/// Mutable network of named nodes and attributed links.
///
/// Nodes and links are never removed; instead they are *deactivated* (see [`Graph::deactivate_node`])
/// and skipped by algorithms that are asked to consider active elements only.
#[derive(Clone, Debug)]
pub struct Graph<P = ()> {
    nodes: Vec<NodeData<P>>,
    links: Vec<Link>,
    out_links: Vec<Adjacency>,
    in_links: Vec<Adjacency>,
    names: FxHashMap<String, Node>,
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Graph<P> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            out_links: Vec::new(),
            in_links: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    /// Creates an empty graph with space for `n` nodes and `m` links
    pub fn with_capacity(n: usize, m: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            links: Vec::with_capacity(m),
            out_links: Vec::with_capacity(n),
            in_links: Vec::with_capacity(n),
            names: FxHashMap::default(),
        }
    }

    /// Adds a node with the given payload and returns its index.
    /// If the name is already taken, lookups by name return the new node afterwards.
    pub fn add_node_with(&mut self, name: impl Into<String>, payload: P) -> Node {
        let u = self.nodes.len() as Node;
        assert!(u < INVALID_NODE);

        let data = NodeData::new(name, payload);
        self.names.insert(data.name.clone(), u);
        self.nodes.push(data);
        self.out_links.push(Adjacency::new());
        self.in_links.push(Adjacency::new());
        u
    }

    /// Adds a node with a default payload and returns its index
    pub fn add_node(&mut self, name: impl Into<String>) -> Node
    where
        P: Default,
    {
        self.add_node_with(name, P::default())
    }

    /// Adds `n` nodes named after their index and returns the range of new indices
    pub fn add_nodes(&mut self, n: NumNodes) -> Range<Node>
    where
        P: Default,
    {
        let first = self.number_of_nodes();
        for u in first..first + n {
            self.add_node(u.to_string());
        }
        first..first + n
    }

    /// Adds a link from `u` to `v` and returns its id.
    /// Multi-links and self-loops are allowed; an undirected self-loop is stored once per list.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_link(&mut self, u: Node, v: Node, data: Link) -> LinkId {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());

        let id = self.links.len() as LinkId;
        let directed = data.directed;
        self.links.push(data);

        self.out_links[u as usize].push(Adjacent { node: v, link: id });
        self.in_links[v as usize].push(Adjacent { node: u, link: id });
        if !directed && u != v {
            self.out_links[v as usize].push(Adjacent { node: u, link: id });
            self.in_links[u as usize].push(Adjacent { node: v, link: id });
        }
        id
    }

    /// Adds an undirected link of unit length and unit weight
    pub fn add_unit_link(&mut self, u: Node, v: Node) -> LinkId {
        self.add_link(u, v, Link::undirected())
    }

    /// Adds undirected links of unit length and unit weight
    pub fn add_unit_links(&mut self, links: impl IntoIterator<Item = (Node, Node)>) {
        for (u, v) in links {
            self.add_unit_link(u, v);
        }
    }

    /// Returns the first link `(v, u)` in the incoming list of `u`
    pub fn find_in_link(&self, u: Node, v: Node) -> Option<LinkId> {
        self.in_links[u as usize].find(v)
    }

    /// Returns the node registered under `name`
    pub fn node_by_name(&self, name: &str) -> Option<Node> {
        self.names.get(name).copied()
    }

    /// ** Panics if `u >= n` **
    pub fn node(&self, u: Node) -> &NodeData<P> {
        &self.nodes[u as usize]
    }

    /// ** Panics if `u >= n` **
    pub fn node_mut(&mut self, u: Node) -> &mut NodeData<P> {
        &mut self.nodes[u as usize]
    }

    /// Returns the node table
    pub fn nodes(&self) -> &[NodeData<P>] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [NodeData<P>] {
        &mut self.nodes
    }

    /// ** Panics if `id >= m` **
    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id as usize]
    }

    /// Returns the link table
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    /// Returns all node indices as a vector; convenient as scope argument of algorithms
    pub fn all_nodes(&self) -> Vec<Node> {
        self.vertices_range().collect_vec()
    }

    /// Returns every link once together with its endpoints.
    /// Directed links are reported as stored; undirected links from their smaller endpoint.
    pub fn source_links(&self, active_only: bool) -> Vec<SourcedLink> {
        self.source_links_of(&self.all_nodes(), active_only)
    }

    /// Like [`Graph::source_links`], sorted by increasing weight
    pub fn links_sorted_by_weight(&self, active_only: bool) -> Vec<SourcedLink> {
        let mut links = self.source_links(active_only);
        links.sort_by(|a, b| {
            self.link(a.link)
                .weight
                .total_cmp(&self.link(b.link).weight)
        });
        links
    }

    /// Returns the number of active outgoing links of `u` that lead to active nodes
    pub fn number_of_active_links_of(&self, u: Node) -> NumNodes {
        self.out_links_of(u)
            .iter()
            .filter(|&&adj| self.is_adjacent_active(adj))
            .count() as NumNodes
    }

    /// Mean number of outgoing adjacency entries over all nodes (`0` for an empty graph)
    pub fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: usize = self.out_links.iter().map(|list| list.len()).sum();
        total as f64 / self.len() as f64
    }
}

impl<P> GraphNodeOrder for Graph<P> {
    fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }
}

impl<P> GraphLinkOrder for Graph<P> {
    fn number_of_links(&self) -> NumLinks {
        self.links.len() as NumLinks
    }
}

impl<P> LinkedAdjacency for Graph<P> {
    fn out_links_of(&self, u: Node) -> &[Adjacent] {
        self.out_links[u as usize].as_slice()
    }

    fn in_links_of(&self, u: Node) -> &[Adjacent] {
        self.in_links[u as usize].as_slice()
    }

    fn link(&self, id: LinkId) -> &Link {
        &self.links[id as usize]
    }

    fn is_node_active(&self, u: Node) -> bool {
        self.nodes[u as usize].is_active()
    }

    fn component_of(&self, u: Node) -> Option<CompId> {
        self.nodes[u as usize].component
    }

    fn component_size_of(&self, u: Node) -> NumNodes {
        self.nodes[u as usize].component_size
    }

    // Redefine to make use of the lazy hash index of hub nodes
    fn find_link(&self, u: Node, v: Node) -> Option<LinkId> {
        self.out_links[u as usize].find(v)
    }
}

/// Helper methods on any [`LinkedAdjacency`] that produce link lists over a node scope
pub trait SourceLinks: LinkedAdjacency {
    /// Returns every link with both endpoints in `nodes` once.
    /// Directed links are reported as stored; undirected links from their smaller endpoint.
    fn source_links_of(&self, nodes: &[Node], active_only: bool) -> Vec<SourcedLink> {
        let mut in_scope = self.vertex_bitset_unset();
        for &u in nodes {
            in_scope.set_bit(u);
        }

        let mut result = Vec::new();
        for &u in nodes {
            if active_only && !self.is_node_active(u) {
                continue;
            }
            for &adj in self.out_links_of(u) {
                if !in_scope.get_bit(adj.node) || (active_only && !self.is_adjacent_active(adj)) {
                    continue;
                }
                if self.link(adj.link).directed || u <= adj.node {
                    result.push(SourcedLink {
                        source: u,
                        target: adj.node,
                        link: adj.link,
                    });
                }
            }
        }
        result
    }
}

impl<G: LinkedAdjacency> SourceLinks for G {}
