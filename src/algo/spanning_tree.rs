/*!
Minimum spanning trees via Prim's or Kruskal's algorithm.

Both follow outgoing links only, accept negative weights and report
[`GraphError::DisconnectedGraph`] if fewer than `n - 1` links could be selected.
*/

use std::{collections::BinaryHeap, fmt::Display, str::FromStr};

use log::debug;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpanningTreeAlgorithm {
    #[default]
    Prim,
    Kruskal,
}

impl FromStr for SpanningTreeAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "prim" => Ok(Self::Prim),
            "kruskal" => Ok(Self::Kruskal),
            _ => Err(GraphError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Display for SpanningTreeAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prim => write!(f, "prim"),
            Self::Kruskal => write!(f, "kruskal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanningTreeOptions {
    pub(crate) algorithm: SpanningTreeAlgorithm,
    pub(crate) active_only: bool,
}

impl SpanningTreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_algorithm(&mut self, algorithm: SpanningTreeAlgorithm) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(mut self, algorithm: SpanningTreeAlgorithm) -> Self {
        self.set_algorithm(algorithm);
        self
    }

    /// Ignore deactivated nodes and links
    pub fn set_active_only(&mut self, active_only: bool) {
        self.active_only = active_only;
    }

    /// Ignore deactivated nodes and links
    pub fn active_only(mut self, active_only: bool) -> Self {
        self.set_active_only(active_only);
        self
    }
}

/// Links of a spanning tree together with their total weight
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    pub total_weight: f64,
    pub edges: Vec<SourcedLink>,
}

/// Spanning trees provided on every [`LinkedAdjacency`]
pub trait SpanningTrees: LinkedAdjacency + Sized {
    /// Computes a minimum spanning tree over `nodes` with the configured algorithm.
    /// For Kruskal the links of the scope are sorted by weight first.
    fn minimum_spanning_tree(&self, nodes: &[Node], options: SpanningTreeOptions) -> Result<SpanningTree> {
        debug!("{} spanning tree over {} nodes", options.algorithm, nodes.len());

        match options.algorithm {
            SpanningTreeAlgorithm::Prim => self.prim(nodes, options.active_only),
            SpanningTreeAlgorithm::Kruskal => {
                let mut links = self.source_links_of(nodes, options.active_only);
                links.sort_by(|a, b| self.link(a.link).weight.total_cmp(&self.link(b.link).weight));
                self.kruskal(nodes, &links, options.active_only)
            }
        }
    }

    /// Grows a tree from the first (active) node of `nodes`, always adding the lightest outgoing link
    /// that leads to a node not yet in the tree.
    fn prim(&self, nodes: &[Node], active_only: bool) -> Result<SpanningTree> {
        let (candidates, in_scope) = tree_candidates(self, nodes, active_only);
        let mut tree = SpanningTree {
            total_weight: 0.0,
            edges: Vec::new(),
        };
        let Some(&root) = candidates.first() else {
            return Ok(tree);
        };
        let required = candidates.len() - 1;

        let mut in_tree = self.vertex_bitset_unset();
        let mut heap = BinaryHeap::new();

        let push_links = |u: Node, heap: &mut BinaryHeap<MinHeapEntry<SourcedLink>>, in_tree: &NodeBitSet| {
            for &adj in self.out_links_of(u) {
                if in_scope.get_bit(adj.node)
                    && !in_tree.get_bit(adj.node)
                    && (!active_only || self.is_link_active(adj.link))
                {
                    heap.push(MinHeapEntry {
                        key: self.link(adj.link).weight,
                        item: SourcedLink {
                            source: u,
                            target: adj.node,
                            link: adj.link,
                        },
                    });
                }
            }
        };

        in_tree.set_bit(root);
        push_links(root, &mut heap, &in_tree);

        while tree.edges.len() < required {
            let Some(MinHeapEntry { key, item: edge }) = heap.pop() else {
                break;
            };
            if in_tree.set_bit(edge.target) {
                continue;
            }
            tree.total_weight += key;
            tree.edges.push(edge);
            push_links(edge.target, &mut heap, &in_tree);
        }

        finish(tree, required)
    }

    /// Scans `sorted_links` (sorted by increasing weight) and keeps every link that joins two
    /// different trees of the forest built so far. Links with an endpoint outside `nodes` are skipped.
    fn kruskal(&self, nodes: &[Node], sorted_links: &[SourcedLink], active_only: bool) -> Result<SpanningTree> {
        let (candidates, in_scope) = tree_candidates(self, nodes, active_only);
        let mut tree = SpanningTree {
            total_weight: 0.0,
            edges: Vec::new(),
        };
        if candidates.is_empty() {
            return Ok(tree);
        }
        let required = candidates.len() - 1;

        let mut forest = UnionFind::new(self.number_of_nodes());

        for &edge in sorted_links {
            if tree.edges.len() == required {
                break;
            }
            if edge.is_loop()
                || !in_scope.get_bit(edge.source)
                || !in_scope.get_bit(edge.target)
                || (active_only && !self.is_link_active(edge.link))
            {
                continue;
            }

            let (r1, r2) = (forest.find(edge.source), forest.find(edge.target));
            if r1 != r2 {
                forest.merge_distinct_roots(r1, r2);
                tree.total_weight += self.link(edge.link).weight;
                tree.edges.push(edge);
            }
        }

        finish(tree, required)
    }
}

impl<G: LinkedAdjacency> SpanningTrees for G {}

/// Distinct (active) nodes of `nodes` in order of first occurrence, together with their bitset
fn tree_candidates<G: LinkedAdjacency>(graph: &G, nodes: &[Node], active_only: bool) -> (Vec<Node>, NodeBitSet) {
    let mut in_scope = graph.vertex_bitset_unset();
    let candidates = nodes
        .iter()
        .copied()
        .filter(|&u| (!active_only || graph.is_node_active(u)) && !in_scope.set_bit(u))
        .collect();
    (candidates, in_scope)
}

fn finish(tree: SpanningTree, required: usize) -> Result<SpanningTree> {
    if tree.edges.len() < required {
        return Err(GraphError::DisconnectedGraph {
            edges: tree.edges.len(),
            required,
        });
    }
    Ok(tree)
}
