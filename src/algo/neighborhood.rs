/*!
Local (neighborhood-based) node measures.

The neighborhood of a node is the union of the nodes on its outgoing and incoming links, excluding the
node itself; link direction and multi-links are ignored.
*/

use fxhash::FxHashSet;
use itertools::Itertools;

use super::*;

/// Neighborhood-based measures provided on every [`LinkedAdjacency`]
pub trait NeighborhoodMeasures: LinkedAdjacency + Sized {
    /// Returns the distinct neighbors of `u` (in- and out-neighbors), optionally only over active
    /// links to active nodes
    fn neighborhood_of(&self, u: Node, active_only: bool) -> Vec<Node> {
        self.out_links_of(u)
            .iter()
            .chain(self.in_links_of(u))
            .filter(|&&adj| adj.node != u && (!active_only || self.is_adjacent_active(adj)))
            .map(|adj| adj.node)
            .unique()
            .collect()
    }

    /// Computes for every node of `nodes` the fraction of neighbor pairs that are linked themselves.
    /// Nodes with fewer than two neighbors get `0`. Entries are indexed by node.
    fn clustering_coefficients(&self, nodes: &[Node], active_only: bool) -> Vec<f64> {
        let mut result = vec![0.0; self.len()];
        let mut members = FxHashSet::default();
        let mut linked_pairs = FxHashSet::default();

        for &u in nodes {
            let neighbors = self.neighborhood_of(u, active_only);
            let k = neighbors.len();
            if k < 2 {
                continue;
            }

            members.clear();
            members.extend(neighbors.iter().copied());
            linked_pairs.clear();

            for &v in &neighbors {
                for &adj in self.out_links_of(v) {
                    let w = adj.node;
                    if w == v || !members.contains(&w) || (active_only && !self.is_link_active(adj.link)) {
                        continue;
                    }
                    linked_pairs.insert((v.min(w), v.max(w)));
                }
            }

            result[u as usize] = 2.0 * linked_pairs.len() as f64 / (k * (k - 1)) as f64;
        }

        result
    }

    /// Computes for every node of `nodes` the mean out-degree of its neighbors (`0` without neighbors).
    /// Entries are indexed by node.
    fn average_neighbor_degrees(&self, nodes: &[Node], active_only: bool) -> Vec<f64> {
        let mut result = vec![0.0; self.len()];

        for &u in nodes {
            let neighbors = self.neighborhood_of(u, active_only);
            if neighbors.is_empty() {
                continue;
            }
            let total: NumNodes = neighbors.iter().map(|&v| self.out_degree_of(v)).sum();
            result[u as usize] = total as f64 / neighbors.len() as f64;
        }

        result
    }
}

impl<G: LinkedAdjacency> NeighborhoodMeasures for G {}

impl<P> Graph<P> {
    /// Stores the clustering coefficient of every node of `nodes` on the node
    pub fn assign_clustering(&mut self, nodes: &[Node], active_only: bool) {
        let values = self.clustering_coefficients(nodes, active_only);
        for &u in nodes {
            self.node_mut(u).centrality.clustering = values[u as usize];
        }
    }

    /// Stores the average neighbor degree of every node of `nodes` on the node
    pub fn assign_average_neighbor_degree(&mut self, nodes: &[Node], active_only: bool) {
        let values = self.average_neighbor_degrees(nodes, active_only);
        for &u in nodes {
            self.node_mut(u).centrality.avg_neighbor_degree = values[u as usize];
        }
    }
}
