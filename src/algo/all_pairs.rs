use log::debug;

use super::*;

/// Dense matrix of shortest-path distances between all nodes of a scope
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    nodes: Vec<Node>,
    position: Vec<Node>,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Returns the scope the matrix was computed for, in row order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the distance from `u` to `v`, or `None` if `v` is unreachable from `u`.
    /// ** Panics if `u` or `v` is not part of the scope **
    pub fn distance(&self, u: Node, v: Node) -> Option<f64> {
        let d = self.distances[self.index(u, v)];
        d.is_finite().then_some(d)
    }

    /// Returns the largest finite distance (`0` if there is none)
    pub fn max_finite_distance(&self) -> f64 {
        self.distances
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max)
    }

    fn index(&self, u: Node, v: Node) -> usize {
        let (i, j) = (self.position[u as usize], self.position[v as usize]);
        assert!(i != INVALID_NODE && j != INVALID_NODE);
        i as usize * self.nodes.len() + j as usize
    }
}

/// All-pairs shortest paths provided on every [`LinkedAdjacency`]
pub trait AllPairsShortestPaths: LinkedAdjacency + Sized {
    /// Computes the distances between all pairs of `nodes` with Floyd-Warshall.
    ///
    /// The algorithm of `options` is ignored; direction, activity filter and unit lengths apply.
    /// With [`Direction::Backward`] entry `(u, v)` holds the distance from `v` to `u`.
    /// Returns [`GraphError::NegativeCycle`] if any node ends up with a negative distance to itself.
    fn all_pairs_distances(&self, nodes: &[Node], options: TraversalOptions) -> Result<DistanceMatrix> {
        let k = nodes.len();
        debug!("Floyd-Warshall over {k} nodes");

        let mut position = vec![INVALID_NODE; self.len()];
        for (i, &u) in nodes.iter().enumerate() {
            position[u as usize] = i as Node;
        }

        let mut current = vec![f64::INFINITY; k * k];
        for (i, &u) in nodes.iter().enumerate() {
            current[i * k + i] = 0.0;
            if options.active_only && !self.is_node_active(u) {
                continue;
            }

            for &adj in self.out_links_of(u) {
                let j = position[adj.node as usize];
                if j == INVALID_NODE || (options.active_only && !self.is_adjacent_active(adj)) {
                    continue;
                }

                let entry = match options.direction {
                    Direction::Forward => i * k + j as usize,
                    Direction::Backward => j as usize * k + i,
                };
                current[entry] = current[entry].min(options.length_of(self.link(adj.link)));
            }
        }

        // double-buffered so that every round only reads distances of the previous round
        let mut next = current.clone();
        for m in 0..k {
            for i in 0..k {
                let dim = current[i * k + m];
                for j in 0..k {
                    next[i * k + j] = current[i * k + j].min(dim + current[m * k + j]);
                }
            }
            std::mem::swap(&mut current, &mut next);
        }

        if let Some(i) = (0..k).find(|&i| current[i * k + i] < 0.0) {
            return Err(GraphError::NegativeCycle(nodes[i]));
        }

        Ok(DistanceMatrix {
            nodes: nodes.to_vec(),
            position,
            distances: current,
        })
    }
}

impl<G: LinkedAdjacency> AllPairsShortestPaths for G {}
