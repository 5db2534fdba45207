/*!
Path tolerance between a terminal pair.

The tolerance of a node `u` with respect to `(src, dst)` is the length of the shortest `src`-`dst`
path that is forced through `u`, i.e. `d(src, u) + d(u, dst)`. Nodes whose tolerance equals the
shortest distance lie on *some* shortest path; the gap to the shortest distance measures how much a
detour over `u` would cost.
*/

use log::debug;

use super::*;

/// Tolerances of all nodes of a scope with respect to a terminal pair
#[derive(Debug, Clone, PartialEq)]
pub struct PathTolerance {
    source: Node,
    target: Node,
    nodes: Vec<Node>,
    tolerance: Vec<Option<f64>>,
}

impl PathTolerance {
    pub fn source(&self) -> Node {
        self.source
    }

    pub fn target(&self) -> Node {
        self.target
    }

    /// Returns the length of the shortest `source`-`target` path, if any
    pub fn shortest_distance(&self) -> Option<f64> {
        self.tolerance[self.source as usize]
    }

    /// Returns the tolerance of `u`, or `None` if `u` is not on any `source`-`target` path.
    /// ** Panics if `u >= n` **
    pub fn tolerance_of(&self, u: Node) -> Option<f64> {
        self.tolerance[u as usize]
    }

    /// Returns all nodes of the scope lying on at least one shortest `source`-`target` path
    pub fn nodes_on_shortest_paths(&self) -> Vec<Node> {
        let Some(shortest) = self.shortest_distance() else {
            return Vec::new();
        };

        self.nodes
            .iter()
            .copied()
            .filter(|&u| {
                self.tolerance[u as usize].is_some_and(|t| (t - shortest).abs() <= LABEL_EPSILON)
            })
            .collect()
    }
}

/// Path tolerance provided on every [`LinkedAdjacency`]
pub trait PathTolerances: LinkedAdjacency + Sized {
    /// Computes the tolerance of every node of `nodes` for the terminal pair `(src, dst)` with one
    /// forward pass from `src` and one backward pass from `dst`. The direction of `options` is ignored.
    fn path_tolerance(
        &self,
        src: Node,
        dst: Node,
        nodes: &[Node],
        options: TraversalOptions,
    ) -> Result<PathTolerance> {
        debug!("Path tolerance between {src} and {dst} over {} nodes", nodes.len());

        let mut ws = Workspace::for_scope(self, nodes);
        self.shortest_paths_in(src, &mut ws, options.direction(Direction::Forward))?;
        let from_source = ws.tree().distances().to_vec();

        self.shortest_paths_in(dst, &mut ws, options.direction(Direction::Backward))?;
        let to_target = ws.tree();

        let mut tolerance = vec![None; self.len()];
        for &u in nodes {
            let (a, b) = (from_source[u as usize], to_target.distances()[u as usize]);
            if a.is_finite() && b.is_finite() {
                tolerance[u as usize] = Some(a + b);
            }
        }

        Ok(PathTolerance {
            source: src,
            target: dst,
            nodes: nodes.to_vec(),
            tolerance,
        })
    }
}

impl<G: LinkedAdjacency> PathTolerances for G {}

impl<P> Graph<P> {
    /// Computes the path tolerance for `(src, dst)`, stores it on every node of `nodes` and
    /// increments the on-path counter of every node on a shortest path.
    /// Returns the number of nodes on shortest paths.
    pub fn assign_path_tolerance(
        &mut self,
        src: Node,
        dst: Node,
        nodes: &[Node],
        options: TraversalOptions,
    ) -> Result<NumNodes> {
        let result = self.path_tolerance(src, dst, nodes, options)?;

        for &u in nodes {
            self.node_mut(u).path_tolerance = result.tolerance_of(u);
        }

        let on_path = result.nodes_on_shortest_paths();
        for &u in &on_path {
            self.node_mut(u).times_on_path += 1;
        }
        Ok(on_path.len() as NumNodes)
    }
}
