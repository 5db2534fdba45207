/*!
Resilience experiments built from random deactivation and component labeling.

The central question is how many nodes (or links) have to fail before the giant component shrinks
to a given fraction of the network. [`Graph::nodes_for_fraction`] and [`Graph::links_for_fraction`]
answer it by bisection over the fraction of retained elements; each step reactivates everything,
deactivates a random selection and measures the giant component.
*/

use log::{debug, trace};
use rand::Rng;

use super::*;

/// Bisection stops once the measured fraction is this close to the target
pub const FRACTION_TOLERANCE: f64 = 1e-3;

/// Bisection stops once the search interval is smaller than this
pub const MIN_BISECTION_STEP: f64 = 1e-10;

impl<P> Graph<P> {
    /// Labels undirected components over active elements, deactivates every node outside
    /// component `0` at `tick` and reactivates every node inside it. Returns the size of the giant.
    pub fn deactivate_outside_giant(&mut self, tick: Tick) -> NumNodes {
        let nodes = self.all_nodes();
        let giant = self.assign_components(&nodes, true, ComponentMode::Undirected);

        for u in nodes {
            let data = self.node_mut(u);
            if data.component == Some(0) {
                data.deactivated_at = None;
            } else if data.deactivated_at.is_none() {
                data.deactivated_at = Some(tick);
            }
        }

        giant
    }

    /// Increments the giant-membership counter of every node currently labeled with component `0`
    /// and returns how many nodes were counted
    pub fn record_giant_membership(&mut self) -> NumNodes {
        let mut counted = 0;
        for u in self.vertices_range() {
            let data = self.node_mut(u);
            if data.component == Some(0) {
                data.times_in_giant += 1;
                counted += 1;
            }
        }
        counted
    }

    /// Labels undirected components over active elements and returns the size of the largest one
    /// relative to the total number of nodes (`0` for an empty graph)
    pub fn giant_fraction(&mut self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let nodes = self.all_nodes();
        let giant = self.assign_components(&nodes, true, ComponentMode::Undirected);
        giant as f64 / self.len() as f64
    }

    /// Finds by bisection the fraction of randomly deactivated nodes that leaves a giant component
    /// of `target` times the number of nodes. Nodes stay in the state of the last step.
    pub fn nodes_for_fraction<R: Rng>(&mut self, rng: &mut R, target: f64) -> f64 {
        debug!("Bisecting node removal for giant fraction {target}");
        let n = self.number_of_nodes();
        let retained = bisect(target, |c| {
            self.activate_all();
            let count = (n as f64 * (1.0 - c)) as NumNodes;
            self.deactivate_random_nodes(rng, count, 0);
            self.giant_fraction()
        });
        1.0 - retained
    }

    /// Finds by bisection the fraction of randomly deactivated links that leaves a giant component
    /// of `target` times the number of nodes. Links stay in the state of the last step.
    pub fn links_for_fraction<R: Rng>(&mut self, rng: &mut R, target: f64) -> f64 {
        debug!("Bisecting link removal for giant fraction {target}");
        let m = self.number_of_links();
        let retained = bisect(target, |c| {
            self.activate_all_links();
            let count = (m as f64 * (1.0 - c)) as NumLinks;
            self.deactivate_random_links(rng, count, 0);
            self.giant_fraction()
        });
        1.0 - retained
    }
}

/// Bisects over the retained fraction `c` in `[0, 1]`, assuming `measure(c)` grows with `c`.
/// Returns the last `c` measured.
fn bisect(target: f64, mut measure: impl FnMut(f64) -> f64) -> f64 {
    let (mut low, mut high) = (0.0, 1.0);
    loop {
        let c = (low + high) / 2.0;
        let fraction = measure(c);
        trace!("Retaining {c:.6} yields giant fraction {fraction:.6}");

        if (fraction - target).abs() <= FRACTION_TOLERANCE || high - low < MIN_BISECTION_STEP {
            return c;
        }
        if fraction > target {
            high = c;
        } else {
            low = c;
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::testing::*;

    use super::*;

    #[test]
    fn isolate_giant() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(7);
        graph.add_unit_links([(0, 1), (1, 2), (2, 3), (4, 5)]);
        graph.deactivate_node(3, 1);

        // {0, 1, 2} is the giant once 3 is gone
        assert_eq!(graph.deactivate_outside_giant(5), 3);
        assert_eq!(graph.number_of_active_nodes(), 3);
        assert_eq!(graph.node(3).deactivated_at, Some(1));
        assert_eq!(graph.node(4).deactivated_at, Some(5));
        assert_eq!(graph.node(6).deactivated_at, Some(5));

        assert_eq!(graph.record_giant_membership(), 3);
        assert_eq!(graph.record_giant_membership(), 3);
        assert_eq!(graph.node(0).times_in_giant, 2);
        assert_eq!(graph.node(4).times_in_giant, 0);
    }

    #[test]
    fn isolating_and_restoring_keeps_components() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        for _ in 0..10 {
            let mut graph = random_graph(rng, 40, 35, false);
            let nodes = graph.all_nodes();
            let before = graph.components(&nodes, true, ComponentMode::Undirected);

            let giant = graph.deactivate_outside_giant(3);
            assert_eq!(giant, before.largest());
            assert_eq!(graph.number_of_active_nodes(), giant);

            assert_eq!(graph.activate_all(), 40 - giant);
            assert_eq!(graph.components(&nodes, true, ComponentMode::Undirected), before);
        }
    }

    #[test]
    fn giant_fraction_of_path() {
        let mut graph = path_graph(10);
        assert_eq!(graph.giant_fraction(), 1.0);
        graph.deactivate_node(3, 0);
        assert_eq!(graph.giant_fraction(), 0.6);
    }

    #[test]
    fn bisection_converges() {
        // the identity measure, so the retained fraction approaches the target
        let c = bisect(0.3, |c| c);
        assert!((c - 0.3).abs() <= FRACTION_TOLERANCE);

        // unreachable target stops on the step limit
        let c = bisect(2.0, |c| c);
        assert!(c > 0.99);
    }

    #[test]
    fn node_removal_on_complete_graph() {
        init_logger();
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let mut graph: Graph = Graph::new();
        graph.add_nodes(200);
        graph.add_unit_links((0..200).tuple_combinations());

        // removing k nodes always leaves a giant of 200 - k
        let removed = graph.nodes_for_fraction(rng, 0.3);
        assert!((graph.giant_fraction() - 0.3).abs() <= FRACTION_TOLERANCE);
        assert_eq!(graph.number_of_active_nodes(), 60);
        assert!((removed - 0.7).abs() < 0.01);

        let fewer = graph.nodes_for_fraction(rng, 0.8);
        assert!((graph.giant_fraction() - 0.8).abs() <= FRACTION_TOLERANCE);
        assert!(fewer < removed);
    }

    #[test]
    fn link_removal_on_star() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let mut graph = star_graph(199);

        // every removed link cuts off exactly one leaf
        let removed = graph.links_for_fraction(rng, 0.3);
        assert!((graph.giant_fraction() - 0.3).abs() <= FRACTION_TOLERANCE);
        assert_eq!(graph.number_of_active_links(), 59);
        assert_eq!(graph.number_of_active_nodes(), 200);
        assert!((removed - 140.0 / 199.0).abs() < 0.01);

        let fewer = graph.links_for_fraction(rng, 0.8);
        assert!((graph.giant_fraction() - 0.8).abs() <= FRACTION_TOLERANCE);
        assert!(fewer < removed);
    }
}
