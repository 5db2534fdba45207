//! Deterministic and seeded random graph builders shared by the test modules.

use rand::{Rng, distr::Distribution};
use rand_distr::Uniform;

use crate::prelude::*;

/// Routes `log` output of the algorithms to the test harness; repeated calls are no-ops
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Path `0 - 1 - ... - (n-1)` of unit links; link `i` joins `i` and `i + 1`
pub(crate) fn path_graph(n: NumNodes) -> Graph {
    let mut graph = Graph::new();
    graph.add_nodes(n);
    graph.add_unit_links((1..n).map(|v| (v - 1, v)));
    graph
}

/// Cycle over `n >= 3` nodes of unit links; link `i` joins `i` and `(i + 1) % n`
pub(crate) fn cycle_graph(n: NumNodes) -> Graph {
    let mut graph = path_graph(n);
    graph.add_unit_link(n - 1, 0);
    graph
}

/// Star with center `0` and leaves `1..=leaves`; link `i` joins `0` and `i + 1`
pub(crate) fn star_graph(leaves: NumNodes) -> Graph {
    let mut graph = Graph::new();
    graph.add_nodes(leaves + 1);
    graph.add_unit_links((1..=leaves).map(|v| (0, v)));
    graph
}

/// `width x height` grid of unit links; node `(x, y)` has index `y * width + x`
pub(crate) fn grid_graph(width: NumNodes, height: NumNodes) -> Graph {
    let mut graph = Graph::new();
    graph.add_nodes(width * height);
    for y in 0..height {
        for x in 0..width {
            let u = y * width + x;
            if x + 1 < width {
                graph.add_unit_link(u, u + 1);
            }
            if y + 1 < height {
                graph.add_unit_link(u, u + width);
            }
        }
    }
    graph
}

/// `m` links between uniformly chosen distinct endpoints; multi-links may occur.
/// Lengths and weights are drawn uniformly from `[0.5, 2)`.
pub(crate) fn random_graph<R: Rng>(rng: &mut R, n: NumNodes, m: NumLinks, directed: bool) -> Graph {
    assert!(n > 1);
    let distr = Uniform::new(0.5, 2.0).unwrap();

    let mut graph = Graph::new();
    graph.add_nodes(n);
    for _ in 0..m {
        let u = rng.random_range(0..n);
        let v = loop {
            let v = rng.random_range(0..n);
            if v != u {
                break v;
            }
        };

        let link = if directed {
            Link::directed()
        } else {
            Link::undirected()
        };
        graph.add_link(u, v, link.length(distr.sample(rng)).weight(distr.sample(rng)));
    }
    graph
}

/// Asserts that every outgoing entry has a matching incoming entry and vice versa
pub(crate) fn assert_adjacency_consistent<P>(graph: &Graph<P>) {
    for u in graph.vertices_range() {
        for adj in graph.out_links_of(u) {
            assert!(
                graph
                    .in_links_of(adj.node)
                    .contains(&Adjacent { node: u, link: adj.link })
            );
        }
        for adj in graph.in_links_of(u) {
            assert!(
                graph
                    .out_links_of(adj.node)
                    .contains(&Adjacent { node: u, link: adj.link })
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn builders() {
        let graph = grid_graph(3, 4);
        assert_eq!(graph.number_of_nodes(), 12);
        assert_eq!(graph.number_of_links(), 2 * 4 + 3 * 3);
        assert_adjacency_consistent(&graph);

        let cycle = cycle_graph(5);
        assert_eq!(cycle.number_of_links(), 5);
        assert!(cycle.vertices_range().all(|u| cycle.out_degree_of(u) == 2));

        let star = star_graph(4);
        assert_eq!(star.out_degree_of(0), 4);
    }

    #[test]
    fn random_graphs_are_consistent() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        for directed in [false, true] {
            for _ in 0..10 {
                let graph = random_graph(rng, 30, 90, directed);
                assert_eq!(graph.number_of_links(), 90);
                assert_adjacency_consistent(&graph);

                let entries: usize = graph.vertices_range().map(|u| graph.out_links_of(u).len()).sum();
                assert_eq!(entries, if directed { 90 } else { 180 });
            }
        }
    }
}
