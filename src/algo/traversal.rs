/*!
Single-source (and multi-source) shortest paths over a node scope.

Four algorithms are available via [`PathAlgorithm`]:
- **Label-correcting BFS** (default): FIFO queue, nodes may be re-queued whenever their label improves.
  Handles arbitrary lengths; a node re-queued more than `|scope|` times proves a negative cycle.
- **Strict BFS**: every node is labeled on discovery and processed once. Correct for uniform lengths;
  a later improvement of an existing label is reported as [`GraphError::InconsistentEdgeLength`].
  Not every inconsistency is exposed: detection depends on discovery order.
- **Dijkstra**: binary heap, each node settled once. Negative lengths give undefined results; a
  warning is logged but no error is raised.
- **Bellman-Ford**: up to `|scope|` rounds over a double-buffered label array; an update in the last
  round proves a negative cycle.

All of them only traverse nodes of the scope the [`Workspace`] is bound to and, with `active_only`,
skip deactivated links and nodes. An inactive source reaches nothing.
*/

use std::{fmt::Display, str::FromStr};

use log::{trace, warn};

use super::*;

/// Labels closer than this are considered equal
pub const LABEL_EPSILON: f64 = 1e-8;

/// Algorithm used by single-source computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathAlgorithm {
    #[default]
    LabelCorrecting,
    StrictBfs,
    Dijkstra,
    BellmanFord,
}

impl FromStr for PathAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "label-correcting" => Ok(Self::LabelCorrecting),
            "strict-bfs" => Ok(Self::StrictBfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "bellman-ford" | "bf" => Ok(Self::BellmanFord),
            _ => Err(GraphError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Display for PathAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LabelCorrecting => "label-correcting",
            Self::StrictBfs => "strict-bfs",
            Self::Dijkstra => "dijkstra",
            Self::BellmanFord => "bellman-ford",
        };
        write!(f, "{name}")
    }
}

/// Configuration shared by all distance-based computations
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraversalOptions {
    pub(crate) active_only: bool,
    pub(crate) direction: Direction,
    pub(crate) unit_lengths: bool,
    pub(crate) algorithm: PathAlgorithm,
}

impl TraversalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip deactivated nodes and links
    pub fn set_active_only(&mut self, active_only: bool) {
        self.active_only = active_only;
    }

    /// Skip deactivated nodes and links
    pub fn active_only(mut self, active_only: bool) -> Self {
        self.set_active_only(active_only);
        self
    }

    /// Follow outgoing (default) or incoming links
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Follow outgoing (default) or incoming links
    pub fn direction(mut self, direction: Direction) -> Self {
        self.set_direction(direction);
        self
    }

    /// Treat every link as having length `1`, i.e. count hops
    pub fn set_unit_lengths(&mut self, unit_lengths: bool) {
        self.unit_lengths = unit_lengths;
    }

    /// Treat every link as having length `1`, i.e. count hops
    pub fn unit_lengths(mut self, unit_lengths: bool) -> Self {
        self.set_unit_lengths(unit_lengths);
        self
    }

    pub fn set_algorithm(&mut self, algorithm: PathAlgorithm) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(mut self, algorithm: PathAlgorithm) -> Self {
        self.set_algorithm(algorithm);
        self
    }

    /// Returns the length a traversal with these options assigns to `link`
    #[inline]
    pub fn length_of(&self, link: &Link) -> f64 {
        if self.unit_lengths { 1.0 } else { link.length }
    }
}

/// Shortest-path computations provided on every [`LinkedAdjacency`]
pub trait ShortestPaths: LinkedAdjacency + Sized {
    /// Computes distances and predecessors from `source` to all nodes of `nodes`.
    fn shortest_paths(&self, source: Node, nodes: &[Node], options: TraversalOptions) -> Result<PathTree> {
        let mut ws = Workspace::for_scope(self, nodes);
        self.shortest_paths_in(source, &mut ws, options)?;
        Ok(ws.into_tree())
    }

    /// Like [`ShortestPaths::shortest_paths`], but reuses a workspace that is already bound to a
    /// scope. The result is available via [`Workspace::tree`].
    fn shortest_paths_in(&self, source: Node, ws: &mut Workspace, options: TraversalOptions) -> Result<()> {
        run(self, &[source], ws, &options)
    }

    /// Computes for every node of `nodes` the distance to the closest of `sources` using Bellman-Ford.
    /// With `unit_lengths` the label is the hop count to the nearest source.
    fn multi_source_distances(
        &self,
        sources: &[Node],
        nodes: &[Node],
        options: TraversalOptions,
    ) -> Result<PathTree> {
        let mut ws = Workspace::for_scope(self, nodes);
        run(
            self,
            sources,
            &mut ws,
            &options.algorithm(PathAlgorithm::BellmanFord),
        )?;
        Ok(ws.into_tree())
    }
}

impl<G: LinkedAdjacency> ShortestPaths for G {}

fn run<G: LinkedAdjacency>(
    graph: &G,
    sources: &[Node],
    ws: &mut Workspace,
    options: &TraversalOptions,
) -> Result<()> {
    ws.reset();
    for &s in sources {
        if ws.contains(s) && (!options.active_only || graph.is_node_active(s)) && !ws.tree.is_reachable(s) {
            ws.tree.set_source(s);
        }
    }

    let Some(&first_source) = ws.tree.sources().first() else {
        return Ok(());
    };
    trace!(
        "{} from {} source(s) starting at node {first_source} over {} nodes",
        options.algorithm,
        ws.tree.sources().len(),
        ws.scope.len()
    );

    match options.algorithm {
        PathAlgorithm::LabelCorrecting => label_correcting(graph, ws, options, first_source),
        PathAlgorithm::StrictBfs => strict_bfs(graph, ws, options),
        PathAlgorithm::Dijkstra => {
            dijkstra(graph, ws, options);
            Ok(())
        }
        PathAlgorithm::BellmanFord => bellman_ford(graph, ws, options, first_source),
    }
}

fn enqueue_sources(ws: &mut Workspace) {
    for &s in ws.tree.sources() {
        ws.tags[s as usize] = Tag::Queued;
        ws.queue.push_back(s);
    }
}

fn label_correcting<G: LinkedAdjacency>(
    graph: &G,
    ws: &mut Workspace,
    options: &TraversalOptions,
    first_source: Node,
) -> Result<()> {
    let limit = ws.scope.len() as NumNodes;
    enqueue_sources(ws);

    while let Some(u) = ws.queue.pop_front() {
        ws.tags[u as usize] = Tag::Done;
        let du = ws.tree.label(u);

        for &adj in graph.links_of(u, options.direction) {
            if !ws.admits(graph, adj, options.active_only) {
                continue;
            }

            let v = adj.node;
            let candidate = du + options.length_of(graph.link(adj.link));
            if candidate >= ws.tree.label(v) {
                continue;
            }

            ws.tree.relabel(v, candidate, Adjacent { node: u, link: adj.link });
            if ws.tags[v as usize] != Tag::Queued {
                ws.visits[v as usize] += 1;
                if ws.visits[v as usize] > limit {
                    return Err(GraphError::NegativeCycle(first_source));
                }
                ws.tags[v as usize] = Tag::Queued;
                ws.queue.push_back(v);
            }
        }
    }

    Ok(())
}

fn strict_bfs<G: LinkedAdjacency>(graph: &G, ws: &mut Workspace, options: &TraversalOptions) -> Result<()> {
    enqueue_sources(ws);

    while let Some(u) = ws.queue.pop_front() {
        ws.tags[u as usize] = Tag::Done;
        let du = ws.tree.label(u);

        for &adj in graph.links_of(u, options.direction) {
            if !ws.admits(graph, adj, options.active_only) {
                continue;
            }

            let v = adj.node;
            let candidate = du + options.length_of(graph.link(adj.link));
            if ws.tags[v as usize] == Tag::Unseen {
                ws.tree.relabel(v, candidate, Adjacent { node: u, link: adj.link });
                ws.tags[v as usize] = Tag::Queued;
                ws.queue.push_back(v);
            } else if candidate + LABEL_EPSILON < ws.tree.label(v) {
                return Err(GraphError::InconsistentEdgeLength {
                    node: v,
                    labeled: ws.tree.label(v),
                    improved: candidate,
                });
            }
        }
    }

    Ok(())
}

fn dijkstra<G: LinkedAdjacency>(graph: &G, ws: &mut Workspace, options: &TraversalOptions) {
    let mut warned = false;
    for &s in ws.tree.sources() {
        ws.heap.push(MinHeapEntry { key: 0.0, item: s });
    }

    while let Some(MinHeapEntry { key, item: u }) = ws.heap.pop() {
        if ws.tags[u as usize] == Tag::Done || key > ws.tree.label(u) {
            continue;
        }
        ws.tags[u as usize] = Tag::Done;

        for &adj in graph.links_of(u, options.direction) {
            if ws.tags[adj.node as usize] == Tag::Done || !ws.admits(graph, adj, options.active_only) {
                continue;
            }

            let length = options.length_of(graph.link(adj.link));
            if length < 0.0 && !warned {
                warn!("Dijkstra follows link {} of negative length {length}; distances are undefined", adj.link);
                warned = true;
            }

            let candidate = key + length;
            if candidate < ws.tree.label(adj.node) {
                ws.tree.relabel(adj.node, candidate, Adjacent { node: u, link: adj.link });
                ws.heap.push(MinHeapEntry {
                    key: candidate,
                    item: adj.node,
                });
            }
        }
    }
}

fn bellman_ford<G: LinkedAdjacency>(
    graph: &G,
    ws: &mut Workspace,
    options: &TraversalOptions,
    first_source: Node,
) -> Result<()> {
    let rounds = ws.scope.len();

    for round in 1..=rounds {
        // labels of the previous round; relaxations read from here and write into the tree
        for &u in &ws.scope {
            ws.buffer[u as usize] = ws.tree.label(u);
        }

        let mut changed = false;
        for &u in &ws.scope {
            let du = ws.buffer[u as usize];
            if !du.is_finite() {
                continue;
            }

            for &adj in graph.links_of(u, options.direction) {
                if !ws.admits(graph, adj, options.active_only) {
                    continue;
                }

                let candidate = du + options.length_of(graph.link(adj.link));
                if candidate < ws.tree.label(adj.node) {
                    ws.tree.relabel(adj.node, candidate, Adjacent { node: u, link: adj.link });
                    changed = true;
                }
            }
        }

        if !changed {
            return Ok(());
        }
        if round == rounds {
            return Err(GraphError::NegativeCycle(first_source));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::testing::*;

    use super::*;

    const ALGORITHMS: [PathAlgorithm; 4] = [
        PathAlgorithm::LabelCorrecting,
        PathAlgorithm::StrictBfs,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::BellmanFord,
    ];

    fn opts(algorithm: PathAlgorithm) -> TraversalOptions {
        TraversalOptions::new().algorithm(algorithm)
    }

    /// Every reached node other than the source must be labeled via its predecessor
    fn assert_consistent<G: LinkedAdjacency>(graph: &G, tree: &PathTree, options: &TraversalOptions) {
        for u in graph.vertices_range() {
            let Some(pred) = tree.predecessor_of(u) else {
                continue;
            };
            let expected = tree.distance_to(pred.node).unwrap() + options.length_of(graph.link(pred.link));
            assert!((tree.distance_to(u).unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn path_hops() {
        let graph = path_graph(10);
        let nodes = graph.all_nodes();

        for algo in ALGORITHMS {
            let tree = graph.shortest_paths(0, &nodes, opts(algo)).unwrap();
            for u in 0..10 {
                assert_eq!(tree.distance_to(u), Some(u as f64), "{algo}");
            }
            assert_eq!(tree.path_to(4), Some(vec![0, 1, 2, 3, 4]));
            assert_eq!(tree.sources(), &[0]);
        }
    }

    #[test]
    fn shortcut_over_two_hops() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(0, 1, Link::undirected().length(2.0));
        graph.add_link(0, 2, Link::undirected().length(1.0));
        graph.add_link(1, 2, Link::undirected().length(0.5));
        let nodes = graph.all_nodes();

        for algo in [
            PathAlgorithm::LabelCorrecting,
            PathAlgorithm::Dijkstra,
            PathAlgorithm::BellmanFord,
        ] {
            let tree = graph.shortest_paths(0, &nodes, opts(algo)).unwrap();
            assert_eq!(tree.distance_to(1), Some(1.5));
            assert_eq!(tree.path_to(1), Some(vec![0, 2, 1]));
        }

        assert_eq!(
            graph.shortest_paths(0, &nodes, opts(PathAlgorithm::StrictBfs)),
            Err(GraphError::InconsistentEdgeLength {
                node: 1,
                labeled: 2.0,
                improved: 1.5
            })
        );
    }

    #[test]
    fn algorithms_agree_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for directed in [false, true] {
            for _ in 0..10 {
                let graph = random_graph(rng, 40, 120, directed);
                let nodes = graph.all_nodes();

                let reference = graph
                    .shortest_paths(0, &nodes, opts(PathAlgorithm::BellmanFord))
                    .unwrap();
                assert_consistent(&graph, &reference, &opts(PathAlgorithm::BellmanFord));

                for algo in [PathAlgorithm::LabelCorrecting, PathAlgorithm::Dijkstra] {
                    let tree = graph.shortest_paths(0, &nodes, opts(algo)).unwrap();
                    assert_consistent(&graph, &tree, &opts(algo));
                    for u in 0..40 {
                        match (tree.distance_to(u), reference.distance_to(u)) {
                            (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                            (a, b) => assert_eq!(a, b),
                        }
                    }
                }

                // hop counts are consistent for the strict variant
                let unit = opts(PathAlgorithm::StrictBfs).unit_lengths(true);
                let tree = graph.shortest_paths(0, &nodes, unit).unwrap();
                assert_consistent(&graph, &tree, &unit);
            }
        }
    }

    #[test]
    fn negative_cycle_detection() {
        init_logger();
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(0, 1, Link::directed());
        graph.add_link(1, 2, Link::directed().length(-3.0));
        graph.add_link(2, 0, Link::directed());
        let nodes = graph.all_nodes();

        for algo in [PathAlgorithm::LabelCorrecting, PathAlgorithm::BellmanFord] {
            assert_eq!(
                graph.shortest_paths(0, &nodes, opts(algo)).unwrap_err(),
                GraphError::NegativeCycle(0)
            );
        }

        // undefined, but must terminate
        assert!(graph.shortest_paths(0, &nodes, opts(PathAlgorithm::Dijkstra)).is_ok());
    }

    #[test]
    fn repeated_scope_entries() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(0, 1, Link::directed());
        graph.add_link(1, 2, Link::directed().length(-3.0));
        graph.add_link(2, 0, Link::directed());
        let repeated = [0, 1, 2, 2, 1, 0, 0];

        for algo in [PathAlgorithm::LabelCorrecting, PathAlgorithm::BellmanFord] {
            assert_eq!(
                graph.shortest_paths(0, &repeated, opts(algo)).unwrap_err(),
                GraphError::NegativeCycle(0)
            );
        }

        graph.link_mut(1).length = 3.0;
        let nodes = graph.all_nodes();
        for algo in ALGORITHMS {
            assert_eq!(
                graph.shortest_paths(1, &repeated, opts(algo)),
                graph.shortest_paths(1, &nodes, opts(algo))
            );
        }
    }

    #[test]
    fn negative_lengths_without_cycle() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(0, 1, Link::directed().length(4.0));
        graph.add_link(0, 2, Link::directed().length(1.0));
        graph.add_link(1, 2, Link::directed().length(-5.0));
        let nodes = graph.all_nodes();

        for algo in [PathAlgorithm::LabelCorrecting, PathAlgorithm::BellmanFord] {
            let tree = graph.shortest_paths(0, &nodes, opts(algo)).unwrap();
            assert_eq!(tree.distance_to(2), Some(-1.0));
            assert_eq!(tree.path_to(2), Some(vec![0, 1, 2]));
        }
    }

    #[test]
    fn inactive_elements_are_skipped() {
        let mut graph = path_graph(5);
        let nodes = graph.all_nodes();
        graph.deactivate_node(2, 0);

        for algo in ALGORITHMS {
            let options = opts(algo).active_only(true);
            let tree = graph.shortest_paths(0, &nodes, options).unwrap();
            assert_eq!(tree.distance_to(1), Some(1.0));
            assert!(!tree.is_reachable(2));
            assert!(!tree.is_reachable(4));

            let tree = graph.shortest_paths(0, &nodes, opts(algo)).unwrap();
            assert_eq!(tree.distance_to(4), Some(4.0));

            let tree = graph.shortest_paths(2, &nodes, options).unwrap();
            assert!(nodes.iter().all(|&u| !tree.is_reachable(u)));
        }

        graph.activate_all();
        graph.deactivate_link(0, 0);
        let tree = graph
            .shortest_paths(0, &nodes, TraversalOptions::new().active_only(true))
            .unwrap();
        assert!(!tree.is_reachable(1));
    }

    #[test]
    fn scope_restricts_traversal() {
        let graph = path_graph(4);
        let tree = graph
            .shortest_paths(0, &[0, 1, 3], TraversalOptions::new())
            .unwrap();
        assert_eq!(tree.distance_to(1), Some(1.0));
        assert!(!tree.is_reachable(2));
        assert!(!tree.is_reachable(3));

        let tree = graph.shortest_paths(2, &[0, 1], TraversalOptions::new()).unwrap();
        assert!(tree.sources().is_empty());
    }

    #[test]
    fn backward_direction() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(0, 1, Link::directed().length(2.0));
        graph.add_link(1, 2, Link::directed().length(3.0));
        let nodes = graph.all_nodes();

        let forward = graph.shortest_paths(2, &nodes, TraversalOptions::new()).unwrap();
        assert!(!forward.is_reachable(0));

        let backward = graph
            .shortest_paths(2, &nodes, TraversalOptions::new().direction(Direction::Backward))
            .unwrap();
        assert_eq!(backward.distance_to(0), Some(5.0));
        assert_eq!(backward.predecessor_of(0).map(|p| p.node), Some(1));
    }

    #[test]
    fn unit_lengths_count_hops() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(0, 1, Link::undirected().length(10.0));
        graph.add_link(1, 2, Link::undirected().length(10.0));
        graph.add_link(0, 2, Link::undirected().length(100.0));
        let nodes = graph.all_nodes();

        let weighted = graph.shortest_paths(0, &nodes, TraversalOptions::new()).unwrap();
        assert_eq!(weighted.distance_to(2), Some(20.0));

        let hops = graph
            .shortest_paths(0, &nodes, TraversalOptions::new().unit_lengths(true))
            .unwrap();
        assert_eq!(hops.distance_to(2), Some(1.0));
    }

    #[test]
    fn multi_source_hops() {
        let graph = path_graph(10);
        let nodes = graph.all_nodes();
        let tree = graph
            .multi_source_distances(&[0, 9], &nodes, TraversalOptions::new().unit_lengths(true))
            .unwrap();

        assert_eq!(tree.sources(), &[0, 9]);
        assert_eq!(
            (0..10).map(|u| tree.distance_to(u).unwrap() as u32).collect_vec(),
            vec![0, 1, 2, 3, 4, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn workspace_reuse() {
        let graph = cycle_graph(6);
        let nodes = graph.all_nodes();
        let mut ws = Workspace::for_scope(&graph, &nodes);

        for s in 0..6 {
            graph
                .shortest_paths_in(s, &mut ws, TraversalOptions::new())
                .unwrap();
            assert_eq!(ws.tree().distance_to(s), Some(0.0));
            assert_eq!(ws.tree().distance_to((s + 3) % 6), Some(3.0));
            assert_eq!(ws.tree().predecessor_of(s), None);
        }
    }

    #[test]
    fn parse_algorithm() {
        for algo in ALGORITHMS {
            assert_eq!(algo.to_string().parse::<PathAlgorithm>(), Ok(algo));
        }
        assert_eq!("Dijkstra".parse::<PathAlgorithm>(), Ok(PathAlgorithm::Dijkstra));
        assert!(matches!(
            "a-star".parse::<PathAlgorithm>(),
            Err(GraphError::UnknownAlgorithm(_))
        ));
    }
}
