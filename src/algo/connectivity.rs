/*!
Component labeling.

Three notions of connectivity are supported (see [`ComponentMode`]):
- **Undirected**: flood fill over outgoing links. For graphs with undirected links only this yields the
  connected components.
- **Weak**: flood fill over outgoing and incoming links, i.e. link directions are ignored.
- **Strong**: two passes in the spirit of Kosaraju. The first pass runs an iterative DFS over incoming
  links and records the finishing order, the second pass starts a BFS over outgoing links from every
  not yet labeled node in reverse finishing order; each BFS labels one strongly connected component.

Components are numbered by decreasing size (ties keep discovery order), so component `0` is always a
largest one.
*/

use std::{cmp::Reverse, fmt::Display, str::FromStr};

use log::debug;

use super::*;

/// Notion of connectivity used by [`Connectivity::components`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentMode {
    #[default]
    Undirected,
    Weak,
    Strong,
}

impl FromStr for ComponentMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "undirected" | "u" => Ok(Self::Undirected),
            "weak" | "wk" => Ok(Self::Weak),
            "strong" | "sg" => Ok(Self::Strong),
            _ => Err(GraphError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Display for ComponentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Undirected => "undirected",
            Self::Weak => "weak",
            Self::Strong => "strong",
        };
        write!(f, "{name}")
    }
}

/// Component label of every node; entries are indexed by node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabels {
    labels: Vec<Option<CompId>>,
    sizes: Vec<NumNodes>,
}

impl ComponentLabels {
    /// Returns the component of `u`, or `None` if `u` was not labeled
    pub fn component_of(&self, u: Node) -> Option<CompId> {
        self.labels[u as usize]
    }

    /// Returns the size of component `c`
    /// ** Panics if `c >= number_of_components` **
    pub fn size_of(&self, c: CompId) -> NumNodes {
        self.sizes[c as usize]
    }

    /// Returns the sizes of all components in decreasing order
    pub fn sizes(&self) -> &[NumNodes] {
        &self.sizes
    }

    pub fn number_of_components(&self) -> NumNodes {
        self.sizes.len() as NumNodes
    }

    /// Returns the size of the largest component (`0` if there is none)
    pub fn largest(&self) -> NumNodes {
        self.sizes.first().copied().unwrap_or(0)
    }

    /// Returns the nodes of component `c` in increasing order
    pub fn members_of(&self, c: CompId) -> Vec<Node> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(u, &label)| (label == Some(c)).then_some(u as Node))
            .collect()
    }
}

/// Component labeling provided on every [`LinkedAdjacency`]
pub trait Connectivity: LinkedAdjacency + Sized {
    /// Labels the nodes of `nodes` by component. With `active_only`, deactivated nodes stay unlabeled
    /// and deactivated links are ignored.
    fn components(&self, nodes: &[Node], active_only: bool, mode: ComponentMode) -> ComponentLabels {
        debug!("Labeling {mode} components of {} nodes", nodes.len());

        let mut included = self.vertex_bitset_unset();
        for &u in nodes {
            if !active_only || self.is_node_active(u) {
                included.set_bit(u);
            }
        }

        let mut components = match mode {
            ComponentMode::Undirected => flood_fill(self, nodes, &included, active_only, false),
            ComponentMode::Weak => flood_fill(self, nodes, &included, active_only, true),
            ComponentMode::Strong => strong_components(self, nodes, &included, active_only),
        };
        components.sort_by_key(|c| Reverse(c.len()));

        let mut labels = vec![None; self.len()];
        for (c, members) in components.iter().enumerate() {
            for &u in members {
                labels[u as usize] = Some(c as CompId);
            }
        }

        ComponentLabels {
            labels,
            sizes: components.iter().map(|c| c.len() as NumNodes).collect(),
        }
    }

    /// Returns *true* if all (active) nodes of `nodes` lie in a single undirected component
    fn is_connected(&self, nodes: &[Node], active_only: bool) -> bool {
        self.components(nodes, active_only, ComponentMode::Undirected)
            .number_of_components()
            <= 1
    }
}

impl<G: LinkedAdjacency> Connectivity for G {}

fn admits<G: LinkedAdjacency>(graph: &G, included: &NodeBitSet, adj: Adjacent, active_only: bool) -> bool {
    included.get_bit(adj.node) && (!active_only || graph.is_link_active(adj.link))
}

fn flood_fill<G: LinkedAdjacency>(
    graph: &G,
    nodes: &[Node],
    included: &NodeBitSet,
    active_only: bool,
    ignore_direction: bool,
) -> Vec<Vec<Node>> {
    let mut visited = graph.vertex_bitset_unset();
    let mut components = Vec::new();
    let mut queue = Vec::new();

    for &start in nodes {
        if !included.get_bit(start) || visited.set_bit(start) {
            continue;
        }

        let mut members = vec![start];
        queue.push(start);
        while let Some(u) = queue.pop() {
            let incoming: &[Adjacent] = if ignore_direction {
                graph.in_links_of(u)
            } else {
                &[]
            };
            for &adj in graph.out_links_of(u).iter().chain(incoming) {
                if admits(graph, included, adj, active_only) && !visited.set_bit(adj.node) {
                    members.push(adj.node);
                    queue.push(adj.node);
                }
            }
        }
        components.push(members);
    }

    components
}

/// State of a node in the two passes of the strong component search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SearchState {
    #[default]
    Unvisited,
    OnStack,
    Finished,
    Labeled,
}

struct StackFrame {
    node: Node,
    next_link: usize,
}

fn strong_components<G: LinkedAdjacency>(
    graph: &G,
    nodes: &[Node],
    included: &NodeBitSet,
    active_only: bool,
) -> Vec<Vec<Node>> {
    let mut states = vec![SearchState::Unvisited; graph.len()];

    // pass 1: finishing order of a DFS over incoming links
    let mut order = Vec::with_capacity(nodes.len());
    let mut call_stack: Vec<StackFrame> = Vec::new();
    for &start in nodes {
        if !included.get_bit(start) || states[start as usize] != SearchState::Unvisited {
            continue;
        }

        states[start as usize] = SearchState::OnStack;
        call_stack.push(StackFrame {
            node: start,
            next_link: 0,
        });

        while let Some(frame) = call_stack.last_mut() {
            let links = graph.in_links_of(frame.node);
            let mut descend = None;
            while frame.next_link < links.len() {
                let adj = links[frame.next_link];
                frame.next_link += 1;
                if admits(graph, included, adj, active_only)
                    && states[adj.node as usize] == SearchState::Unvisited
                {
                    descend = Some(adj.node);
                    break;
                }
            }

            match descend {
                Some(v) => {
                    states[v as usize] = SearchState::OnStack;
                    call_stack.push(StackFrame {
                        node: v,
                        next_link: 0,
                    });
                }
                None => {
                    let u = frame.node;
                    call_stack.pop();
                    states[u as usize] = SearchState::Finished;
                    order.push(u);
                }
            }
        }
    }

    // pass 2: BFS over outgoing links in reverse finishing order
    let mut components = Vec::new();
    let mut queue = Vec::new();
    for &start in order.iter().rev() {
        if states[start as usize] != SearchState::Finished {
            continue;
        }

        states[start as usize] = SearchState::Labeled;
        let mut members = vec![start];
        queue.push(start);
        while let Some(u) = queue.pop() {
            for &adj in graph.out_links_of(u) {
                if admits(graph, included, adj, active_only)
                    && states[adj.node as usize] == SearchState::Finished
                {
                    states[adj.node as usize] = SearchState::Labeled;
                    members.push(adj.node);
                    queue.push(adj.node);
                }
            }
        }
        components.push(members);
    }

    components
}

impl<P> Graph<P> {
    /// Labels the components of `nodes` and stores id and size on every node of `nodes`; unlabeled
    /// (inactive) nodes get `None` and size `0`. Returns the size of the largest component.
    pub fn assign_components(&mut self, nodes: &[Node], active_only: bool, mode: ComponentMode) -> NumNodes {
        let labels = self.components(nodes, active_only, mode);

        for &u in nodes {
            let component = labels.component_of(u);
            let data = self.node_mut(u);
            data.component = component;
            data.component_size = component.map_or(0, |c| labels.size_of(c));
        }

        labels.largest()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::testing::*;

    use super::*;

    fn two_triangles_and_a_path() -> Graph {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(9);
        graph.add_unit_links([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (6, 7), (7, 8)]);
        graph.add_unit_link(2, 3);
        graph.add_unit_link(5, 6);
        graph
    }

    #[test]
    fn undirected_components() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(7);
        graph.add_unit_links([(0, 1), (2, 3), (3, 4), (4, 5)]);
        let nodes = graph.all_nodes();

        let labels = graph.components(&nodes, false, ComponentMode::Undirected);
        assert_eq!(labels.sizes(), &[4, 2, 1]);
        assert_eq!(labels.members_of(0), vec![2, 3, 4, 5]);
        assert_eq!(labels.members_of(1), vec![0, 1]);
        assert_eq!(labels.component_of(6), Some(2));
        assert!(!graph.is_connected(&nodes, false));
        assert!(graph.is_connected(&[2, 3, 4], false));

        assert_eq!(graph.assign_components(&nodes, false, ComponentMode::Undirected), 4);
        assert_eq!(graph.node(3).component, Some(0));
        assert_eq!(graph.node(3).component_size, 4);
        assert_eq!(graph.node(6).component_size, 1);
    }

    #[test]
    fn inactive_nodes_split_components() {
        let mut graph = path_graph(7);
        let nodes = graph.all_nodes();
        graph.deactivate_node(2, 0);

        let labels = graph.components(&nodes, true, ComponentMode::Undirected);
        assert_eq!(labels.sizes(), &[4, 2]);
        assert_eq!(labels.component_of(2), None);

        assert_eq!(graph.assign_components(&nodes, true, ComponentMode::Undirected), 4);
        assert_eq!(graph.node(2).component, None);
        assert_eq!(graph.node(2).component_size, 0);

        graph.activate_all();
        graph.deactivate_link(4, 0);
        let labels = graph.components(&nodes, true, ComponentMode::Undirected);
        assert_eq!(labels.sizes(), &[5, 2]);
    }

    #[test]
    fn directed_modes() {
        // 0 -> 1 -> 2 -> 0 and 2 -> 3 -> 4 -> 3
        let mut graph: Graph = Graph::new();
        graph.add_nodes(6);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3)] {
            graph.add_link(u, v, Link::directed());
        }
        let nodes = graph.all_nodes();

        let undirected = graph.components(&nodes, false, ComponentMode::Undirected);
        // following outgoing links only, the flood fill from 0 reaches everything but 5
        assert_eq!(undirected.sizes(), &[5, 1]);

        let weak = graph.components(&nodes, false, ComponentMode::Weak);
        assert_eq!(weak.sizes(), &[5, 1]);

        let strong = graph.components(&nodes, false, ComponentMode::Strong);
        assert_eq!(strong.sizes(), &[3, 2, 1]);
        assert_eq!(strong.members_of(0), vec![0, 1, 2]);
        assert_eq!(strong.members_of(1), vec![3, 4]);
        assert_eq!(strong.members_of(2), vec![5]);
    }

    #[test]
    fn weak_differs_from_outgoing_fill() {
        let mut graph: Graph = Graph::new();
        graph.add_nodes(3);
        graph.add_link(1, 0, Link::directed());
        graph.add_link(1, 2, Link::directed());
        let nodes = graph.all_nodes();

        assert_eq!(
            graph.components(&nodes, false, ComponentMode::Undirected).sizes(),
            &[2, 1]
        );
        assert_eq!(graph.components(&nodes, false, ComponentMode::Weak).sizes(), &[3]);
        assert_eq!(
            graph.components(&nodes, false, ComponentMode::Strong).sizes(),
            &[1, 1, 1]
        );
    }

    #[test]
    fn strong_components_are_mutually_reachable() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);

        for _ in 0..10 {
            let graph = random_graph(rng, 30, 45, true);
            let nodes = graph.all_nodes();
            let labels = graph.components(&nodes, false, ComponentMode::Strong);
            let matrix = graph
                .all_pairs_distances(&nodes, TraversalOptions::new())
                .unwrap();

            for &u in &nodes {
                for &v in &nodes {
                    let mutual = matrix.distance(u, v).is_some() && matrix.distance(v, u).is_some();
                    assert_eq!(labels.component_of(u) == labels.component_of(v), mutual);
                }
            }
        }
    }

    #[test]
    fn labels_partition_the_scope() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for mode in [ComponentMode::Undirected, ComponentMode::Weak, ComponentMode::Strong] {
            let mut graph = random_graph(rng, 60, 50, mode == ComponentMode::Strong);
            graph.deactivate_random_nodes(rng, 10, 0);
            let nodes = graph.all_nodes();
            let labels = graph.components(&nodes, true, mode);

            assert_eq!(
                labels.sizes().iter().sum::<NumNodes>(),
                graph.number_of_active_nodes()
            );
            assert!(labels.sizes().iter().tuple_windows().all(|(a, b)| a >= b));
            for u in nodes {
                assert_eq!(labels.component_of(u).is_some(), graph.is_node_active(u));
            }
        }
    }

    #[test]
    fn bridged_triangles() {
        let graph = two_triangles_and_a_path();
        let labels = graph.components(&graph.all_nodes(), false, ComponentMode::Strong);
        assert_eq!(labels.number_of_components(), 1);
        assert_eq!(labels.largest(), 9);

        // without the bridges the triangles and the path fall apart
        let mut graph = graph;
        graph.deactivate_link(9, 0);
        graph.deactivate_link(8, 0);
        let labels = graph.components(&graph.all_nodes(), true, ComponentMode::Strong);
        assert_eq!(labels.sizes(), &[3, 3, 3]);
    }

    #[test]
    fn parse_mode() {
        assert_eq!("weak".parse::<ComponentMode>(), Ok(ComponentMode::Weak));
        assert_eq!("SG".parse::<ComponentMode>(), Ok(ComponentMode::Strong));
        assert!("mutual".parse::<ComponentMode>().is_err());
    }
}
