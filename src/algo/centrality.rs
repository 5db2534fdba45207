/*!
Distance-based centralities.

[`CentralityMeasures::centralities`] runs one traversal per node of the scope and accumulates
- **closeness**: the sum of distances to all other nodes divided by the number of nodes,
- **farness**: the same sum divided by the size of the node's component (as last assigned by
  [`Graph::assign_components`]; the number of nodes if none was assigned),
- **betweenness**: for every destination the predecessor chain back to the source is walked and every
  intermediate node and every link on it is counted once.

If the scope contains undirected links only, every unordered pair is reached twice, so betweenness
values are halved. Link closeness and farness are the mean of the values of both endpoints.

The sampled variants [`CentralityMeasures::approx_average_closeness`] and
[`CentralityMeasures::approx_diameter`] trade precision for a bounded number of traversals.
*/

use log::{debug, trace};

use super::*;

/// Configuration of centrality computations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralityOptions {
    pub(crate) traversal: TraversalOptions,
    pub(crate) component: Option<CompId>,
    pub(crate) samples: usize,
    pub(crate) hops: usize,
}

impl Default for CentralityOptions {
    fn default() -> Self {
        Self {
            traversal: TraversalOptions::default(),
            component: None,
            samples: 1000,
            hops: 20,
        }
    }
}

impl CentralityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options of the underlying traversals
    pub fn set_traversal(&mut self, traversal: TraversalOptions) {
        self.traversal = traversal;
    }

    /// Options of the underlying traversals
    pub fn traversal(mut self, traversal: TraversalOptions) -> Self {
        self.set_traversal(traversal);
        self
    }

    /// Restrict the scope to nodes last assigned to `component`
    pub fn set_component(&mut self, component: Option<CompId>) {
        self.component = component;
    }

    /// Restrict the scope to nodes last assigned to `component`
    pub fn component(mut self, component: Option<CompId>) -> Self {
        self.set_component(component);
        self
    }

    /// Target number of sources of [`CentralityMeasures::approx_average_closeness`]
    pub fn set_samples(&mut self, samples: usize) {
        self.samples = samples.max(1);
    }

    /// Target number of sources of [`CentralityMeasures::approx_average_closeness`]
    pub fn samples(mut self, samples: usize) -> Self {
        self.set_samples(samples);
        self
    }

    /// Number of traversals of [`CentralityMeasures::approx_diameter`]
    pub fn set_hops(&mut self, hops: usize) {
        self.hops = hops;
    }

    /// Number of traversals of [`CentralityMeasures::approx_diameter`]
    pub fn hops(mut self, hops: usize) -> Self {
        self.set_hops(hops);
        self
    }
}

/// Result of [`CentralityMeasures::centralities`]; node values are indexed by node, link values by link
#[derive(Debug, Clone, PartialEq)]
pub struct Centralities {
    nodes: Vec<Node>,
    links: Vec<SourcedLink>,
    betweenness: Vec<f64>,
    closeness: Vec<f64>,
    farness: Vec<f64>,
    link_betweenness: Vec<f64>,
    link_closeness: Vec<f64>,
    link_farness: Vec<f64>,
    diameter: f64,
}

impl Centralities {
    fn new<G: LinkedAdjacency>(graph: &G, nodes: Vec<Node>, links: Vec<SourcedLink>) -> Self {
        let (n, m) = (graph.len(), graph.number_of_links() as usize);
        Self {
            nodes,
            links,
            betweenness: vec![0.0; n],
            closeness: vec![0.0; n],
            farness: vec![0.0; n],
            link_betweenness: vec![0.0; m],
            link_closeness: vec![0.0; m],
            link_farness: vec![0.0; m],
            diameter: 0.0,
        }
    }

    /// Returns the nodes the centralities were computed for
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the links between nodes of the scope, each once
    pub fn links(&self) -> &[SourcedLink] {
        &self.links
    }

    pub fn betweenness_of(&self, u: Node) -> f64 {
        self.betweenness[u as usize]
    }

    pub fn closeness_of(&self, u: Node) -> f64 {
        self.closeness[u as usize]
    }

    pub fn farness_of(&self, u: Node) -> f64 {
        self.farness[u as usize]
    }

    pub fn link_betweenness_of(&self, id: LinkId) -> f64 {
        self.link_betweenness[id as usize]
    }

    pub fn link_closeness_of(&self, id: LinkId) -> f64 {
        self.link_closeness[id as usize]
    }

    pub fn link_farness_of(&self, id: LinkId) -> f64 {
        self.link_farness[id as usize]
    }

    /// Returns the largest distance between any two nodes of the scope
    pub fn diameter(&self) -> f64 {
        self.diameter
    }
}

/// Distance-based centralities provided on every [`LinkedAdjacency`]
pub trait CentralityMeasures: LinkedAdjacency + Sized {
    /// Computes betweenness, closeness and farness of all nodes and links of the scope.
    ///
    /// # Errors
    /// - [`GraphError::EmptyNodeSet`] if the scope (after component filtering) is empty
    /// - [`GraphError::NotConnected`] / [`GraphError::NotStronglyConnected`] if some node of the scope
    ///   cannot reach another one
    /// - any error of the configured traversal
    fn centralities(&self, nodes: &[Node], options: CentralityOptions) -> Result<Centralities> {
        let scope = scope_of(self, nodes, options.component)?;
        let directed = self.has_directed_links(&scope, options.traversal.active_only);
        let count = scope.len() as f64;
        debug!(
            "Centralities of {} nodes using {}",
            scope.len(),
            options.traversal.algorithm
        );

        let links = self.source_links_of(&scope, options.traversal.active_only);
        let mut ws = Workspace::for_scope(self, &scope);
        let mut result = Centralities::new(self, scope.clone(), links);

        for &s in &scope {
            trace!("Centrality traversal from {s}");
            self.shortest_paths_in(s, &mut ws, options.traversal)?;
            let tree = ws.tree();

            let mut sum = 0.0;
            for &t in &scope {
                if t == s {
                    continue;
                }
                let d = tree
                    .distance_to(t)
                    .ok_or_else(|| disconnected(directed, s, t))?;
                sum += d;
                result.diameter = result.diameter.max(d);

                let mut current = t;
                while let Some(pred) = tree.predecessor_of(current) {
                    result.link_betweenness[pred.link as usize] += 1.0;
                    if pred.node != s {
                        result.betweenness[pred.node as usize] += 1.0;
                    }
                    current = pred.node;
                }
            }

            result.closeness[s as usize] = sum / count;
            let size = self.component_size_of(s);
            result.farness[s as usize] = sum / if size > 0 { size as f64 } else { count };
        }

        if !directed {
            for &u in &result.nodes {
                result.betweenness[u as usize] /= 2.0;
            }
            for e in &result.links {
                result.link_betweenness[e.link as usize] /= 2.0;
            }
        }

        for e in &result.links {
            let (s, t) = (e.source as usize, e.target as usize);
            result.link_closeness[e.link as usize] = (result.closeness[s] + result.closeness[t]) / 2.0;
            result.link_farness[e.link as usize] = (result.farness[s] + result.farness[t]) / 2.0;
        }

        Ok(result)
    }

    /// Estimates the mean closeness of the scope from a strided sample of sources: every
    /// `max(1, n / samples)`-th node is used. Returns `sum of distances / (sources * n)`.
    fn approx_average_closeness(&self, nodes: &[Node], options: CentralityOptions) -> Result<f64> {
        let scope = scope_of(self, nodes, options.component)?;
        let directed = self.has_directed_links(&scope, options.traversal.active_only);
        let stride = (scope.len() / options.samples.max(1)).max(1);
        debug!("Approximate closeness of {} nodes with stride {stride}", scope.len());

        let mut ws = Workspace::for_scope(self, &scope);
        let mut sum = 0.0;
        let mut sources = 0usize;
        for &s in scope.iter().step_by(stride) {
            self.shortest_paths_in(s, &mut ws, options.traversal)?;
            for &t in &scope {
                if t != s {
                    sum += ws
                        .tree()
                        .distance_to(t)
                        .ok_or_else(|| disconnected(directed, s, t))?;
                }
            }
            sources += 1;
        }

        Ok(sum / (sources as f64 * scope.len() as f64))
    }

    /// Estimates the diameter by repeatedly jumping to the farthest not yet visited node, starting at
    /// the first node of the scope. Every jump is one traversal; the largest distance seen is returned.
    fn approx_diameter(&self, nodes: &[Node], options: CentralityOptions) -> Result<f64> {
        let scope = scope_of(self, nodes, options.component)?;
        let directed = self.has_directed_links(&scope, options.traversal.active_only);
        debug!("Approximate diameter of {} nodes with {} hops", scope.len(), options.hops);

        let mut ws = Workspace::for_scope(self, &scope);
        let mut visited = self.vertex_bitset_unset();
        let mut current = scope[0];
        let mut diameter: f64 = 0.0;

        for hop in 0..options.hops {
            visited.set_bit(current);
            self.shortest_paths_in(current, &mut ws, options.traversal)?;

            let mut farthest: Option<(Node, f64)> = None;
            for &t in &scope {
                let Some(d) = ws.tree().distance_to(t) else {
                    if hop == 0 {
                        return Err(disconnected(directed, current, t));
                    }
                    continue;
                };
                diameter = diameter.max(d);
                if !visited.get_bit(t) && farthest.is_none_or(|(_, best)| d > best) {
                    farthest = Some((t, d));
                }
            }

            match farthest {
                Some((t, _)) => current = t,
                None => break,
            }
        }

        Ok(diameter)
    }
}

impl<G: LinkedAdjacency> CentralityMeasures for G {}

/// Restricts `nodes` to `component`, drops repeated entries and rejects empty scopes
pub(crate) fn scope_of<G: LinkedAdjacency>(
    graph: &G,
    nodes: &[Node],
    component: Option<CompId>,
) -> Result<Vec<Node>> {
    let mut scope = graph.nodes_in_component(nodes, component);
    let mut seen = graph.vertex_bitset_unset();
    scope.retain(|&u| !seen.set_bit(u));
    if scope.is_empty() {
        return Err(GraphError::EmptyNodeSet);
    }
    Ok(scope)
}

fn disconnected(directed: bool, from: Node, unreachable: Node) -> GraphError {
    if directed {
        GraphError::NotStronglyConnected { from, unreachable }
    } else {
        GraphError::NotConnected { from, unreachable }
    }
}

impl<P> Graph<P> {
    /// Computes all centralities of the scope and stores them on its nodes and links.
    /// Returns the diameter of the scope.
    pub fn assign_centralities(&mut self, nodes: &[Node], options: CentralityOptions) -> Result<f64> {
        let result = self.centralities(nodes, options)?;

        for &u in result.nodes() {
            let centrality = &mut self.node_mut(u).centrality;
            centrality.betweenness = result.betweenness_of(u);
            centrality.closeness = result.closeness_of(u);
            centrality.farness = result.farness_of(u);
        }

        for e in result.links() {
            let link = self.link_mut(e.link);
            link.betweenness = result.link_betweenness_of(e.link);
            link.closeness = result.link_closeness_of(e.link);
            link.farness = result.link_farness_of(e.link);
        }

        Ok(result.diameter())
    }
}
