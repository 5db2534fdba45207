/*!
# Working State

Every traversal needs per-node scratch memory: distance labels, predecessors and a tag telling whether
a node is unseen, queued or finished. Instead of storing these on the nodes themselves, they live in a
caller-owned [`Workspace`] indexed by node. A workspace is bound to a *scope*, the node set an algorithm
may touch, and each run resets exactly the entries of its scope. Reusing one workspace for many
sources (as the centrality computations do) therefore costs no allocation per call.
*/

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

use super::*;

/// Tag of a node during a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Tag {
    #[default]
    Unseen,
    Queued,
    Done,
}

/// Distances and predecessors of all nodes of a scope with respect to one source (or several sources
/// for multi-source runs). Unreachable nodes and nodes outside the scope have no label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathTree {
    sources: Vec<Node>,
    distance: Vec<f64>,
    predecessor: Vec<Option<Adjacent>>,
}

impl PathTree {
    fn resize(&mut self, n: usize) {
        self.distance = vec![f64::INFINITY; n];
        self.predecessor = vec![None; n];
        self.sources.clear();
    }

    fn reset(&mut self, scope: &[Node]) {
        for &u in scope {
            self.distance[u as usize] = f64::INFINITY;
            self.predecessor[u as usize] = None;
        }
        self.sources.clear();
    }

    /// Returns the source(s) of the last run
    pub fn sources(&self) -> &[Node] {
        &self.sources
    }

    /// Returns the distance label of `u`, or `None` if `u` was not reached
    pub fn distance_to(&self, u: Node) -> Option<f64> {
        let d = self.distance[u as usize];
        d.is_finite().then_some(d)
    }

    /// Returns *true* if `u` was reached
    pub fn is_reachable(&self, u: Node) -> bool {
        self.distance[u as usize].is_finite()
    }

    /// Returns the node `u` was reached from together with the link used.
    /// For backward runs this is the node *after* `u` on the path towards the source.
    pub fn predecessor_of(&self, u: Node) -> Option<Adjacent> {
        self.predecessor[u as usize]
    }

    /// Returns all distance labels indexed by node; unreached nodes carry `f64::INFINITY`
    pub fn distances(&self) -> &[f64] {
        &self.distance
    }

    /// Reconstructs the node path from the source to `u` by following predecessors.
    /// Returns `None` if `u` was not reached.
    pub fn path_to(&self, u: Node) -> Option<Vec<Node>> {
        if !self.is_reachable(u) {
            return None;
        }

        let mut path = vec![u];
        let mut current = u;
        while let Some(pred) = self.predecessor_of(current) {
            current = pred.node;
            path.push(current);
            // a predecessor cycle can only stem from an aborted run
            if path.len() > self.distance.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }

    pub(crate) fn set_source(&mut self, u: Node) {
        self.sources.push(u);
        self.distance[u as usize] = 0.0;
    }

    #[inline]
    pub(crate) fn label(&self, u: Node) -> f64 {
        self.distance[u as usize]
    }

    #[inline]
    pub(crate) fn relabel(&mut self, v: Node, distance: f64, via: Adjacent) {
        self.distance[v as usize] = distance;
        self.predecessor[v as usize] = Some(via);
    }
}

/// Min-heap entry; `BinaryHeap` is a max-heap so the ordering is reversed
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinHeapEntry<T> {
    pub key: f64,
    pub item: T,
}

impl<T> PartialEq for MinHeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key.total_cmp(&other.key) == Ordering::Equal
    }
}

impl<T> Eq for MinHeapEntry<T> {}

impl<T> PartialOrd for MinHeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for MinHeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key.total_cmp(&self.key)
    }
}

/// Reusable per-node working state bound to a node scope
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub(crate) scope: Vec<Node>,
    in_scope: Option<NodeBitSet>,
    pub(crate) tags: Vec<Tag>,
    pub(crate) visits: Vec<NumNodes>,
    pub(crate) queue: VecDeque<Node>,
    pub(crate) heap: BinaryHeap<MinHeapEntry<Node>>,
    pub(crate) buffer: Vec<f64>,
    pub(crate) tree: PathTree,
}

impl Workspace {
    /// Creates an empty workspace; it is sized on the first call to [`Workspace::set_scope`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workspace for `graph` bound to `nodes`
    pub fn for_scope<G: GraphNodeOrder>(graph: &G, nodes: &[Node]) -> Self {
        let mut ws = Self::new();
        ws.set_scope(graph, nodes);
        ws
    }

    /// Binds the workspace to a new scope, resizing it if `graph` has a different number of nodes
    /// than the last graph it was used with.
    /// ** Panics if any `u >= n` in `nodes` **
    pub fn set_scope<G: GraphNodeOrder>(&mut self, graph: &G, nodes: &[Node]) {
        let n = graph.len();
        if self.in_scope.is_some() && self.tags.len() == n {
            self.tree.reset(&self.scope);
            if let Some(in_scope) = self.in_scope.as_mut() {
                for &u in &self.scope {
                    in_scope.clear_bit(u);
                }
            }
        } else {
            self.in_scope = Some(graph.vertex_bitset_unset());
            self.tags = vec![Tag::Unseen; n];
            self.visits = vec![0; n];
            self.buffer = vec![f64::INFINITY; n];
            self.tree.resize(n);
        }

        self.scope.clear();
        if let Some(in_scope) = self.in_scope.as_mut() {
            for &u in nodes {
                if !in_scope.set_bit(u) {
                    self.scope.push(u);
                }
            }
        }
    }

    /// Returns the nodes of the current scope
    pub fn scope(&self) -> &[Node] {
        &self.scope
    }

    /// Returns *true* if `u` belongs to the current scope
    #[inline]
    pub fn contains(&self, u: Node) -> bool {
        self.in_scope.as_ref().is_some_and(|bs| bs.get_bit(u))
    }

    /// Returns the result of the last run
    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// Consumes the workspace and returns the result of the last run
    pub fn into_tree(self) -> PathTree {
        self.tree
    }

    /// Resets the working state of every node in scope
    pub(crate) fn reset(&mut self) {
        for &u in &self.scope {
            self.tags[u as usize] = Tag::Unseen;
            self.visits[u as usize] = 0;
            self.buffer[u as usize] = f64::INFINITY;
        }
        self.tree.reset(&self.scope);
        self.queue.clear();
        self.heap.clear();
    }

    /// Returns *true* if a traversal may follow `adj`: its target is in scope and, if requested,
    /// both the link and its target are active
    #[inline]
    pub(crate) fn admits<G: LinkedAdjacency>(&self, graph: &G, adj: Adjacent, active_only: bool) -> bool {
        self.contains(adj.node) && (!active_only || graph.is_adjacent_active(adj))
    }
}
