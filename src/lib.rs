/*!
`wgraphs` is a graph analysis library for network-resilience experiments on graphs whose
- **w**eighted links carry a length (for shortest paths) and a weight (for spanning trees),
- nodes and links can be *deactivated* to simulate failures or attacks without being removed.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph,
and **links** as `u32` indices into the link table of the graph. Each node has an outgoing and an
incoming adjacency list whose entries name the node on the other end and the link leading there.

### Directed vs Undirected

Both kinds of links can be mixed within one graph:

- An **undirected** link `{u, v}` is stored once and appears in the outgoing and incoming lists of
  both `u` and `v`.
- A **directed** link `(u, v)` only appears in the outgoing list of `u` and the incoming list of `v`.

Attributes that persist between algorithm calls (activation state, component ids, centralities, ...)
are stored on [`NodeData`](crate::node::NodeData) and [`Link`](crate::link::Link). Per-call working
state lives in caller-owned buffers (see [`algo::Workspace`]), so algorithms only need `&Graph`.

# Design

All algorithms are configured by small option structs that one can alter to their needs using either
the *Builder* / *Setter* pattern before calling the algorithm. The algorithms themselves are
implemented via traits on every [`LinkedAdjacency`](crate::ops::LinkedAdjacency), making them
usable directly on a [`Graph`](crate::repr::Graph). Fallible computations return
[`error::Result`].

# Usage

There are *3* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, links, basic graph operations and the [`Graph`](crate::repr::Graph) itself,
- [`algo`] includes shortest paths (`graph.shortest_paths(source, &nodes, options)`), all-pairs distances,
  path tolerance, centralities, components, spanning trees and percolation experiments,
- [`error`] includes the error type shared by all algorithms.

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

```rust
use wgraphs::{algo::*, prelude::*};

let mut graph: Graph = Graph::new();
graph.add_nodes(4);
graph.add_unit_links([(0, 1), (1, 2), (2, 3), (3, 0)]);

let nodes = graph.all_nodes();
let tree = graph.shortest_paths(0, &nodes, TraversalOptions::new()).unwrap();
assert_eq!(tree.distance_to(2), Some(2.0));

graph.deactivate_node(1, 0);
let labels = graph.components(&nodes, true, ComponentMode::Undirected);
assert_eq!(labels.largest(), 3);
```
*/

pub mod algo;
pub mod error;
pub mod link;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

/// `wgraphs::prelude` includes definitions for nodes and links, all basic graph operation traits as well as the graph itself.
pub mod prelude {
    pub use super::{link::*, node::*, ops::*, repr::*};
}
