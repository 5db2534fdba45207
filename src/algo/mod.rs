/*!
# Graph Algorithms

This module provides the analysis algorithms built on top of [`LinkedAdjacency`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to shortest paths, centralities, components and spanning trees.

Algorithms borrow the graph immutably and return their results as values. For each of them there
is a write-back method on [`Graph`] (`assign_*`) that stores the results in the node and link
attributes, mirroring how resilience experiments consume them.
*/

mod all_pairs;
mod centrality;
mod connectivity;
mod neighborhood;
mod path_tolerance;
mod percolation;
mod spanning_tree;
mod traversal;
mod workspace;

use crate::{error::*, prelude::*, utils::*};

pub use all_pairs::*;
pub use centrality::*;
pub use connectivity::*;
pub use neighborhood::*;
pub use path_tolerance::*;
pub use percolation::*;
pub use spanning_tree::*;
pub use traversal::*;
pub use workspace::{PathTree, Workspace};

pub(crate) use workspace::{MinHeapEntry, Tag};
