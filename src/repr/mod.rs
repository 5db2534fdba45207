/*!
# Graph Store

[`Graph`] owns a node table, a link table and one outgoing plus one incoming [`Adjacency`] per node.
Links are shared between both endpoints: an undirected link is stored once in the link table and
referenced from the adjacency lists of both its endpoints.

The store itself never touches per-call working state; all algorithms read it through
[`LinkedAdjacency`](crate::ops::LinkedAdjacency).
*/

use crate::{link::*, node::*, ops::*};

mod activation;
mod adjacency;
mod graph;

pub use adjacency::*;
pub use graph::*;
