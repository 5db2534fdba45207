/*!
# Utilities

Helper data structures shared by several algorithms. Currently this is the
[`UnionFind`](self::union_find::UnionFind) disjoint-set forest used by Kruskal's algorithm.
*/

pub mod union_find;

pub use union_find::UnionFind;
