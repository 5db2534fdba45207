use crate::node::*;

/// Disjoint-set forest over the nodes `0..n` with path halving and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<Node>,
    rank: Vec<u8>,
    number_of_sets: NumNodes,
}

impl UnionFind {
    /// Creates `n` singleton sets
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
            number_of_sets: n,
        }
    }

    /// Returns the representative of the set containing `u`.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, mut u: Node) -> Node {
        while self.parent[u as usize] != u {
            let grand_parent = self.parent[self.parent[u as usize] as usize];
            self.parent[u as usize] = grand_parent;
            u = grand_parent;
        }
        u
    }

    /// Merges the sets of two *distinct* representatives and returns the new representative.
    /// ** Panics (in debug builds) if either argument is not a representative or both are equal **
    pub fn merge_distinct_roots(&mut self, r1: Node, r2: Node) -> Node {
        debug_assert_ne!(r1, r2);
        debug_assert_eq!(self.parent[r1 as usize], r1);
        debug_assert_eq!(self.parent[r2 as usize], r2);

        self.number_of_sets -= 1;

        let (rank1, rank2) = (self.rank[r1 as usize], self.rank[r2 as usize]);
        if rank1 < rank2 {
            self.parent[r1 as usize] = r2;
            r2
        } else {
            self.parent[r2 as usize] = r1;
            if rank1 == rank2 {
                self.rank[r1 as usize] += 1;
            }
            r1
        }
    }

    /// Merges the sets containing `u` and `v`. Returns *true* if they were disjoint before.
    pub fn union(&mut self, u: Node, v: Node) -> bool {
        let (r1, r2) = (self.find(u), self.find(v));
        if r1 == r2 {
            return false;
        }
        self.merge_distinct_roots(r1, r2);
        true
    }

    /// Returns *true* if `u` and `v` are in the same set
    pub fn same_set(&mut self, u: Node, v: Node) -> bool {
        self.find(u) == self.find(v)
    }

    /// Returns the number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.number_of_sets
    }
}
