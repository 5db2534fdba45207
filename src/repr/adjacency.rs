use fxhash::FxHashMap;
use smallvec::SmallVec;

use super::*;

/// Once an adjacency list holds this many entries, lookups by target switch to a hash index
pub const LINK_INDEX_THRESHOLD: usize = 300;

/// Adjacency list of a single node in a single direction.
///
/// Most nodes of real-world networks have few links, so entries are kept inline in a `SmallVec`.
/// Hub nodes get an additional `Node -> LinkId` index that is built lazily as soon as the list grows
/// beyond [`LINK_INDEX_THRESHOLD`]. The index always points to the *first* link towards a target,
/// so indexed and linear lookups agree on multi-links.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    entries: SmallVec<[Adjacent; 4]>,
    index: Option<FxHashMap<Node, LinkId>>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry
    pub fn push(&mut self, adj: Adjacent) {
        if self.index.is_none() && self.entries.len() >= LINK_INDEX_THRESHOLD {
            let mut index = FxHashMap::default();
            for entry in &self.entries {
                index.entry(entry.node).or_insert(entry.link);
            }
            self.index = Some(index);
        }

        self.entries.push(adj);

        if let Some(index) = self.index.as_mut() {
            index.entry(adj.node).or_insert(adj.link);
        }
    }

    /// Returns the first link towards `v`
    pub fn find(&self, v: Node) -> Option<LinkId> {
        match &self.index {
            Some(index) => index.get(&v).copied(),
            None => self
                .entries
                .iter()
                .find(|adj| adj.node == v)
                .map(|adj| adj.link),
        }
    }

    pub fn as_slice(&self) -> &[Adjacent] {
        self.entries.as_slice()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns *true* if lookups go through the hash index
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }
}
