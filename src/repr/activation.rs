/*!
# Activation State

Nodes and links are soft-deleted by recording the tick of their deactivation. Algorithms called with
`active_only` skip deactivated elements; the graph itself keeps them so that experiments can be undone
with [`Graph::activate_all`] / [`Graph::activate_all_links`].
*/

use log::debug;
use rand::Rng;

use super::*;

impl<P> Graph<P> {
    /// Deactivates `u` at `tick`. Returns *true* if `u` was active before; an already deactivated
    /// node keeps its original tick.
    /// ** Panics if `u >= n` **
    pub fn deactivate_node(&mut self, u: Node, tick: Tick) -> bool {
        deactivate(&mut self.node_mut(u).deactivated_at, tick)
    }

    /// Deactivates link `id` at `tick`. Returns *true* if the link was active before.
    /// ** Panics if `id >= m` **
    pub fn deactivate_link(&mut self, id: LinkId, tick: Tick) -> bool {
        deactivate(&mut self.link_mut(id).deactivated_at, tick)
    }

    /// Reactivates every node and returns how many were inactive
    pub fn activate_all(&mut self) -> NumNodes {
        self.nodes_mut()
            .iter_mut()
            .filter_map(|data| data.deactivated_at.take())
            .count() as NumNodes
    }

    /// Reactivates every link and returns how many were inactive
    pub fn activate_all_links(&mut self) -> NumLinks {
        self.links_mut()
            .iter_mut()
            .filter_map(|link| link.deactivated_at.take())
            .count() as NumLinks
    }

    /// Returns the number of active nodes
    pub fn number_of_active_nodes(&self) -> NumNodes {
        self.nodes().iter().filter(|data| data.is_active()).count() as NumNodes
    }

    /// Returns the number of active links
    pub fn number_of_active_links(&self) -> NumLinks {
        self.links().iter().filter(|link| link.is_active()).count() as NumLinks
    }

    /// Deactivates `count` uniformly chosen active nodes at `tick` and returns how many were
    /// deactivated (fewer if less than `count` nodes are active).
    pub fn deactivate_random_nodes<R: Rng>(&mut self, rng: &mut R, count: NumNodes, tick: Tick) -> NumNodes {
        let deactivated =
            select_for_deactivation(rng, self.nodes_mut(), |data| &mut data.deactivated_at, count as usize, tick);
        debug!("Deactivated {deactivated} random nodes at tick {tick}");
        deactivated as NumNodes
    }

    /// Deactivates `count` uniformly chosen active links at `tick` and returns how many were
    /// deactivated (fewer if less than `count` links are active).
    pub fn deactivate_random_links<R: Rng>(&mut self, rng: &mut R, count: NumLinks, tick: Tick) -> NumLinks {
        let deactivated =
            select_for_deactivation(rng, self.links_mut(), |link| &mut link.deactivated_at, count as usize, tick);
        debug!("Deactivated {deactivated} random links at tick {tick}");
        deactivated as NumLinks
    }
}

fn deactivate(state: &mut Option<Tick>, tick: Tick) -> bool {
    if state.is_some() {
        return false;
    }
    *state = Some(tick);
    true
}

/// Sequential selection sampling: walking over the active items in order, each is picked with
/// probability `needed / remaining`. Picks exactly `min(count, active)` items uniformly.
fn select_for_deactivation<R: Rng, T>(
    rng: &mut R,
    items: &mut [T],
    state: impl Fn(&mut T) -> &mut Option<Tick>,
    count: usize,
    tick: Tick,
) -> usize {
    let mut remaining = 0;
    for item in items.iter_mut() {
        if state(item).is_none() {
            remaining += 1;
        }
    }
    let mut needed = count.min(remaining);
    let requested = needed;

    for item in items.iter_mut() {
        if needed == 0 {
            break;
        }
        let slot = state(item);
        if slot.is_some() {
            continue;
        }
        if rng.random_range(0..remaining) < needed {
            *slot = Some(tick);
            needed -= 1;
        }
        remaining -= 1;
    }

    requested
}
