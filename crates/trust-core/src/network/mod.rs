//! Trust Graph
//!
//! The complete, undirected contestant graph. Every pair of present
//! contestants shares exactly one `RelationshipLink`; the graph owns all of
//! them. The same type serves as ground truth and as each contestant's
//! private estimated copy.

mod phases;

pub use phases::{InteractionReport, VoteOutcome};

use game_events::{ContestantId, NetworkSnapshot};
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::components::{Contestant, RelationshipLink};
use crate::error::{GameError, Result};
use crate::interactions::{InteractionHandler, RandomInteractionHandler};
use crate::names::{random_name, NamePool};

/// Unordered pair key: smaller id first
type LinkKey = (ContestantId, ContestantId);

fn link_key(a: &ContestantId, b: &ContestantId) -> LinkKey {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

#[derive(Clone)]
pub struct TrustGraph {
    /// Insertion order is the fixed phase iteration order
    contestants: Vec<Contestant>,
    links: BTreeMap<LinkKey, RelationshipLink>,
    split: bool,
    n_interactions: usize,
    interaction_handler: Arc<dyn InteractionHandler>,
    available_names: NamePool,
}

impl Default for TrustGraph {
    fn default() -> Self {
        Self {
            contestants: Vec::new(),
            links: BTreeMap::new(),
            split: false,
            n_interactions: 1,
            interaction_handler: Arc::new(RandomInteractionHandler::default()),
            available_names: NamePool::new(),
        }
    }
}

impl fmt::Debug for TrustGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustGraph")
            .field("contestants", &self.get_all_contestants())
            .field("links", &self.links.len())
            .field("split", &self.split)
            .field("n_interactions", &self.n_interactions)
            .field("interaction_handler", &self.interaction_handler)
            .finish()
    }
}

impl TrustGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interaction attempts per contestant per interaction phase
    pub fn with_n_interactions(mut self, n_interactions: usize) -> Self {
        self.n_interactions = n_interactions.max(1);
        self
    }

    pub fn with_interaction_handler(mut self, handler: impl InteractionHandler + 'static) -> Self {
        self.interaction_handler = Arc::new(handler);
        self
    }

    pub fn with_name_pool(mut self, names: NamePool) -> Self {
        self.available_names = names;
        self
    }

    pub fn n_interactions(&self) -> usize {
        self.n_interactions
    }

    pub fn interaction_handler(&self) -> &dyn InteractionHandler {
        self.interaction_handler.as_ref()
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn len(&self) -> usize {
        self.contestants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    /// Contestants not marked immune, i.e. still in a simulated game
    pub fn active_len(&self) -> usize {
        self.contestants.iter().filter(|c| !c.is_immune()).count()
    }

    /// Next name from the pool, if any remain
    pub fn get_next_name(&mut self) -> Option<ContestantId> {
        self.available_names.next_name().map(ContestantId::from)
    }

    /// Next name from the pool, falling back to a random one
    pub fn next_name(&mut self, rng: &mut SmallRng) -> ContestantId {
        self.get_next_name()
            .unwrap_or_else(|| ContestantId::from(random_name(rng)))
    }

    /// Insert a contestant and link it to every existing node.
    ///
    /// Callers must keep names unique; adding the same contestant twice is
    /// not guarded.
    pub fn add_contestant(&mut self, contestant: Contestant) -> ContestantId {
        let id = contestant.id().clone();
        for other in &self.contestants {
            let key = link_key(&id, other.id());
            self.links
                .entry(key)
                .or_insert_with(|| RelationshipLink::new(id.clone(), other.id().clone()));
        }
        self.contestants.push(contestant);
        id
    }

    /// Remove a contestant and every incident link.
    pub fn remove_contestant(&mut self, id: &ContestantId) -> Result<Contestant> {
        let index = self
            .position(id)
            .ok_or_else(|| GameError::NotFound(id.clone()))?;
        self.links.retain(|_, link| !link.involves(id));
        Ok(self.contestants.remove(index))
    }

    pub fn contains(&self, id: &ContestantId) -> bool {
        self.position(id).is_some()
    }

    pub fn contestant(&self, id: &ContestantId) -> Result<&Contestant> {
        self.contestants
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| GameError::NotFound(id.clone()))
    }

    pub fn contestant_mut(&mut self, id: &ContestantId) -> Result<&mut Contestant> {
        self.contestants
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| GameError::NotFound(id.clone()))
    }

    pub fn iter_contestants(&self) -> impl Iterator<Item = &Contestant> {
        self.contestants.iter()
    }

    pub fn get_all_contestants(&self) -> Vec<ContestantId> {
        self.contestants.iter().map(|c| c.id().clone()).collect()
    }

    pub fn link(&self, a: &ContestantId, b: &ContestantId) -> Option<&RelationshipLink> {
        self.links.get(&link_key(a, b))
    }

    pub fn link_mut(&mut self, a: &ContestantId, b: &ContestantId) -> Option<&mut RelationshipLink> {
        self.links.get_mut(&link_key(a, b))
    }

    /// Like `link`, but a missing edge is an error
    pub fn require_link(&self, a: &ContestantId, b: &ContestantId) -> Result<&RelationshipLink> {
        self.link(a, b)
            .ok_or_else(|| GameError::MissingLink(a.clone(), b.clone()))
    }

    pub fn links(&self) -> impl Iterator<Item = &RelationshipLink> {
        self.links.values()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Shift `holder`'s trust toward `other` on this graph only.
    pub fn adjust_trust(&mut self, holder: &ContestantId, other: &ContestantId, delta: f64) -> Result<f64> {
        self.links
            .get_mut(&link_key(holder, other))
            .ok_or_else(|| GameError::MissingLink(holder.clone(), other.clone()))?
            .adjust_trust(holder, delta)
    }

    /// Shift `holder`'s trust toward `other` on the true graph and mirror the
    /// same write into both endpoints' estimated networks.
    pub fn mirror_trust_change(
        &mut self,
        holder: &ContestantId,
        other: &ContestantId,
        delta: f64,
    ) -> Result<()> {
        // Check all three copies before touching any of them
        self.require_link(holder, other)?;
        for owner in [holder, other] {
            self.contestant(owner)?
                .estimated_network()?
                .require_link(holder, other)?;
        }

        self.adjust_trust(holder, other, delta)?;
        for owner in [holder, other] {
            self.contestant_mut(owner)?
                .estimated_network_mut()?
                .adjust_trust(holder, other, delta)?;
        }
        Ok(())
    }

    /// Draw realized trust on every uncertain link.
    pub fn sample_trust(&mut self, rng: &mut SmallRng) -> Result<()> {
        for link in self.links.values_mut() {
            link.sample(rng)?;
        }
        Ok(())
    }

    pub fn clear_realized_trust(&mut self) {
        for link in self.links.values_mut() {
            link.clear_realized();
        }
    }

    pub fn set_immune(&mut self, id: &ContestantId) -> Result<()> {
        self.contestant_mut(id)?.set_immune(true);
        Ok(())
    }

    pub fn reset_immunity(&mut self) {
        for contestant in &mut self.contestants {
            contestant.set_immune(false);
        }
    }

    /// Put the graph back into its clean, deterministic state: no samples,
    /// no immunity, no split.
    pub fn reset_rollout_state(&mut self) {
        self.clear_realized_trust();
        self.reset_immunity();
        self.split = false;
    }

    /// Independent copy of this network for use as a belief state.
    ///
    /// Nodes in the copy are foreign: they carry no estimated networks of
    /// their own, and the copy has no names left to hand out.
    pub fn belief_copy(&self) -> TrustGraph {
        let mut links = self.links.clone();
        for link in links.values_mut() {
            link.clear_realized();
        }
        TrustGraph {
            contestants: self.contestants.iter().map(Contestant::foreign_copy).collect(),
            links,
            split: self.split,
            n_interactions: self.n_interactions,
            interaction_handler: Arc::clone(&self.interaction_handler),
            available_names: NamePool::new(),
        }
    }

    /// Give one contestant its estimated network, copied from this graph.
    pub fn generate_estimated_network(&mut self, id: &ContestantId) -> Result<()> {
        let belief = self.belief_copy();
        self.contestant_mut(id)?.generate_estimated_network(belief)
    }

    /// Give every contestant its estimated network, all copied from the
    /// current state of this graph.
    pub fn initialize_beliefs(&mut self) -> Result<()> {
        let belief = self.belief_copy();
        for contestant in &mut self.contestants {
            contestant.generate_estimated_network(belief.clone())?;
        }
        Ok(())
    }

    pub fn snapshot(&self, round: u32) -> NetworkSnapshot {
        let mut snapshot = NetworkSnapshot::new(round);
        snapshot.contestants = self.get_all_contestants();
        snapshot.links = self.links.values().map(RelationshipLink::snapshot).collect();
        snapshot.split = self.split;
        snapshot
    }

    fn position(&self, id: &ContestantId) -> Option<usize> {
        self.contestants.iter().position(|c| c.id() == id)
    }
}
