//! Contestants
//!
//! An agent in the game: identity, strategies, traits, and a private belief
//! copy of the social network that it alone mutates.

use game_events::{ContestantId, Vote};
use rand::rngs::SmallRng;
use std::collections::BTreeMap;

use crate::components::traits::{ImmutableTraits, MutableTraits};
use crate::error::{GameError, Result};
use crate::interactions::Interaction;
use crate::network::TrustGraph;
use crate::rollout::{rollout, RolloutDistribution};
use crate::strategies::{InteractionStrategy, VotingStrategy};

#[derive(Debug, Clone)]
pub struct Contestant {
    id: ContestantId,
    voting_strategy: VotingStrategy,
    interaction_strategy: InteractionStrategy,
    immutable_traits: ImmutableTraits,
    mutable_traits: MutableTraits,
    /// Generated once from the true network, never reassigned
    estimated_social_network: Option<Box<TrustGraph>>,
    /// Rollout-local: already evicted in the current simulated trial
    immune_from_votes: bool,
}

impl Contestant {
    pub fn new(
        id: impl Into<ContestantId>,
        voting_strategy: VotingStrategy,
        interaction_strategy: InteractionStrategy,
    ) -> Self {
        Self {
            id: id.into(),
            voting_strategy,
            interaction_strategy,
            immutable_traits: ImmutableTraits::default(),
            mutable_traits: MutableTraits::default(),
            estimated_social_network: None,
            immune_from_votes: false,
        }
    }

    pub fn with_traits(mut self, immutable_traits: ImmutableTraits) -> Self {
        self.immutable_traits = immutable_traits;
        self
    }

    pub fn with_mutable_traits(mut self, mutable_traits: MutableTraits) -> Self {
        self.mutable_traits = mutable_traits;
        self
    }

    pub fn id(&self) -> &ContestantId {
        &self.id
    }

    pub fn voting_strategy(&self) -> &VotingStrategy {
        &self.voting_strategy
    }

    pub fn interaction_strategy(&self) -> &InteractionStrategy {
        &self.interaction_strategy
    }

    pub fn immutable_traits(&self) -> &ImmutableTraits {
        &self.immutable_traits
    }

    pub fn mutable_traits(&self) -> &MutableTraits {
        &self.mutable_traits
    }

    pub fn mutable_traits_mut(&mut self) -> &mut MutableTraits {
        &mut self.mutable_traits
    }

    pub fn trust_threshold(&self) -> f64 {
        self.immutable_traits.trust_threshold
    }

    pub fn is_immune(&self) -> bool {
        self.immune_from_votes
    }

    pub fn set_immune(&mut self, immune: bool) {
        self.immune_from_votes = immune;
    }

    pub fn has_estimated_network(&self) -> bool {
        self.estimated_social_network.is_some()
    }

    pub fn estimated_network(&self) -> Result<&TrustGraph> {
        self.estimated_social_network
            .as_deref()
            .ok_or_else(|| GameError::MissingBelief(self.id.clone()))
    }

    pub fn estimated_network_mut(&mut self) -> Result<&mut TrustGraph> {
        self.estimated_social_network
            .as_deref_mut()
            .ok_or_else(|| GameError::MissingBelief(self.id.clone()))
    }

    /// Install this contestant's belief copy of the network.
    ///
    /// Fails with `DuplicateInitialization` if a copy already exists.
    pub fn generate_estimated_network(&mut self, belief: TrustGraph) -> Result<()> {
        if self.estimated_social_network.is_some() {
            return Err(GameError::DuplicateInitialization(self.id.clone()));
        }
        self.estimated_social_network = Some(Box::new(belief));
        Ok(())
    }

    /// Perceived trust toward every neighbour in the estimated network
    pub fn get_trust(&self) -> Result<BTreeMap<ContestantId, f64>> {
        let net = self.estimated_network()?;
        net.iter_contestants()
            .filter(|c| c.id() != &self.id)
            .map(|c| {
                let trust = net.require_link(&self.id, c.id())?.trust_mean(&self.id)?;
                Ok((c.id().clone(), trust))
            })
            .collect()
    }

    /// Cast a vote from the given trust view.
    pub fn get_vote(&self, view: &TrustGraph, rng: &mut SmallRng) -> Result<Vote> {
        self.voting_strategy.choose(self, view, rng)
    }

    /// Pick an interaction to attempt against the true network.
    ///
    /// Returns `None` when there is nobody left to interact with.
    pub fn get_interaction(
        &self,
        true_net: &TrustGraph,
        rng: &mut SmallRng,
    ) -> Result<Option<Interaction>> {
        self.interaction_strategy.choose(self, true_net, rng)
    }

    /// Estimate who gets evicted in each future round by replaying the rest
    /// of the game `n` times against this contestant's estimated network.
    pub fn mc_simulate_games(&self, n: usize, rng: &mut SmallRng) -> Result<RolloutDistribution> {
        rollout(self.estimated_network()?, n, rng)
    }

    /// Copy for use as a node inside someone else's belief graph: no nested
    /// beliefs, no immunity.
    pub(crate) fn foreign_copy(&self) -> Self {
        Self {
            id: self.id.clone(),
            voting_strategy: self.voting_strategy.clone(),
            interaction_strategy: self.interaction_strategy.clone(),
            immutable_traits: self.immutable_traits.clone(),
            mutable_traits: self.mutable_traits.clone(),
            estimated_social_network: None,
            immune_from_votes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_contestant(name: &str) -> Contestant {
        Contestant::new(name, VotingStrategy::Random, InteractionStrategy::Random)
    }

    #[test]
    fn test_estimated_network_generated_once() {
        let mut net = TrustGraph::new();
        net.add_contestant(random_contestant("Filip"));
        net.add_contestant(random_contestant("Kipp"));

        let mut filip = random_contestant("Filip");
        assert!(matches!(
            filip.estimated_network(),
            Err(GameError::MissingBelief(_))
        ));

        filip.generate_estimated_network(net.belief_copy()).unwrap();
        assert!(filip.has_estimated_network());

        let again = filip.generate_estimated_network(net.belief_copy());
        assert!(matches!(again, Err(GameError::DuplicateInitialization(id)) if id.as_str() == "Filip"));
    }

    #[test]
    fn test_get_trust_reads_own_direction() {
        let mut net = TrustGraph::new();
        net.add_contestant(random_contestant("Filip"));
        net.add_contestant(random_contestant("Kipp"));
        net.add_contestant(random_contestant("Ada"));
        let filip = ContestantId::from("Filip");
        let kipp = ContestantId::from("Kipp");
        net.link_mut(&filip, &kipp).unwrap().set_trust_mean(&kipp, -1.0).unwrap();
        net.link_mut(&filip, &kipp).unwrap().set_trust_mean(&filip, 2.0).unwrap();
        net.initialize_beliefs().unwrap();

        let trust = net.contestant(&filip).unwrap().get_trust().unwrap();
        assert_eq!(trust.len(), 2);
        assert_eq!(trust[&kipp], 2.0);
        assert_eq!(trust[&ContestantId::from("Ada")], 0.0);
    }

    #[test]
    fn test_foreign_copy_drops_beliefs_and_immunity() {
        let mut net = TrustGraph::new();
        net.add_contestant(random_contestant("Filip"));
        net.initialize_beliefs().unwrap();

        let mut filip = net.contestant(&ContestantId::from("Filip")).unwrap().clone();
        filip.set_immune(true);
        let copy = filip.foreign_copy();
        assert!(!copy.has_estimated_network());
        assert!(!copy.is_immune());
        assert_eq!(copy.id(), filip.id());
    }

    #[test]
    fn test_mutable_traits_through_accessors() {
        let mut traits = MutableTraits::new();
        traits.set("paranoia", 0.5);
        let mut filip = random_contestant("Filip").with_mutable_traits(traits);
        assert_eq!(filip.mutable_traits().get("paranoia"), Some(0.5));

        filip.mutable_traits_mut().adjust("paranoia", 0.25);
        assert_eq!(filip.mutable_traits().get("paranoia"), Some(0.75));
        assert_eq!(filip.foreign_copy().mutable_traits(), filip.mutable_traits());
    }
}
