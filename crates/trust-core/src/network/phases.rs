//! Round phases: interaction, vote, reaction.

use game_events::{ContestantId, RoundOutcome, Vote};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::TrustGraph;
use crate::error::{GameError, Result};

/// Counts from one interaction phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionReport {
    pub attempted: usize,
    pub succeeded: usize,
}

/// Result of tallying one round of votes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Every collected vote was the split signal
    Split,
    Evict {
        evicted: ContestantId,
        /// Non-split vote counts per contestant
        tally: BTreeMap<ContestantId, u32>,
    },
}

impl VoteOutcome {
    pub fn evicted(&self) -> Option<&ContestantId> {
        match self {
            VoteOutcome::Evict { evicted, .. } => Some(evicted),
            VoteOutcome::Split => None,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, VoteOutcome::Split)
    }

    pub fn to_round_outcome(&self) -> RoundOutcome {
        match self {
            VoteOutcome::Split => RoundOutcome::Split,
            VoteOutcome::Evict { evicted, .. } => RoundOutcome::Evicted(evicted.clone()),
        }
    }
}

impl TrustGraph {
    /// Every contestant picks its interactions against this (true) graph,
    /// then each one is resolved through the interaction handler.
    pub fn interaction_phase(&mut self, rng: &mut SmallRng) -> Result<InteractionReport> {
        let mut interactions = Vec::new();
        for contestant in &self.contestants {
            for _ in 0..self.n_interactions {
                if let Some(interaction) = contestant.get_interaction(self, rng)? {
                    interactions.push(interaction);
                }
            }
        }

        let handler = Arc::clone(&self.interaction_handler);
        let mut report = InteractionReport {
            attempted: interactions.len(),
            succeeded: 0,
        };
        for interaction in &interactions {
            let success = handler.get_interaction_success(self, interaction, rng);
            tracing::debug!(
                kind = ?interaction.kind,
                interactor = %interaction.interactor,
                success,
                "Resolved interaction"
            );
            if success {
                interaction.success(self)?;
                report.succeeded += 1;
            } else {
                interaction.failure(self)?;
            }
        }
        Ok(report)
    }

    /// One vote per active, non-immune contestant.
    ///
    /// A contestant votes from its own estimated network when it has one,
    /// otherwise from this graph.
    pub fn collect_votes(&self, rng: &mut SmallRng) -> Result<Vec<Vote>> {
        let mut votes = Vec::new();
        for voter in self.contestants.iter().filter(|c| !c.is_immune()) {
            let view = if voter.has_estimated_network() {
                voter.estimated_network()?
            } else {
                self
            };
            votes.push(voter.get_vote(view, rng)?);
        }
        Ok(votes)
    }

    /// Generate the result of a vote without evicting anyone.
    ///
    /// Split votes never count toward a contestant's tally. Ties for the most
    /// votes are broken uniformly at random.
    pub fn simulate_vote(&mut self, rng: &mut SmallRng) -> Result<VoteOutcome> {
        let votes = self.collect_votes(rng)?;

        let mut tally: BTreeMap<ContestantId, u32> = BTreeMap::new();
        for target in votes.iter().filter_map(Vote::target) {
            *tally.entry(target.clone()).or_default() += 1;
        }

        let Some(top) = tally.values().copied().max() else {
            self.split = true;
            return Ok(VoteOutcome::Split);
        };
        let leaders: Vec<&ContestantId> = tally
            .iter()
            .filter(|(_, count)| **count == top)
            .map(|(id, _)| id)
            .collect();
        let evicted = leaders
            .choose(rng)
            .map(|id| (*id).clone())
            .ok_or_else(|| GameError::InvalidDistribution("empty vote tally".to_string()))?;

        Ok(VoteOutcome::Evict { evicted, tally })
    }

    /// Collect votes and either evict the plurality target or end the game
    /// in a split.
    pub fn voting_phase(&mut self, rng: &mut SmallRng) -> Result<VoteOutcome> {
        let outcome = self.simulate_vote(rng)?;
        match &outcome {
            VoteOutcome::Split => {
                self.split = true;
                tracing::info!("Splitting the prize");
            }
            VoteOutcome::Evict { evicted, tally } => {
                tracing::info!(%evicted, ?tally, "Evicting contestant");
                self.remove_contestant(evicted)?;
            }
        }
        Ok(outcome)
    }

    /// Every remaining contestant drops the evicted one from its own
    /// estimated network.
    pub fn voting_outcome_reaction_phase(&mut self, evicted: &ContestantId) -> Result<()> {
        for contestant in &mut self.contestants {
            tracing::debug!(contestant = %contestant.id(), %evicted, "Updating belief after eviction");
            contestant.estimated_network_mut()?.remove_contestant(evicted)?;
        }
        Ok(())
    }
}
