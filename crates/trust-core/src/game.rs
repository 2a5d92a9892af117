//! Game engine
//!
//! Drives rounds against a true `TrustGraph`: interaction phase, voting
//! phase, then the reaction phase for surviving contestants. The game ends on
//! a split or when a single contestant remains.

use game_events::{ContestantId, NetworkSnapshot, RoundRecord};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::components::Contestant;
use crate::config::GameConfig;
use crate::error::Result;
use crate::interactions::RandomInteractionHandler;
use crate::network::{TrustGraph, VoteOutcome};

/// Result of a complete game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub rounds: Vec<RoundRecord>,
    /// The sole survivor, or everyone sharing a split
    pub winners: Vec<ContestantId>,
    pub split: bool,
    pub final_state: NetworkSnapshot,
}

#[derive(Debug)]
pub struct GameEngine {
    network: TrustGraph,
    round: u32,
    max_rounds: Option<u32>,
    history: Vec<RoundRecord>,
}

impl GameEngine {
    /// Wrap an already populated network. Contestants must have their
    /// estimated networks before the first round.
    pub fn new(network: TrustGraph) -> Self {
        Self {
            network,
            round: 0,
            max_rounds: None,
            history: Vec::new(),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Build a network of contestants from configuration and give each of
    /// them its belief copy.
    pub fn from_config(config: &GameConfig, rng: &mut SmallRng) -> Result<Self> {
        config.validate()?;

        let mut network = TrustGraph::new()
            .with_n_interactions(config.game.n_interactions)
            .with_interaction_handler(RandomInteractionHandler::new(config.interaction.success_prob))
            .with_name_pool(config.name_pool()?);

        for _ in 0..config.game.contestants {
            let name = network.next_name(rng);
            let contestant = Contestant::new(
                name,
                config.voting_strategy(),
                config.interaction_strategy(),
            )
            .with_traits(config.traits.clone());
            network.add_contestant(contestant);
        }
        network.initialize_beliefs()?;

        tracing::info!(
            contestants = network.len(),
            voting = ?config.strategy.voting,
            interaction = ?config.strategy.interaction,
            "Game set up"
        );
        Ok(Self::new(network).with_max_rounds(config.max_rounds()))
    }

    pub fn network(&self) -> &TrustGraph {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut TrustGraph {
        &mut self.network
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.network.is_split()
            || self.network.len() <= 1
            || self.max_rounds.is_some_and(|max| self.round >= max)
    }

    /// Play one full round.
    pub fn play_round(&mut self, rng: &mut SmallRng) -> Result<RoundRecord> {
        self.round += 1;
        let interactions = self.network.interaction_phase(rng)?;
        let outcome = self.network.voting_phase(rng)?;
        if let Some(evicted) = outcome.evicted() {
            self.network.voting_outcome_reaction_phase(evicted)?;
        }

        let record = RoundRecord {
            round: self.round,
            interactions_attempted: interactions.attempted,
            interactions_succeeded: interactions.succeeded,
            outcome: outcome.to_round_outcome(),
            tally: match outcome {
                VoteOutcome::Evict { tally, .. } => tally,
                VoteOutcome::Split => Default::default(),
            },
            remaining: self.network.len(),
        };
        tracing::debug!(round = record.round, outcome = %record.outcome, remaining = record.remaining, "Round finished");
        self.history.push(record.clone());
        Ok(record)
    }

    /// Play rounds until the game is over.
    pub fn run(&mut self, rng: &mut SmallRng) -> Result<GameSummary> {
        while !self.is_over() {
            self.play_round(rng)?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            rounds: self.history.clone(),
            winners: self.network.get_all_contestants(),
            split: self.network.is_split(),
            final_state: self.network.snapshot(self.round),
        }
    }
}
