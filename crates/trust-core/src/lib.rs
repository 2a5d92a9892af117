//! Trust Game Engine Library
//!
//! Contestants hold beliefs about the trust network, interact to move trust
//! around, and vote each round to evict someone or split the pot.

pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod interactions;
pub mod names;
pub mod network;
pub mod rollout;
pub mod strategies;

pub use components::{Contestant, ImmutableTraits, MutableTraits, RelationshipLink, TRUST_UNIT};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, Result};
pub use game::{GameEngine, GameSummary};
pub use interactions::{
    FixedInteractionHandler, Interaction, InteractionHandler, InteractionKind,
    RandomInteractionHandler,
};
pub use names::NamePool;
pub use network::{InteractionReport, TrustGraph, VoteOutcome};
pub use rollout::{rollout, RolloutDistribution, RoundDistribution};
pub use strategies::{InteractionStrategy, VotingStrategy};

pub use game_events::{ContestantId, NetworkSnapshot, RoundOutcome, RoundRecord, Vote};
