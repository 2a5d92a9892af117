//! Decision strategies
//!
//! Closed sets of concrete strategies, one family for voting and one for
//! choosing interactions. Each family exposes a single `choose`.

pub mod interaction;
pub mod voting;

pub use interaction::{InteractionStrategy, DEFAULT_ROLLOUT_TRIALS};
pub use voting::VotingStrategy;
