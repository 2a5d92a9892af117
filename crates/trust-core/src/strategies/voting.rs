//! Voting strategies.

use game_events::{ContestantId, Vote};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::components::Contestant;
use crate::error::{GameError, Result};
use crate::network::TrustGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingStrategy {
    /// Uniform over every eligible contestant plus the split signal
    Random,
    /// Evict the least trusted neighbour unless everyone clears the
    /// voter's trust threshold
    Trust,
}

impl VotingStrategy {
    /// Choose a vote for `voter` using `view` as its picture of the game.
    pub fn choose(&self, voter: &Contestant, view: &TrustGraph, rng: &mut SmallRng) -> Result<Vote> {
        match self {
            VotingStrategy::Random => Ok(random_vote(voter, view, rng)),
            VotingStrategy::Trust => trust_vote(voter, view, rng),
        }
    }
}

/// Contestants in `view` the voter may vote against
fn eligible<'a>(voter: &'a Contestant, view: &'a TrustGraph) -> impl Iterator<Item = &'a ContestantId> {
    view.iter_contestants()
        .filter(move |c| c.id() != voter.id() && !c.is_immune())
        .map(Contestant::id)
}

fn random_vote(voter: &Contestant, view: &TrustGraph, rng: &mut SmallRng) -> Vote {
    let mut options: Vec<Vote> = eligible(voter, view).cloned().map(Vote::Evict).collect();
    options.push(Vote::Split);
    options.choose(rng).cloned().unwrap_or(Vote::Split)
}

fn trust_vote(voter: &Contestant, view: &TrustGraph, rng: &mut SmallRng) -> Result<Vote> {
    let trust = eligible(voter, view)
        .map(|other| {
            let value = view.require_link(voter.id(), other)?.effective_trust(voter.id())?;
            Ok((other, value))
        })
        .collect::<Result<Vec<_>>>()?;

    let threshold = voter.trust_threshold();
    if trust.iter().all(|(_, value)| *value > threshold) {
        // Also covers an empty neighbourhood
        return Ok(Vote::Split);
    }

    let lowest = trust
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::INFINITY, f64::min);
    let candidates: Vec<&ContestantId> = trust
        .iter()
        .filter(|(_, value)| *value == lowest)
        .map(|(id, _)| *id)
        .collect();
    candidates
        .choose(rng)
        .map(|id| Vote::Evict((*id).clone()))
        .ok_or_else(|| GameError::InvalidDistribution(format!("no trust minimum for {}", voter.id())))
}
