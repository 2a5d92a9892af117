//! Monte Carlo rollouts
//!
//! Replays the remainder of a game many times against a belief graph to
//! estimate who is evicted in each future round. Every trial runs on a
//! private working copy, so the graph passed in is never touched.
//!
//! Per trial:
//! 1. clear samples and immunity on the working copy, then resample every
//!    uncertain trust value;
//! 2. vote repeatedly; each evicted contestant is marked immune (never
//!    removed) so it cannot be picked again;
//! 3. stop at the first split, or once at most one contestant is still in
//!    the running, which is where the real game ends too.
//!
//! Round `k` of the result only counts trials that lasted at least `k`
//! rounds. Rounds no trial reached are omitted.

use game_events::RoundOutcome;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::network::{TrustGraph, VoteOutcome};

/// Outcome frequencies for one future round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundDistribution {
    /// Trials that reached this round
    pub qualifying_trials: usize,
    pub probabilities: BTreeMap<RoundOutcome, f64>,
}

impl RoundDistribution {
    pub fn probability(&self, outcome: &RoundOutcome) -> f64 {
        self.probabilities.get(outcome).copied().unwrap_or(0.0)
    }

    /// The likeliest outcome; ties resolve to the first in outcome order
    pub fn most_likely(&self) -> Option<(&RoundOutcome, f64)> {
        self.probabilities
            .iter()
            .fold(None, |best: Option<(&RoundOutcome, f64)>, (outcome, p)| match best {
                Some((_, best_p)) if best_p >= *p => best,
                _ => Some((outcome, *p)),
            })
    }

    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }
}

/// Per-round outcome distributions from a batch of trials
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolloutDistribution {
    trials: usize,
    rounds: Vec<RoundDistribution>,
}

impl RolloutDistribution {
    /// Aggregate finished trial sequences.
    pub fn from_sequences(sequences: &[Vec<RoundOutcome>]) -> Self {
        let longest = sequences.iter().map(Vec::len).max().unwrap_or(0);
        let rounds = (0..longest)
            .map(|index| {
                let mut counts: BTreeMap<RoundOutcome, usize> = BTreeMap::new();
                for outcome in sequences.iter().filter_map(|seq| seq.get(index)) {
                    *counts.entry(outcome.clone()).or_default() += 1;
                }
                let qualifying_trials: usize = counts.values().sum();
                let probabilities = counts
                    .into_iter()
                    .map(|(outcome, count)| (outcome, count as f64 / qualifying_trials as f64))
                    .collect();
                RoundDistribution {
                    qualifying_trials,
                    probabilities,
                }
            })
            .collect();
        Self {
            trials: sequences.len(),
            rounds,
        }
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Distribution for a 1-based round number
    pub fn round(&self, round: usize) -> Option<&RoundDistribution> {
        round.checked_sub(1).and_then(|index| self.rounds.get(index))
    }

    pub fn rounds(&self) -> &[RoundDistribution] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Run `trials` simulated games on a working copy of `graph`.
pub fn rollout(graph: &TrustGraph, trials: usize, rng: &mut SmallRng) -> Result<RolloutDistribution> {
    let mut working = graph.belief_copy();
    let mut sequences = Vec::with_capacity(trials);
    for _ in 0..trials {
        let sequence = simulate_trial(&mut working, rng)?;
        tracing::trace!(?sequence, "Rollout trial finished");
        sequences.push(sequence);
    }
    Ok(RolloutDistribution::from_sequences(&sequences))
}

/// Play one simulated game to its end on `working`, returning who went out
/// in each round. Leaves `working` in its clean state.
pub fn simulate_trial(working: &mut TrustGraph, rng: &mut SmallRng) -> Result<Vec<RoundOutcome>> {
    working.reset_rollout_state();
    working.sample_trust(rng)?;

    let mut sequence = Vec::new();
    while working.active_len() > 1 {
        match working.simulate_vote(rng)? {
            VoteOutcome::Split => {
                sequence.push(RoundOutcome::Split);
                break;
            }
            VoteOutcome::Evict { evicted, .. } => {
                working.set_immune(&evicted)?;
                sequence.push(RoundOutcome::Evicted(evicted));
            }
        }
    }

    working.reset_rollout_state();
    Ok(sequence)
}
