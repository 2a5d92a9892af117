//! Interaction strategies
//!
//! How a contestant picks the interaction it attempts each round. The
//! belief-driven variant replays the rest of the game many times against the
//! contestant's estimated network before deciding.

use game_events::{ContestantId, RoundOutcome};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::components::Contestant;
use crate::error::Result;
use crate::interactions::{Interaction, InteractionKind};
use crate::network::TrustGraph;
use crate::rollout::RoundDistribution;

/// Rollout trials per decision when none are configured
pub const DEFAULT_ROLLOUT_TRIALS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionStrategy {
    /// One random interacted contestant, one random target, random kind
    Random,
    /// Monte Carlo look-ahead over the contestant's estimated network
    Belief { trials: usize },
}

impl InteractionStrategy {
    pub fn belief() -> Self {
        InteractionStrategy::Belief {
            trials: DEFAULT_ROLLOUT_TRIALS,
        }
    }

    /// Choose what `interactor` attempts against the true network.
    pub fn choose(
        &self,
        interactor: &Contestant,
        true_net: &TrustGraph,
        rng: &mut SmallRng,
    ) -> Result<Option<Interaction>> {
        match self {
            InteractionStrategy::Random => Ok(random_interaction(interactor, true_net, rng)),
            InteractionStrategy::Belief { trials } => {
                belief_interaction(interactor, true_net, *trials, rng)
            }
        }
    }
}

fn random_interaction(
    interactor: &Contestant,
    true_net: &TrustGraph,
    rng: &mut SmallRng,
) -> Option<Interaction> {
    let everyone = true_net.get_all_contestants();
    let possible_interacted: Vec<&ContestantId> =
        everyone.iter().filter(|c| *c != interactor.id()).collect();
    let interacted = (*possible_interacted.choose(rng)?).clone();

    let possible_targets: Vec<&ContestantId> = everyone.iter().filter(|c| **c != interacted).collect();
    let target = (*possible_targets.choose(rng)?).clone();

    let kind = *InteractionKind::ALL.choose(rng)?;
    Some(Interaction::new(
        kind,
        interactor.id().clone(),
        vec![interacted],
        vec![target],
    ))
}

/// Response of a contestant that expects to be evicted next round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThreatResponse {
    /// Split is the likeliest outcome once we are out of the picture
    PushForSplit,
    Defend,
}

fn belief_interaction(
    interactor: &Contestant,
    true_net: &TrustGraph,
    trials: usize,
    rng: &mut SmallRng,
) -> Result<Option<Interaction>> {
    let forecast = interactor.mc_simulate_games(trials, rng)?;
    let response = forecast
        .round(1)
        .and_then(|next_round| threat_response(interactor.id(), next_round));

    match response {
        Some(ThreatResponse::PushForSplit) => {
            tracing::debug!(contestant = %interactor.id(), "Under threat, pushing for a split");
            let others: Vec<ContestantId> = true_net
                .get_all_contestants()
                .into_iter()
                .filter(|c| c != interactor.id())
                .collect();
            if others.is_empty() {
                return Ok(None);
            }
            Ok(Some(Interaction::increase_trust(
                interactor.id().clone(),
                others.clone(),
                others,
            )))
        }
        Some(ThreatResponse::Defend) => {
            // TODO: rank remaining threats by predicted vote share and target
            // the strongest one instead of acting at random.
            tracing::debug!(contestant = %interactor.id(), "Under threat, split unlikely");
            Ok(random_interaction(interactor, true_net, rng))
        }
        None => Ok(random_interaction(interactor, true_net, rng)),
    }
}

/// `None` unless our own eviction is the most likely next-round outcome.
fn threat_response(me: &ContestantId, next_round: &RoundDistribution) -> Option<ThreatResponse> {
    let mine = RoundOutcome::Evicted(me.clone());
    let my_prob = next_round.probabilities.get(&mine).copied()?;
    let highest = next_round.probabilities.values().copied().fold(0.0, f64::max);
    if my_prob < highest {
        return None;
    }

    let split_prob = next_round.probabilities.get(&RoundOutcome::Split).copied();
    let highest_other = next_round
        .probabilities
        .iter()
        .filter(|(outcome, _)| **outcome != mine && !outcome.is_split())
        .map(|(_, p)| *p)
        .fold(0.0, f64::max);

    match split_prob {
        Some(p) if p >= highest_other => Some(ThreatResponse::PushForSplit),
        _ => Some(ThreatResponse::Defend),
    }
}
