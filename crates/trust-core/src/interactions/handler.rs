//! Interaction handlers decide whether an attempted interaction succeeds.

use rand::rngs::SmallRng;
use rand::Rng;
use std::fmt;

use super::Interaction;
use crate::network::TrustGraph;

/// Default success probability for random handlers
pub const DEFAULT_SUCCESS_PROB: f64 = 0.75;

pub trait InteractionHandler: fmt::Debug + Send + Sync {
    fn get_interaction_success(
        &self,
        net: &TrustGraph,
        interaction: &Interaction,
        rng: &mut SmallRng,
    ) -> bool;
}

/// Independent Bernoulli trial, regardless of what is attempted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomInteractionHandler {
    pub success_prob: f64,
}

impl RandomInteractionHandler {
    pub fn new(success_prob: f64) -> Self {
        Self { success_prob }
    }
}

impl Default for RandomInteractionHandler {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_PROB)
    }
}

impl InteractionHandler for RandomInteractionHandler {
    fn get_interaction_success(
        &self,
        _net: &TrustGraph,
        _interaction: &Interaction,
        rng: &mut SmallRng,
    ) -> bool {
        rng.gen::<f64>() < self.success_prob
    }
}

/// Always succeeds or always fails; for scripted games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInteractionHandler {
    pub succeed: bool,
}

impl FixedInteractionHandler {
    pub fn new(succeed: bool) -> Self {
        Self { succeed }
    }
}

impl InteractionHandler for FixedInteractionHandler {
    fn get_interaction_success(
        &self,
        _net: &TrustGraph,
        _interaction: &Interaction,
        _rng: &mut SmallRng,
    ) -> bool {
        self.succeed
    }
}
