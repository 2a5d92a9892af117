//! Interactions
//!
//! Trust-mutating effects a contestant attempts during the interaction
//! phase. Each effect writes the same change to the true graph and to both
//! endpoints' estimated networks.

mod handler;

pub use handler::{
    FixedInteractionHandler, InteractionHandler, RandomInteractionHandler, DEFAULT_SUCCESS_PROB,
};

use game_events::ContestantId;
use serde::{Deserialize, Serialize};

use crate::components::TRUST_UNIT;
use crate::error::Result;
use crate::network::TrustGraph;

/// Type of interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    /// On success the interacted group trusts the target group more
    IncreaseTrust,
    /// On success the interacted group trusts the target group less
    DecreaseTrust,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 2] = [InteractionKind::IncreaseTrust, InteractionKind::DecreaseTrust];

    fn success_delta(self) -> f64 {
        match self {
            InteractionKind::IncreaseTrust => TRUST_UNIT,
            InteractionKind::DecreaseTrust => -TRUST_UNIT,
        }
    }
}

/// An attempted interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub interactor: ContestantId,
    pub interacted_group: Vec<ContestantId>,
    pub target_group: Vec<ContestantId>,
}

impl Interaction {
    pub fn new(
        kind: InteractionKind,
        interactor: ContestantId,
        interacted_group: Vec<ContestantId>,
        target_group: Vec<ContestantId>,
    ) -> Self {
        Self {
            kind,
            interactor,
            interacted_group,
            target_group,
        }
    }

    pub fn increase_trust(
        interactor: ContestantId,
        interacted_group: Vec<ContestantId>,
        target_group: Vec<ContestantId>,
    ) -> Self {
        Self::new(InteractionKind::IncreaseTrust, interactor, interacted_group, target_group)
    }

    pub fn decrease_trust(
        interactor: ContestantId,
        interacted_group: Vec<ContestantId>,
        target_group: Vec<ContestantId>,
    ) -> Self {
        Self::new(InteractionKind::DecreaseTrust, interactor, interacted_group, target_group)
    }

    /// Every interacted contestant shifts its trust toward every target by
    /// one unit, in the direction of the interaction. Self pairs are skipped.
    pub fn success(&self, net: &mut TrustGraph) -> Result<()> {
        let delta = self.kind.success_delta();
        for a in &self.interacted_group {
            for b in self.target_group.iter().filter(|b| *b != a) {
                net.mirror_trust_change(a, b, delta)?;
            }
        }
        Ok(())
    }

    /// A failed attempt always costs the interactor: every interacted
    /// contestant trusts it one unit less.
    pub fn failure(&self, net: &mut TrustGraph) -> Result<()> {
        for a in self.interacted_group.iter().filter(|a| **a != self.interactor) {
            net.mirror_trust_change(a, &self.interactor, -TRUST_UNIT)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Contestant;
    use crate::strategies::{InteractionStrategy, VotingStrategy};

    fn ids(names: &[&str]) -> Vec<ContestantId> {
        names.iter().map(|n| ContestantId::from(*n)).collect()
    }

    fn network(names: &[&str]) -> TrustGraph {
        let mut net = TrustGraph::new();
        for name in names {
            net.add_contestant(Contestant::new(*name, VotingStrategy::Random, InteractionStrategy::Random));
        }
        net.initialize_beliefs().unwrap();
        net
    }

    /// Trust `holder -> other` on the truth and on both endpoints' beliefs
    fn three_views(net: &TrustGraph, holder: &str, other: &str) -> [f64; 3] {
        let (h, o) = (ContestantId::from(holder), ContestantId::from(other));
        let read = |g: &TrustGraph| g.require_link(&h, &o).unwrap().trust_mean(&h).unwrap();
        [
            read(net),
            read(net.contestant(&h).unwrap().estimated_network().unwrap()),
            read(net.contestant(&o).unwrap().estimated_network().unwrap()),
        ]
    }

    #[test]
    fn test_increase_trust_success_is_mirrored() {
        let mut net = network(&["A", "B", "C"]);
        let interaction = Interaction::increase_trust("A".into(), ids(&["B"]), ids(&["C"]));

        interaction.success(&mut net).unwrap();

        assert_eq!(three_views(&net, "B", "C"), [1.0; 3]);
        // Only the B -> C direction moves
        assert_eq!(three_views(&net, "C", "B"), [0.0; 3]);
    }

    #[test]
    fn test_decrease_trust_success_is_mirrored() {
        let mut net = network(&["A", "B", "C", "D"]);
        let interaction = Interaction::decrease_trust("A".into(), ids(&["B", "C"]), ids(&["D"]));

        interaction.success(&mut net).unwrap();

        assert_eq!(three_views(&net, "B", "D"), [-1.0; 3]);
        assert_eq!(three_views(&net, "C", "D"), [-1.0; 3]);
    }

    #[test]
    fn test_failure_damages_interactor_for_both_kinds() {
        for kind in InteractionKind::ALL {
            let mut net = network(&["A", "B", "C"]);
            let interaction = Interaction::new(kind, "A".into(), ids(&["B"]), ids(&["C"]));

            interaction.failure(&mut net).unwrap();

            assert_eq!(three_views(&net, "B", "A"), [-1.0; 3]);
            assert_eq!(three_views(&net, "B", "C"), [0.0; 3]);
        }
    }

    #[test]
    fn test_group_interaction_skips_self_pairs() {
        let mut net = network(&["A", "B", "C"]);
        let everyone_else = ids(&["B", "C"]);
        let interaction = Interaction::increase_trust("A".into(), everyone_else.clone(), everyone_else);

        interaction.success(&mut net).unwrap();

        assert_eq!(three_views(&net, "B", "C"), [1.0; 3]);
        assert_eq!(three_views(&net, "C", "B"), [1.0; 3]);
    }

    #[test]
    fn test_effect_on_missing_contestant_fails() {
        let mut net = network(&["A", "B"]);
        let interaction = Interaction::increase_trust("A".into(), ids(&["B"]), ids(&["Z"]));
        assert!(interaction.success(&mut net).is_err());
    }
}
