//! Whole-game scenarios
//!
//! Plays games through the public API and checks the properties that must
//! hold after every round.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use trust_core::{
    Contestant, GameEngine, ImmutableTraits, InteractionStrategy, NamePool,
    RandomInteractionHandler, RoundOutcome, TrustGraph, VotingStrategy,
};

fn build_game(names: &[&str], voting: VotingStrategy, threshold: f64) -> GameEngine {
    let mut network = TrustGraph::new()
        .with_interaction_handler(RandomInteractionHandler::new(1.0))
        .with_name_pool(NamePool::from_names(names.iter().copied()));
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..names.len() {
        let name = network.next_name(&mut rng);
        let contestant = Contestant::new(name, voting, InteractionStrategy::Random)
            .with_traits(ImmutableTraits::with_trust_threshold(threshold));
        network.add_contestant(contestant);
    }
    network.initialize_beliefs().unwrap();
    GameEngine::new(network)
}

fn assert_complete(network: &TrustGraph) {
    let n = network.len();
    assert_eq!(network.link_count(), n * n.saturating_sub(1) / 2);
    let ids = network.get_all_contestants();
    for a in &ids {
        for b in &ids {
            if a != b {
                assert!(network.link(a, b).is_some(), "missing link {} - {}", a, b);
            }
        }
    }
}

/// Every contestant's belief about its own links matches the true graph.
fn assert_beliefs_mirror_truth(network: &TrustGraph) {
    for contestant in network.iter_contestants() {
        let me = contestant.id();
        let belief = contestant.estimated_network().unwrap();
        for other in network.get_all_contestants().iter().filter(|o| *o != me) {
            let truth = network.link(me, other).unwrap();
            let believed = belief.link(me, other).unwrap();
            for holder in [me, other] {
                assert_eq!(
                    truth.trust_mean(holder).unwrap(),
                    believed.trust_mean(holder).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_random_game_evicts_one_per_round() {
    let mut engine = build_game(&["Ann", "Bob", "Cid"], VotingStrategy::Random, 0.0);
    let mut rng = SmallRng::seed_from_u64(2024);

    while !engine.is_over() {
        let before = engine.network().len();
        let record = engine.play_round(&mut rng).unwrap();
        match &record.outcome {
            RoundOutcome::Evicted(id) => {
                assert_eq!(record.remaining, before - 1);
                assert!(!engine.network().contains(id));
                assert!(!engine.network().is_split());
            }
            RoundOutcome::Split => {
                assert_eq!(record.remaining, before);
                assert!(engine.network().is_split());
            }
        }
        assert_complete(engine.network());
    }

    let summary = engine.summary();
    assert!(summary.split || summary.winners.len() == 1);
}

#[test]
fn test_trust_voters_with_high_threshold_never_split() {
    let names = ["Ann", "Bob", "Cid", "Dee", "Eve"];
    let mut engine = build_game(&names, VotingStrategy::Trust, 5.0);
    let mut rng = SmallRng::seed_from_u64(7);

    let summary = engine.run(&mut rng).unwrap();
    assert!(!summary.split);
    assert_eq!(summary.winners.len(), 1);
    assert_eq!(summary.rounds.len(), names.len() - 1);
    assert!(summary.rounds.iter().all(|r| !r.outcome.is_split()));
}

#[test]
fn test_reaction_phase_prunes_beliefs() {
    let mut engine = build_game(&["Ann", "Bob", "Cid", "Dee"], VotingStrategy::Trust, 5.0);
    let mut rng = SmallRng::seed_from_u64(11);

    let record = engine.play_round(&mut rng).unwrap();
    let evicted = record.outcome.evicted().unwrap().clone();
    for contestant in engine.network().iter_contestants() {
        let belief = contestant.estimated_network().unwrap();
        assert!(!belief.contains(&evicted));
        assert_eq!(belief.len(), 3);
        assert_complete(belief);
    }
}

#[test]
fn test_two_contestants_survivor_forgets_evicted() {
    let mut engine = build_game(&["Ann", "Bob"], VotingStrategy::Trust, 5.0);
    let mut rng = SmallRng::seed_from_u64(5);

    let record = engine.play_round(&mut rng).unwrap();
    let evicted = record.outcome.evicted().unwrap().clone();
    assert!(engine.is_over());

    let survivor = engine.network().iter_contestants().next().unwrap();
    let mut belief = survivor.estimated_network().unwrap().clone();
    assert!(!belief.contains(&evicted));
    for _ in 0..20 {
        let outcome = belief.simulate_vote(&mut rng).unwrap();
        assert_ne!(outcome.evicted(), Some(&evicted));
    }
}

#[test]
fn test_interactions_keep_beliefs_in_sync() {
    let mut engine = build_game(&["Ann", "Bob", "Cid", "Dee"], VotingStrategy::Random, 0.0);
    let mut rng = SmallRng::seed_from_u64(99);

    for _ in 0..3 {
        if engine.is_over() {
            break;
        }
        engine.play_round(&mut rng).unwrap();
        assert_beliefs_mirror_truth(engine.network());
    }
}

#[test]
fn test_summary_serializes_to_json() {
    let mut engine = build_game(&["Ann", "Bob"], VotingStrategy::Trust, 5.0);
    let mut rng = SmallRng::seed_from_u64(3);

    let summary = engine.run(&mut rng).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["split"], false);
    assert_eq!(json["rounds"].as_array().unwrap().len(), 1);
    assert_eq!(json["final_state"]["contestants"].as_array().unwrap().len(), 1);
}
