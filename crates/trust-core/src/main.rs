//! Trust Game
//!
//! Runs a single game from a tuning file and prints what happened each round.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use trust_core::config::{InteractionStrategyKind, VotingStrategyKind, DEFAULT_TUNING_PATH};
use trust_core::{GameConfig, GameEngine, GameError, GameSummary};

/// Command line arguments for a game
#[derive(Parser, Debug)]
#[command(name = "trust_game")]
#[command(about = "A trust and eviction game between simulated contestants")]
struct Args {
    /// Tuning file; defaults are used when it is missing
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of contestants
    #[arg(long)]
    contestants: Option<usize>,

    #[arg(long, value_enum)]
    voting: Option<VotingStrategyKind>,

    #[arg(long, value_enum)]
    interaction: Option<InteractionStrategyKind>,

    /// JSON array of contestant names
    #[arg(long)]
    names: Option<PathBuf>,

    /// Print the game summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.game.seed = seed;
        }
        if let Some(contestants) = self.contestants {
            config.game.contestants = contestants;
        }
        if let Some(voting) = self.voting {
            config.strategy.voting = voting;
        }
        if let Some(interaction) = self.interaction {
            config.strategy.interaction = interaction;
        }
        if let Some(names) = &self.names {
            config.names.file = Some(names.clone());
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match GameConfig::load(&args.config, DEFAULT_TUNING_PATH) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %args.config.display(), error = %e, "Could not load game configuration");
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut config);

    match play(&config) {
        Ok(summary) => {
            report(&summary, args.json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Game aborted");
            ExitCode::FAILURE
        }
    }
}

fn play(config: &GameConfig) -> Result<GameSummary, GameError> {
    tracing::info!(seed = config.game.seed, contestants = config.game.contestants, "Starting game");
    let mut rng = SmallRng::seed_from_u64(config.game.seed);
    let mut engine = GameEngine::from_config(config, &mut rng)?;

    while !engine.is_over() {
        let record = engine.play_round(&mut rng)?;
        tracing::info!(
            round = record.round,
            succeeded = record.interactions_succeeded,
            attempted = record.interactions_attempted,
            remaining = record.remaining,
            "Round {}: {}",
            record.round,
            record.outcome
        );
    }
    Ok(engine.summary())
}

fn report(summary: &GameSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!(error = %e, "Could not serialize game summary"),
        }
        return;
    }

    let names: Vec<&str> = summary.winners.iter().map(|id| id.as_str()).collect();
    if summary.split {
        println!("Split after {} rounds between {}", summary.rounds.len(), names.join(", "));
    } else {
        println!("Game over after {} rounds. Remaining: {}", summary.rounds.len(), names.join(", "));
    }
}
