//! Configuration System
//!
//! Loads game parameters from `tuning.toml` so games can be set up without
//! recompiling. Every section falls back to its defaults when omitted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::components::ImmutableTraits;
use crate::error::ConfigError;
use crate::interactions::DEFAULT_SUCCESS_PROB;
use crate::names::NamePool;
use crate::strategies::{InteractionStrategy, VotingStrategy, DEFAULT_ROLLOUT_TRIALS};

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game: GameSettings,
    pub interaction: InteractionConfig,
    pub strategy: StrategyConfig,
    pub traits: ImmutableTraits,
    pub names: NamesConfig,
}

/// Game size and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Contestants created at the start of the game
    pub contestants: usize,
    /// Interaction attempts per contestant per round
    pub n_interactions: usize,
    /// 0 means play until a split or a single winner
    pub max_rounds: u32,
    pub seed: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            contestants: 10,
            n_interactions: 1,
            max_rounds: 0,
            seed: 42,
        }
    }
}

/// Interaction handler parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub success_prob: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            success_prob: DEFAULT_SUCCESS_PROB,
        }
    }
}

/// Which voting strategy contestants use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VotingStrategyKind {
    #[default]
    Random,
    Trust,
}

/// Which interaction strategy contestants use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStrategyKind {
    #[default]
    Random,
    Belief,
}

/// Strategy selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub voting: VotingStrategyKind,
    pub interaction: InteractionStrategyKind,
    /// Trials per belief-driven decision
    pub rollout_trials: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            voting: VotingStrategyKind::Random,
            interaction: InteractionStrategyKind::Random,
            rollout_trials: DEFAULT_ROLLOUT_TRIALS,
        }
    }
}

/// Name list location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// JSON array of names, consumed front-to-back
    pub file: Option<PathBuf>,
}

impl GameConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.as_ref().display(),
                error = %e,
                "Could not load game configuration, using defaults"
            );
            Self::default()
        })
    }

    /// Load the configuration a user asked for.
    ///
    /// Only a missing file at `default_path` falls back to defaults; any
    /// other path must exist and parse.
    pub fn load(path: impl AsRef<Path>, default_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path == default_path.as_ref() && !path.exists() {
            tracing::info!(path = %path.display(), "No tuning file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.contestants == 0 {
            return Err(ConfigError::invalid("game.contestants must be at least 1"));
        }
        if self.game.n_interactions == 0 {
            return Err(ConfigError::invalid("game.n_interactions must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.interaction.success_prob) {
            return Err(ConfigError::invalid(format!(
                "interaction.success_prob must be within [0, 1], got {}",
                self.interaction.success_prob
            )));
        }
        Ok(())
    }

    pub fn voting_strategy(&self) -> VotingStrategy {
        match self.strategy.voting {
            VotingStrategyKind::Random => VotingStrategy::Random,
            VotingStrategyKind::Trust => VotingStrategy::Trust,
        }
    }

    pub fn interaction_strategy(&self) -> InteractionStrategy {
        match self.strategy.interaction {
            InteractionStrategyKind::Random => InteractionStrategy::Random,
            InteractionStrategyKind::Belief => InteractionStrategy::Belief {
                trials: self.strategy.rollout_trials,
            },
        }
    }

    /// The configured name list, or an empty pool
    pub fn name_pool(&self) -> Result<NamePool, ConfigError> {
        match &self.names.file {
            Some(path) => NamePool::from_file(path),
            None => Ok(NamePool::new()),
        }
    }

    /// Maximum rounds as an option; `None` means uncapped
    pub fn max_rounds(&self) -> Option<u32> {
        (self.game.max_rounds > 0).then_some(self.game.max_rounds)
    }
}
