//! Error types for the trust game core.

use game_events::ContestantId;
use thiserror::Error;

/// Errors raised by the simulation core.
///
/// None of these are recoverable inside a phase or a rollout trial: they
/// indicate a wiring or modelling bug and abort the current run.
#[derive(Debug, Error)]
pub enum GameError {
    /// A contestant's estimated network was generated a second time
    #[error("estimated network for {0} has already been generated")]
    DuplicateInitialization(ContestantId),

    /// Contestant is not present in the graph it was looked up in
    #[error("there is no contestant {0}")]
    NotFound(ContestantId),

    /// Two present contestants have no relationship link between them
    #[error("no relationship link between {0} and {1}")]
    MissingLink(ContestantId, ContestantId),

    /// An operation needed the contestant's belief state before it existed
    #[error("estimated network for {0} has not been generated")]
    MissingBelief(ContestantId),

    /// Realized trust was read before the sampling step ran
    #[error("trust from {holder} toward {other} has variance but no realized sample")]
    PreconditionViolation {
        holder: ContestantId,
        other: ContestantId,
    },

    /// Trust variance cannot parameterize a normal distribution
    #[error("invalid trust distribution: {0}")]
    InvalidDistribution(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors loading configuration or name lists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_contestants() {
        let err = GameError::NotFound(ContestantId::from("Filip"));
        assert_eq!(err.to_string(), "there is no contestant Filip");

        let err = GameError::PreconditionViolation {
            holder: ContestantId::from("Filip"),
            other: ContestantId::from("Kipp"),
        };
        assert!(err.to_string().contains("Filip"));
        assert!(err.to_string().contains("Kipp"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: GameError = ConfigError::invalid("success_prob out of range").into();
        assert!(matches!(err, GameError::Config(ConfigError::Invalid(_))));
    }
}
