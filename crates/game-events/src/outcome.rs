//! Votes and round outcomes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ContestantId;

/// A single ballot cast during a voting phase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Vote {
    /// Vote to evict the named contestant
    Evict(ContestantId),
    /// Decline to evict anyone and split the prize instead
    Split,
}

impl Vote {
    pub fn is_split(&self) -> bool {
        matches!(self, Vote::Split)
    }

    /// The contestant this ballot targets, if any
    pub fn target(&self) -> Option<&ContestantId> {
        match self {
            Vote::Evict(id) => Some(id),
            Vote::Split => None,
        }
    }
}

/// What happened at the end of a voting round
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "contestant", rename_all = "snake_case")]
pub enum RoundOutcome {
    Evicted(ContestantId),
    Split,
}

impl RoundOutcome {
    pub fn is_split(&self) -> bool {
        matches!(self, RoundOutcome::Split)
    }

    pub fn evicted(&self) -> Option<&ContestantId> {
        match self {
            RoundOutcome::Evicted(id) => Some(id),
            RoundOutcome::Split => None,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Evicted(id) => write!(f, "evicted {}", id),
            RoundOutcome::Split => f.write_str("split"),
        }
    }
}

/// Summary of one played round, handed to whoever renders or logs the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: u32,
    pub interactions_attempted: usize,
    pub interactions_succeeded: usize,
    pub outcome: RoundOutcome,
    /// Non-split vote counts; empty when the round ended in a split
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tally: BTreeMap<ContestantId, u32>,
    /// Contestants still in the game after the round
    pub remaining: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_accessors() {
        let vote = Vote::Evict(ContestantId::from("Filip"));
        assert!(!vote.is_split());
        assert_eq!(vote.target().map(|id| id.as_str()), Some("Filip"));

        assert!(Vote::Split.is_split());
        assert!(Vote::Split.target().is_none());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RoundOutcome::Split.to_string(), "split");
        assert_eq!(
            RoundOutcome::Evicted(ContestantId::from("Kipp")).to_string(),
            "evicted Kipp"
        );
    }

    #[test]
    fn test_split_record_omits_tally() {
        let record = RoundRecord {
            round: 3,
            interactions_attempted: 2,
            interactions_succeeded: 1,
            outcome: RoundOutcome::Split,
            tally: BTreeMap::new(),
            remaining: 2,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("tally").is_none());
        assert_eq!(json["outcome"]["type"], "split");

        let parsed: RoundRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
