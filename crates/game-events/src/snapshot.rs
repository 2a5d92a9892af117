//! Snapshot Types
//!
//! Serializable views of a trust network at a point in time, consumed by
//! renderers and replay tools outside the simulation core.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ContestantId;

/// Generates a snapshot ID for the given round number.
pub fn generate_snapshot_id(round: u32) -> String {
    format!("round_{:04}", round)
}

/// One relationship link, both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub a: ContestantId,
    pub b: ContestantId,
    /// Keyed by the holder of the opinion
    pub trust_mean: BTreeMap<ContestantId, f64>,
    #[serde(default)]
    pub trust_var: BTreeMap<ContestantId, f64>,
}

impl LinkSnapshot {
    /// Trust held by `holder` toward the other endpoint
    pub fn trust_from(&self, holder: &ContestantId) -> Option<f64> {
        self.trust_mean.get(holder).copied()
    }
}

/// Complete network snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub snapshot_id: String,
    pub round: u32,
    pub contestants: Vec<ContestantId>,
    pub links: Vec<LinkSnapshot>,
    #[serde(default)]
    pub split: bool,
}

impl NetworkSnapshot {
    /// Creates an empty snapshot for the given round.
    pub fn new(round: u32) -> Self {
        Self {
            snapshot_id: generate_snapshot_id(round),
            round,
            contestants: Vec::new(),
            links: Vec::new(),
            split: false,
        }
    }

    /// Finds the link between two contestants regardless of endpoint order.
    pub fn link(&self, a: &ContestantId, b: &ContestantId) -> Option<&LinkSnapshot> {
        self.links
            .iter()
            .find(|l| (&l.a == a && &l.b == b) || (&l.a == b && &l.b == a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_snapshot_id() {
        assert_eq!(generate_snapshot_id(1), "round_0001");
        assert_eq!(generate_snapshot_id(42), "round_0042");
    }

    #[test]
    fn test_link_lookup_is_unordered() {
        let filip = ContestantId::from("Filip");
        let kipp = ContestantId::from("Kipp");

        let mut snapshot = NetworkSnapshot::new(0);
        snapshot.contestants = vec![filip.clone(), kipp.clone()];
        snapshot.links.push(LinkSnapshot {
            a: filip.clone(),
            b: kipp.clone(),
            trust_mean: BTreeMap::from([(filip.clone(), 0.0), (kipp.clone(), -1.0)]),
            trust_var: BTreeMap::new(),
        });

        let link = snapshot.link(&kipp, &filip).unwrap();
        assert_eq!(link.trust_from(&kipp), Some(-1.0));
        assert_eq!(link.trust_from(&filip), Some(0.0));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = NetworkSnapshot::new(2);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"snapshot_id\":\"round_0002\""));

        let parsed: NetworkSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
