//! Contestant traits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Traits fixed at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmutableTraits {
    /// Trust toward every neighbour must strictly exceed this before a
    /// trust-based voter agrees to split
    pub trust_threshold: f64,
}

impl Default for ImmutableTraits {
    fn default() -> Self {
        Self {
            trust_threshold: 0.0,
        }
    }
}

impl ImmutableTraits {
    pub fn with_trust_threshold(trust_threshold: f64) -> Self {
        Self { trust_threshold }
    }
}

/// Named traits that may evolve over the course of a game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutableTraits {
    values: BTreeMap<String, f64>,
}

impl MutableTraits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Add `delta` to a trait, starting from zero if it was unset
    pub fn adjust(&mut self, name: &str, delta: f64) -> f64 {
        let value = self.values.entry(name.to_string()).or_insert(0.0);
        *value += delta;
        *value
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
