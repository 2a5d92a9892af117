//! Contestant naming
//!
//! An ordered pool of candidate names, consumed front-to-back, with a random
//! fallback once the pool runs dry.

use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Length of generated fallback names
pub const RANDOM_NAME_LEN: usize = 6;

/// Queue of names loaded from a JSON list
#[derive(Debug, Clone, Default)]
pub struct NamePool {
    names: VecDeque<String>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a JSON array of strings, e.g. `["Filip", "Kipp"]`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let names: Vec<String> = serde_json::from_str(&content)?;
        Ok(Self::from_names(names))
    }

    /// Pop the next name off the front of the pool
    pub fn next_name(&mut self) -> Option<String> {
        self.names.pop_front()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Generate a random uppercase name
pub fn random_name(rng: &mut SmallRng) -> String {
    (0..RANDOM_NAME_LEN)
        .map(|_| rng.gen_range(b'A'..=b'Z') as char)
        .collect()
}
