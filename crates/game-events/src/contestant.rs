//! Contestant identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a contestant (its name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestantId(pub String);

impl ContestantId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContestantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContestantId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ContestantId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
