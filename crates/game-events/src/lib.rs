//! Shared data types for the trust game.
//!
//! This crate contains pure data structures with no simulation logic.
//! The simulation core produces them; renderers, loggers and the game
//! driver consume them.

pub mod contestant;
pub mod outcome;
pub mod snapshot;

pub use contestant::ContestantId;
pub use outcome::{RoundOutcome, RoundRecord, Vote};
pub use snapshot::{generate_snapshot_id, LinkSnapshot, NetworkSnapshot};
