//! Contestants and the data attached to them and to their relationships.

pub mod contestant;
pub mod link;
pub mod traits;

pub use contestant::Contestant;
pub use link::{RelationshipLink, TRUST_UNIT};
pub use traits::{ImmutableTraits, MutableTraits};
