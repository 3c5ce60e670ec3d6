//! Deduplicating cross-reference index.

pub mod entity;
pub mod global;
pub mod shared;

pub use entity::EntityIndex;
pub use global::{GlobalIndex, IndexStats, InsertOutcome};
pub use shared::SharedIndex;
