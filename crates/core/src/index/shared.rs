use super::{EntityIndex, GlobalIndex, IndexStats, InsertOutcome};
use crate::classify::AnonymousNames;
use crate::error::Result;
use crate::model::Occurrence;
use dashmap::DashMap;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent index for units classified in parallel.
///
/// Each name bucket lives behind its shard lock for the whole admit, so the
/// duplicate check and the store cannot interleave with another thread.
#[derive(Debug, Default)]
pub struct SharedIndex {
    entities: DashMap<SmolStr, EntityIndex>,
    anonymous: AnonymousNames,
    adopted: AtomicU64,
    discarded: AtomicU64,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, occurrence: Occurrence) -> Result<InsertOutcome> {
        let specifier = occurrence.specifier();
        let mut entity = self
            .entities
            .entry(SmolStr::new(occurrence.name()))
            .or_insert_with(|| EntityIndex::new(occurrence.name(), specifier));

        if entity.admit(occurrence)? {
            self.adopted.fetch_add(1, Ordering::Relaxed);
            Ok(InsertOutcome::Adopted)
        } else {
            tracing::trace!("discarding duplicate occurrence of {}", entity.name());
            self.discarded.fetch_add(1, Ordering::Relaxed);
            Ok(InsertOutcome::Discarded)
        }
    }

    pub fn anonymous(&self) -> &AnonymousNames {
        &self.anonymous
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Freeze into a [`GlobalIndex`]. Names are sorted since the order of
    /// first sight depends on scheduling.
    pub fn into_global(self) -> GlobalIndex {
        let mut entities: IndexMap<SmolStr, EntityIndex> = self.entities.into_iter().collect();
        entities.sort_unstable_keys();
        let stats = IndexStats {
            adopted: self.adopted.into_inner(),
            discarded: self.discarded.into_inner(),
        };
        GlobalIndex::from_entities(entities, self.anonymous, stats)
    }
}

impl From<GlobalIndex> for SharedIndex {
    fn from(index: GlobalIndex) -> Self {
        let (entities, anonymous, stats) = index.into_parts();
        Self {
            entities: entities.into_iter().collect(),
            anonymous,
            adopted: AtomicU64::new(stats.adopted),
            discarded: AtomicU64::new(stats.discarded),
        }
    }
}
