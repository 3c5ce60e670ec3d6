use super::EntityIndex;
use crate::classify::AnonymousNames;
use crate::error::Result;
use crate::model::Occurrence;
use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The occurrence is now owned by the index.
    Adopted,
    /// An equal occurrence was already indexed.
    Discarded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub adopted: u64,
    pub discarded: u64,
}

impl IndexStats {
    pub(crate) fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Adopted => self.adopted += 1,
            InsertOutcome::Discarded => self.discarded += 1,
        }
    }
}

/// The index of a whole session, keyed by entity name.
///
/// Entities keep insertion order so that emitting the index is deterministic.
#[derive(Debug, Default)]
pub struct GlobalIndex {
    entities: IndexMap<SmolStr, EntityIndex>,
    anonymous: AnonymousNames,
    stats: IndexStats,
}

impl GlobalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entities(
        entities: IndexMap<SmolStr, EntityIndex>,
        anonymous: AnonymousNames,
        stats: IndexStats,
    ) -> Self {
        Self {
            entities,
            anonymous,
            stats,
        }
    }

    pub(crate) fn into_parts(self) -> (IndexMap<SmolStr, EntityIndex>, AnonymousNames, IndexStats) {
        (self.entities, self.anonymous, self.stats)
    }

    /// Insert one occurrence, creating the entity on first sight.
    ///
    /// The occurrence is consumed whatever the outcome. An entity keeps the
    /// specifier it was created with; an occurrence of another specifier
    /// under the same name is a `SpecifierCollision`.
    pub fn insert(&mut self, occurrence: Occurrence) -> Result<InsertOutcome> {
        let specifier = occurrence.specifier();
        let entity = self
            .entities
            .entry(SmolStr::new(occurrence.name()))
            .or_insert_with_key(|name| EntityIndex::new(name.as_str(), specifier));

        let outcome = if entity.admit(occurrence)? {
            InsertOutcome::Adopted
        } else {
            tracing::trace!("discarding duplicate occurrence of {}", entity.name());
            InsertOutcome::Discarded
        };
        self.stats.record(outcome);
        Ok(outcome)
    }

    pub fn get(&self, name: &str) -> Option<&EntityIndex> {
        self.entities.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(SmolStr::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityIndex)> {
        self.entities.iter().map(|(name, index)| (name.as_str(), index))
    }

    /// Every occurrence in output order.
    pub fn records(&self) -> impl Iterator<Item = &Occurrence> {
        self.entities.values().flat_map(EntityIndex::records)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn occurrence_count(&self) -> usize {
        self.entities.values().map(EntityIndex::len).sum()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn anonymous(&self) -> &AnonymousNames {
        &self.anonymous
    }

    pub fn next_anonymous_name(&self) -> SmolStr {
        self.anonymous.fresh()
    }
}
