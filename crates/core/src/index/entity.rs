use crate::error::{Result, XrefError};
use crate::model::{Occurrence, OccurrenceKey};
use std::collections::{BTreeMap, HashSet};
use xrefscope_api::models::{EntityRole, Specifier};

/// All occurrences of one entity name.
///
/// The index is bound to the specifier of the first occurrence it received.
/// Every collection is keyed by [`OccurrenceKey`], so iteration follows
/// location order.
#[derive(Debug, Clone)]
pub struct EntityIndex {
    name: String,
    specifier: Specifier,
    members: HashSet<OccurrenceKey>,
    declarations: BTreeMap<OccurrenceKey, Occurrence>,
    definitions: BTreeMap<OccurrenceKey, Occurrence>,
    references: BTreeMap<OccurrenceKey, Occurrence>,
}

impl EntityIndex {
    pub fn new(name: impl Into<String>, specifier: Specifier) -> Self {
        Self {
            name: name.into(),
            specifier,
            members: HashSet::new(),
            declarations: BTreeMap::new(),
            definitions: BTreeMap::new(),
            references: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specifier(&self) -> Specifier {
        self.specifier
    }

    /// True when `key` was already present. Otherwise records it and returns
    /// false, so a check followed by an insert is a single step.
    pub fn exists_and_registers(&mut self, key: &OccurrenceKey) -> bool {
        if self.members.contains(key) {
            return true;
        }
        self.members.insert(key.clone());
        false
    }

    pub fn add_declaration(&mut self, occurrence: Occurrence) -> Result<bool> {
        self.store(occurrence, Collection::Declarations)
    }

    pub fn add_definition(&mut self, occurrence: Occurrence) -> Result<bool> {
        self.store(occurrence, Collection::Definitions)
    }

    /// Calls are stored here as well and keep their own role.
    pub fn add_reference(&mut self, occurrence: Occurrence) -> Result<bool> {
        self.store(occurrence, Collection::References)
    }

    /// Route by role. `Ok(false)` means the occurrence was a duplicate.
    pub fn admit(&mut self, occurrence: Occurrence) -> Result<bool> {
        match occurrence.role() {
            EntityRole::Declaration => self.add_declaration(occurrence),
            EntityRole::Definition => self.add_definition(occurrence),
            EntityRole::Reference | EntityRole::Call => self.add_reference(occurrence),
        }
    }

    fn store(&mut self, occurrence: Occurrence, into: Collection) -> Result<bool> {
        if occurrence.specifier() != self.specifier {
            return Err(XrefError::SpecifierCollision {
                name: self.name.clone(),
                bound: self.specifier,
                offered: occurrence.specifier(),
            });
        }

        let key = occurrence.key();
        if self.exists_and_registers(&key) {
            return Ok(false);
        }

        let collection = match into {
            Collection::Declarations => &mut self.declarations,
            Collection::Definitions => &mut self.definitions,
            Collection::References => &mut self.references,
        };
        collection.insert(key, occurrence);
        Ok(true)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Occurrence> {
        self.declarations.values()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Occurrence> {
        self.definitions.values()
    }

    pub fn references(&self) -> impl Iterator<Item = &Occurrence> {
        self.references.values()
    }

    /// Declarations, then definitions, then references.
    pub fn records(&self) -> impl Iterator<Item = &Occurrence> {
        self.declarations()
            .chain(self.definitions())
            .chain(self.references())
    }

    pub fn len(&self) -> usize {
        self.declarations.len() + self.definitions.len() + self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy)]
enum Collection {
    Declarations,
    Definitions,
    References,
}
