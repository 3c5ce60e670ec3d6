use smol_str::SmolStr;
use std::sync::Arc;
use xrefscope_api::models::{
    CrossUnitId, EntityKind, EntityRole, Extent, IndexRecord, Location, Specifier,
};

/// Everything needed to build an [`Occurrence`].
#[derive(Debug, Clone)]
pub struct OccurrenceParts {
    pub kind: EntityKind,
    pub role: EntityRole,
    pub extent: Extent,
    pub name: SmolStr,
    pub scope: String,
    pub ref_scope: String,
    pub type_spelling: String,
    pub anonymous: bool,
    /// Parser-supplied stable symbol id, if any.
    pub symbol_id: Option<String>,
}

/// One indexed syntactic occurrence of an entity. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    kind: EntityKind,
    role: EntityRole,
    extent: Extent,
    name: SmolStr,
    scope: String,
    ref_scope: String,
    type_spelling: String,
    anonymous: bool,
    identity: CrossUnitId,
}

/// Dedup key of an occurrence inside an entity index.
///
/// A symbol id names the entity, not the site, so the key pairs it with the
/// begin site and the role. Field order makes the derived ordering the index's
/// location ordering: file, then byte offset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccurrenceKey {
    pub file: Arc<str>,
    pub offset: u32,
    pub role: EntityRole,
    pub identity: CrossUnitId,
}

impl Occurrence {
    pub fn from_parts(parts: OccurrenceParts) -> Self {
        let identity = CrossUnitId::resolve(
            parts.symbol_id.as_deref(),
            parts.kind.specifier(),
            &parts.name,
            &parts.extent.begin,
        );
        Self {
            kind: parts.kind,
            role: parts.role,
            extent: parts.extent,
            name: parts.name,
            scope: parts.scope,
            ref_scope: parts.ref_scope,
            type_spelling: parts.type_spelling,
            anonymous: parts.anonymous,
            identity,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn specifier(&self) -> Specifier {
        self.kind.specifier()
    }

    pub fn role(&self) -> EntityRole {
        self.role
    }

    pub fn begin(&self) -> &Location {
        &self.extent.begin
    }

    pub fn end(&self) -> &Location {
        &self.extent.end
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Scope of the referenced entity; empty for declarations and definitions.
    pub fn ref_scope(&self) -> &str {
        &self.ref_scope
    }

    pub fn type_spelling(&self) -> &str {
        &self.type_spelling
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn identity(&self) -> &CrossUnitId {
        &self.identity
    }

    pub fn key(&self) -> OccurrenceKey {
        OccurrenceKey {
            file: self.extent.begin.file.clone(),
            offset: self.extent.begin.offset,
            role: self.role,
            identity: self.identity.clone(),
        }
    }

    pub fn to_record(&self) -> IndexRecord {
        let begin = &self.extent.begin;
        let end = &self.extent.end;
        IndexRecord {
            begin_file: begin.file.to_string(),
            begin_offset: begin.offset,
            begin_line: begin.line,
            begin_column: begin.column,
            end_file: end.file.to_string(),
            end_offset: end.offset,
            end_line: end.line,
            end_column: end.column,
            role: self.role,
            specifier: self.kind,
            type_spelling: self.type_spelling.clone(),
            name: self.name.to_string(),
            scope: self.scope.clone(),
            ref_scope: self.ref_scope.clone(),
        }
    }
}
