//! Turns raw parser cursors into [`Occurrence`]s.

pub mod anonymous;
pub mod scope;

pub use anonymous::AnonymousNames;
pub use scope::ScopeSynthesizer;

use crate::model::{FilePool, Occurrence, OccurrenceParts};
use crate::validate::is_valid_identifier;
use smol_str::SmolStr;
use xrefscope_api::models::{EntityKind, Extent, Location, PositionConvention};
use xrefscope_plugin::{CursorConvention, RawCursorRecord, RawLocation};

pub struct Classifier<'a> {
    convention: &'a dyn CursorConvention,
    positions: PositionConvention,
    files: &'a FilePool,
    anonymous: &'a AnonymousNames,
}

impl<'a> Classifier<'a> {
    pub fn new(
        convention: &'a dyn CursorConvention,
        positions: PositionConvention,
        files: &'a FilePool,
        anonymous: &'a AnonymousNames,
    ) -> Self {
        Self {
            convention,
            positions,
            files,
            anonymous,
        }
    }

    /// Build the occurrence for `raw`, or `None` when the cursor is not
    /// something the index tracks.
    ///
    /// Cursors of unregistered kinds are skipped. So are unnamed cursors,
    /// except type declarations: those are anonymous aggregates and get a
    /// synthetic session-scoped name. Spellings that are not plain
    /// identifiers (`~Worker`, `operator==`) are skipped too; references
    /// spelled with an elaborated or qualified type (`class N::Foo`) are
    /// indexed under their last segment.
    pub fn classify(&self, raw: &RawCursorRecord) -> Option<Occurrence> {
        let Some(class) = self.convention.classify_kind(&raw.kind) else {
            tracing::trace!("skipping unindexed cursor kind {}", raw.kind);
            return None;
        };

        let role = if raw.is_definition {
            class.role.upgrade_for_definition()
        } else {
            class.role
        };

        let begin = self.location(&raw.begin);
        let end = self.location(&raw.end);

        let (name, anonymous) = if !raw.spelling.is_empty() {
            let spelled = if role.is_reference() {
                bare_name(&raw.spelling)
            } else {
                raw.spelling.as_str()
            };
            if !is_valid_identifier(spelled) {
                tracing::trace!(
                    "skipping {} `{}` at {}:{}: not an identifier",
                    raw.kind,
                    raw.spelling,
                    begin.file,
                    begin.offset
                );
                return None;
            }
            (SmolStr::new(spelled), false)
        } else if class.entity == EntityKind::Type && !role.is_reference() {
            (self.anonymous.for_site(&begin.file, begin.offset), true)
        } else {
            tracing::trace!(
                "skipping unnamed {} at {}:{}",
                raw.kind,
                begin.file,
                begin.offset
            );
            return None;
        };

        let scopes = ScopeSynthesizer::new(self.convention);
        let scope = scopes.scope_of(raw);
        let ref_scope = if role.is_reference() {
            scopes.ref_scope_of(raw)
        } else {
            String::new()
        };

        Some(Occurrence::from_parts(OccurrenceParts {
            kind: class.entity,
            role,
            extent: Extent::new(begin, end),
            name,
            scope,
            ref_scope,
            type_spelling: raw.type_spelling.clone(),
            anonymous,
            symbol_id: raw.usr.clone(),
        }))
    }

    fn location(&self, raw: &RawLocation) -> Location {
        self.positions
            .normalize(self.files.intern(&raw.file), raw.offset, raw.line, raw.column)
    }
}

/// `struct Point` -> `Point`, `class N::Foo` -> `Foo`.
fn bare_name(spelling: &str) -> &str {
    let unqualified = ["struct ", "class ", "union ", "enum "]
        .iter()
        .find_map(|keyword| spelling.strip_prefix(keyword))
        .unwrap_or(spelling);
    unqualified
        .rsplit("::")
        .next()
        .unwrap_or(unqualified)
        .trim()
}
