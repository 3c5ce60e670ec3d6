//! Scope-path synthesis.
//!
//! A scope path is the canonical qualified-name prefix of an occurrence:
//! `>?::` followed by one `name::` or `name@` segment per enclosing
//! scope-introducing ancestor, outermost first. `>` marks internal linkage,
//! `::` a namespace or class-like scope, `@` a function.

use crate::validate::is_valid_identifier;
use xrefscope_api::models::Linkage;
use xrefscope_plugin::{CursorConvention, RawCursorRecord};

pub struct ScopeSynthesizer<'a> {
    convention: &'a dyn CursorConvention,
}

impl<'a> ScopeSynthesizer<'a> {
    pub fn new(convention: &'a dyn CursorConvention) -> Self {
        Self { convention }
    }

    /// Scope path of the record itself.
    ///
    /// Ancestors whose kind introduces no scope are skipped, as are unnamed
    /// ones (anonymous namespaces and aggregates) and ones whose name is not
    /// an identifier (destructors, operators).
    pub fn scope_of(&self, record: &RawCursorRecord) -> String {
        let segments: Vec<(&str, &'static str)> = record
            .parents
            .iter()
            .filter(|parent| is_valid_identifier(&parent.name))
            .filter_map(|parent| {
                self.convention
                    .scope_suffix(&parent.kind)
                    .map(|suffix| (parent.name.as_str(), suffix.as_str()))
            })
            .collect();

        let mut scope = String::new();
        if record.linkage == Linkage::Internal {
            scope.push('>');
        }
        scope.push_str("::");
        // parents are innermost first
        for (name, suffix) in segments.iter().rev() {
            scope.push_str(name);
            scope.push_str(suffix);
        }
        scope
    }

    /// Scope path of the entity the record refers to, or empty when the
    /// parser could not resolve a target.
    pub fn ref_scope_of(&self, record: &RawCursorRecord) -> String {
        record
            .referenced
            .as_deref()
            .map(|target| self.scope_of(target))
            .unwrap_or_default()
    }
}
