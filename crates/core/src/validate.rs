//! Output grammar checks.
//!
//! A record that fails here was produced by a bug in classification or scope
//! synthesis, so failure is fatal to the session.
//!
//! ```text
//! identifier := [A-Za-z_][A-Za-z0-9_]*
//! scope      := ">"? "::" ( identifier ( "::" | "@" ) )*
//! ```

use crate::model::Occurrence;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use xrefscope_api::models::{EntityKind, IndexRecord};
use xrefscope_plugin::ScopeSuffix;

pub const IDENTIFIER_PATTERN: &str = "[A-Za-z_][A-Za-z0-9_]*";

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{IDENTIFIER_PATTERN}$")).expect("identifier grammar must compile")
});

static SCOPE_RE: Lazy<Regex> = Lazy::new(|| {
    let suffixes: Vec<String> = ScopeSuffix::ALL
        .iter()
        .map(|s| regex::escape(s.as_str()))
        .collect();
    let pattern = format!("^>?::(?:{IDENTIFIER_PATTERN}(?:{}))*$", suffixes.join("|"));
    Regex::new(&pattern).expect("scope grammar must compile")
});

pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

/// Every occurrence has a scope; the shortest is `::`.
pub fn is_valid_scope(s: &str) -> bool {
    SCOPE_RE.is_match(s)
}

/// Empty means no target: a declaration, or an unresolved reference.
pub fn is_valid_ref_scope(s: &str) -> bool {
    s.is_empty() || is_valid_scope(s)
}

/// File names end up unquoted in a comma-separated line.
pub fn is_valid_filename(s: &str) -> bool {
    !s.contains(['\0', ',', '\n'])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidField {
    BeginFile,
    EndFile,
    Type,
    Name,
    Scope,
    RefScope,
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidField::BeginFile => "invalid begin filename",
            InvalidField::EndFile => "invalid end filename",
            InvalidField::Type => "invalid type",
            InvalidField::Name => "invalid name",
            InvalidField::Scope => "invalid scope",
            InvalidField::RefScope => "invalid ref scope",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} failed at {record}", join_fields(.fields))]
pub struct ValidityError {
    pub fields: Vec<InvalidField>,
    /// The offending record, serialized.
    pub record: String,
}

fn join_fields(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Role and specifier need no check here: both are closed enums, and parsing
/// a record rejects unknown tags.
#[derive(Debug, Clone)]
pub struct Validator {
    untyped: Vec<EntityKind>,
    diagnostics: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(vec![EntityKind::Type], false)
    }
}

impl Validator {
    /// `untyped` lists the kinds allowed to have an empty type spelling.
    /// In diagnostic mode every failing field is logged and reported instead
    /// of stopping at the first.
    pub fn new(untyped: Vec<EntityKind>, diagnostics: bool) -> Self {
        Self {
            untyped,
            diagnostics,
        }
    }

    pub fn check(&self, occurrence: &Occurrence) -> Result<(), ValidityError> {
        let view = FieldView {
            kind: occurrence.kind(),
            type_spelling: occurrence.type_spelling(),
            name: occurrence.name(),
            begin_file: &occurrence.begin().file,
            end_file: &occurrence.end().file,
            scope: occurrence.scope(),
            ref_scope: occurrence.ref_scope(),
        };
        self.check_view(&view, || occurrence.to_record().to_string())
    }

    pub fn check_record(&self, record: &IndexRecord) -> Result<(), ValidityError> {
        let view = FieldView {
            kind: record.specifier,
            type_spelling: &record.type_spelling,
            name: &record.name,
            begin_file: &record.begin_file,
            end_file: &record.end_file,
            scope: &record.scope,
            ref_scope: &record.ref_scope,
        };
        self.check_view(&view, || record.to_string())
    }

    fn check_view(
        &self,
        view: &FieldView<'_>,
        render: impl FnOnce() -> String,
    ) -> Result<(), ValidityError> {
        let checks = [
            (InvalidField::BeginFile, is_valid_filename(view.begin_file)),
            (InvalidField::EndFile, is_valid_filename(view.end_file)),
            (InvalidField::Type, self.is_valid_type(view.kind, view.type_spelling)),
            (InvalidField::Name, is_valid_identifier(view.name)),
            (InvalidField::Scope, is_valid_scope(view.scope)),
            (InvalidField::RefScope, is_valid_ref_scope(view.ref_scope)),
        ];

        let mut fields = Vec::new();
        for (field, ok) in checks {
            if ok {
                continue;
            }
            fields.push(field);
            if !self.diagnostics {
                break;
            }
            tracing::error!("{}", field);
        }

        if fields.is_empty() {
            return Ok(());
        }
        let record = render();
        if self.diagnostics {
            tracing::error!("failed at {}", record);
        }
        Err(ValidityError { fields, record })
    }

    fn is_valid_type(&self, kind: EntityKind, type_spelling: &str) -> bool {
        if type_spelling.contains('\n') {
            return false;
        }
        self.untyped.contains(&kind) || !type_spelling.is_empty()
    }
}

struct FieldView<'a> {
    kind: EntityKind,
    type_spelling: &'a str,
    name: &'a str,
    begin_file: &'a str,
    end_file: &'a str,
    scope: &'a str,
    ref_scope: &'a str,
}
