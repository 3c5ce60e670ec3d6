use crate::cursor::CursorKind;
use std::collections::HashMap;
use std::fmt::Debug;
use xrefscope_api::models::{EntityKind, EntityRole};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConventionError {
    #[error("cursor kind {kind} is already classified as {existing:?}")]
    DuplicateKind { kind: CursorKind, existing: KindClass },
    #[error("cursor kind {kind} is already a scope kind with suffix {existing:?}")]
    DuplicateScope {
        kind: CursorKind,
        existing: ScopeSuffix,
    },
    #[error("{entity} cannot be registered as a {table}")]
    WrongFamily {
        entity: EntityKind,
        table: &'static str,
    },
}

/// The occurrence a cursor kind produces before the definition upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindClass {
    pub entity: EntityKind,
    pub role: EntityRole,
}

impl KindClass {
    pub const fn new(entity: EntityKind, role: EntityRole) -> Self {
        Self { entity, role }
    }
}

/// Separator appended after the name of a scope-introducing ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeSuffix {
    /// Functions and methods: `@`.
    Function,
    /// Namespaces, classes and other aggregates: `::`.
    Namespace,
}

impl ScopeSuffix {
    pub const ALL: [ScopeSuffix; 2] = [ScopeSuffix::Namespace, ScopeSuffix::Function];

    pub fn as_str(self) -> &'static str {
        match self {
            ScopeSuffix::Function => "@",
            ScopeSuffix::Namespace => "::",
        }
    }
}

/// Language-specific knowledge the indexer needs about cursor kinds.
pub trait CursorConvention: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Which entity and role a cursor of this kind is, if it is indexed at all.
    fn classify_kind(&self, kind: &CursorKind) -> Option<KindClass>;

    /// Suffix contributed to scope paths by an ancestor of this kind, if it
    /// introduces a scope.
    fn scope_suffix(&self, kind: &CursorKind) -> Option<ScopeSuffix>;
}

/// Table-driven convention.
///
/// Occurrence kinds live in one map, so the type-declaration, value-declaration,
/// type-reference and value-reference tables are disjoint by construction and
/// a second registration of a kind is refused. Scope kinds are a separate table:
/// a function declaration is both indexed and scope-introducing.
#[derive(Debug, Clone)]
pub struct TableConvention {
    name: String,
    kinds: HashMap<CursorKind, KindClass>,
    scopes: HashMap<CursorKind, ScopeSuffix>,
}

fn c_family_kinds() -> [(CursorKind, KindClass); 17] {
    [
        (CursorKind::ENUM_DECL, KindClass::new(EntityKind::Type, EntityRole::Declaration)),
        (CursorKind::STRUCT_DECL, KindClass::new(EntityKind::Type, EntityRole::Declaration)),
        (CursorKind::UNION_DECL, KindClass::new(EntityKind::Type, EntityRole::Declaration)),
        (CursorKind::CLASS_DECL, KindClass::new(EntityKind::Type, EntityRole::Declaration)),
        (CursorKind::TYPEDEF_DECL, KindClass::new(EntityKind::Type, EntityRole::Declaration)),
        (CursorKind::ENUM_CONSTANT_DECL, KindClass::new(EntityKind::Variable, EntityRole::Declaration)),
        (CursorKind::FIELD_DECL, KindClass::new(EntityKind::Variable, EntityRole::Declaration)),
        (CursorKind::VAR_DECL, KindClass::new(EntityKind::Variable, EntityRole::Declaration)),
        (CursorKind::PARM_DECL, KindClass::new(EntityKind::Variable, EntityRole::Declaration)),
        (CursorKind::FUNCTION_DECL, KindClass::new(EntityKind::Function, EntityRole::Declaration)),
        (CursorKind::CXX_METHOD, KindClass::new(EntityKind::Function, EntityRole::Declaration)),
        (CursorKind::CONSTRUCTOR, KindClass::new(EntityKind::Function, EntityRole::Declaration)),
        (CursorKind::TYPE_REF, KindClass::new(EntityKind::Type, EntityRole::Reference)),
        (CursorKind::VARIABLE_REF, KindClass::new(EntityKind::Variable, EntityRole::Reference)),
        (CursorKind::DECL_REF_EXPR, KindClass::new(EntityKind::Variable, EntityRole::Reference)),
        (CursorKind::MEMBER_REF_EXPR, KindClass::new(EntityKind::Variable, EntityRole::Reference)),
        (CursorKind::CALL_EXPR, KindClass::new(EntityKind::Function, EntityRole::Call)),
    ]
}

fn c_family_scopes() -> [(CursorKind, ScopeSuffix); 10] {
    [
        (CursorKind::NAMESPACE, ScopeSuffix::Namespace),
        (CursorKind::STRUCT_DECL, ScopeSuffix::Namespace),
        (CursorKind::UNION_DECL, ScopeSuffix::Namespace),
        (CursorKind::CLASS_DECL, ScopeSuffix::Namespace),
        (CursorKind::CLASS_TEMPLATE, ScopeSuffix::Namespace),
        (CursorKind::FUNCTION_DECL, ScopeSuffix::Function),
        (CursorKind::FUNCTION_TEMPLATE, ScopeSuffix::Function),
        (CursorKind::CXX_METHOD, ScopeSuffix::Function),
        (CursorKind::CONSTRUCTOR, ScopeSuffix::Function),
        (CursorKind::DESTRUCTOR, ScopeSuffix::Function),
    ]
}

impl TableConvention {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kinds: HashMap::new(),
            scopes: HashMap::new(),
        }
    }

    /// Preset for C and C++ as seen through libclang. Macros are not included;
    /// see [`TableConvention::with_macros`].
    pub fn c_family() -> Self {
        Self {
            name: "c-family".to_string(),
            kinds: c_family_kinds().into_iter().collect(),
            scopes: c_family_scopes().into_iter().collect(),
        }
    }

    /// Also index macro definitions and expansions.
    ///
    /// Macro occurrences carry no type spelling, so the session config must
    /// allow that; see `IndexConfig::with_macros` in `xrefscope-core`.
    pub fn with_macros(mut self) -> Result<Self, ConventionError> {
        self.macro_definition(CursorKind::MACRO_DEFINITION)?
            .macro_expansion(CursorKind::MACRO_EXPANSION)?;
        Ok(self)
    }

    fn register(&mut self, kind: CursorKind, class: KindClass) -> Result<&mut Self, ConventionError> {
        if let Some(existing) = self.kinds.get(&kind) {
            return Err(ConventionError::DuplicateKind {
                kind,
                existing: *existing,
            });
        }
        self.kinds.insert(kind, class);
        Ok(self)
    }

    pub fn type_declaration(&mut self, kind: CursorKind) -> Result<&mut Self, ConventionError> {
        self.register(kind, KindClass::new(EntityKind::Type, EntityRole::Declaration))
    }

    pub fn type_reference(&mut self, kind: CursorKind) -> Result<&mut Self, ConventionError> {
        self.register(kind, KindClass::new(EntityKind::Type, EntityRole::Reference))
    }

    pub fn value_declaration(
        &mut self,
        kind: CursorKind,
        entity: EntityKind,
    ) -> Result<&mut Self, ConventionError> {
        if !matches!(entity, EntityKind::Variable | EntityKind::Function) {
            return Err(ConventionError::WrongFamily {
                entity,
                table: "value declaration",
            });
        }
        self.register(kind, KindClass::new(entity, EntityRole::Declaration))
    }

    pub fn value_reference(
        &mut self,
        kind: CursorKind,
        entity: EntityKind,
    ) -> Result<&mut Self, ConventionError> {
        if !matches!(entity, EntityKind::Variable | EntityKind::Function) {
            return Err(ConventionError::WrongFamily {
                entity,
                table: "value reference",
            });
        }
        self.register(kind, KindClass::new(entity, EntityRole::Reference))
    }

    /// A call of a function; stored with the references but reported as `call`.
    pub fn call(&mut self, kind: CursorKind) -> Result<&mut Self, ConventionError> {
        self.register(kind, KindClass::new(EntityKind::Function, EntityRole::Call))
    }

    pub fn macro_definition(&mut self, kind: CursorKind) -> Result<&mut Self, ConventionError> {
        self.register(kind, KindClass::new(EntityKind::Macro, EntityRole::Definition))
    }

    pub fn macro_expansion(&mut self, kind: CursorKind) -> Result<&mut Self, ConventionError> {
        self.register(kind, KindClass::new(EntityKind::Macro, EntityRole::Reference))
    }

    pub fn scope(
        &mut self,
        kind: CursorKind,
        suffix: ScopeSuffix,
    ) -> Result<&mut Self, ConventionError> {
        match self.scopes.get(&kind) {
            Some(existing) if *existing != suffix => Err(ConventionError::DuplicateScope {
                kind,
                existing: *existing,
            }),
            _ => {
                self.scopes.insert(kind, suffix);
                Ok(self)
            }
        }
    }
}

impl CursorConvention for TableConvention {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify_kind(&self, kind: &CursorKind) -> Option<KindClass> {
        self.kinds.get(kind).copied()
    }

    fn scope_suffix(&self, kind: &CursorKind) -> Option<ScopeSuffix> {
        self.scopes.get(kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_c_family_tables_are_disjoint() {
        let kinds = c_family_kinds();
        let unique: HashSet<_> = kinds.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(unique.len(), kinds.len());
        let scopes = c_family_scopes();
        let unique: HashSet<_> = scopes.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(unique.len(), scopes.len());
    }

    #[test]
    fn test_c_family_classification() {
        let conv = TableConvention::c_family();
        assert_eq!(
            conv.classify_kind(&CursorKind::PARM_DECL),
            Some(KindClass::new(EntityKind::Variable, EntityRole::Declaration))
        );
        assert_eq!(
            conv.classify_kind(&CursorKind::CALL_EXPR),
            Some(KindClass::new(EntityKind::Function, EntityRole::Call))
        );
        assert_eq!(conv.classify_kind(&CursorKind::NAMESPACE), None);
        assert_eq!(conv.classify_kind(&CursorKind::MACRO_EXPANSION), None);
        assert_eq!(
            conv.scope_suffix(&CursorKind::FUNCTION_DECL),
            Some(ScopeSuffix::Function)
        );
        assert_eq!(
            conv.scope_suffix(&CursorKind::NAMESPACE),
            Some(ScopeSuffix::Namespace)
        );
        assert_eq!(conv.scope_suffix(&CursorKind::VAR_DECL), None);
    }

    #[test]
    fn test_destructor_only_introduces_a_scope() {
        let conv = TableConvention::c_family();
        assert_eq!(conv.classify_kind(&CursorKind::DESTRUCTOR), None);
        assert_eq!(
            conv.scope_suffix(&CursorKind::DESTRUCTOR),
            Some(ScopeSuffix::Function)
        );
    }

    #[test]
    fn test_kind_registered_twice_is_refused() {
        let mut conv = TableConvention::c_family();
        let err = conv.type_reference(CursorKind::DECL_REF_EXPR).unwrap_err();
        assert!(matches!(err, ConventionError::DuplicateKind { .. }));
    }

    #[test]
    fn test_value_tables_refuse_types() {
        let mut conv = TableConvention::new("test");
        let err = conv
            .value_declaration(CursorKind::new("Thing"), EntityKind::Type)
            .unwrap_err();
        assert!(matches!(err, ConventionError::WrongFamily { .. }));
    }

    #[test]
    fn test_with_macros() {
        let conv = TableConvention::c_family().with_macros().unwrap();
        assert_eq!(
            conv.classify_kind(&CursorKind::MACRO_DEFINITION),
            Some(KindClass::new(EntityKind::Macro, EntityRole::Definition))
        );
        assert!(TableConvention::c_family()
            .with_macros()
            .unwrap()
            .with_macros()
            .is_err());
    }

    #[test]
    fn test_scope_suffix_conflict() {
        let mut conv = TableConvention::new("test");
        conv.scope(CursorKind::new("Block"), ScopeSuffix::Function)
            .unwrap();
        assert!(conv
            .scope(CursorKind::new("Block"), ScopeSuffix::Function)
            .is_ok());
        assert!(conv
            .scope(CursorKind::new("Block"), ScopeSuffix::Namespace)
            .is_err());
    }
}
