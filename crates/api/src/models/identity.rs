use super::entity::Specifier;
use super::location::Location;
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

/// Identity of an entity that is equal across translation units.
///
/// `Surrogate` is used when the parser has no stable symbol id. It cannot merge
/// textually different expansion sites of the same entity, e.g. code
/// generated by macros.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CrossUnitId {
    Symbol(Arc<str>),
    Surrogate {
        specifier: Specifier,
        name: SmolStr,
        file: Arc<str>,
        offset: u32,
    },
}

impl CrossUnitId {
    /// Prefer the parser's symbol id; fall back to the location surrogate.
    pub fn resolve(
        symbol_id: Option<&str>,
        specifier: Specifier,
        name: &str,
        begin: &Location,
    ) -> Self {
        match symbol_id {
            Some(id) if !id.is_empty() => CrossUnitId::Symbol(Arc::from(id)),
            _ => CrossUnitId::Surrogate {
                specifier,
                name: SmolStr::new(name),
                file: begin.file.clone(),
                offset: begin.offset,
            },
        }
    }

    pub fn is_surrogate(&self) -> bool {
        matches!(self, CrossUnitId::Surrogate { .. })
    }
}

impl fmt::Display for CrossUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossUnitId::Symbol(id) => f.write_str(id),
            CrossUnitId::Surrogate {
                specifier,
                name,
                file,
                offset,
            } => write!(f, "{specifier}:{name}@{file}:{offset}"),
        }
    }
}
