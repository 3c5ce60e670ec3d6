use crate::error::ApiError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an indexed entity is. Serialized as the record's "specifier" field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Type,
    Variable,
    Function,
    Macro,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Type,
        EntityKind::Variable,
        EntityKind::Function,
        EntityKind::Macro,
    ];

    /// The entity family an index bucket is bound to.
    pub fn specifier(self) -> Specifier {
        match self {
            EntityKind::Type => Specifier::Type,
            EntityKind::Variable | EntityKind::Function => Specifier::Value,
            EntityKind::Macro => Specifier::Macro,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Type => "type",
            EntityKind::Variable => "variable",
            EntityKind::Function => "function",
            EntityKind::Macro => "macro",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ApiError::UnknownTag {
                what: "specifier",
                value: s.to_string(),
            })
    }
}

/// Entity family. An entity index only ever holds occurrences of one specifier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Specifier {
    Type,
    Value,
    Macro,
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Specifier::Type => "type",
            Specifier::Value => "value",
            Specifier::Macro => "macro",
        })
    }
}

/// Syntactic nature of one occurrence.
///
/// `Definition` refines `Declaration` and `Call` refines `Reference`, but each
/// keeps its own role in the index and in output.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityRole {
    Declaration,
    Definition,
    Reference,
    Call,
}

impl EntityRole {
    pub const ALL: [EntityRole; 4] = [
        EntityRole::Declaration,
        EntityRole::Definition,
        EntityRole::Reference,
        EntityRole::Call,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityRole::Declaration => "declaration",
            EntityRole::Definition => "definition",
            EntityRole::Reference => "reference",
            EntityRole::Call => "call",
        }
    }

    /// References and calls point at another entity.
    pub fn is_reference(self) -> bool {
        matches!(self, EntityRole::Reference | EntityRole::Call)
    }

    /// A definition site upgrades a declaration; references are never upgraded.
    pub fn upgrade_for_definition(self) -> Self {
        match self {
            EntityRole::Declaration => EntityRole::Definition,
            other => other,
        }
    }
}

impl fmt::Display for EntityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityRole {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityRole::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ApiError::UnknownTag {
                what: "role",
                value: s.to_string(),
            })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    External,
    /// File-local (`static`) linkage; scopes get a `>` prefix.
    Internal,
    #[default]
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specifier_families() {
        assert_eq!(EntityKind::Type.specifier(), Specifier::Type);
        assert_eq!(EntityKind::Variable.specifier(), Specifier::Value);
        assert_eq!(EntityKind::Function.specifier(), Specifier::Value);
        assert_eq!(EntityKind::Macro.specifier(), Specifier::Macro);
    }

    #[test]
    fn test_definition_upgrade_only_applies_to_declarations() {
        assert_eq!(
            EntityRole::Declaration.upgrade_for_definition(),
            EntityRole::Definition
        );
        assert_eq!(
            EntityRole::Reference.upgrade_for_definition(),
            EntityRole::Reference
        );
        assert_eq!(EntityRole::Call.upgrade_for_definition(), EntityRole::Call);
    }

    #[test]
    fn test_unknown_tags_are_rejected() {
        assert!("class".parse::<EntityKind>().is_err());
        assert!("use".parse::<EntityRole>().is_err());
        assert_eq!("call".parse::<EntityRole>().unwrap(), EntityRole::Call);
    }
}
