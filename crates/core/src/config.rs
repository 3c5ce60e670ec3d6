use crate::error::{Result, XrefError};
use crate::output::OutputFormat;
use crate::validate::Validator;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use xrefscope_api::models::{EntityKind, PositionConvention};

pub const ENV_DIAGNOSTICS: &str = "XREFSCOPE_DIAGNOSTICS";
pub const ENV_COLLISIONS: &str = "XREFSCOPE_COLLISIONS";
pub const ENV_OUTPUT: &str = "XREFSCOPE_OUTPUT";

/// What a session does when one name is used for two specifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail the session with the collision error.
    #[default]
    Abort,
    /// Log and record the collision, drop the occurrence, keep indexing.
    Report,
}

impl FromStr for CollisionPolicy {
    type Err = XrefError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(CollisionPolicy::Abort),
            "report" => Ok(CollisionPolicy::Report),
            other => Err(XrefError::Config(format!("unknown collision policy: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Native position bases of the parser feeding the session.
    pub positions: PositionConvention,
    /// Kinds whose occurrences may have an empty type spelling.
    pub untyped_kinds: Vec<EntityKind>,
    /// Log every invalid field instead of stopping at the first.
    pub diagnostics: bool,
    pub collisions: CollisionPolicy,
    pub output: OutputFormat,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            positions: PositionConvention::default(),
            untyped_kinds: vec![EntityKind::Type],
            diagnostics: false,
            collisions: CollisionPolicy::Abort,
            output: OutputFormat::Csv,
        }
    }
}

impl IndexConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Defaults overridden by `XREFSCOPE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DIAGNOSTICS) {
            self.diagnostics = parse_flag(ENV_DIAGNOSTICS, &value)?;
        }
        if let Some(value) = lookup(ENV_COLLISIONS) {
            self.collisions = value.parse()?;
        }
        if let Some(value) = lookup(ENV_OUTPUT) {
            self.output = value.parse()?;
        }
        Ok(self)
    }

    /// Allow untyped macro occurrences. Pair with
    /// `TableConvention::with_macros`.
    pub fn with_macros(mut self) -> Self {
        if !self.untyped_kinds.contains(&EntityKind::Macro) {
            self.untyped_kinds.push(EntityKind::Macro);
        }
        self
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.untyped_kinds.clone(), self.diagnostics)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(XrefError::Config(format!("{key}: expected a boolean, got {other}"))),
    }
}
