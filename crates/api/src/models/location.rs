use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// A resolved source position. Offset, line and column are all 1-based.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    #[serde(with = "crate::models::util::serde_arc_str")]
    pub file: Arc<str>,
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: Arc<str>, offset: u32, line: u32, column: u32) -> Self {
        Self {
            file,
            offset,
            line,
            column,
        }
    }

    /// Ordering used by the index: file name, then byte offset.
    pub fn cmp_site(&self, other: &Location) -> Ordering {
        self.file
            .cmp(&other.file)
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extent {
    pub begin: Location,
    pub end: Location,
}

impl Extent {
    pub fn new(begin: Location, end: Location) -> Self {
        Self { begin, end }
    }
}

/// Numbering base of one position component as the parser reports it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PositionBase {
    Zero,
    One,
}

impl PositionBase {
    /// Shift a native value so that it is 1-based.
    pub fn to_one_based(self, value: u32) -> u32 {
        match self {
            PositionBase::Zero => value.saturating_add(1),
            PositionBase::One => value,
        }
    }
}

/// Native numbering bases of a parser. Defaults to libclang's: 0-based byte
/// offsets, 1-based lines and columns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct PositionConvention {
    pub offset: PositionBase,
    pub line: PositionBase,
    pub column: PositionBase,
}

impl Default for PositionConvention {
    fn default() -> Self {
        Self {
            offset: PositionBase::Zero,
            line: PositionBase::One,
            column: PositionBase::One,
        }
    }
}

impl PositionConvention {
    /// Build an output location from native parser values. This is the only
    /// place the base adjustment happens.
    pub fn normalize(&self, file: Arc<str>, offset: u32, line: u32, column: u32) -> Location {
        Location {
            file,
            offset: self.offset.to_one_based(offset),
            line: self.line.to_one_based(line),
            column: self.column.to_one_based(column),
        }
    }
}
