//! Contract between the indexer and an external source parser.
//!
//! A parser adapter supplies [`RawCursorRecord`]s through a [`CursorSource`]
//! and describes its cursor kinds with a [`CursorConvention`].

pub mod convention;
pub mod cursor;
pub mod source;

pub use convention::{ConventionError, CursorConvention, KindClass, ScopeSuffix, TableConvention};
pub use cursor::{CursorKind, RawCursorRecord, RawLocation, SemanticParent};
pub use source::{CursorSource, JsonLinesSource, RecordedUnit};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
