//! Cross-reference indexing for C-family translation units.
//!
//! Raw parser cursors are classified into occurrences, validated against the
//! output grammar, deduplicated into a name-keyed index and emitted as a
//! line-oriented record stream.

pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod model;
pub mod output;
pub mod session;
pub mod validate;

pub use classify::{AnonymousNames, Classifier, ScopeSynthesizer};
pub use config::{CollisionPolicy, IndexConfig};
pub use error::{Result, XrefError};
pub use index::{EntityIndex, GlobalIndex, IndexStats, InsertOutcome, SharedIndex};
pub use model::{FilePool, Occurrence, OccurrenceKey};
pub use output::{OutputFormat, RecordWriter, read_records};
pub use session::{Collision, IndexSession, RECORD_UNIT, UnitReport};
pub use validate::{InvalidField, ValidityError, Validator};
