pub mod occurrence;
pub mod pool;

pub use occurrence::{Occurrence, OccurrenceKey, OccurrenceParts};
pub use pool::FilePool;
