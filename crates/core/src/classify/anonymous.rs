use dashmap::DashMap;
use smol_str::{SmolStr, format_smolstr};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Synthetic names for anonymous aggregates, scoped to one indexing session.
///
/// Names are unique within the session but not stable across sessions and
/// must not be persisted. The same declaration site always gets the same name,
/// so a header parsed once per translation unit still deduplicates.
#[derive(Debug)]
pub struct AnonymousNames {
    next: AtomicU64,
    by_site: DashMap<(Arc<str>, u32), SmolStr>,
}

impl Default for AnonymousNames {
    fn default() -> Self {
        Self::new()
    }
}

impl AnonymousNames {
    pub const PREFIX: &'static str = "_anon_";

    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            by_site: DashMap::new(),
        }
    }

    /// A fresh name, never handed out before in this session.
    pub fn fresh(&self) -> SmolStr {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format_smolstr!("{}{}", Self::PREFIX, n)
    }

    /// The name of the anonymous declaration beginning at `file:offset`.
    pub fn for_site(&self, file: &Arc<str>, offset: u32) -> SmolStr {
        self.by_site
            .entry((file.clone(), offset))
            .or_insert_with(|| self.fresh())
            .clone()
    }

    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}
