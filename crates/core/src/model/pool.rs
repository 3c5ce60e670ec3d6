use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Session-scoped interning pool for file names.
#[derive(Debug, Default)]
pub struct FilePool {
    files: Mutex<HashSet<Arc<str>>>,
}

impl FilePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, file: &str) -> Arc<str> {
        let mut pool = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = pool.get(file) {
            existing.clone()
        } else {
            let interned: Arc<str> = Arc::from(file);
            pool.insert(interned.clone());
            interned
        }
    }

    pub fn len(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
