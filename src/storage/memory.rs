//! In-process blob store

use std::collections::HashMap;
use std::sync::RwLock;

use super::{BlobKey, BlobStore};
use crate::error::{FinanceError, FinanceResult};

/// Blob store backed by a map; contents vanish with the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<BlobKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs written so far
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &BlobKey) -> FinanceResult<Option<String>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &BlobKey, contents: &str) -> FinanceResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        blobs.insert(key.clone(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BlobKind;

    #[test]
    fn test_round_trip_and_isolation() {
        let store = MemoryStore::new();
        let alice = BlobKey::for_user(BlobKind::Expenses, "alice");
        let bob = BlobKey::for_user(BlobKind::Expenses, "bob");

        store.put(&alice, "[1]").unwrap();

        assert_eq!(store.get(&alice).unwrap().as_deref(), Some("[1]"));
        assert!(store.get(&bob).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }
}
